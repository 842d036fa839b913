use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::repo_types::{Recipe, RecipeDetailsRow, RecipeSummaryRow, TopRecipeRow};
use crate::pagination::PageRequest;

impl Recipe {
    /// Newest first, across all categories.
    pub async fn latest_page(
        db: &PgPool,
        req: PageRequest,
    ) -> sqlx::Result<(Vec<RecipeSummaryRow>, i64)> {
        let rows = sqlx::query_as::<_, RecipeSummaryRow>(
            r#"
            SELECT r.id, r.title, r.content, r.created_at,
                   c.id AS category_id, c.name AS category_name, c.slug AS category_slug
              FROM recipes r
              JOIN categories c ON c.id = r.category_id
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $1 OFFSET $2
            "#,
        )
        .bind(req.limit())
        .bind(req.offset())
        .fetch_all(db)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(db)
            .await?;

        Ok((rows, total))
    }

    pub async fn latest(db: &PgPool, limit: i64) -> sqlx::Result<Vec<RecipeSummaryRow>> {
        sqlx::query_as::<_, RecipeSummaryRow>(
            r#"
            SELECT r.id, r.title, r.content, r.created_at,
                   c.id AS category_id, c.name AS category_name, c.slug AS category_slug
              FROM recipes r
              JOIN categories c ON c.id = r.category_id
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(db)
        .await
    }

    pub async fn category_page(
        db: &PgPool,
        category_id: Uuid,
        req: PageRequest,
    ) -> sqlx::Result<(Vec<RecipeSummaryRow>, i64)> {
        let rows = sqlx::query_as::<_, RecipeSummaryRow>(
            r#"
            SELECT r.id, r.title, r.content, r.created_at,
                   c.id AS category_id, c.name AS category_name, c.slug AS category_slug
              FROM recipes r
              JOIN categories c ON c.id = r.category_id
             WHERE r.category_id = $1
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $2 OFFSET $3
            "#,
        )
        .bind(category_id)
        .bind(req.limit())
        .bind(req.offset())
        .fetch_all(db)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(db)
            .await?;

        Ok((rows, total))
    }

    pub async fn tag_page(
        db: &PgPool,
        tag_id: Uuid,
        req: PageRequest,
    ) -> sqlx::Result<(Vec<RecipeSummaryRow>, i64)> {
        let rows = sqlx::query_as::<_, RecipeSummaryRow>(
            r#"
            SELECT r.id, r.title, r.content, r.created_at,
                   c.id AS category_id, c.name AS category_name, c.slug AS category_slug
              FROM recipes r
              JOIN categories c ON c.id = r.category_id
              JOIN recipe_tag rt ON rt.recipe_id = r.id
             WHERE rt.tag_id = $1
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $2 OFFSET $3
            "#,
        )
        .bind(tag_id)
        .bind(req.limit())
        .bind(req.offset())
        .fetch_all(db)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipe_tag WHERE tag_id = $1")
            .bind(tag_id)
            .fetch_one(db)
            .await?;

        Ok((rows, total))
    }

    /// Detail view. Comments (newest first) and tags are aggregated as JSON
    /// so the whole view is a single round trip.
    pub async fn find_details(db: &PgPool, id: Uuid) -> sqlx::Result<Option<RecipeDetailsRow>> {
        sqlx::query_as::<_, RecipeDetailsRow>(
            r#"
            SELECT r.id, r.title, r.content, r.created_at, r.updated_at,
                   c.id AS category_id, c.name AS category_name, c.slug AS category_slug,
                   COALESCE((
                       SELECT json_agg(json_build_object(
                                  'id', cm.id,
                                  'user_id', cm.user_id,
                                  'author_name', cm.author_name,
                                  'content', cm.content,
                                  'rating', cm.rating,
                                  'created_at', cm.created_at
                              ) ORDER BY cm.created_at DESC, cm.id DESC)
                         FROM comments cm
                        WHERE cm.recipe_id = r.id
                   ), '[]'::json) AS comments,
                   COALESCE((
                       SELECT json_agg(json_build_object(
                                  'id', t.id,
                                  'name', t.name,
                                  'slug', t.slug
                              ) ORDER BY t.name ASC)
                         FROM recipe_tag rt
                         JOIN tags t ON t.id = rt.tag_id
                        WHERE rt.recipe_id = r.id
                   ), '[]'::json) AS tags
              FROM recipes r
              JOIN categories c ON c.id = r.category_id
             WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Mean of non-null ratings per recipe; unrated recipes are left out.
    pub async fn top_rated(db: &PgPool, limit: i64) -> sqlx::Result<Vec<TopRecipeRow>> {
        sqlx::query_as::<_, TopRecipeRow>(
            r#"
            SELECT r.id, r.title, r.created_at,
                   c.id AS category_id, c.name AS category_name, c.slug AS category_slug,
                   AVG(cm.rating)::FLOAT8 AS avg_rating,
                   COUNT(cm.id) AS ratings_count
              FROM recipes r
              JOIN categories c ON c.id = r.category_id
              LEFT JOIN comments cm ON cm.recipe_id = r.id AND cm.rating IS NOT NULL
             GROUP BY r.id, c.id
            HAVING COUNT(cm.id) > 0
             ORDER BY avg_rating DESC, ratings_count DESC, r.created_at DESC
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(db)
        .await
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM recipes WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await
    }

    pub async fn insert_tx(
        tx: &mut Transaction<'_, Postgres>,
        title: &str,
        content: &str,
        category_id: Uuid,
    ) -> sqlx::Result<Recipe> {
        sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (title, content, category_id)
            VALUES ($1, $2, $3)
            RETURNING id, category_id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(category_id)
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn update_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        title: &str,
        content: &str,
        category_id: Uuid,
    ) -> sqlx::Result<Option<Recipe>> {
        sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
               SET title = $2, content = $3, category_id = $4, updated_at = now()
             WHERE id = $1
            RETURNING id, category_id
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .bind(category_id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Replaces the recipe's tag set.
    pub async fn replace_tags_tx(
        tx: &mut Transaction<'_, Postgres>,
        recipe_id: Uuid,
        tag_ids: &[Uuid],
    ) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM recipe_tag WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut **tx)
            .await?;

        if tag_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO recipe_tag (recipe_id, tag_id)
            SELECT $1, UNNEST($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(recipe_id)
        .bind(tag_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Comments and tag links go with it (ON DELETE CASCADE).
    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let res = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
