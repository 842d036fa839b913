use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Category;

impl Category {
    pub async fn all_ordered(db: &PgPool) -> sqlx::Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, created_at, updated_at
            FROM categories
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_slug(db: &PgPool, slug: &str) -> sqlx::Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, created_at, updated_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(db)
        .await
    }

    pub async fn create(db: &PgPool, name: &str, slug: &str) -> sqlx::Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .fetch_one(db)
        .await
    }

    /// `None` when no category has this id.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: &str,
        slug: &str,
    ) -> sqlx::Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
               SET name = $2, slug = $3, updated_at = now()
             WHERE id = $1
            RETURNING id, name, slug, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let res = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
