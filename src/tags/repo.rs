use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Tag;

impl Tag {
    pub async fn all_ordered(db: &PgPool) -> sqlx::Result<Vec<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT id, name, slug FROM tags ORDER BY name ASC, id ASC")
            .fetch_all(db)
            .await
    }

    pub async fn find_by_slug(db: &PgPool, slug: &str) -> sqlx::Result<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT id, name, slug FROM tags WHERE slug = $1")
            .bind(slug)
            .fetch_optional(db)
            .await
    }

    pub async fn create(db: &PgPool, name: &str, slug: &str) -> sqlx::Result<Tag> {
        sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug
            "#,
        )
        .bind(name)
        .bind(slug)
        .fetch_one(db)
        .await
    }

    pub async fn update(db: &PgPool, id: Uuid, name: &str, slug: &str) -> sqlx::Result<Option<Tag>> {
        sqlx::query_as::<_, Tag>(
            r#"
            UPDATE tags
               SET name = $2, slug = $3
             WHERE id = $1
            RETURNING id, name, slug
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .fetch_optional(db)
        .await
    }

    /// Links to recipes are dropped with it.
    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let res = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
