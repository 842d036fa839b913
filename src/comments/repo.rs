use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Comment;

/// Author data copied onto the comment row.
pub struct NewComment<'a> {
    pub recipe_id: Uuid,
    pub user_id: Option<Uuid>,
    pub author_name: &'a str,
    pub author_email: &'a str,
    pub content: &'a str,
    pub rating: Option<i16>,
}

impl Comment {
    pub async fn create(db: &PgPool, new: NewComment<'_>) -> sqlx::Result<Comment> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (recipe_id, user_id, author_name, author_email, content, rating)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, recipe_id, user_id, author_name, content, rating, created_at
            "#,
        )
        .bind(new.recipe_id)
        .bind(new.user_id)
        .bind(new.author_name)
        .bind(new.author_email)
        .bind(new.content)
        .bind(new.rating)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let res = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
