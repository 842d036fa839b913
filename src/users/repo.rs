use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{User, UserSort};
use crate::pagination::{PageRequest, SortDir};

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, roles, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, roles, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a new user with hashed password.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        roles: &[String],
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, roles)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, roles, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(roles)
        .fetch_one(db)
        .await
    }

    pub async fn update_account(
        db: &PgPool,
        id: Uuid,
        email: &str,
        roles: &[String],
    ) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET email = $2, roles = $3, updated_at = now()
             WHERE id = $1
            RETURNING id, email, password_hash, roles, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(roles)
        .fetch_one(db)
        .await
    }

    pub async fn update_password(db: &PgPool, id: Uuid, password_hash: &str) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
               SET password_hash = $2, updated_at = now()
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<bool> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    /// One page of users. `sort` and `dir` only render whitelisted SQL.
    pub async fn list_page(
        db: &PgPool,
        sort: UserSort,
        dir: SortDir,
        req: PageRequest,
    ) -> sqlx::Result<(Vec<User>, i64)> {
        let sql = format!(
            r#"
            SELECT id, email, password_hash, roles, created_at, updated_at
            FROM users
            ORDER BY {} {}, id ASC
            LIMIT $1 OFFSET $2
            "#,
            sort.column(),
            dir.as_sql()
        );
        let rows = sqlx::query_as::<_, User>(&sql)
            .bind(req.limit())
            .bind(req.offset())
            .fetch_all(db)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;

        Ok((rows, total))
    }
}
