use serde::Serialize;
use sqlx::{FromRow, PgPool};

/// Row counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Serialize, FromRow)]
pub struct DashboardCounts {
    pub users: i64,
    pub categories: i64,
    pub recipes: i64,
    pub comments: i64,
    pub tags: i64,
}

impl DashboardCounts {
    pub async fn load(db: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT (SELECT COUNT(*) FROM users)      AS users,
                   (SELECT COUNT(*) FROM categories) AS categories,
                   (SELECT COUNT(*) FROM recipes)    AS recipes,
                   (SELECT COUNT(*) FROM comments)   AS comments,
                   (SELECT COUNT(*) FROM tags)       AS tags
            "#,
        )
        .fetch_one(db)
        .await
    }
}
