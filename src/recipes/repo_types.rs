use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

/// Key of a written recipe. Reads go through the joined row types below.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub category_id: Uuid,
}

/// Listing row: a recipe joined with its category.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeSummaryRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub category_id: Uuid,
    pub category_name: String,
    pub category_slug: String,
}

/// Comment as embedded in the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEntry {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub author_name: String,
    pub content: String,
    pub rating: Option<i16>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TagRef {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Recipe with category, comments and tags fetched in one statement.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeDetailsRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub category_id: Uuid,
    pub category_name: String,
    pub category_slug: String,
    pub comments: Json<Vec<CommentEntry>>,
    pub tags: Json<Vec<TagRef>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct TopRecipeRow {
    pub id: Uuid,
    pub title: String,
    pub created_at: OffsetDateTime,
    pub category_id: Uuid,
    pub category_name: String,
    pub category_slug: String,
    pub avg_rating: f64,
    pub ratings_count: i64,
}
