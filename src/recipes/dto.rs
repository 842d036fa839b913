use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{CommentEntry, RecipeDetailsRow, RecipeSummaryRow, TagRef, TopRecipeRow};
use crate::{
    error::{ApiError, ApiResult, ValidationErrors},
    validation::check_text,
};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub category: CategoryRef,
}

impl From<RecipeSummaryRow> for RecipeSummary {
    fn from(r: RecipeSummaryRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            content: r.content,
            created_at: r.created_at,
            category: CategoryRef {
                id: r.category_id,
                name: r.category_name,
                slug: r.category_slug,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeDetails {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub category: CategoryRef,
    pub tags: Vec<TagRef>,
    pub comments: Vec<CommentEntry>,
    pub avg_rating: Option<f64>,
    pub ratings_count: i64,
}

/// Mean of the present ratings and how many there were.
pub fn rating_summary(comments: &[CommentEntry]) -> (Option<f64>, i64) {
    let ratings: Vec<f64> = comments
        .iter()
        .filter_map(|c| c.rating)
        .map(f64::from)
        .collect();
    if ratings.is_empty() {
        return (None, 0);
    }
    let count = ratings.len();
    (Some(ratings.iter().sum::<f64>() / count as f64), count as i64)
}

impl From<RecipeDetailsRow> for RecipeDetails {
    fn from(r: RecipeDetailsRow) -> Self {
        let comments = r.comments.0;
        let (avg_rating, ratings_count) = rating_summary(&comments);
        Self {
            id: r.id,
            title: r.title,
            content: r.content,
            created_at: r.created_at,
            updated_at: r.updated_at,
            category: CategoryRef {
                id: r.category_id,
                name: r.category_name,
                slug: r.category_slug,
            },
            tags: r.tags.0,
            comments,
            avg_rating,
            ratings_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopRecipe {
    pub id: Uuid,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub category: CategoryRef,
    pub avg_rating: f64,
    pub ratings_count: i64,
}

impl From<TopRecipeRow> for TopRecipe {
    fn from(r: TopRecipeRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            created_at: r.created_at,
            category: CategoryRef {
                id: r.category_id,
                name: r.category_name,
                slug: r.category_slug,
            },
            avg_rating: r.avg_rating,
            ratings_count: r.ratings_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecipeRequest {
    pub title: String,
    pub content: String,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
}

/// A request that passed validation; the category is guaranteed present.
#[derive(Debug)]
pub struct ValidRecipe {
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    pub tag_ids: Vec<Uuid>,
}

impl RecipeRequest {
    pub fn validate(self) -> ApiResult<ValidRecipe> {
        let title = self.title.trim().to_string();
        let content = self.content.trim().to_string();

        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "title", "Title", &title, 3, Some(255));
        check_text(&mut errors, "content", "Content", &content, 10, None);
        if self.category_id.is_none() {
            errors.add("category_id", "Category is required.");
        }
        errors.into_result()?;
        let category_id = self
            .category_id
            .ok_or_else(|| ApiError::field("category_id", "Category is required."))?;

        let mut tag_ids = self.tag_ids;
        tag_ids.sort();
        tag_ids.dedup();

        Ok(ValidRecipe {
            title,
            content,
            category_id,
            tag_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(rating: Option<i16>) -> CommentEntry {
        CommentEntry {
            id: Uuid::new_v4(),
            user_id: None,
            author_name: "ala".into(),
            content: "Pyszne!".into(),
            rating,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn recipe_without_category_is_rejected() {
        let req = RecipeRequest {
            title: "Pierogi".into(),
            content: "Knead the dough, fill, boil.".into(),
            category_id: None,
            tag_ids: vec![],
        };
        match req.validate() {
            Err(ApiError::Validation(fields)) => {
                assert_eq!(
                    fields.get("category_id").unwrap()[0],
                    "Category is required."
                );
                assert!(fields.get("title").is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn short_title_and_content_are_rejected() {
        let req = RecipeRequest {
            title: "Pi".into(),
            content: "Boil.".into(),
            category_id: Some(Uuid::new_v4()),
            tag_ids: vec![],
        };
        match req.validate() {
            Err(ApiError::Validation(fields)) => {
                assert!(fields.get("title").is_some());
                assert!(fields.get("content").is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn duplicate_tags_are_collapsed() {
        let tag = Uuid::new_v4();
        let valid = RecipeRequest {
            title: "Bigos".into(),
            content: "Stew cabbage with meat for hours.".into(),
            category_id: Some(Uuid::new_v4()),
            tag_ids: vec![tag, tag],
        }
        .validate()
        .expect("valid");
        assert_eq!(valid.tag_ids, vec![tag]);
    }

    #[test]
    fn rating_summary_ignores_unrated_comments() {
        let comments = vec![comment(Some(5)), comment(None), comment(Some(4))];
        assert_eq!(rating_summary(&comments), (Some(4.5), 2));
        assert_eq!(rating_summary(&[comment(None)]), (None, 0));
    }

    #[test]
    fn comment_entry_reads_postgres_json() {
        let raw = r#"{
            "id": "6f1c1b7e-8a4b-4d3c-9a57-1c2b3d4e5f60",
            "user_id": null,
            "author_name": "jan",
            "content": "Super",
            "rating": 3,
            "created_at": "2025-09-01T10:15:30.123456+00:00"
        }"#;
        let entry: CommentEntry = serde_json::from_str(raw).expect("decode");
        assert_eq!(entry.rating, Some(3));
        assert_eq!(entry.created_at.year(), 2025);
    }
}
