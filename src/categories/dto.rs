use serde::{Deserialize, Serialize};

use super::repo_types::Category;
use crate::{
    error::{ApiResult, ValidationErrors},
    pagination::Page,
    recipes::dto::RecipeSummary,
    validation::{check_text, is_valid_category_slug},
};

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub slug: String,
}

impl CategoryRequest {
    pub fn normalized(mut self) -> ApiResult<Self> {
        self.name = self.name.trim().to_string();
        self.slug = self.slug.trim().to_string();

        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "name", "Name", &self.name, 2, Some(100));
        if self.slug.is_empty() {
            errors.add("slug", "Slug is required.");
        } else {
            if self.slug.chars().count() > 100 {
                errors.add("slug", "Slug is too long.");
            }
            if !is_valid_category_slug(&self.slug) {
                errors.add(
                    "slug",
                    "Slug may contain lowercase letters, numbers and hyphens.",
                );
            }
        }
        errors.into_result()?;
        Ok(self)
    }
}

/// Category page: the category plus one page of its recipes.
#[derive(Debug, Serialize)]
pub struct CategoryShow {
    pub category: Category,
    pub recipes: Page<RecipeSummary>,
}
