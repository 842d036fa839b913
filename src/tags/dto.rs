use serde::{Deserialize, Serialize};

use super::repo_types::Tag;
use crate::{
    error::{ApiResult, ValidationErrors},
    pagination::Page,
    recipes::dto::RecipeSummary,
    validation::{check_text, is_valid_tag_slug},
};

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub name: String,
    pub slug: String,
}

impl TagRequest {
    pub fn normalized(mut self) -> ApiResult<Self> {
        self.name = self.name.trim().to_string();
        self.slug = self.slug.trim().to_string();

        let mut errors = ValidationErrors::new();
        check_text(&mut errors, "name", "Name", &self.name, 2, Some(80));
        check_text(&mut errors, "slug", "Slug", &self.slug, 2, Some(80));
        if !self.slug.is_empty() && !is_valid_tag_slug(&self.slug) {
            errors.add("slug", "Slug may contain lowercase letters, numbers and hyphens.");
        }
        errors.into_result()?;
        Ok(self)
    }
}

#[derive(Debug, Serialize)]
pub struct TagShow {
    pub tag: Tag,
    pub recipes: Page<RecipeSummary>,
}
