use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{CategoryRequest, CategoryShow},
    repo_types::Category,
};
use crate::{
    error::{violated_constraint, ApiError, ApiResult},
    pagination::PageRequest,
    recipes,
};

pub async fn all(db: &PgPool) -> ApiResult<Vec<Category>> {
    Ok(Category::all_ordered(db).await?)
}

pub async fn by_slug(db: &PgPool, slug: &str) -> ApiResult<Category> {
    Category::find_by_slug(db, slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Category"))
}

/// The category plus one page of its recipes, newest first.
pub async fn show(db: &PgPool, slug: &str, req: PageRequest) -> ApiResult<CategoryShow> {
    let category = by_slug(db, slug).await?;
    let recipes = recipes::services::category_page(db, category.id, req).await?;
    Ok(CategoryShow { category, recipes })
}

pub async fn create(db: &PgPool, req: CategoryRequest) -> ApiResult<Category> {
    let req = req.normalized()?;
    let category = Category::create(db, &req.name, &req.slug).await?;
    info!(category_id = %category.id, slug = %category.slug, "category created");
    Ok(category)
}

pub async fn update(db: &PgPool, id: Uuid, req: CategoryRequest) -> ApiResult<Category> {
    let req = req.normalized()?;
    let category = Category::update(db, id, &req.name, &req.slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Category"))?;
    info!(category_id = %id, slug = %category.slug, "category updated");
    Ok(category)
}

/// Refuses to drop a category that still owns recipes.
pub async fn delete(db: &PgPool, id: Uuid) -> ApiResult<()> {
    let deleted = match Category::delete(db, id).await {
        Ok(deleted) => deleted,
        Err(err) if violated_constraint(&err) == Some("fk_recipes_category") => {
            warn!(category_id = %id, "delete refused, category has recipes");
            return Err(ApiError::Conflict("Category still has recipes.".into()));
        }
        Err(err) => return Err(err.into()),
    };
    if !deleted {
        return Err(ApiError::not_found("Category"));
    }
    info!(category_id = %id, "category deleted");
    Ok(())
}
