use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{
    dto::{TagRequest, TagShow},
    repo_types::Tag,
};
use crate::{
    error::{ApiError, ApiResult},
    pagination::PageRequest,
    recipes,
};

pub async fn all(db: &PgPool) -> ApiResult<Vec<Tag>> {
    Ok(Tag::all_ordered(db).await?)
}

pub async fn show(db: &PgPool, slug: &str, req: PageRequest) -> ApiResult<TagShow> {
    let tag = Tag::find_by_slug(db, slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag"))?;
    let recipes = recipes::services::tag_page(db, tag.id, req).await?;
    Ok(TagShow { tag, recipes })
}

pub async fn create(db: &PgPool, req: TagRequest) -> ApiResult<Tag> {
    let req = req.normalized()?;
    let tag = Tag::create(db, &req.name, &req.slug).await?;
    info!(tag_id = %tag.id, slug = %tag.slug, "tag created");
    Ok(tag)
}

pub async fn update(db: &PgPool, id: Uuid, req: TagRequest) -> ApiResult<Tag> {
    let req = req.normalized()?;
    let tag = Tag::update(db, id, &req.name, &req.slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Tag"))?;
    info!(tag_id = %id, "tag updated");
    Ok(tag)
}

pub async fn delete(db: &PgPool, id: Uuid) -> ApiResult<()> {
    if !Tag::delete(db, id).await? {
        return Err(ApiError::not_found("Tag"));
    }
    info!(tag_id = %id, "tag deleted");
    Ok(())
}
