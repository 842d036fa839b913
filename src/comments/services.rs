use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{
    dto::CommentRequest,
    repo::NewComment,
    repo_types::Comment,
};
use crate::{
    error::{ApiError, ApiResult},
    recipes::repo_types::Recipe,
    users,
};

/// Posts a comment as `user_id`; the author name is the email's local part.
pub async fn add(
    db: &PgPool,
    recipe_id: Uuid,
    user_id: Uuid,
    req: CommentRequest,
) -> ApiResult<Comment> {
    let req = req.normalized()?;
    if !Recipe::exists(db, recipe_id).await? {
        return Err(ApiError::not_found("Recipe"));
    }
    let author = users::services::get(db, user_id).await?;

    let comment = Comment::create(
        db,
        NewComment {
            recipe_id,
            user_id: Some(author.id),
            author_name: author.nickname(),
            author_email: &author.email,
            content: &req.content,
            rating: req.rating,
        },
    )
    .await?;
    info!(comment_id = %comment.id, recipe_id = %recipe_id, rating = ?comment.rating, "comment added");
    Ok(comment)
}

pub async fn delete(db: &PgPool, id: Uuid) -> ApiResult<()> {
    if !Comment::delete(db, id).await? {
        return Err(ApiError::not_found("Comment"));
    }
    info!(comment_id = %id, "comment deleted");
    Ok(())
}
