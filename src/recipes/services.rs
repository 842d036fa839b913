use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{
    dto::{RecipeDetails, RecipeRequest, RecipeSummary, TopRecipe},
    repo_types::Recipe,
};
use crate::{
    error::{ApiError, ApiResult},
    pagination::{Page, PageRequest},
};

/// How many recipes the top-rated ranking returns.
pub const TOP_RATED_LIMIT: i64 = 20;

pub async fn latest_page(db: &PgPool, req: PageRequest) -> ApiResult<Page<RecipeSummary>> {
    let (rows, total) = Recipe::latest_page(db, req).await?;
    Ok(Page::new(rows, req, total).map(RecipeSummary::from))
}

pub async fn latest(db: &PgPool, limit: i64) -> ApiResult<Vec<RecipeSummary>> {
    let rows = Recipe::latest(db, limit).await?;
    Ok(rows.into_iter().map(RecipeSummary::from).collect())
}

pub async fn category_page(
    db: &PgPool,
    category_id: Uuid,
    req: PageRequest,
) -> ApiResult<Page<RecipeSummary>> {
    let (rows, total) = Recipe::category_page(db, category_id, req).await?;
    Ok(Page::new(rows, req, total).map(RecipeSummary::from))
}

pub async fn tag_page(
    db: &PgPool,
    tag_id: Uuid,
    req: PageRequest,
) -> ApiResult<Page<RecipeSummary>> {
    let (rows, total) = Recipe::tag_page(db, tag_id, req).await?;
    Ok(Page::new(rows, req, total).map(RecipeSummary::from))
}

pub async fn details(db: &PgPool, id: Uuid) -> ApiResult<RecipeDetails> {
    Recipe::find_details(db, id)
        .await?
        .map(RecipeDetails::from)
        .ok_or_else(|| ApiError::not_found("Recipe"))
}

pub async fn top_rated(db: &PgPool) -> ApiResult<Vec<TopRecipe>> {
    let rows = Recipe::top_rated(db, TOP_RATED_LIMIT).await?;
    Ok(rows.into_iter().map(TopRecipe::from).collect())
}

pub async fn create(db: &PgPool, req: RecipeRequest) -> ApiResult<RecipeDetails> {
    let valid = req.validate()?;

    let mut tx = db.begin().await?;
    let recipe = Recipe::insert_tx(&mut tx, &valid.title, &valid.content, valid.category_id).await?;
    Recipe::replace_tags_tx(&mut tx, recipe.id, &valid.tag_ids).await?;
    tx.commit().await?;

    info!(recipe_id = %recipe.id, category_id = %recipe.category_id, "recipe created");
    details(db, recipe.id).await
}

pub async fn update(db: &PgPool, id: Uuid, req: RecipeRequest) -> ApiResult<RecipeDetails> {
    let valid = req.validate()?;

    let mut tx = db.begin().await?;
    let recipe = Recipe::update_tx(&mut tx, id, &valid.title, &valid.content, valid.category_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Recipe"))?;
    Recipe::replace_tags_tx(&mut tx, recipe.id, &valid.tag_ids).await?;
    tx.commit().await?;

    info!(recipe_id = %recipe.id, "recipe updated");
    details(db, recipe.id).await
}

pub async fn delete(db: &PgPool, id: Uuid) -> ApiResult<()> {
    if !Recipe::delete(db, id).await? {
        return Err(ApiError::not_found("Recipe"));
    }
    info!(recipe_id = %id, "recipe deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        categories::repo_types::Category,
        comments::{repo::NewComment, repo_types::Comment},
    };

    async fn category(db: &PgPool) -> Category {
        Category::create(db, "Soups", "soups").await.unwrap()
    }

    async fn recipe(db: &PgPool, category_id: Uuid, title: &str) -> RecipeDetails {
        create(
            db,
            RecipeRequest {
                title: title.into(),
                content: "Simmer everything slowly.".into(),
                category_id: Some(category_id),
                tag_ids: vec![],
            },
        )
        .await
        .unwrap()
    }

    async fn rate(db: &PgPool, recipe_id: Uuid, rating: Option<i16>) {
        Comment::create(
            db,
            NewComment {
                recipe_id,
                user_id: None,
                author_name: "guest",
                author_email: "guest@example.com",
                content: "Tried it",
                rating,
            },
        )
        .await
        .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn recipe_requires_existing_category(db: PgPool) {
        let err = create(
            &db,
            RecipeRequest {
                title: "Orphan stew".into(),
                content: "No category for this one.".into(),
                category_id: Some(Uuid::new_v4()),
                tag_ids: vec![],
            },
        )
        .await
        .unwrap_err();
        match err {
            ApiError::Validation(fields) => {
                assert_eq!(fields.get("category_id").unwrap()[0], "Category does not exist.");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(latest(&db, 10).await.unwrap().len(), 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn deleting_recipe_removes_its_comments(db: PgPool) {
        let cat = category(&db).await;
        let r = recipe(&db, cat.id, "Tomato soup").await;
        rate(&db, r.id, Some(4)).await;
        rate(&db, r.id, None).await;
        assert_eq!(details(&db, r.id).await.unwrap().comments.len(), 2);

        delete(&db, r.id).await.unwrap();

        let left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&db)
            .await
            .unwrap();
        assert_eq!(left, 0);
        assert!(matches!(details(&db, r.id).await, Err(ApiError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn twenty_five_recipes_make_three_pages(db: PgPool) {
        let cat = category(&db).await;
        for i in 0..25 {
            recipe(&db, cat.id, &format!("Recipe number {i}")).await;
        }

        let first = latest_page(&db, PageRequest::new(1, 10)).await.unwrap();
        assert_eq!((first.total, first.pages, first.items.len()), (25, 3, 10));

        let third = latest_page(&db, PageRequest::new(3, 10)).await.unwrap();
        assert_eq!(third.items.len(), 5);

        let beyond = latest_page(&db, PageRequest::new(4, 10)).await.unwrap();
        assert!(beyond.items.is_empty());

        let by_category = category_page(&db, cat.id, PageRequest::new(3, 10))
            .await
            .unwrap();
        assert_eq!(by_category.items.len(), 5);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn top_rated_skips_unrated_and_orders_by_mean(db: PgPool) {
        let cat = category(&db).await;
        let good = recipe(&db, cat.id, "Good soup").await;
        let best_once = recipe(&db, cat.id, "Great soup").await;
        let best_twice = recipe(&db, cat.id, "Great soup again").await;
        let unrated = recipe(&db, cat.id, "Mystery soup").await;
        recipe(&db, cat.id, "Lonely soup").await;

        rate(&db, good.id, Some(5)).await;
        rate(&db, good.id, Some(4)).await;
        rate(&db, best_once.id, Some(5)).await;
        rate(&db, best_twice.id, Some(5)).await;
        rate(&db, best_twice.id, Some(5)).await;
        rate(&db, unrated.id, None).await;

        let top = top_rated(&db).await.unwrap();
        let ids: Vec<Uuid> = top.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![best_twice.id, best_once.id, good.id]);
        assert_eq!(top[2].avg_rating, 4.5);
        assert_eq!(top[2].ratings_count, 2);
    }
}
