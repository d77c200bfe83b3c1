//! Short-lived reel feed: newest first, limit/offset pagination, no update
//! path. Reels are created on upload and deleted only by their owner.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set};
use serde::Serialize;

use crate::models::profile::Entity as Profile;
use crate::models::reel::{self as reel_model, Entity as Reel, ReelDto};

use super::ServiceError;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 50;

#[derive(Debug, Serialize)]
pub struct FeedPage {
    pub reels: Vec<ReelDto>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// One page of the global feed, newest first.
pub async fn list_feed(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
) -> Result<FeedPage, ServiceError> {
    let per_page = per_page.clamp(1, MAX_PAGE_SIZE);

    let paginator = Reel::find()
        .order_by_desc(reel_model::Column::CreatedAt)
        .find_also_related(Profile)
        .paginate(db, per_page);

    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page).await?;

    Ok(FeedPage {
        reels: rows
            .into_iter()
            .map(|(reel, author)| ReelDto::from_reel_and_author(reel, author))
            .collect(),
        page,
        per_page,
        total,
    })
}

pub async fn create_reel(
    db: &DatabaseConnection,
    user_id: i32,
    video_url: String,
    description: Option<String>,
) -> Result<reel_model::Model, ServiceError> {
    if video_url.trim().is_empty() {
        return Err(ServiceError::Validation(
            "video_url is required".to_string(),
        ));
    }

    let reel = reel_model::ActiveModel {
        user_id: Set(user_id),
        video_url: Set(video_url),
        description: Set(description),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };
    let saved = reel.insert(db).await?;
    Ok(saved)
}

/// Delete a reel the caller owns. Foreign or missing reels both read as
/// not found so ownership is not leaked.
pub async fn delete_reel(
    db: &DatabaseConnection,
    user_id: i32,
    reel_id: i32,
) -> Result<(), ServiceError> {
    let res = Reel::delete_many()
        .filter(reel_model::Column::Id.eq(reel_id))
        .filter(reel_model::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}
