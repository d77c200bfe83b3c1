//! Points ledger: earned and spent are recomputed from history on every
//! call, never stored as a running counter. The balance can therefore go
//! negative if two purchases raced each other; it is reported raw and
//! never clamped.

use chrono::{DateTime, Local, NaiveDate};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set};
use serde::Serialize;

use crate::models::badge::{self as badge_model, Entity as Badge};
use crate::models::user_badge::{self as user_badge_model, Entity as UserBadge, OwnedBadgeDto};
use crate::models::user_task::{self as task_model, Entity as UserTask, TaskDto, STATUS_COMPLETED};

use super::ServiceError;

/// Completed tasks needed on the local calendar day for the home screen's
/// "daily goal" indicator.
pub const DAILY_GOAL: i64 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    #[serde(rename = "Health")]
    pub health: i64,
    #[serde(rename = "Study")]
    pub study: i64,
    #[serde(rename = "Mindset")]
    pub mindset: i64,
    #[serde(rename = "Productivity")]
    pub productivity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointsSummary {
    pub earned: i64,
    pub spent: i64,
    pub balance: i64,
    pub completed: i64,
    pub completed_today: i64,
    pub daily_goal: i64,
    pub category_breakdown: CategoryBreakdown,
}

/// A completed task flattened to what the ledger needs.
#[derive(Debug, Clone)]
pub struct CompletedTask {
    pub points: i32,
    pub category: String,
    pub completed_at: String,
}

/// Pure ledger arithmetic over fetched history.
///
/// Unknown categories still count toward `earned` and `completed` but are
/// silently excluded from the breakdown.
pub fn summarize(tasks: &[CompletedTask], badge_prices: &[i32], today: NaiveDate) -> PointsSummary {
    let mut earned: i64 = 0;
    let mut completed: i64 = 0;
    let mut completed_today: i64 = 0;
    let mut breakdown = CategoryBreakdown::default();

    for task in tasks {
        earned += task.points as i64;
        completed += 1;

        match task.category.as_str() {
            "Health" => breakdown.health += 1,
            "Study" => breakdown.study += 1,
            "Mindset" => breakdown.mindset += 1,
            "Productivity" => breakdown.productivity += 1,
            _ => {}
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(&task.completed_at) {
            if ts.with_timezone(&Local).date_naive() == today {
                completed_today += 1;
            }
        }
    }

    let spent: i64 = badge_prices.iter().map(|p| *p as i64).sum();

    PointsSummary {
        earned,
        spent,
        balance: earned - spent,
        completed,
        completed_today,
        daily_goal: DAILY_GOAL,
        category_breakdown: breakdown,
    }
}

async fn completed_tasks(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<CompletedTask>, ServiceError> {
    let rows = UserTask::find()
        .filter(task_model::Column::UserId.eq(user_id))
        .filter(task_model::Column::Status.eq(STATUS_COMPLETED))
        .find_also_related(crate::models::habit::Entity)
        .all(db)
        .await?;

    // A task whose catalog entry is gone still counts as a completion
    // (and toward today's goal) but earns nothing.
    Ok(rows
        .into_iter()
        .map(|(task, habit)| CompletedTask {
            points: habit.as_ref().map(|h| h.points).unwrap_or(0),
            category: habit.map(|h| h.category).unwrap_or_default(),
            completed_at: task.created_at,
        })
        .collect())
}

async fn owned_badge_prices(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<i32>, ServiceError> {
    let rows = UserBadge::find()
        .filter(user_badge_model::Column::UserId.eq(user_id))
        .find_also_related(Badge)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(_, badge)| badge.map(|b| b.price))
        .collect())
}

/// Net available points plus the categorical breakdown and daily-goal count.
pub async fn compute_balance(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<PointsSummary, ServiceError> {
    let tasks = completed_tasks(db, user_id).await?;
    let prices = owned_badge_prices(db, user_id).await?;
    Ok(summarize(&tasks, &prices, Local::now().date_naive()))
}

#[derive(Debug, Serialize)]
pub struct PurchaseReceipt {
    pub badge_id: i32,
    pub price: i32,
    pub balance_after: i64,
}

/// Buy a badge with earned points.
///
/// The balance check and the insert are two independent statements; a race
/// between concurrent sessions can drive the balance negative. That window
/// is accepted, only double-purchase of the same badge is backstopped by the
/// UNIQUE(user_id, badge_id) constraint.
pub async fn purchase_badge(
    db: &DatabaseConnection,
    user_id: i32,
    badge_id: i32,
) -> Result<PurchaseReceipt, ServiceError> {
    let badge = Badge::find_by_id(badge_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let owned = UserBadge::find()
        .filter(user_badge_model::Column::UserId.eq(user_id))
        .filter(user_badge_model::Column::BadgeId.eq(badge_id))
        .count(db)
        .await?;
    if owned > 0 {
        return Err(ServiceError::AlreadyOwned);
    }

    let summary = compute_balance(db, user_id).await?;
    if summary.balance < badge.price as i64 {
        return Err(ServiceError::InsufficientPoints {
            balance: summary.balance,
            price: badge.price as i64,
        });
    }

    let purchase = user_badge_model::ActiveModel {
        user_id: Set(user_id),
        badge_id: Set(badge_id),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };
    UserBadge::insert(purchase).exec(db).await?;

    Ok(PurchaseReceipt {
        badge_id,
        price: badge.price,
        balance_after: summary.balance - badge.price as i64,
    })
}

/// The caller's badge collection, newest purchase first.
pub async fn owned_badges(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<OwnedBadgeDto>, ServiceError> {
    let rows = UserBadge::find()
        .filter(user_badge_model::Column::UserId.eq(user_id))
        .order_by_desc(user_badge_model::Column::CreatedAt)
        .find_also_related(Badge)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(owned, badge)| {
            badge.map(|b| OwnedBadgeDto::from_owned_and_badge(owned, b))
        })
        .collect())
}

pub async fn list_badge_catalog(
    db: &DatabaseConnection,
) -> Result<Vec<badge_model::Model>, ServiceError> {
    let badges = Badge::find()
        .order_by_asc(badge_model::Column::Price)
        .all(db)
        .await?;
    Ok(badges)
}

/// Most recent completed tasks for the profile's activity feed.
pub async fn recent_completed(
    db: &DatabaseConnection,
    user_id: i32,
    limit: u64,
) -> Result<Vec<TaskDto>, ServiceError> {
    let rows = UserTask::find()
        .filter(task_model::Column::UserId.eq(user_id))
        .filter(task_model::Column::Status.eq(STATUS_COMPLETED))
        .order_by_desc(task_model::Column::CreatedAt)
        .limit(limit)
        .find_also_related(crate::models::habit::Entity)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(task, habit)| TaskDto::from_task_and_habit(task, habit))
        .collect())
}
