//! Habit shop: recommendations are the catalog minus everything the user
//! already adopted, in either status. Dropping a habit deletes the task row,
//! which re-enters the habit into the recommendation pool.

use std::collections::HashSet;

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set};

use crate::models::habit::{self as habit_model, Entity as Habit};
use crate::models::user_task::{
    self as task_model, Entity as UserTask, TaskDto, STATUS_COMPLETED, STATUS_PENDING,
};

use super::ServiceError;

pub async fn list_catalog(
    db: &DatabaseConnection,
) -> Result<Vec<habit_model::Model>, ServiceError> {
    let habits = Habit::find()
        .order_by_desc(habit_model::Column::Points)
        .all(db)
        .await?;
    Ok(habits)
}

/// Habit ids the user has a task for, pending or completed.
pub async fn adopted_habit_ids(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<HashSet<i32>, ServiceError> {
    let tasks = UserTask::find()
        .filter(task_model::Column::UserId.eq(user_id))
        .all(db)
        .await?;
    Ok(tasks.into_iter().map(|t| t.habit_id).collect())
}

/// Catalog entries not yet adopted, highest points first.
/// Sorting is stable, so ties keep the data source's order.
pub fn available_recommendations(
    catalog: Vec<habit_model::Model>,
    adopted: &HashSet<i32>,
) -> Vec<habit_model::Model> {
    let mut available: Vec<habit_model::Model> = catalog
        .into_iter()
        .filter(|h| !adopted.contains(&h.id))
        .collect();
    available.sort_by(|a, b| b.points.cmp(&a.points));
    available
}

pub async fn recommendations(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<habit_model::Model>, ServiceError> {
    let catalog = list_catalog(db).await?;
    let adopted = adopted_habit_ids(db, user_id).await?;
    Ok(available_recommendations(catalog, &adopted))
}

/// Adopt a habit from the catalog as a pending task.
pub async fn adopt_habit(
    db: &DatabaseConnection,
    user_id: i32,
    habit_id: i32,
) -> Result<TaskDto, ServiceError> {
    let habit = Habit::find_by_id(habit_id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let adopted = adopted_habit_ids(db, user_id).await?;
    if adopted.contains(&habit_id) {
        return Err(ServiceError::Validation("Habit already adopted".to_string()));
    }

    let task = task_model::ActiveModel {
        user_id: Set(user_id),
        habit_id: Set(habit_id),
        status: Set(STATUS_PENDING.to_string()),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };
    let saved = task.insert(db).await?;

    Ok(TaskDto::from_task_and_habit(saved, Some(habit)))
}

/// Mark a pending task completed, refreshing its timestamp so it counts
/// toward today's goal. Completed tasks never go back to pending.
pub async fn complete_task(
    db: &DatabaseConnection,
    user_id: i32,
    task_id: i32,
) -> Result<TaskDto, ServiceError> {
    let task = UserTask::find_by_id(task_id)
        .one(db)
        .await?
        .filter(|t| t.user_id == user_id)
        .ok_or(ServiceError::NotFound)?;

    if task.status == STATUS_COMPLETED {
        return Err(ServiceError::Validation(
            "Task is already completed".to_string(),
        ));
    }

    let mut active: task_model::ActiveModel = task.into();
    active.status = Set(STATUS_COMPLETED.to_string());
    active.created_at = Set(chrono::Utc::now().to_rfc3339());
    let updated = active.update(db).await?;

    let habit = Habit::find_by_id(updated.habit_id).one(db).await?;
    Ok(TaskDto::from_task_and_habit(updated, habit))
}

/// Drop a habit by deleting its task rows. Keyed by habit rather than task
/// id so repeated drops are no-ops and the habit re-enters the
/// recommendation pool exactly once.
pub async fn drop_habit(
    db: &DatabaseConnection,
    user_id: i32,
    habit_id: i32,
) -> Result<u64, ServiceError> {
    let res = UserTask::delete_many()
        .filter(task_model::Column::UserId.eq(user_id))
        .filter(task_model::Column::HabitId.eq(habit_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

/// Tasks for the caller, optionally filtered by status.
pub async fn list_tasks(
    db: &DatabaseConnection,
    user_id: i32,
    status: Option<String>,
) -> Result<Vec<TaskDto>, ServiceError> {
    let mut query = UserTask::find().filter(task_model::Column::UserId.eq(user_id));
    if let Some(status) = status {
        query = query.filter(task_model::Column::Status.eq(status));
    }
    let rows = query
        .order_by_desc(task_model::Column::CreatedAt)
        .find_also_related(Habit)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(task, habit)| TaskDto::from_task_and_habit(task, habit))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit(id: i32, points: i32) -> habit_model::Model {
        habit_model::Model {
            id,
            title: format!("Habit {}", id),
            category: "Health".to_string(),
            points,
            icon_name: None,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn recommendations_exclude_adopted_and_sort_by_points() {
        let catalog = vec![habit(1, 10), habit(2, 50), habit(3, 30)];
        let adopted: HashSet<i32> = [2].into_iter().collect();

        let result = available_recommendations(catalog, &adopted);
        let ids: Vec<i32> = result.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn recommendations_keep_source_order_on_ties() {
        let catalog = vec![habit(5, 20), habit(6, 20), habit(7, 20)];
        let adopted = HashSet::new();

        let result = available_recommendations(catalog, &adopted);
        let ids: Vec<i32> = result.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }
}
