use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";

/// An adopted habit. Status only ever moves pending -> completed;
/// dropping a habit deletes the row instead.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub habit_id: i32,
    pub status: String, // 'pending' | 'completed'
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::UserId",
        to = "super::profile::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Profile,
    #[sea_orm(
        belongs_to = "super::habit::Entity",
        from = "Column::HabitId",
        to = "super::habit::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Habit,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::habit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Habit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO for the home screen to-do bar and the shop's "my habits" list
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: i32,
    pub habit_id: i32,
    pub status: String,
    pub created_at: String,
    pub title: Option<String>,
    pub icon_name: Option<String>,
    pub points: Option<i32>,
    pub category: Option<String>,
}

impl TaskDto {
    pub fn from_task_and_habit(task: Model, habit: Option<super::habit::Model>) -> Self {
        Self {
            id: task.id,
            habit_id: task.habit_id,
            status: task.status,
            created_at: task.created_at,
            title: habit.as_ref().map(|h| h.title.clone()),
            icon_name: habit.as_ref().and_then(|h| h.icon_name.clone()),
            points: habit.as_ref().map(|h| h.points),
            category: habit.map(|h| h.category),
        }
    }
}
