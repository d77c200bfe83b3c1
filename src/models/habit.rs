use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Static catalog of adoptable habits. Categories are one of
/// 'Health', 'Study', 'Mindset', 'Productivity'.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "habits_catalog")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub category: String,
    pub points: i32,
    pub icon_name: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_task::Entity")]
    UserTask,
}

impl Related<super::user_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserTask.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
