use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_task::Entity")]
    UserTask,
    #[sea_orm(has_many = "super::user_badge::Entity")]
    UserBadge,
    #[sea_orm(has_many = "super::reel::Entity")]
    Reel,
}

impl Related<super::user_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserTask.def()
    }
}

impl Related<super::user_badge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserBadge.def()
    }
}

impl Related<super::reel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Public DTO: everything a screen may show about a user, never the hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl From<Model> for ProfileDto {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            avatar_url: model.avatar_url,
        }
    }
}
