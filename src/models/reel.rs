use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub video_url: String,
    pub description: Option<String>,
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
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Feed DTO with the author attached
#[derive(Debug, Serialize, Deserialize)]
pub struct ReelDto {
    pub id: i32,
    pub user_id: i32,
    pub video_url: String,
    pub description: Option<String>,
    pub created_at: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
}

impl ReelDto {
    pub fn from_reel_and_author(reel: Model, author: Option<super::profile::Model>) -> Self {
        Self {
            id: reel.id,
            user_id: reel.user_id,
            video_url: reel.video_url,
            description: reel.description,
            created_at: reel.created_at,
            username: author.as_ref().map(|p| p.username.clone()),
            avatar_url: author.and_then(|p| p.avatar_url),
        }
    }
}
