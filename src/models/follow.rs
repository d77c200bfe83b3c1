use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A one-directional follow edge. Both directions present = friends.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "follows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub follower_id: i32,
    pub following_id: i32,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::FollowerId",
        to = "super::profile::Column::Id"
    )]
    Follower,
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::FollowingId",
        to = "super::profile::Column::Id"
    )]
    Following,
}

impl ActiveModelBehavior for ActiveModel {}
