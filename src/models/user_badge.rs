use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A purchased badge. Immutable once created; no refunds.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_badges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub badge_id: i32,
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
        belongs_to = "super::badge::Entity",
        from = "Column::BadgeId",
        to = "super::badge::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Badge,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::badge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Badge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO joining the purchase with its catalog entry for collection screens
#[derive(Debug, Serialize, Deserialize)]
pub struct OwnedBadgeDto {
    pub id: i32,
    pub badge_id: i32,
    pub name: String,
    pub price: i32,
    pub rarity: String,
    pub icon_name: Option<String>,
    pub color_hex: Option<String>,
    pub purchased_at: String,
}

impl OwnedBadgeDto {
    pub fn from_owned_and_badge(owned: Model, badge: super::badge::Model) -> Self {
        Self {
            id: owned.id,
            badge_id: badge.id,
            name: badge.name,
            price: badge.price,
            rarity: badge.rarity,
            icon_name: badge.icon_name,
            color_hex: badge.color_hex,
            purchased_at: owned.created_at,
        }
    }
}
