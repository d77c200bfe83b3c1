use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Static catalog of purchasable badges.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "badges_catalog")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub rarity: String,
    pub icon_name: Option<String>,
    pub color_hex: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_badge::Entity")]
    UserBadge,
}

impl Related<super::user_badge::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserBadge.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
