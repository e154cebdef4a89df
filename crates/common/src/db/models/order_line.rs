//! Order line-item entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub order_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub material_code: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub quantity: i32,

    #[sea_orm(column_type = "Double")]
    pub unit_price: f64,

    /// Delivery date requested on the purchase order itself; distinct from
    /// the scheduler-derived delivery date on the production record
    pub requested_delivery: Option<Date>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_delete = "Cascade"
    )]
    Order,

    #[sea_orm(has_many = "super::production_record::Entity")]
    ProductionRecords,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::production_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductionRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
