//! Production record entity
//!
//! The mutable work-tracking row attached to one order line. The
//! `delivery_date` / `priority_level` pair is owned by the delivery
//! scheduler: both are overwritten together on every recompute pass and
//! are never written independently.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "production_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub order_line_id: Uuid,

    #[sea_orm(column_type = "Text", nullable)]
    pub fabric_status: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub invoicing_status: Option<String>,

    /// Stamped with the registration date when the record is created with
    /// invoicing status "OK"
    pub invoiced_on: Option<Date>,

    #[sea_orm(column_type = "Text", nullable)]
    pub carrier: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub invoice_number: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub manufacturing_order: Option<String>,

    pub planned_quantity: i32,

    /// Fabric consumption per unit, in meters
    #[sea_orm(column_type = "Double")]
    pub fabric_consumption: f64,

    #[sea_orm(column_type = "Text", nullable)]
    pub fabric: Option<String>,

    /// Derived: issuance date advanced by the scheduling buffer
    pub delivery_date: Option<Date>,

    /// Derived: priority severity, 1 (overdue) through 5 (ahead)
    pub priority_level: Option<i16>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order_line::Entity",
        from = "Column::OrderLineId",
        to = "super::order_line::Column::Id",
        on_delete = "Cascade"
    )]
    OrderLine,
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
