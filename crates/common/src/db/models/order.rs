//! Purchase-order entity
//!
//! Created on successful PDF import and immutable thereafter. The
//! issuance date is nullable: partially extracted orders are accepted,
//! and the scheduler skips their records instead of failing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Purchase-order number from the hospital's procurement system
    #[sea_orm(column_type = "Text", unique)]
    pub order_number: String,

    pub issued_on: Option<Date>,

    #[sea_orm(column_type = "Text", nullable)]
    pub hospital: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub delivery_address: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub state: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub state_code: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_line::Entity")]
    OrderLines,
}

impl Related<super::order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
