//! SeaORM entity models
//!
//! Database entities for the stitchline production tracker

mod lookup;
mod order;
mod order_line;
mod production_record;

pub use order::{
    ActiveModel as OrderActiveModel,
    Column as OrderColumn,
    Entity as OrderEntity,
    Model as Order,
};

pub use order_line::{
    ActiveModel as OrderLineActiveModel,
    Column as OrderLineColumn,
    Entity as OrderLineEntity,
    Model as OrderLine,
};

pub use production_record::{
    ActiveModel as ProductionRecordActiveModel,
    Column as ProductionRecordColumn,
    Entity as ProductionRecordEntity,
    Model as ProductionRecord,
};

pub use lookup::carrier::{
    ActiveModel as CarrierActiveModel,
    Column as CarrierColumn,
    Entity as CarrierEntity,
    Model as Carrier,
};

pub use lookup::fabric_status::{
    Column as FabricStatusColumn,
    Entity as FabricStatusEntity,
    Model as FabricStatusOption,
};

pub use lookup::invoicing_status::{
    Column as InvoicingStatusColumn,
    Entity as InvoicingStatusEntity,
    Model as InvoicingStatusOption,
};
