//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations with proper
//! error handling and transaction support. The scheduler's derived pair
//! (`delivery_date`, `priority_level`) is only ever written through
//! [`Repository::apply_schedule`], which updates both fields together.

use crate::db::models::*;
use crate::db::DbPool;
use crate::errors::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use stitchline_scheduler::{ScheduleInput, ScheduleUpdate};
use uuid::Uuid;

/// A confirmed order header ready for persistence
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: String,
    pub issued_on: Option<NaiveDate>,
    pub hospital: Option<String>,
    pub delivery_address: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
    pub lines: Vec<NewOrderLine>,
}

/// One confirmed line item
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub material_code: String,
    pub description: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub requested_delivery: Option<NaiveDate>,
}

/// Production-state fields captured when registering a record
#[derive(Debug, Clone)]
pub struct NewProductionRecord {
    pub order_line_id: Uuid,
    pub fabric_status: Option<String>,
    pub invoicing_status: Option<String>,
    pub invoiced_on: Option<NaiveDate>,
    pub carrier: Option<String>,
    pub invoice_number: Option<String>,
    pub manufacturing_order: Option<String>,
    pub planned_quantity: i32,
    pub fabric_consumption: f64,
    pub fabric: Option<String>,
}

/// Mutable production-state fields for the tracking-grid save.
/// The derived pair is deliberately absent here.
#[derive(Debug, Clone)]
pub struct ProductionPatch {
    pub fabric_status: Option<String>,
    pub invoicing_status: Option<String>,
    pub carrier: Option<String>,
    pub invoice_number: Option<String>,
    pub manufacturing_order: Option<String>,
    pub planned_quantity: i32,
    pub fabric_consumption: f64,
    pub fabric: Option<String>,
}

/// One row of the joined production tracking table
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
pub struct ProductionRow {
    pub id: Uuid,
    pub order_number: String,
    pub description: String,
    pub fabric_status: Option<String>,
    pub invoicing_status: Option<String>,
    pub invoiced_on: Option<NaiveDate>,
    pub carrier: Option<String>,
    pub invoice_number: Option<String>,
    pub manufacturing_order: Option<String>,
    pub planned_quantity: i32,
    pub fabric_consumption: f64,
    pub fabric: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub priority_level: Option<i16>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

/// An order line labeled with its parent order number, as presented by
/// the production registration form
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
pub struct OrderLineOption {
    pub id: Uuid,
    pub order_number: String,
    pub description: String,
}

#[derive(FromQueryResult)]
struct ScheduleInputRow {
    id: Uuid,
    issued_on: Option<NaiveDate>,
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the read connection
    fn read_conn(&self) -> &DatabaseConnection {
        self.pool.read()
    }

    /// Get the write connection
    fn write_conn(&self) -> &DatabaseConnection {
        self.pool.write()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Order Operations
    // ========================================================================

    /// Persist a confirmed order together with its line items, atomically
    pub async fn create_order(&self, new: NewOrder) -> Result<Order> {
        let order_id = Uuid::new_v4();
        let now = Utc::now();

        let txn = self.write_conn().begin().await?;

        let order = OrderActiveModel {
            id: Set(order_id),
            order_number: Set(new.order_number),
            issued_on: Set(new.issued_on),
            hospital: Set(new.hospital),
            delivery_address: Set(new.delivery_address),
            state: Set(new.state),
            state_code: Set(new.state_code),
            created_at: Set(now.into()),
        };
        let order = order.insert(&txn).await?;

        for line in new.lines {
            let line = OrderLineActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order_id),
                material_code: Set(line.material_code),
                description: Set(line.description),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                requested_delivery: Set(line.requested_delivery),
                created_at: Set(now.into()),
            };
            line.insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(order)
    }

    /// Find order by ID
    pub async fn find_order_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        OrderEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find order by its purchase-order number (import duplicate check)
    pub async fn find_order_by_number(&self, number: &str) -> Result<Option<Order>> {
        OrderEntity::find()
            .filter(OrderColumn::OrderNumber.eq(number))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List orders, newest first
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        OrderEntity::find()
            .order_by_desc(OrderColumn::CreatedAt)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Get the line items of one order
    pub async fn get_lines_by_order(&self, order_id: Uuid) -> Result<Vec<OrderLine>> {
        OrderLineEntity::find()
            .filter(OrderLineColumn::OrderId.eq(order_id))
            .order_by_asc(OrderLineColumn::MaterialCode)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find a single order line by ID
    pub async fn find_order_line_by_id(&self, id: Uuid) -> Result<Option<OrderLine>> {
        OrderLineEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List all order lines labeled with their order number, newest
    /// orders first (feeds the production registration form)
    pub async fn list_order_line_options(&self) -> Result<Vec<OrderLineOption>> {
        let stmt = Statement::from_string(
            DbBackend::Postgres,
            r#"
            SELECT ol.id, o.order_number, ol.description
            FROM order_lines ol
            JOIN orders o ON o.id = ol.order_id
            ORDER BY o.order_number DESC, ol.description ASC
            "#,
        );

        OrderLineOption::find_by_statement(stmt)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Production Record Operations
    // ========================================================================

    /// Register a production record for an order line. The derived pair
    /// starts empty and is filled by the next recompute pass.
    pub async fn create_production_record(
        &self,
        new: NewProductionRecord,
    ) -> Result<ProductionRecord> {
        let now = Utc::now();

        let record = ProductionRecordActiveModel {
            id: Set(Uuid::new_v4()),
            order_line_id: Set(new.order_line_id),
            fabric_status: Set(new.fabric_status),
            invoicing_status: Set(new.invoicing_status),
            invoiced_on: Set(new.invoiced_on),
            carrier: Set(new.carrier),
            invoice_number: Set(new.invoice_number),
            manufacturing_order: Set(new.manufacturing_order),
            planned_quantity: Set(new.planned_quantity),
            fabric_consumption: Set(new.fabric_consumption),
            fabric: Set(new.fabric),
            delivery_date: Set(None),
            priority_level: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        record.insert(self.write_conn()).await.map_err(Into::into)
    }

    /// Find a production record by ID
    pub async fn find_production_by_id(&self, id: Uuid) -> Result<Option<ProductionRecord>> {
        ProductionRecordEntity::find_by_id(id)
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Update the mutable production-state fields of one record
    pub async fn update_production(
        &self,
        id: Uuid,
        patch: ProductionPatch,
    ) -> Result<ProductionRecord> {
        let record = ProductionRecordActiveModel {
            id: Set(id),
            fabric_status: Set(patch.fabric_status),
            invoicing_status: Set(patch.invoicing_status),
            carrier: Set(patch.carrier),
            invoice_number: Set(patch.invoice_number),
            manufacturing_order: Set(patch.manufacturing_order),
            planned_quantity: Set(patch.planned_quantity),
            fabric_consumption: Set(patch.fabric_consumption),
            fabric: Set(patch.fabric),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        record.update(self.write_conn()).await.map_err(Into::into)
    }

    /// The joined tracking table: every production record with its parent
    /// order number and line description, newest first
    pub async fn list_production(&self) -> Result<Vec<ProductionRow>> {
        let stmt = Statement::from_string(
            DbBackend::Postgres,
            r#"
            SELECT
                pr.id,
                o.order_number,
                ol.description,
                pr.fabric_status,
                pr.invoicing_status,
                pr.invoiced_on,
                pr.carrier,
                pr.invoice_number,
                pr.manufacturing_order,
                pr.planned_quantity,
                pr.fabric_consumption,
                pr.fabric,
                pr.delivery_date,
                pr.priority_level,
                pr.created_at
            FROM production_records pr
            JOIN order_lines ol ON pr.order_line_id = ol.id
            JOIN orders o ON ol.order_id = o.id
            ORDER BY pr.created_at DESC
            "#,
        );

        ProductionRow::find_by_statement(stmt)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    // ========================================================================
    // Scheduler Operations
    // ========================================================================

    /// Enumerate every production record with its parent order's issuance
    /// date, as input to a recompute pass
    pub async fn schedule_inputs(&self) -> Result<Vec<ScheduleInput>> {
        let stmt = Statement::from_string(
            DbBackend::Postgres,
            r#"
            SELECT pr.id, o.issued_on
            FROM production_records pr
            JOIN order_lines ol ON pr.order_line_id = ol.id
            JOIN orders o ON ol.order_id = o.id
            "#,
        );

        let rows = ScheduleInputRow::find_by_statement(stmt)
            .all(self.read_conn())
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| ScheduleInput {
                record_id: row.id,
                issued_on: row.issued_on,
            })
            .collect())
    }

    /// Persist a recompute pass atomically: every record's
    /// `(delivery_date, priority_level)` pair is written inside one
    /// transaction, or none are
    pub async fn apply_schedule(&self, updates: &[ScheduleUpdate]) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }

        let now = Utc::now();
        let txn = self.write_conn().begin().await?;

        for update in updates {
            let record = ProductionRecordActiveModel {
                id: Set(update.record_id),
                delivery_date: Set(Some(update.delivery_date)),
                priority_level: Set(Some(update.band.severity())),
                updated_at: Set(now.into()),
                ..Default::default()
            };
            record.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    // ========================================================================
    // Lookup Operations
    // ========================================================================

    /// List fabric-status options, name-ordered
    pub async fn list_fabric_status_options(&self) -> Result<Vec<FabricStatusOption>> {
        FabricStatusEntity::find()
            .order_by_asc(FabricStatusColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List invoicing-status options, name-ordered
    pub async fn list_invoicing_status_options(&self) -> Result<Vec<InvoicingStatusOption>> {
        InvoicingStatusEntity::find()
            .order_by_asc(InvoicingStatusColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// List logistics carriers, name-ordered
    pub async fn list_carriers(&self) -> Result<Vec<Carrier>> {
        CarrierEntity::find()
            .order_by_asc(CarrierColumn::Name)
            .all(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Find a carrier by exact name (duplicate check before insert)
    pub async fn find_carrier_by_name(&self, name: &str) -> Result<Option<Carrier>> {
        CarrierEntity::find()
            .filter(CarrierColumn::Name.eq(name))
            .one(self.read_conn())
            .await
            .map_err(Into::into)
    }

    /// Add a logistics carrier
    pub async fn create_carrier(&self, name: String) -> Result<Carrier> {
        let carrier = CarrierActiveModel {
            name: Set(name),
            ..Default::default()
        };

        carrier.insert(self.write_conn()).await.map_err(Into::into)
    }
}
