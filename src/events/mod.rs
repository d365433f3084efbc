//! External business events consumed by the ledger
//!
//! Orders and inventory movements are owned by other subsystems; the types
//! here are read-only inputs to the event-to-ledger mapper.

pub mod mapper;

pub use mapper::*;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// POS order lifecycle states relevant to accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

/// A line item on a POS order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub price: BigDecimal,
    pub quantity: BigDecimal,
}

/// A POS order as seen by the accounting subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total: BigDecimal,
}

/// Direction of an inventory stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    In,
    Out,
}

/// What kind of business document a stock movement traces back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementReference {
    PurchaseOrder,
    SalesOrder,
    Adjustment,
    Transfer,
    Waste,
    Theft,
    Damage,
}

impl MovementReference {
    /// Whether an outbound movement of this kind is a loss rather than a
    /// cost of sale
    pub fn is_loss(&self) -> bool {
        matches!(
            self,
            MovementReference::Waste | MovementReference::Theft | MovementReference::Damage
        )
    }
}

/// An inventory stock movement as seen by the accounting subsystem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: i64,
    pub item_id: i64,
    pub movement_type: MovementType,
    pub quantity: BigDecimal,
    pub unit_cost: BigDecimal,
    pub total_cost: Option<BigDecimal>,
    pub reference_type: Option<MovementReference>,
}

impl InventoryMovement {
    /// Stored total cost, falling back to `quantity * unit_cost`
    pub fn effective_total_cost(&self) -> BigDecimal {
        self.total_cost
            .clone()
            .unwrap_or_else(|| &self.quantity * &self.unit_cost)
    }
}

/// Correlation reference written on ledger entries derived from a movement
pub fn movement_reference(movement_id: i64) -> String {
    format!("MOV-{movement_id}")
}
