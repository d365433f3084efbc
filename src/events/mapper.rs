//! Event-to-ledger mapping: one posting rule per business event kind
//!
//! The mapping functions are pure; [`Poster`] wraps them with persistence
//! and swallows every failure, because a bookkeeping problem must never
//! fail or roll back the order or stock operation that triggered it.

use bigdecimal::BigDecimal;

use crate::chart::{codes, default_name};
use crate::events::{
    movement_reference, InventoryMovement, MovementReference, MovementType, Order, OrderStatus,
};
use crate::ledger::Journal;
use crate::traits::LedgerStorage;
use crate::types::*;

fn chart_name(code: &'static str) -> &'static str {
    default_name(code).unwrap_or(code)
}

/// Build the journal entry for a completed order, or `None` when there is
/// nothing to post
///
/// Posts gross: Debit Cash / Credit Sales Revenue for the order total. Tax
/// and discount are deliberately not decomposed into their own lines.
pub fn order_entry(order: &Order) -> Option<NewJournalEntry> {
    if order.status != OrderStatus::Completed || order.total <= BigDecimal::from(0) {
        return None;
    }

    let entry = EntryBuilder::new(chrono::Utc::now().date_naive(), "sales_receipt")
        .description(format!("Sales revenue from order #{}", order.id))
        .reference(order.id.to_string())
        .debit(codes::CASH, chart_name(codes::CASH), order.total.clone())
        .credit(
            codes::SALES_REVENUE,
            chart_name(codes::SALES_REVENUE),
            order.total.clone(),
        )
        .build();
    Some(entry)
}

/// Build the journal entry for an inventory movement, or `None` when the
/// movement carries no cost
///
/// IN movements debit Inventory and credit Accounts Payable (purchase
/// orders) or Cash (everything else). OUT movements credit Inventory and
/// debit Cost of Goods Sold, except waste/theft/damage which debit the
/// waste-and-loss expense account.
pub fn movement_entry(movement: &InventoryMovement) -> Option<NewJournalEntry> {
    let total_cost = movement.effective_total_cost();
    if total_cost <= BigDecimal::from(0) {
        return None;
    }

    let builder = EntryBuilder::new(chrono::Utc::now().date_naive(), "journal")
        .reference(movement_reference(movement.id));

    let entry = match movement.movement_type {
        MovementType::In => {
            let is_purchase = movement
                .reference_type
                .is_some_and(|r| r == MovementReference::PurchaseOrder);
            let credit_code = if is_purchase {
                codes::ACCOUNTS_PAYABLE
            } else {
                codes::CASH
            };
            builder
                .description(format!("Inventory received (movement #{})", movement.id))
                .debit(
                    codes::INVENTORY,
                    chart_name(codes::INVENTORY),
                    total_cost.clone(),
                )
                .credit(credit_code, chart_name(credit_code), total_cost)
                .build()
        }
        MovementType::Out => {
            let is_loss = movement.reference_type.is_some_and(|r| r.is_loss());
            let debit_code = if is_loss {
                codes::WASTE_LOSS
            } else {
                codes::COST_OF_GOODS_SOLD
            };
            builder
                .description(format!("Inventory issued (movement #{})", movement.id))
                .debit(debit_code, chart_name(debit_code), total_cost.clone())
                .credit(codes::INVENTORY, chart_name(codes::INVENTORY), total_cost)
                .build()
        }
    };
    Some(entry)
}

/// Best-effort automated posting of business events
///
/// Every failure, including an unbalanced entry or a storage outage, is
/// logged and converted into `None`; callers in the order and inventory
/// paths never see an error from here.
pub struct Poster<S: LedgerStorage> {
    journal: Journal<S>,
}

impl<S: LedgerStorage> Poster<S> {
    pub fn new(storage: S) -> Self {
        Self {
            journal: Journal::new(storage),
        }
    }

    /// Post the ledger entry for a completed order
    ///
    /// No-op (not an error) for orders that are not completed or have a
    /// non-positive total.
    pub async fn post_completed_order(
        &mut self,
        order: &Order,
        actor: Option<&str>,
    ) -> Option<JournalEntry> {
        let entry = with_actor(order_entry(order)?, actor);
        self.post(entry, "order", order.id).await
    }

    /// Post the ledger entry for an inventory movement
    ///
    /// No-op for movements with a non-positive total cost.
    pub async fn post_inventory_movement(
        &mut self,
        movement: &InventoryMovement,
        actor: Option<&str>,
    ) -> Option<JournalEntry> {
        let entry = with_actor(movement_entry(movement)?, actor);
        self.post(entry, "movement", movement.id).await
    }

    async fn post(
        &mut self,
        entry: NewJournalEntry,
        event_kind: &str,
        event_id: i64,
    ) -> Option<JournalEntry> {
        match self.journal.create_entry(entry).await {
            Ok(stored) => {
                tracing::debug!(event_kind, event_id, entry_id = stored.id, "event posted to ledger");
                Some(stored)
            }
            Err(LedgerError::DuplicateReference(reference)) => {
                tracing::debug!(event_kind, event_id, %reference, "event already posted, skipping");
                None
            }
            Err(err) => {
                tracing::warn!(event_kind, event_id, error = %err, "failed to post event to ledger");
                None
            }
        }
    }
}

fn with_actor(mut entry: NewJournalEntry, actor: Option<&str>) -> NewJournalEntry {
    if let Some(actor) = actor {
        entry.created_by = actor.to_string();
    }
    entry
}
