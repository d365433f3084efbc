//! Reconciliation synchronizer: backfills ledger entries for business
//! events that were never posted
//!
//! This is a catch-up job, not an event subscriber. It walks the completed
//! orders and recent stock movements, posts whichever ones have no journal
//! entry with the matching correlation reference, and reports counts. Safe
//! to run repeatedly; a run with nothing new to post syncs zero events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::events::{movement_reference, Poster};
use crate::ledger::Journal;
use crate::traits::{LedgerStorage, MovementSource, OrderSource};
use crate::types::*;

/// How many recent stock movements a sync run considers.
const MOVEMENT_SCAN_LIMIT: usize = 1000;

/// Counters reported by a sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOutcome {
    /// Events that were missing from the ledger and got posted
    pub total_synced: u64,
    /// Events examined, posted or not
    pub total_available: u64,
}

/// Reconciliation synchronizer over the ledger and the external event
/// sources
pub struct Synchronizer<S, O, M>
where
    S: LedgerStorage + Clone,
    O: OrderSource,
    M: MovementSource,
{
    journal: Journal<S>,
    poster: Poster<S>,
    orders: O,
    movements: M,
}

impl<S, O, M> Synchronizer<S, O, M>
where
    S: LedgerStorage + Clone,
    O: OrderSource,
    M: MovementSource,
{
    pub fn new(storage: S, orders: O, movements: M) -> Self {
        Self {
            journal: Journal::new(storage.clone()),
            poster: Poster::new(storage),
            orders,
            movements,
        }
    }

    /// Scan completed orders and recent inventory movements, posting any
    /// that lack a journal entry
    ///
    /// Individual event failures are logged and skipped; only the counts
    /// come back. The storage-level reference uniqueness keeps concurrent
    /// runs from double-posting.
    pub async fn sync_all_transactions(
        &mut self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> LedgerResult<SyncOutcome> {
        let mut outcome = SyncOutcome::default();

        let orders = self.orders.completed_orders(start_date, end_date).await?;
        outcome.total_available += orders.len() as u64;
        for order in &orders {
            let reference = order.id.to_string();
            match self.journal.reference_exists(&reference).await {
                Ok(true) => continue,
                Ok(false) => {
                    if self.poster.post_completed_order(order, None).await.is_some() {
                        outcome.total_synced += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!(order_id = order.id, error = %err, "sync lookup failed, skipping order");
                }
            }
        }

        let movements = self.movements.recent_movements(MOVEMENT_SCAN_LIMIT).await?;
        outcome.total_available += movements.len() as u64;
        for movement in &movements {
            let reference = movement_reference(movement.id);
            match self.journal.reference_exists(&reference).await {
                Ok(true) => continue,
                Ok(false) => {
                    if self
                        .poster
                        .post_inventory_movement(movement, None)
                        .await
                        .is_some()
                    {
                        outcome.total_synced += 1;
                    }
                }
                Err(err) => {
                    tracing::warn!(movement_id = movement.id, error = %err, "sync lookup failed, skipping movement");
                }
            }
        }

        tracing::info!(
            synced = outcome.total_synced,
            available = outcome.total_available,
            "ledger sync finished"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{InventoryMovement, MovementType, Order, OrderStatus};
    use crate::utils::memory_storage::MemoryStorage;
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;

    #[derive(Default, Clone)]
    struct FixedOrders(Vec<Order>);

    #[async_trait]
    impl OrderSource for FixedOrders {
        async fn completed_orders(
            &self,
            _start_date: Option<NaiveDate>,
            _end_date: Option<NaiveDate>,
        ) -> LedgerResult<Vec<Order>> {
            Ok(self
                .0
                .iter()
                .filter(|o| o.status == OrderStatus::Completed)
                .cloned()
                .collect())
        }
    }

    #[derive(Default, Clone)]
    struct FixedMovements(Vec<InventoryMovement>);

    #[async_trait]
    impl MovementSource for FixedMovements {
        async fn recent_movements(&self, limit: usize) -> LedgerResult<Vec<InventoryMovement>> {
            Ok(self.0.iter().take(limit).cloned().collect())
        }
    }

    fn order(id: i64, total: i64) -> Order {
        Order {
            id,
            status: OrderStatus::Completed,
            items: vec![],
            total: BigDecimal::from(total),
        }
    }

    fn movement(id: i64) -> InventoryMovement {
        InventoryMovement {
            id,
            item_id: 1,
            movement_type: MovementType::Out,
            quantity: BigDecimal::from(2),
            unit_cost: BigDecimal::from(15),
            total_cost: None,
            reference_type: None,
        }
    }

    #[tokio::test]
    async fn first_run_posts_everything_second_run_posts_nothing() {
        let storage = MemoryStorage::new();
        let orders = FixedOrders(vec![order(1, 100), order(2, 250)]);
        let movements = FixedMovements(vec![movement(10)]);
        let mut sync = Synchronizer::new(storage.clone(), orders, movements);

        let first = sync.sync_all_transactions(None, None).await.unwrap();
        assert_eq!(first.total_available, 3);
        assert_eq!(first.total_synced, 3);

        let second = sync.sync_all_transactions(None, None).await.unwrap();
        assert_eq!(second.total_available, 3);
        assert_eq!(second.total_synced, 0);

        let journal = Journal::new(storage);
        assert!(journal.reference_exists("1").await.unwrap());
        assert!(journal.reference_exists("2").await.unwrap());
        assert!(journal.reference_exists("MOV-10").await.unwrap());
    }

    #[tokio::test]
    async fn already_posted_events_are_left_alone() {
        let storage = MemoryStorage::new();

        // order 1 was posted live, before the sync run
        let mut poster = Poster::new(storage.clone());
        poster.post_completed_order(&order(1, 100), None).await.unwrap();

        let orders = FixedOrders(vec![order(1, 100), order(2, 250)]);
        let mut sync = Synchronizer::new(storage.clone(), orders, FixedMovements::default());

        let outcome = sync.sync_all_transactions(None, None).await.unwrap();
        assert_eq!(outcome.total_available, 2);
        assert_eq!(outcome.total_synced, 1);

        let journal = Journal::new(storage);
        let entries = journal
            .list_entries(&EntryFilter::by_reference("1"))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn zero_total_orders_are_counted_but_never_posted() {
        let storage = MemoryStorage::new();
        let orders = FixedOrders(vec![order(1, 0)]);
        let mut sync = Synchronizer::new(storage, orders, FixedMovements::default());

        let outcome = sync.sync_all_transactions(None, None).await.unwrap();
        assert_eq!(outcome.total_available, 1);
        assert_eq!(outcome.total_synced, 0);
    }
}
