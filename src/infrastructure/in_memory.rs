use crate::domain::order::{OrderId, PaymentOrder};
use crate::domain::ports::{OrderMutator, OrderStore};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// A thread-safe in-memory store for payment orders.
///
/// Uses `Arc<DashMap<OrderId, PaymentOrder>>`, which shards its locks by key:
/// operations on the same order are serialized while unrelated orders never
/// contend on a shared lock. Contents live for the lifetime of the process.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<DashMap<OrderId, PaymentOrder>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn put(&self, order: PaymentOrder) -> Result<()> {
        match self.orders.entry(order.id.clone()) {
            Entry::Occupied(entry) => Err(PaymentError::DuplicateOrder(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(order);
                Ok(())
            }
        }
    }

    async fn get(&self, id: &OrderId) -> Result<PaymentOrder> {
        self.orders
            .get(id)
            .map(|order| order.clone())
            .ok_or_else(|| PaymentError::OrderNotFound(id.clone()))
    }

    async fn update(&self, id: &OrderId, mutator: OrderMutator<'_>) -> Result<PaymentOrder> {
        // The shard write lock is held until `order` drops, so concurrent
        // updates and reads of this id see either the old or the new state.
        let mut order = self
            .orders
            .get_mut(id)
            .ok_or_else(|| PaymentError::OrderNotFound(id.clone()))?;

        let mut next = order.clone();
        mutator(&mut next)?;
        *order = next.clone();
        Ok(next)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.orders.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Amount, OrderStatus};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn order(user: &str) -> PaymentOrder {
        PaymentOrder::new(user, Amount::new(dec!(100.0)).unwrap())
    }

    #[tokio::test]
    async fn test_in_memory_order_store() {
        let store = InMemoryOrderStore::new();
        let order = order("u1");

        store.put(order.clone()).await.unwrap();
        let retrieved = store.get(&order.id).await.unwrap();
        assert_eq!(retrieved, order);

        let missing = store.get(&OrderId::from("nope")).await;
        assert!(matches!(missing, Err(PaymentError::OrderNotFound(_))));
    }

    #[tokio::test]
    async fn test_put_rejects_duplicate_id() {
        let store = InMemoryOrderStore::new();
        let original = order("u1");
        store.put(original.clone()).await.unwrap();

        let mut impostor = order("u2");
        impostor.id = original.id.clone();
        let result = store.put(impostor).await;

        assert!(matches!(result, Err(PaymentError::DuplicateOrder(_))));
        assert_eq!(store.get(&original.id).await.unwrap().user_id, "u1");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_commits_mutation() {
        let store = InMemoryOrderStore::new();
        let order = order("u1");
        store.put(order.clone()).await.unwrap();

        let updated = store
            .update(&order.id, Box::new(|o: &mut PaymentOrder| o.verify("TXN123456", Utc::now())))
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Verified);
        assert_eq!(store.get(&order.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_failed_mutator_commits_nothing() {
        let store = InMemoryOrderStore::new();
        let order = order("u1");
        store.put(order.clone()).await.unwrap();

        let result = store
            .update(
                &order.id,
                Box::new(|o: &mut PaymentOrder| {
                    o.status = OrderStatus::Verified;
                    Err(PaymentError::ValidationError("abort".to_string()))
                }),
            )
            .await;

        assert!(matches!(result, Err(PaymentError::ValidationError(_))));
        assert_eq!(store.get(&order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn test_update_missing_order() {
        let store = InMemoryOrderStore::new();
        let result = store
            .update(&OrderId::from("missing"), Box::new(|_: &mut PaymentOrder| Ok(())))
            .await;
        assert!(matches!(result, Err(PaymentError::OrderNotFound(_))));
    }
}
