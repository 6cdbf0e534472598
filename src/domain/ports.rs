use super::order::{OrderId, PaymentOrder};
use crate::error::Result;
use async_trait::async_trait;

/// A state transition applied to a working copy of an order.
///
/// Returning an error discards the copy, leaving the stored order untouched.
pub type OrderMutator<'a> = Box<dyn FnOnce(&mut PaymentOrder) -> Result<()> + Send + 'a>;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order. Fails with `DuplicateOrder` if the id is taken.
    async fn put(&self, order: PaymentOrder) -> Result<()>;
    /// Returns a snapshot of the order, or `OrderNotFound`.
    async fn get(&self, id: &OrderId) -> Result<PaymentOrder>;
    /// Applies `mutator` under exclusive access to `id` and returns the committed state.
    async fn update(&self, id: &OrderId, mutator: OrderMutator<'_>) -> Result<PaymentOrder>;
    async fn count(&self) -> Result<usize>;
}

pub type OrderStoreBox = Box<dyn OrderStore>;
