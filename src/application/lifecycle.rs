use crate::domain::order::{Amount, OrderId, PaymentOrder};
use crate::domain::pay_string::Merchant;
use crate::domain::ports::OrderStoreBox;
use crate::error::{PaymentError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Transaction ids of this many characters or fewer are rejected.
pub const MAX_REJECTED_TRANSACTION_ID_LEN: usize = 5;

/// Result of a freshly created payment order.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedOrder {
    pub order_id: OrderId,
    pub amount: Amount,
    pub pay_string: String,
}

/// Business-level result of a verification attempt that passed lookup and
/// authorization.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    /// The order moved to `verified` with the supplied proof.
    Verified(PaymentOrder),
    /// The transaction id failed the proof check; the order is still pending.
    Rejected,
    /// The order had already been verified; nothing changed.
    AlreadyVerified(PaymentOrder),
}

/// Drives payment orders through their lifecycle.
///
/// `LifecycleManager` owns every business rule (input validation, ownership
/// checks, transition guards) and delegates storage to an [`OrderStore`].
/// It is shared across request handlers and holds no mutable state itself.
///
/// [`OrderStore`]: crate::domain::ports::OrderStore
pub struct LifecycleManager {
    store: OrderStoreBox,
    merchant: Merchant,
}

impl LifecycleManager {
    /// Creates a new `LifecycleManager`.
    ///
    /// # Arguments
    ///
    /// * `store` - The store holding payment orders.
    /// * `merchant` - The payee details embedded in pay strings.
    pub fn new(store: OrderStoreBox, merchant: Merchant) -> Self {
        Self { store, merchant }
    }

    pub fn merchant(&self) -> &Merchant {
        &self.merchant
    }

    /// Creates a pending order and returns its UPI pay string.
    ///
    /// The amount is rounded to paise before storage so the stored value and
    /// the `am=` parameter of the pay string are identical.
    pub async fn create_order(&self, user_id: &str, amount: Decimal) -> Result<CreatedOrder> {
        require_non_empty("userId", user_id)?;
        let amount = Amount::from_requested(amount)?;

        let order = PaymentOrder::new(user_id, amount);
        let order_id = order.id.clone();
        self.store.put(order).await?;

        let pay_string = self.merchant.pay_string(amount, &order_id);
        info!(order_id = %order_id, user_id, amount = %amount, "Created payment order");

        Ok(CreatedOrder {
            order_id,
            amount,
            pay_string,
        })
    }

    /// Records a user's proof of payment against an order.
    ///
    /// Checks run in a fixed order: existence, ownership, prior verification,
    /// then the transaction id. A caller who does not own the order never
    /// learns anything about its state or about the transaction id.
    pub async fn verify_order(
        &self,
        order_id: &OrderId,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<VerificationOutcome> {
        require_non_empty("orderId", order_id.as_str())?;
        require_non_empty("userId", user_id)?;
        require_non_empty("transactionId", transaction_id)?;

        let order = self.store.get(order_id).await?;
        if !order.belongs_to(user_id) {
            warn!(order_id = %order_id, user_id, "Verification attempted by non-owner");
            return Err(PaymentError::Unauthorized(order_id.clone()));
        }
        if order.is_verified() {
            return Ok(VerificationOutcome::AlreadyVerified(order));
        }
        if !is_acceptable_transaction_id(transaction_id) {
            warn!(order_id = %order_id, "Rejected transaction id");
            return Ok(VerificationOutcome::Rejected);
        }

        let proof = transaction_id.to_string();
        let result = self
            .store
            .update(
                order_id,
                Box::new(move |order: &mut PaymentOrder| order.verify(proof, Utc::now())),
            )
            .await;

        match result {
            Ok(order) => {
                info!(order_id = %order_id, transaction_id, "Payment verified");
                Ok(VerificationOutcome::Verified(order))
            }
            // Lost a race with a concurrent verification of the same order.
            Err(PaymentError::AlreadyVerified(_)) => {
                let order = self.store.get(order_id).await?;
                Ok(VerificationOutcome::AlreadyVerified(order))
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the current state of an order. Readable by anyone holding the id.
    pub async fn order_status(&self, order_id: &OrderId) -> Result<PaymentOrder> {
        self.store.get(order_id).await
    }

    pub async fn order_count(&self) -> Result<usize> {
        self.store.count().await
    }
}

/// Placeholder proof check: a real deployment would confirm the id with the
/// payment provider.
fn is_acceptable_transaction_id(transaction_id: &str) -> bool {
    transaction_id.chars().count() > MAX_REJECTED_TRANSACTION_ID_LEN
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(PaymentError::ValidationError(format!(
            "{field} must not be empty"
        )))
    } else {
        Ok(())
    }
}
