use crate::error::PaymentError;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Number of decimal places carried by a rupee amount (paise precision).
pub const AMOUNT_SCALE: u32 = 2;

/// Opaque, randomly generated identifier of a payment order.
///
/// Backed by a UUIDv4 so identifiers cannot be guessed or enumerated.
/// Lookups accept any string, so an id that was never issued simply
/// resolves to "not found".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A strictly positive rupee amount with paise precision.
///
/// Serialized as a JSON number so clients see the same shape they sent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Amount(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, PaymentError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    /// Rounds a requested amount to paise before validating it, so the
    /// stored value is exactly what ends up in the pay string.
    pub fn from_requested(value: Decimal) -> Result<Self, PaymentError> {
        let rounded =
            value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        Self::new(rounded)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = PaymentError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Always renders exactly two decimal places (`499` becomes `499.00`).
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Verified,
    /// Reserved for compatibility with existing clients; no transition assigns it.
    Failed,
}

/// A payment intent for a single user and amount.
///
/// `transaction_id` and `verified_at` are only ever set together, by
/// [`PaymentOrder::verify`], and only while the order is still pending.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrder {
    pub id: OrderId,
    pub user_id: String,
    pub amount: Amount,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

impl PaymentOrder {
    /// Creates a pending order under a freshly generated id.
    pub fn new(user_id: impl Into<String>, amount: Amount) -> Self {
        Self {
            id: OrderId::generate(),
            user_id: user_id.into(),
            amount,
            status: OrderStatus::Pending,
            transaction_id: None,
            created_at: Utc::now(),
            verified_at: None,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.status == OrderStatus::Verified
    }

    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Marks the order verified with the given proof of payment.
    pub fn verify(
        &mut self,
        transaction_id: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), PaymentError> {
        if self.is_verified() {
            return Err(PaymentError::AlreadyVerified(self.id.clone()));
        }
        self.status = OrderStatus::Verified;
        self.transaction_id = Some(transaction_id.into());
        self.verified_at = Some(at);
        Ok(())
    }
}
