use crate::domain::order::{Amount, OrderId, PaymentOrder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub amount: Decimal,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentResponse {
    pub order_id: OrderId,
    pub amount: Amount,
    pub upi_string: String,
    pub upi_id: String,
    pub merchant_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_id: String,
    pub transaction_id: String,
    pub user_id: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum VerifyStatus {
    Success,
    Failure,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub status: VerifyStatus,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<PaymentOrder>,
}

#[derive(Debug, Serialize)]
pub struct PaymentStatusResponse {
    pub order: PaymentOrder,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
