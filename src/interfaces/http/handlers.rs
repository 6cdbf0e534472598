use super::dto::{
    CreatePaymentRequest, CreatePaymentResponse, PaymentStatusResponse, VerifyPaymentRequest,
    VerifyPaymentResponse, VerifyStatus,
};
use super::error::ApiError;
use crate::application::lifecycle::{LifecycleManager, VerificationOutcome};
use crate::domain::order::OrderId;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

pub type SharedManager = Arc<LifecycleManager>;

/// `POST /create-payment`
pub async fn create_payment(
    State(manager): State<SharedManager>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentResponse>, ApiError> {
    let Json(request) = payload?;
    let created = manager
        .create_order(&request.user_id, request.amount)
        .await?;
    let merchant = manager.merchant();

    Ok(Json(CreatePaymentResponse {
        order_id: created.order_id,
        amount: created.amount,
        upi_string: created.pay_string,
        upi_id: merchant.upi_id.clone(),
        merchant_name: merchant.name.clone(),
    }))
}

/// `POST /verify-payment`
pub async fn verify_payment(
    State(manager): State<SharedManager>,
    payload: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VerifyPaymentResponse>), ApiError> {
    let Json(request) = payload?;
    let order_id = OrderId::from(request.order_id);
    let outcome = manager
        .verify_order(&order_id, &request.user_id, &request.transaction_id)
        .await?;

    let response = match outcome {
        VerificationOutcome::Verified(order) => (
            StatusCode::OK,
            VerifyPaymentResponse {
                status: VerifyStatus::Success,
                message: "Payment verified successfully",
                order: Some(order),
            },
        ),
        VerificationOutcome::Rejected => (
            StatusCode::BAD_REQUEST,
            VerifyPaymentResponse {
                status: VerifyStatus::Failure,
                message: "Invalid transaction ID",
                order: None,
            },
        ),
        VerificationOutcome::AlreadyVerified(_) => (
            StatusCode::CONFLICT,
            VerifyPaymentResponse {
                status: VerifyStatus::Failure,
                message: "Payment already verified",
                order: None,
            },
        ),
    };

    Ok((response.0, Json(response.1)))
}

/// `GET /payment-status/:orderId`
pub async fn payment_status(
    State(manager): State<SharedManager>,
    Path(order_id): Path<String>,
) -> Result<Json<PaymentStatusResponse>, ApiError> {
    let order = manager.order_status(&OrderId::from(order_id)).await?;
    Ok(Json(PaymentStatusResponse { order }))
}
