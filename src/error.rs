use crate::domain::order::OrderId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),
    #[error("Order {0} does not belong to the requesting user")]
    Unauthorized(OrderId),
    #[error("Order {0} is already verified")]
    AlreadyVerified(OrderId),
    #[error("Order {0} already exists")]
    DuplicateOrder(OrderId),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T, E = PaymentError> = std::result::Result<T, E>;
