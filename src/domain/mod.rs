//! Domain layer: the payment order entity, its value objects and the storage port.

pub mod order;
pub mod pay_string;
pub mod ports;
