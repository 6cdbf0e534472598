//! Application layer containing the payment order lifecycle.
//!
//! This module defines the `LifecycleManager`, the single entry point the
//! transport layer calls to create, verify and query payment orders. It
//! enforces every business rule and relies on the order store for atomic,
//! per-order state transitions.

pub mod lifecycle;
