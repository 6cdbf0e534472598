//! Inbound adapters that translate external requests into lifecycle calls.

pub mod http;
