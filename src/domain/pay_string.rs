use super::order::{Amount, OrderId};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const UPI_SCHEME: &str = "upi://pay";
pub const CURRENCY: &str = "INR";

/// Everything except RFC 3986 unreserved characters and `@`, which is kept
/// so VPAs stay readable.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'@');

/// Merchant details embedded in every pay string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merchant {
    pub upi_id: String,
    pub name: String,
    pub note_prefix: String,
}

impl Merchant {
    /// Builds the UPI deep link a payer's app uses to push the payment.
    ///
    /// Format: `upi://pay?pa=<upi id>&pn=<name>&am=<amount>&cu=INR&tn=<note>`,
    /// with the amount always rendered to two decimal places and the note
    /// referencing the order id.
    pub fn pay_string(&self, amount: Amount, order_id: &OrderId) -> String {
        let note = format!("{} - {}", self.note_prefix, order_id);
        format!(
            "{UPI_SCHEME}?pa={}&pn={}&am={amount}&cu={CURRENCY}&tn={}",
            encode(&self.upi_id),
            encode(&self.name),
            encode(&note),
        )
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}
