use crate::domain::pay_string::Merchant;
use crate::error::{PaymentError, Result};
use axum::http::HeaderValue;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_MERCHANT_NAME: &str = "AI Flashcards";
pub const DEFAULT_NOTE_PREFIX: &str = "Premium Plan";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Runtime settings. Every flag can also be supplied through its environment variable.
///
/// Only the UPI id is mandatory. Optional settings that are unset or blank
/// (e.g. `MERCHANT_NAME=` in a `.env` file) fall back to their defaults.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "UPI payment order service", long_about = None)]
pub struct Config {
    /// UPI id (VPA) that receives payments, e.g. yourname@paytm
    #[arg(long, env = "UPI_ID")]
    pub upi_id: String,

    /// Payee name shown in the payer's UPI app [default: AI Flashcards]
    #[arg(long, env = "MERCHANT_NAME")]
    pub merchant_name: Option<String>,

    /// Prefix of the transaction note; the order id is appended [default: Premium Plan]
    #[arg(long, env = "PAYMENT_NOTE_PREFIX")]
    pub note_prefix: Option<String>,

    /// Port to listen on [default: 8080]
    #[arg(long, env = "PORT")]
    pub port: Option<String>,

    /// Address to bind the HTTP listener to [default: 0.0.0.0]
    #[arg(long, env = "BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// Browser origin allowed to call the API [default: http://localhost:3000]
    #[arg(long, env = "CORS_ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Config {
    /// Fails on settings the service cannot start with. A missing UPI id is
    /// the only required value; the rest must merely parse when given.
    pub fn validate(&self) -> Result<()> {
        if self.upi_id.trim().is_empty() {
            return Err(PaymentError::Config(
                "UPI_ID must be set (e.g., yourname@paytm)".to_string(),
            ));
        }
        self.listen_addr()?;
        self.allowed_origin()?;
        Ok(())
    }

    pub fn merchant_name(&self) -> &str {
        non_blank(&self.merchant_name).unwrap_or(DEFAULT_MERCHANT_NAME)
    }

    pub fn note_prefix(&self) -> &str {
        non_blank(&self.note_prefix).unwrap_or(DEFAULT_NOTE_PREFIX)
    }

    pub fn port(&self) -> Result<u16> {
        match non_blank(&self.port) {
            None => Ok(DEFAULT_PORT),
            Some(port) => port
                .parse()
                .map_err(|_| PaymentError::Config(format!("PORT is not a valid port: '{port}'"))),
        }
    }

    pub fn bind_address(&self) -> Result<IpAddr> {
        match non_blank(&self.bind_address) {
            None => Ok(DEFAULT_BIND_ADDRESS),
            Some(addr) => addr.parse().map_err(|_| {
                PaymentError::Config(format!("BIND_ADDRESS is not an IP address: '{addr}'"))
            }),
        }
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        Ok(SocketAddr::new(self.bind_address()?, self.port()?))
    }

    pub fn allowed_origin(&self) -> Result<HeaderValue> {
        let origin = non_blank(&self.allowed_origin).unwrap_or(DEFAULT_ALLOWED_ORIGIN);
        HeaderValue::from_str(origin).map_err(|_| {
            PaymentError::Config(format!("CORS_ALLOWED_ORIGIN is not a valid origin: '{origin}'"))
        })
    }

    pub fn merchant(&self) -> Merchant {
        Merchant {
            upi_id: self.upi_id.trim().to_string(),
            name: self.merchant_name().to_string(),
            note_prefix: self.note_prefix().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Built directly rather than parsed so the caller's environment cannot leak in.
    fn config(upi_id: &str) -> Config {
        Config {
            upi_id: upi_id.to_string(),
            merchant_name: None,
            note_prefix: None,
            port: None,
            bind_address: None,
            allowed_origin: None,
        }
    }

    #[test]
    fn test_defaults() {
        let config = config("shop@upi");
        assert_eq!(config.merchant_name(), DEFAULT_MERCHANT_NAME);
        assert_eq!(config.note_prefix(), DEFAULT_NOTE_PREFIX);
        assert_eq!(config.port().unwrap(), DEFAULT_PORT);
        assert_eq!(
            config.listen_addr().unwrap(),
            SocketAddr::new(DEFAULT_BIND_ADDRESS, 8080)
        );
        assert_eq!(config.allowed_origin().unwrap(), DEFAULT_ALLOWED_ORIGIN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_optional_settings_use_defaults() {
        let config = Config {
            merchant_name: Some(String::new()),
            note_prefix: Some("  ".to_string()),
            port: Some(String::new()),
            bind_address: Some(" ".to_string()),
            allowed_origin: Some(String::new()),
            ..config("shop@upi")
        };

        assert!(config.validate().is_ok());
        assert_eq!(config.merchant().name, DEFAULT_MERCHANT_NAME);
        assert_eq!(config.merchant().note_prefix, DEFAULT_NOTE_PREFIX);
        assert_eq!(config.port().unwrap(), DEFAULT_PORT);
        assert_eq!(config.bind_address().unwrap(), DEFAULT_BIND_ADDRESS);
    }

    #[test]
    fn test_blank_upi_id_is_rejected() {
        assert!(matches!(
            config("   ").validate(),
            Err(PaymentError::Config(_))
        ));
    }

    #[test]
    fn test_unparseable_port_is_rejected() {
        let config = Config {
            port: Some("eighty".to_string()),
            ..config("shop@upi")
        };
        assert!(matches!(config.validate(), Err(PaymentError::Config(_))));
    }

    #[test]
    fn test_merchant_from_flags() {
        let config = Config::try_parse_from([
            "payorder",
            "--upi-id",
            " shop@upi ",
            "--merchant-name",
            "Shop",
            "--note-prefix",
            "Order",
            "--port",
            "9000",
            "--allowed-origin",
            "https://app.example.com",
        ])
        .unwrap();

        let merchant = config.merchant();
        assert_eq!(merchant.upi_id, "shop@upi");
        assert_eq!(merchant.name, "Shop");
        assert_eq!(merchant.note_prefix, "Order");
        assert_eq!(config.listen_addr().unwrap().port(), 9000);
        assert_eq!(
            config.allowed_origin().unwrap(),
            "https://app.example.com"
        );
    }
}
