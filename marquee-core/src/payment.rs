use async_trait::async_trait;
use chrono::{DateTime, Utc};
use marquee_shared::events::PaymentCapturedEvent;
use marquee_shared::Masked;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Messages mirror what the payment form shows inline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("Please enter a valid 16-digit card number")]
    InvalidCardNumber,

    #[error("Please enter a valid expiry date (MM/YY)")]
    InvalidExpiry,

    #[error("Please enter a valid CVV")]
    InvalidCvv,

    #[error("Please enter the cardholder name")]
    MissingCardholderName,

    #[error("Payment declined: {0}")]
    Declined(String),
}

/// Card number display grouping: blocks of 4 digits separated by spaces.
/// Non-digits are dropped and anything past 16 digits is ignored.
pub fn format_card_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(16).collect();
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expiry display shape: a separator is inserted after the second digit.
pub fn format_expiry(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(4).collect();
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Card-shaped input, normalized the way the form normalizes it before
/// validation runs. Number and CVV are masked against accidental logging.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub number: Masked<String>,
    pub expiry: String,
    pub cvv: Masked<String>,
    pub holder_name: String,
}

impl CardDetails {
    pub fn new(number: &str, expiry: &str, cvv: &str, holder_name: &str) -> Self {
        Self {
            number: Masked(format_card_number(number)),
            expiry: format_expiry(expiry),
            cvv: Masked(cvv.chars().filter(|c| c.is_ascii_digit()).take(4).collect()),
            holder_name: holder_name.to_string(),
        }
    }

    /// Checks the rules in form order and reports the first violation.
    pub fn validate(&self) -> Result<(), PaymentError> {
        let digits = self
            .number
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .count();
        if digits != 16 {
            return Err(PaymentError::InvalidCardNumber);
        }
        if self.expiry.len() != 5 {
            return Err(PaymentError::InvalidExpiry);
        }
        if self.cvv.as_ref().len() < 3 {
            return Err(PaymentError::InvalidCvv);
        }
        if self.holder_name.trim().is_empty() {
            return Err(PaymentError::MissingCardholderName);
        }
        Ok(())
    }
}

/// Issued only for a captured charge; a decline surfaces as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub amount: u32,
    pub captured_at: DateTime<Utc>,
}

#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    /// Capture a charge for the given amount.
    async fn charge(&self, amount: u32) -> Result<PaymentReceipt, PaymentError>;
}

/// Resolution the simulator is configured with. Charges approve unless a
/// `Decline` is injected, which tests use to exercise the failure branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayBehavior {
    Approve,
    Decline,
}

/// Stand-in for a real payment gateway: sleeps the configured latency,
/// then resolves per its behavior. Performs no real transaction.
pub struct SimulatedGateway {
    latency: Duration,
    behavior: GatewayBehavior,
}

impl SimulatedGateway {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            behavior: GatewayBehavior::Approve,
        }
    }

    pub fn with_behavior(latency: Duration, behavior: GatewayBehavior) -> Self {
        Self { latency, behavior }
    }
}

#[async_trait]
impl PaymentAdapter for SimulatedGateway {
    async fn charge(&self, amount: u32) -> Result<PaymentReceipt, PaymentError> {
        tokio::time::sleep(self.latency).await;

        match self.behavior {
            GatewayBehavior::Approve => {
                let receipt = PaymentReceipt {
                    reference: format!("sim_{}", Uuid::new_v4().simple()),
                    amount,
                    captured_at: Utc::now(),
                };
                let event = PaymentCapturedEvent {
                    reference: receipt.reference.clone(),
                    amount,
                    captured_at: receipt.captured_at.timestamp_millis(),
                };
                tracing::info!("Payment captured: {:?}", event);
                Ok(receipt)
            }
            GatewayBehavior::Decline => {
                tracing::warn!("Payment declined for amount {}", amount);
                Err(PaymentError::Declined("Card declined by issuer".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_number_is_grouped_in_blocks_of_four() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111-1111"), "4111 1111");
        assert_eq!(format_card_number("41"), "41");
        // Overflow digits are dropped
        assert_eq!(
            format_card_number("41111111111111119999"),
            "4111 1111 1111 1111"
        );
    }

    #[test]
    fn expiry_gets_a_separator_after_two_digits() {
        assert_eq!(format_expiry("1229"), "12/29");
        assert_eq!(format_expiry("12"), "12/");
        assert_eq!(format_expiry("1"), "1");
    }

    #[test]
    fn a_well_formed_card_validates() {
        let card = CardDetails::new("4111 1111 1111 1111", "12/29", "123", "Jane Doe");
        assert_eq!(card.validate(), Ok(()));
    }

    #[test]
    fn fifteen_digit_numbers_are_rejected_with_the_16_digit_message() {
        let card = CardDetails::new("4111 1111 1111", "12/29", "123", "Jane Doe");
        assert_eq!(card.validate(), Err(PaymentError::InvalidCardNumber));
        assert_eq!(
            PaymentError::InvalidCardNumber.to_string(),
            "Please enter a valid 16-digit card number"
        );
    }

    #[test]
    fn first_violation_wins() {
        // Both the number and the CVV are bad; the number rule fires first
        let card = CardDetails::new("4111", "12/29", "1", "Jane Doe");
        assert_eq!(card.validate(), Err(PaymentError::InvalidCardNumber));

        let card = CardDetails::new("4111 1111 1111 1111", "1", "1", "");
        assert_eq!(card.validate(), Err(PaymentError::InvalidExpiry));

        let card = CardDetails::new("4111 1111 1111 1111", "12/29", "1", "");
        assert_eq!(card.validate(), Err(PaymentError::InvalidCvv));

        let card = CardDetails::new("4111 1111 1111 1111", "12/29", "123", "   ");
        assert_eq!(card.validate(), Err(PaymentError::MissingCardholderName));
    }

    #[tokio::test]
    async fn the_gateway_approves_by_default() {
        let gateway = SimulatedGateway::new(Duration::ZERO);
        let receipt = gateway.charge(45).await.unwrap();
        assert_eq!(receipt.amount, 45);
        assert!(receipt.reference.starts_with("sim_"));
    }

    #[tokio::test]
    async fn a_declining_gateway_reports_the_decline() {
        let gateway = SimulatedGateway::with_behavior(Duration::ZERO, GatewayBehavior::Decline);
        let err = gateway.charge(45).await.unwrap_err();
        assert!(matches!(err, PaymentError::Declined(_)));
    }
}
