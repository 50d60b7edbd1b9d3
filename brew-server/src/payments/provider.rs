//! Payment provider abstraction

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Payment provider errors
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Provider returned an error payload
    #[error("Payment provider error: {0}")]
    Api(String),

    /// Provider response could not be interpreted
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// Network-level failure reaching the provider
    #[error("Payment provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Unknown payment intent id
    #[error("Payment intent not found: {0}")]
    IntentNotFound(String),
}

impl From<PaymentError> for shared::AppError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::IntentNotFound(id) => shared::AppError::with_message(
                shared::ErrorCode::PaymentIntentNotFound,
                format!("Payment intent not found: {}", id),
            ),
            other => shared::AppError::payment_provider(other.to_string()),
        }
    }
}

/// Payment intent lifecycle status (subset the workflow cares about)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntentStatus {
    RequiresPaymentMethod,
    RequiresConfirmation,
    RequiresAction,
    Processing,
    Succeeded,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl PaymentIntentStatus {
    pub fn from_api(value: &str) -> Self {
        match value {
            "requires_payment_method" => Self::RequiresPaymentMethod,
            "requires_confirmation" => Self::RequiresConfirmation,
            "requires_action" => Self::RequiresAction,
            "processing" => Self::Processing,
            "succeeded" => Self::Succeeded,
            "canceled" => Self::Canceled,
            _ => Self::Unknown,
        }
    }
}

/// A payment intent as seen by the workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub status: PaymentIntentStatus,
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
    /// Order context attached at creation time; the confirmation step reads
    /// the sale exclusively from here
    pub metadata: HashMap<String, String>,
}

/// Create-intent request
#[derive(Debug, Clone)]
pub struct CreateIntentRequest {
    /// Amount in minor currency units
    pub amount: i64,
    pub currency: String,
    pub metadata: HashMap<String, String>,
}

/// Card-payment processor abstraction
///
/// 真实处理商与沙盒共用的最小界面：建意向、查意向。
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent; no money moves until the client completes
    /// card entry against the returned client secret
    async fn create_intent(&self, req: CreateIntentRequest) -> Result<PaymentIntent, PaymentError>;

    /// Fetch the current state of an intent from the source of truth
    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError>;
}
