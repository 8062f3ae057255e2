//! JSON bodies exchanged with the checkout backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path on the backend that creates a payment intent.
pub const CREATE_PAYMENT_INTENT_PATH: &str = "/create-payment-intent";

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Response has no client secret")]
    MissingClientSecret,
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub amount: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    pub currency: String,
    pub items: Vec<CartItem>,
}

impl PaymentIntentRequest {
    /// The single item sold: unlocking premium levels.
    pub fn premium_unlock() -> Self {
        Self {
            currency: "usd".to_owned(),
            items: vec![CartItem {
                id: "photo_suscription".to_owned(),
                amount: 200.0,
            }],
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    #[serde(default)]
    pub client_secret: String,
}

impl PaymentIntentResponse {
    pub fn parse(body: &str) -> Result<Self> {
        let response: Self = serde_json::from_str(body)?;
        if response.client_secret.is_empty() {
            return Err(ProtocolError::MissingClientSecret);
        }
        Ok(response)
    }
}

/// What the payment sheet reported back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutResult {
    Completed,
    Canceled,
    Failed { message: String },
}

impl CheckoutResult {
    pub fn unlocks_premium(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
