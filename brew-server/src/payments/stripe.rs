//! Stripe integration via REST API (no SDK dependency)

use async_trait::async_trait;
use std::collections::HashMap;

use super::provider::{
    CreateIntentRequest, PaymentError, PaymentIntent, PaymentIntentStatus, PaymentProvider,
};

const API_BASE: &str = "https://api.stripe.com/v1";

/// Stripe-backed payment provider
#[derive(Debug, Clone)]
pub struct StripeProvider {
    client: reqwest::Client,
    secret_key: String,
}

impl StripeProvider {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
        }
    }

    /// Interpret a payment-intent JSON payload
    fn parse_intent(resp: serde_json::Value) -> Result<PaymentIntent, PaymentError> {
        if let Some(error) = resp.get("error") {
            let message = error["message"].as_str().unwrap_or("unknown error");
            return Err(PaymentError::Api(message.to_string()));
        }

        let id = resp["id"]
            .as_str()
            .ok_or_else(|| PaymentError::InvalidResponse(format!("missing id: {resp}")))?
            .to_string();
        let client_secret = resp["client_secret"].as_str().unwrap_or_default().to_string();
        let status = PaymentIntentStatus::from_api(resp["status"].as_str().unwrap_or(""));
        let amount = resp["amount"].as_i64().unwrap_or(0);
        let currency = resp["currency"].as_str().unwrap_or("gbp").to_string();

        let metadata = resp["metadata"]
            .as_object()
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect::<HashMap<_, _>>()
            })
            .unwrap_or_default();

        Ok(PaymentIntent {
            id,
            client_secret,
            status,
            amount,
            currency,
            metadata,
        })
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    async fn create_intent(&self, req: CreateIntentRequest) -> Result<PaymentIntent, PaymentError> {
        let mut form: Vec<(String, String)> = vec![
            ("amount".to_string(), req.amount.to_string()),
            ("currency".to_string(), req.currency.clone()),
            (
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ),
        ];
        for (key, value) in &req.metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }

        let resp: serde_json::Value = self
            .client
            .post(format!("{API_BASE}/payment_intents"))
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await?
            .json()
            .await?;

        Self::parse_intent(resp)
    }

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError> {
        let resp = self
            .client
            .get(format!("{API_BASE}/payment_intents/{id}"))
            .basic_auth(&self.secret_key, None::<&str>)
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PaymentError::IntentNotFound(id.to_string()));
        }

        let body: serde_json::Value = resp.json().await?;
        Self::parse_intent(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intent() {
        let json = serde_json::json!({
            "id": "pi_3Abc",
            "client_secret": "pi_3Abc_secret_x",
            "status": "succeeded",
            "amount": 1000,
            "currency": "gbp",
            "metadata": {"event_id": "event:tasting", "quantity": "2"}
        });

        let intent = StripeProvider::parse_intent(json).unwrap();
        assert_eq!(intent.id, "pi_3Abc");
        assert_eq!(intent.status, PaymentIntentStatus::Succeeded);
        assert_eq!(intent.amount, 1000);
        assert_eq!(intent.metadata["quantity"], "2");
    }

    #[test]
    fn test_parse_error_payload() {
        let json = serde_json::json!({
            "error": {"message": "Invalid API Key provided"}
        });
        assert!(matches!(
            StripeProvider::parse_intent(json),
            Err(PaymentError::Api(_))
        ));
    }

    #[test]
    fn test_status_from_api() {
        assert_eq!(
            PaymentIntentStatus::from_api("succeeded"),
            PaymentIntentStatus::Succeeded
        );
        assert_eq!(
            PaymentIntentStatus::from_api("requires_payment_method"),
            PaymentIntentStatus::RequiresPaymentMethod
        );
        assert_eq!(
            PaymentIntentStatus::from_api("something_new"),
            PaymentIntentStatus::Unknown
        );
    }
}
