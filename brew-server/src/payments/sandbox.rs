//! In-memory sandbox payment provider
//!
//! 密钥未配置时的演示/测试实现。意向存在进程内，
//! 通过 [`SandboxProvider::complete_payment`] 模拟持卡人完成支付。

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::provider::{
    CreateIntentRequest, PaymentError, PaymentIntent, PaymentIntentStatus, PaymentProvider,
};

/// Sandbox provider holding intents in memory
#[derive(Debug, Default)]
pub struct SandboxProvider {
    intents: DashMap<String, PaymentIntent>,
}

impl SandboxProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 模拟持卡人完成卡输入：意向转为 succeeded
    pub fn complete_payment(&self, id: &str) -> Result<PaymentIntent, PaymentError> {
        let mut entry = self
            .intents
            .get_mut(id)
            .ok_or_else(|| PaymentError::IntentNotFound(id.to_string()))?;
        entry.status = PaymentIntentStatus::Succeeded;
        Ok(entry.clone())
    }

    /// 模拟支付失败
    pub fn fail_payment(&self, id: &str) -> Result<PaymentIntent, PaymentError> {
        let mut entry = self
            .intents
            .get_mut(id)
            .ok_or_else(|| PaymentError::IntentNotFound(id.to_string()))?;
        entry.status = PaymentIntentStatus::Canceled;
        Ok(entry.clone())
    }
}

#[async_trait]
impl PaymentProvider for SandboxProvider {
    async fn create_intent(&self, req: CreateIntentRequest) -> Result<PaymentIntent, PaymentError> {
        let id = format!("pi_sandbox_{}", Uuid::new_v4().simple());
        let intent = PaymentIntent {
            client_secret: format!("{id}_secret_{}", Uuid::new_v4().simple()),
            id: id.clone(),
            status: PaymentIntentStatus::RequiresPaymentMethod,
            amount: req.amount,
            currency: req.currency,
            metadata: req.metadata,
        };
        self.intents.insert(id, intent.clone());
        Ok(intent)
    }

    async fn retrieve_intent(&self, id: &str) -> Result<PaymentIntent, PaymentError> {
        self.intents
            .get(id)
            .map(|i| i.clone())
            .ok_or_else(|| PaymentError::IntentNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn request(amount: i64) -> CreateIntentRequest {
        CreateIntentRequest {
            amount,
            currency: "gbp".to_string(),
            metadata: HashMap::from([("event_id".to_string(), "event:tasting".to_string())]),
        }
    }

    #[tokio::test]
    async fn test_intent_lifecycle() {
        let provider = SandboxProvider::new();
        let intent = provider.create_intent(request(1000)).await.unwrap();
        assert_eq!(intent.status, PaymentIntentStatus::RequiresPaymentMethod);
        assert_eq!(intent.amount, 1000);
        assert!(intent.client_secret.starts_with(&intent.id));

        let fetched = provider.retrieve_intent(&intent.id).await.unwrap();
        assert_eq!(fetched.status, PaymentIntentStatus::RequiresPaymentMethod);

        provider.complete_payment(&intent.id).unwrap();
        let fetched = provider.retrieve_intent(&intent.id).await.unwrap();
        assert_eq!(fetched.status, PaymentIntentStatus::Succeeded);
        assert_eq!(fetched.metadata["event_id"], "event:tasting");
    }

    #[tokio::test]
    async fn test_unknown_intent() {
        let provider = SandboxProvider::new();
        assert!(matches!(
            provider.retrieve_intent("pi_missing").await,
            Err(PaymentError::IntentNotFound(_))
        ));
        assert!(matches!(
            provider.complete_payment("pi_missing"),
            Err(PaymentError::IntentNotFound(_))
        ));
    }
}
