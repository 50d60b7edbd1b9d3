//! 支付处理商集成
//!
//! 通过 REST API 直连卡支付处理商（无 SDK 依赖），并提供内存沙盒实现：
//! - [`StripeProvider`]: 真实处理商，form-encoded REST 调用
//! - [`SandboxProvider`]: 沙盒，密钥缺失/占位时自动选用
//!
//! 两者实现同一个 [`PaymentProvider`] trait，购票工作流不感知差异。

pub mod provider;
pub mod sandbox;
pub mod stripe;

pub use provider::{CreateIntentRequest, PaymentError, PaymentIntent, PaymentIntentStatus, PaymentProvider};
pub use sandbox::SandboxProvider;
pub use stripe::StripeProvider;

use crate::core::Config;
use std::sync::Arc;

/// 支付服务：具体处理商之上的薄封装
///
/// 持有 trait 对象供工作流调用；沙盒模式下额外保留具体句柄，
/// 用于挂载"模拟完成支付"演示接口。
#[derive(Clone)]
pub struct PaymentService {
    provider: Arc<dyn PaymentProvider>,
    sandbox: Option<Arc<SandboxProvider>>,
    publishable_key: String,
}

impl PaymentService {
    /// 依据配置选择处理商
    pub fn from_config(config: &Config) -> Self {
        if config.payments_sandboxed() {
            tracing::info!("Payments running in sandbox mode");
            return Self::sandboxed();
        }

        let secret = config
            .stripe_secret_key
            .clone()
            .expect("payments_sandboxed() checked key presence");
        let publishable = config.stripe_publishable_key.clone().unwrap_or_default();

        Self {
            provider: Arc::new(StripeProvider::new(secret)),
            sandbox: None,
            publishable_key: publishable,
        }
    }

    /// 强制沙盒 (测试与演示模式)
    pub fn sandboxed() -> Self {
        let sandbox = Arc::new(SandboxProvider::new());
        Self {
            provider: sandbox.clone(),
            sandbox: Some(sandbox),
            publishable_key: "pk_sandbox".to_string(),
        }
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox.is_some()
    }

    /// 沙盒句柄 (仅沙盒模式)
    pub fn sandbox(&self) -> Option<&Arc<SandboxProvider>> {
        self.sandbox.as_ref()
    }

    /// 前端卡表单所需公钥
    pub fn publishable_key(&self) -> &str {
        &self.publishable_key
    }

    pub fn provider(&self) -> &Arc<dyn PaymentProvider> {
        &self.provider
    }
}
