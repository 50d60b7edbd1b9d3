//! Storefront API seam
//!
//! 门店前台依赖这个 trait 而不是具体客户端：
//! - [`HttpClient`]: 真实后端
//! - [`FixtureStore`]: 演示模式内存数据
//!
//! 选择由 `ClientConfig::backend_available` 显式决定，
//! 不做运行时"请求失败换假数据"的兜底。

use async_trait::async_trait;

use crate::{ClientConfig, ClientResult, FixtureStore, HttpClient};
use shared::client::PublicContent;
use shared::models::{
    Booking, BookingRequest, MenuSection, Message, MessageSubmission, Order, OrderSubmission,
    TicketConfirmRequest, TicketConfirmResponse, TicketIntentRequest, TicketIntentResponse,
};

/// Everything the public storefront needs from a backend
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Aggregate content for the landing pages
    async fn public_content(&self) -> ClientResult<PublicContent>;

    /// Available menu grouped by category
    async fn menu(&self) -> ClientResult<Vec<MenuSection>>;

    /// Checkout: submit a priced-server-side order
    async fn submit_order(&self, order: OrderSubmission) -> ClientResult<Order>;

    /// Request a table booking
    async fn submit_booking(&self, booking: BookingRequest) -> ClientResult<Booking>;

    /// Contact form submission
    async fn submit_message(&self, message: MessageSubmission) -> ClientResult<Message>;

    /// Ticket purchase step 1: create the payment intent
    async fn create_ticket_intent(
        &self,
        request: TicketIntentRequest,
    ) -> ClientResult<TicketIntentResponse>;

    /// Ticket purchase step 2: confirm after card completion
    async fn confirm_ticket_purchase(
        &self,
        request: TicketConfirmRequest,
    ) -> ClientResult<TicketConfirmResponse>;
}

/// Build the storefront backend selected by the configuration
pub fn storefront(config: &ClientConfig) -> Box<dyn StorefrontApi> {
    if config.backend_available {
        Box::new(HttpClient::new(config))
    } else {
        tracing::info!("Backend not configured, storefront running on fixture data");
        Box::new(FixtureStore::new())
    }
}

#[async_trait]
impl StorefrontApi for HttpClient {
    async fn public_content(&self) -> ClientResult<PublicContent> {
        self.get("/api/public/content").await
    }

    async fn menu(&self) -> ClientResult<Vec<MenuSection>> {
        Ok(self.public_content().await?.menu)
    }

    async fn submit_order(&self, order: OrderSubmission) -> ClientResult<Order> {
        self.storefront_order(&order).await
    }

    async fn submit_booking(&self, booking: BookingRequest) -> ClientResult<Booking> {
        self.storefront_booking(&booking).await
    }

    async fn submit_message(&self, message: MessageSubmission) -> ClientResult<Message> {
        self.storefront_message(&message).await
    }

    async fn create_ticket_intent(
        &self,
        request: TicketIntentRequest,
    ) -> ClientResult<TicketIntentResponse> {
        self.storefront_ticket_intent(&request).await
    }

    async fn confirm_ticket_purchase(
        &self,
        request: TicketConfirmRequest,
    ) -> ClientResult<TicketConfirmResponse> {
        self.storefront_ticket_confirm(&request).await
    }
}
