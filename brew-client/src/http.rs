//! HTTP client for network-based API calls

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult};
use shared::client::{ApiResponse, LoginRequest, LoginResponse, UserInfo};
use shared::models::{
    Booking, BookingRequest, BookingStatus, Message, MessageSubmission, Order, OrderStatus,
    OrderSubmission, StatusUpdate, TicketConfirmRequest, TicketConfirmResponse,
    TicketIntentRequest, TicketIntentResponse, TicketSale,
};

/// HTTP client for making network requests to the Brew Server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request, unwrapping the response envelope
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body, unwrapping the response envelope
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body, unwrapping the response envelope
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.put(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Normalize a response into `ClientResult<T>`
    ///
    /// 服务端统一返回 `{code, message, data}` 信封；
    /// `code != 0` 或非 2xx 状态都归一成 ClientError。
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse<T> = serde_json::from_str(&body)
            .map_err(|_| Self::status_error(status, &body))?;

        if !envelope.is_success() {
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(envelope.message),
                StatusCode::NOT_FOUND => ClientError::NotFound(envelope.message),
                s if s.is_server_error() => ClientError::Internal(envelope.message),
                _ => ClientError::Rejected(envelope.message),
            });
        }

        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".to_string()))
    }

    fn status_error(status: StatusCode, body: &str) -> ClientError {
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(body.to_string()),
            StatusCode::NOT_FOUND => ClientError::NotFound(body.to_string()),
            s if s.is_success() => {
                ClientError::InvalidResponse(format!("Unexpected response body: {body}"))
            }
            _ => ClientError::Internal(body.to_string()),
        }
    }

    // ========== Auth API ==========

    /// Login with username and password; keeps the token for later calls
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/api/auth/login", &request).await?;
        self.token = Some(response.token.clone());
        Ok(response)
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("/api/auth/me").await
    }

    // ========== Back-office wrappers ==========

    /// All orders for the admin board
    pub async fn orders(&self) -> ClientResult<Vec<Order>> {
        self.get("/api/orders").await
    }

    /// Advance an order's status
    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> ClientResult<Order> {
        self.put(&format!("/api/orders/{id}/status"), &StatusUpdate { status })
            .await
    }

    /// All bookings for the admin board
    pub async fn bookings(&self) -> ClientResult<Vec<Booking>> {
        self.get("/api/bookings").await
    }

    /// Advance a booking's status
    pub async fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> ClientResult<Booking> {
        self.put(&format!("/api/bookings/{id}/status"), &StatusUpdate { status })
            .await
    }

    /// All ticket sales, newest first
    pub async fn ticket_sales(&self) -> ClientResult<Vec<TicketSale>> {
        self.get("/api/tickets/sales").await
    }

    /// Raw CSV export of all ticket sales
    pub async fn export_ticket_sales(&self) -> ClientResult<String> {
        let mut request = self.client.get(self.url("/api/tickets/sales/export"));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }
        if !response.status().is_success() {
            return Err(ClientError::Internal(response.text().await?));
        }
        Ok(response.text().await?)
    }

    /// Contact messages inbox
    pub async fn messages(&self) -> ClientResult<Vec<Message>> {
        self.get("/api/messages").await
    }

    /// Simulate card completion against a sandbox-mode server
    pub async fn sandbox_complete_payment(&self, payment_intent_id: &str) -> ClientResult<()> {
        self.post_no_data(
            "/api/tickets/sandbox/complete",
            &serde_json::json!({ "payment_intent_id": payment_intent_id }),
        )
        .await
    }

    /// POST whose success envelope carries no data
    async fn post_no_data<B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: ApiResponse<serde_json::Value> =
            serde_json::from_str(&body).map_err(|_| Self::status_error(status, &body))?;
        if !envelope.is_success() {
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::NOT_FOUND => ClientError::NotFound(envelope.message),
                _ => ClientError::Rejected(envelope.message),
            });
        }
        Ok(())
    }

    // ========== Storefront calls (also exposed via StorefrontApi) ==========

    pub(crate) async fn storefront_order(&self, order: &OrderSubmission) -> ClientResult<Order> {
        self.post("/api/orders", order).await
    }

    pub(crate) async fn storefront_booking(
        &self,
        booking: &BookingRequest,
    ) -> ClientResult<Booking> {
        self.post("/api/bookings", booking).await
    }

    pub(crate) async fn storefront_message(
        &self,
        message: &MessageSubmission,
    ) -> ClientResult<Message> {
        self.post("/api/messages", message).await
    }

    pub(crate) async fn storefront_ticket_intent(
        &self,
        request: &TicketIntentRequest,
    ) -> ClientResult<TicketIntentResponse> {
        self.post("/api/tickets/payment-intent", request).await
    }

    pub(crate) async fn storefront_ticket_confirm(
        &self,
        request: &TicketConfirmRequest,
    ) -> ClientResult<TicketConfirmResponse> {
        self.post("/api/tickets/confirm", request).await
    }
}
