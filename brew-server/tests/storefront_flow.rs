//! End-to-end storefront flow against a live server
//!
//! 启动真实 axum 服务 (内存数据库 + 沙盒支付)，用 brew-client
//! 走完门店与后台的主要路径。

use brew_client::{ClientConfig, ClientError, HttpClient, StorefrontApi};
use brew_server::auth::JwtConfig;
use brew_server::core::server::build_router;
use brew_server::core::{Config, ServerState};
use shared::models::{
    Customer, OrderLineInput, OrderStatus, OrderSubmission, OrderType, TicketConfirmRequest,
    TicketIntentRequest,
};

fn test_config(work_dir: &std::path::Path) -> Config {
    Config {
        work_dir: work_dir.to_string_lossy().to_string(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret-key-0123456789abcdef".to_string(),
            expiration_minutes: 60,
            issuer: "brew-server".to_string(),
            audience: "brew-admin".to_string(),
        },
        environment: "development".to_string(),
        stripe_secret_key: None,
        stripe_publishable_key: None,
        currency: "gbp".to_string(),
        admin_password: Some("integration-pass".to_string()),
    }
}

/// Boot a server on a random port; returns its base URL
async fn spawn_server() -> (String, tempfile::TempDir) {
    let work_dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(work_dir.path());
    config.ensure_work_dir_structure().expect("work dirs");

    let state = ServerState::initialize_in_memory(&config)
        .await
        .expect("state init");
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server run");
    });

    (format!("http://{}", addr), work_dir)
}

async fn admin_client(base_url: &str) -> HttpClient {
    let mut client = ClientConfig::new(base_url).build_http_client();
    client
        .login("admin", "integration-pass")
        .await
        .expect("admin login");
    client
}

#[tokio::test]
async fn health_is_public() {
    let (base_url, _guard) = spawn_server().await;
    let client = ClientConfig::new(&base_url).build_http_client();

    let health: shared::client::HealthResponse = client.get("/api/health").await.unwrap();
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn admin_endpoints_require_token() {
    let (base_url, _guard) = spawn_server().await;
    let client = ClientConfig::new(&base_url).build_http_client();

    assert!(matches!(
        client.orders().await,
        Err(ClientError::Unauthorized)
    ));
    assert!(matches!(
        client.ticket_sales().await,
        Err(ClientError::Unauthorized)
    ));
}

#[tokio::test]
async fn login_rejects_bad_password() {
    let (base_url, _guard) = spawn_server().await;
    let mut client = ClientConfig::new(&base_url).build_http_client();

    assert!(matches!(
        client.login("admin", "wrong").await,
        Err(ClientError::Unauthorized)
    ));
}

#[tokio::test]
async fn checkout_and_status_board() {
    let (base_url, _guard) = spawn_server().await;
    let admin = admin_client(&base_url).await;

    // 后台建菜单
    let category: shared::models::MenuCategory = admin
        .post(
            "/api/menu/categories",
            &serde_json::json!({"name": "Coffee"}),
        )
        .await
        .unwrap();
    let item: shared::models::MenuItem = admin
        .post(
            "/api/menu/items",
            &serde_json::json!({
                "name": "Flat White",
                "price": 3.40,
                "category": category.id,
            }),
        )
        .await
        .unwrap();

    // 门店下单 (无令牌)
    let storefront = ClientConfig::new(&base_url).build_http_client();
    let order = storefront
        .submit_order(OrderSubmission {
            customer: Customer {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
            },
            order_type: OrderType::Collection,
            delivery_address: None,
            items: vec![OrderLineInput {
                menu_item: item.id.clone(),
                quantity: 2,
            }],
            notes: None,
        })
        .await
        .unwrap();

    // 服务端按菜单定价
    assert_eq!(order.total_amount, 6.80);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.order_number, "ORD-000001");

    // 后台看板推进状态
    let listed = admin.orders().await.unwrap();
    assert_eq!(listed.len(), 1);

    let confirmed = admin
        .update_order_status(&order.id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);

    // 回退被拒
    assert!(matches!(
        admin.update_order_status(&order.id, OrderStatus::Pending).await,
        Err(ClientError::Rejected(_))
    ));
}

#[tokio::test]
async fn ticket_purchase_end_to_end() {
    let (base_url, _guard) = spawn_server().await;
    let admin = admin_client(&base_url).await;

    // 后台建活动：容量 10，已占 8
    let event: shared::models::Event = admin
        .post(
            "/api/events",
            &serde_json::json!({
                "title": "Cupping Night",
                "description": "Guided tasting",
                "event_date": "2026-10-01",
                "start_time": "18:30",
                "ticket_price": 5.0,
                "max_attendees": 10,
                "is_published": true,
            }),
        )
        .await
        .unwrap();

    let storefront = ClientConfig::new(&base_url).build_http_client();

    // 先买走 8 张
    let first = storefront
        .create_ticket_intent(TicketIntentRequest {
            event_id: event.id.clone(),
            quantity: 8,
            customer_name: "Ada".to_string(),
            customer_email: "ada@example.com".to_string(),
            customer_phone: None,
        })
        .await
        .unwrap();
    // 5.00 × 8 → 4000 便士
    assert_eq!(first.amount, 4000);

    storefront
        .sandbox_complete_payment(&first.payment_intent_id)
        .await
        .unwrap();
    let confirmation = storefront
        .confirm_ticket_purchase(TicketConfirmRequest {
            payment_intent_id: first.payment_intent_id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(confirmation.confirmation_number, "TKT-000001");

    // 剩 2 张，买 3 张被拒
    let err = storefront
        .create_ticket_intent(TicketIntentRequest {
            event_id: event.id.clone(),
            quantity: 3,
            customer_name: "Grace".to_string(),
            customer_email: "grace@example.com".to_string(),
            customer_phone: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Rejected(msg) if msg == "Only 2 tickets remaining"));

    // 未完成支付直接确认被拒
    let second = storefront
        .create_ticket_intent(TicketIntentRequest {
            event_id: event.id.clone(),
            quantity: 2,
            customer_name: "Grace".to_string(),
            customer_email: "grace@example.com".to_string(),
            customer_phone: None,
        })
        .await
        .unwrap();
    let err = storefront
        .confirm_ticket_purchase(TicketConfirmRequest {
            payment_intent_id: second.payment_intent_id.clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Rejected(msg) if msg == "Payment has not been completed"));

    // 完成支付后确认成功
    storefront
        .sandbox_complete_payment(&second.payment_intent_id)
        .await
        .unwrap();
    storefront
        .confirm_ticket_purchase(TicketConfirmRequest {
            payment_intent_id: second.payment_intent_id,
        })
        .await
        .unwrap();

    // 后台销售记录与导出
    let sales = admin.ticket_sales().await.unwrap();
    assert_eq!(sales.len(), 2);
    assert_eq!(sales.iter().map(|s| s.quantity).sum::<i32>(), 10);

    let csv = admin.export_ticket_sales().await.unwrap();
    // N 条记录 → N+1 行
    assert_eq!(csv.trim_end().lines().count(), 3);
    assert!(csv.contains("£40.00"));
    assert!(csv.contains("£10.00"));
}

#[tokio::test]
async fn public_content_aggregates_published_items() {
    let (base_url, _guard) = spawn_server().await;
    let admin = admin_client(&base_url).await;

    let _: shared::models::Event = admin
        .post(
            "/api/events",
            &serde_json::json!({
                "title": "Open Mic",
                "description": "Local acts",
                "event_date": "2026-11-05",
                "start_time": "19:00",
                "ticket_price": 0.0,
                "max_attendees": 40,
                "is_published": false,
            }),
        )
        .await
        .unwrap();

    let storefront = ClientConfig::new(&base_url).build_http_client();
    let content = storefront.public_content().await.unwrap();

    // 未发布活动不出现在门店聚合里
    assert!(content.events.is_empty());
}
