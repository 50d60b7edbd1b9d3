//! Ticket workflow tests
//!
//! 全流程跑在内存数据库 + 沙盒支付上。

use crate::db::DbService;
use crate::db::models::EventCreate;
use crate::db::repository::EventRepository;
use crate::payments::PaymentService;
use crate::tickets::TicketService;
use shared::ErrorCode;
use shared::models::{TicketConfirmRequest, TicketIntentRequest};

struct Harness {
    service: TicketService,
    events: EventRepository,
    payments: PaymentService,
    db: surrealdb::Surreal<surrealdb::engine::local::Db>,
}

async fn harness() -> Harness {
    let db = DbService::open_in_memory().await.unwrap();
    db.init_schema().await.unwrap();

    let payments = PaymentService::sandboxed();
    let service = TicketService::new(db.db.clone(), payments.clone(), "gbp".to_string());
    let events = EventRepository::new(db.db.clone());

    Harness {
        service,
        events,
        payments,
        db: db.db,
    }
}

impl Harness {
    async fn seed_event(&self, price: f64, capacity: i32, taken: i32, published: bool) -> String {
        let created = self
            .events
            .create(EventCreate {
                title: "Cupping Night".to_string(),
                description: "Guided tasting of three single origins".to_string(),
                category: None,
                event_date: "2026-10-01".to_string(),
                start_time: "18:30".to_string(),
                end_time: None,
                location: Some("The roastery".to_string()),
                image_url: None,
                ticket_price: price,
                max_attendees: capacity,
                is_published: Some(published),
            })
            .await
            .unwrap();
        let id = created.id.clone().unwrap();
        if taken > 0 {
            self.events.add_attendees(&id, taken).await.unwrap();
        }
        id.to_string()
    }

    fn intent_request(&self, event_id: &str, quantity: i32) -> TicketIntentRequest {
        TicketIntentRequest {
            event_id: event_id.to_string(),
            quantity,
            customer_name: "Ada Lovelace".to_string(),
            customer_email: "ada@example.com".to_string(),
            customer_phone: None,
        }
    }

    /// 完整购买一次：建意向 → 沙盒完成支付 → 确认
    async fn purchase(&self, event_id: &str, quantity: i32) -> shared::models::TicketConfirmResponse {
        let intent = self
            .service
            .create_payment_intent(self.intent_request(event_id, quantity))
            .await
            .unwrap();
        self.payments
            .sandbox()
            .unwrap()
            .complete_payment(&intent.payment_intent_id)
            .unwrap();
        self.service
            .confirm_purchase(TicketConfirmRequest {
                payment_intent_id: intent.payment_intent_id,
            })
            .await
            .unwrap()
    }
}

// ==================== Intent creation ====================

#[tokio::test]
async fn intent_rejects_out_of_range_quantity() {
    let h = harness().await;
    let event = h.seed_event(5.0, 10, 0, true).await;

    for quantity in [0, -1, 11] {
        let err = h
            .service
            .create_payment_intent(h.intent_request(&event, quantity))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TicketInvalidQuantity);
    }
}

#[tokio::test]
async fn intent_rejects_missing_contact_fields() {
    let h = harness().await;
    let event = h.seed_event(5.0, 10, 0, true).await;

    let mut req = h.intent_request(&event, 2);
    req.customer_email = "  ".to_string();
    let err = h.service.create_payment_intent(req).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::RequiredField);
}

#[tokio::test]
async fn intent_rejects_unknown_event() {
    let h = harness().await;
    let err = h
        .service
        .create_payment_intent(h.intent_request("event:nope", 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EventNotFound);
    assert_eq!(err.message, "Event not found");
}

#[tokio::test]
async fn intent_rejects_unpublished_event() {
    let h = harness().await;
    let event = h.seed_event(5.0, 10, 0, false).await;
    let err = h
        .service
        .create_payment_intent(h.intent_request(&event, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EventNotPublished);
    assert_eq!(err.message, "Event is not available");
}

#[tokio::test]
async fn intent_rejects_free_event() {
    let h = harness().await;
    let event = h.seed_event(0.0, 10, 0, true).await;
    let err = h
        .service
        .create_payment_intent(h.intent_request(&event, 2))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EventTicketsNotSold);
}

#[tokio::test]
async fn intent_rejects_insufficient_capacity() {
    let h = harness().await;
    // max_attendees=10, current_attendees=8 → 买 3 张被拒
    let event = h.seed_event(5.0, 10, 8, true).await;

    let err = h
        .service
        .create_payment_intent(h.intent_request(&event, 3))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EventInsufficientCapacity);
    assert_eq!(err.message, "Only 2 tickets remaining");

    // 剩余 2 张可以买
    assert!(
        h.service
            .create_payment_intent(h.intent_request(&event, 2))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn intent_rejects_sold_out_event() {
    let h = harness().await;
    let event = h.seed_event(5.0, 10, 10, true).await;
    let err = h
        .service
        .create_payment_intent(h.intent_request(&event, 1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EventSoldOut);
    assert_eq!(err.message, "This event is sold out");
}

#[tokio::test]
async fn intent_amount_is_in_minor_units() {
    let h = harness().await;
    // ticket_price=5.00, quantity=2 → 1000 便士
    let event = h.seed_event(5.00, 10, 0, true).await;
    let intent = h
        .service
        .create_payment_intent(h.intent_request(&event, 2))
        .await
        .unwrap();
    assert_eq!(intent.amount, 1000);
    assert_eq!(intent.currency, "gbp");
    assert!(!intent.client_secret.is_empty());
}

#[tokio::test]
async fn intent_writes_nothing_to_database() {
    let h = harness().await;
    let event = h.seed_event(5.0, 10, 0, true).await;
    h.service
        .create_payment_intent(h.intent_request(&event, 2))
        .await
        .unwrap();

    // 意向阶段不落库：无销售记录，人数不变
    let sales = crate::db::repository::TicketSaleRepository::new(h.db.clone())
        .find_all()
        .await
        .unwrap();
    assert!(sales.is_empty());
    let event = h.events.find_by_id(&event).await.unwrap().unwrap();
    assert_eq!(event.current_attendees, 0);
}

// ==================== Confirmation ====================

#[tokio::test]
async fn confirm_rejects_incomplete_payment() {
    let h = harness().await;
    let event = h.seed_event(5.0, 10, 0, true).await;
    let intent = h
        .service
        .create_payment_intent(h.intent_request(&event, 2))
        .await
        .unwrap();

    // 未完成卡输入就确认
    let err = h
        .service
        .confirm_purchase(TicketConfirmRequest {
            payment_intent_id: intent.payment_intent_id,
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentNotCompleted);
    assert_eq!(err.message, "Payment has not been completed");
}

#[tokio::test]
async fn confirm_rejects_unknown_intent() {
    let h = harness().await;
    let err = h
        .service
        .confirm_purchase(TicketConfirmRequest {
            payment_intent_id: "pi_sandbox_missing".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentIntentNotFound);
}

#[tokio::test]
async fn confirm_records_sale_and_increments_attendees() {
    let h = harness().await;
    let event = h.seed_event(5.0, 10, 3, true).await;

    let confirmation = h.purchase(&event, 2).await;
    assert_eq!(confirmation.confirmation_number, "TKT-000001");
    assert_eq!(confirmation.event_title, "Cupping Night");
    assert_eq!(confirmation.quantity, 2);
    assert_eq!(confirmation.total_amount, 10.0);

    // 人数在原有基础上累加，而非覆盖为本次数量
    let record = h.events.find_by_id(&event).await.unwrap().unwrap();
    assert_eq!(record.current_attendees, 5);
}

#[tokio::test]
async fn attendee_count_accumulates_across_purchases() {
    let h = harness().await;
    let event = h.seed_event(5.0, 20, 0, true).await;

    // N 次确认合计 Q 张 → current_attendees == 原值 + Q
    h.purchase(&event, 2).await;
    h.purchase(&event, 3).await;
    let third = h.purchase(&event, 1).await;
    assert_eq!(third.confirmation_number, "TKT-000003");

    let record = h.events.find_by_id(&event).await.unwrap().unwrap();
    assert_eq!(record.current_attendees, 6);
}

#[tokio::test]
async fn confirm_is_idempotent_per_intent() {
    let h = harness().await;
    let event = h.seed_event(5.0, 10, 0, true).await;

    let intent = h
        .service
        .create_payment_intent(h.intent_request(&event, 4))
        .await
        .unwrap();
    h.payments
        .sandbox()
        .unwrap()
        .complete_payment(&intent.payment_intent_id)
        .unwrap();

    let first = h
        .service
        .confirm_purchase(TicketConfirmRequest {
            payment_intent_id: intent.payment_intent_id.clone(),
        })
        .await
        .unwrap();
    let second = h
        .service
        .confirm_purchase(TicketConfirmRequest {
            payment_intent_id: intent.payment_intent_id.clone(),
        })
        .await
        .unwrap();

    // 同一意向的重复确认回放同一确认号
    assert_eq!(first.confirmation_number, second.confirmation_number);

    // 人数只累加一次
    let record = h.events.find_by_id(&event).await.unwrap().unwrap();
    assert_eq!(record.current_attendees, 4);
}

#[tokio::test]
async fn sale_derives_from_intent_metadata() {
    let h = harness().await;
    let event = h.seed_event(7.5, 10, 0, true).await;
    h.purchase(&event, 2).await;

    let sales = crate::db::repository::TicketSaleRepository::new(h.db.clone())
        .find_all()
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);
    let sale = &sales[0];
    assert_eq!(sale.event_title, "Cupping Night");
    assert_eq!(sale.customer.name, "Ada Lovelace");
    assert_eq!(sale.customer.email, "ada@example.com");
    assert_eq!(sale.quantity, 2);
    assert_eq!(sale.unit_price, 7.5);
    assert_eq!(sale.total_amount, 15.0);
}
