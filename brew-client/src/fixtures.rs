//! In-memory fixture backend (demo mode)
//!
//! 固定的演示数据集 + 可用的下单/订座/购票流程。
//! 写操作只进内存，进程退出即消失；购票沿用真实后端的
//! 两段式流程与校验消息，便于前端在无后端环境下完整演示。

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::error::{ClientError, ClientResult};
use crate::storefront::StorefrontApi;
use shared::client::PublicContent;
use shared::models::{
    BlogPost, Booking, BookingRequest, BookingStatus, Event, MenuCategory, MenuItem, MenuSection,
    Message, MessageSubmission, Order, OrderLine, OrderStatus, OrderSubmission,
    TicketConfirmRequest, TicketConfirmResponse, TicketIntentRequest, TicketIntentResponse,
    format_confirmation_number,
};
use shared::{money, util};

/// Pending fixture purchase, keyed by intent id
struct PendingPurchase {
    event_id: String,
    event_title: String,
    customer_name: String,
    quantity: i32,
    total_amount: f64,
}

/// Fixture storefront backend
pub struct FixtureStore {
    sequence: AtomicI64,
    pending: Mutex<HashMap<String, PendingPurchase>>,
    confirmed: Mutex<HashMap<String, TicketConfirmResponse>>,
    attendees: Mutex<HashMap<String, i32>>,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self {
            sequence: AtomicI64::new(1),
            pending: Mutex::new(HashMap::new()),
            confirmed: Mutex::new(HashMap::new()),
            attendees: Mutex::new(HashMap::new()),
        }
    }

    fn next_sequence(&self) -> i64 {
        self.sequence.fetch_add(1, Ordering::SeqCst)
    }

    fn menu_sections() -> Vec<MenuSection> {
        let coffee = MenuCategory {
            id: "menu_category:coffee".to_string(),
            name: "Coffee".to_string(),
            description: Some("Espresso-based drinks".to_string()),
            sort_order: 0,
            is_active: true,
        };
        let pastries = MenuCategory {
            id: "menu_category:pastries".to_string(),
            name: "Pastries".to_string(),
            description: Some("Baked every morning".to_string()),
            sort_order: 1,
            is_active: true,
        };

        let item = |id: &str, name: &str, price: f64, category: &MenuCategory| MenuItem {
            id: format!("menu_item:{id}"),
            name: name.to_string(),
            description: None,
            price,
            category: Some(category.id.clone()),
            image_url: None,
            is_available: true,
            is_featured: false,
            sort_order: 0,
            tags: vec![],
        };

        vec![
            MenuSection {
                items: vec![
                    item("flat_white", "Flat White", 3.40, &coffee),
                    item("espresso", "Espresso", 2.20, &coffee),
                    item("batch_filter", "Batch Filter", 2.80, &coffee),
                ],
                category: coffee,
            },
            MenuSection {
                items: vec![
                    item("almond_croissant", "Almond Croissant", 2.80, &pastries),
                    item("banana_bread", "Banana Bread", 2.50, &pastries),
                ],
                category: pastries,
            },
        ]
    }

    fn events() -> Vec<Event> {
        vec![Event {
            id: "event:cupping_night".to_string(),
            title: "Cupping Night".to_string(),
            description: "Guided tasting of three single origins".to_string(),
            category: None,
            event_date: "2026-10-01".to_string(),
            start_time: "18:30".to_string(),
            end_time: Some("20:00".to_string()),
            location: Some("The roastery".to_string()),
            image_url: None,
            ticket_price: 5.0,
            max_attendees: 10,
            current_attendees: 0,
            is_published: true,
        }]
    }

    fn posts() -> Vec<BlogPost> {
        vec![BlogPost {
            id: "blog_post:welcome".to_string(),
            title: "New season, new beans".to_string(),
            slug: "new-season-new-beans".to_string(),
            excerpt: Some("What's on the brew bar this autumn".to_string()),
            content: "We have three fresh single origins landing this week...".to_string(),
            category: None,
            image_url: None,
            author: "Sam".to_string(),
            is_published: true,
            published_at: Some(util::now_millis()),
            created_at: util::now_millis(),
            updated_at: util::now_millis(),
        }]
    }

    fn find_event(event_id: &str) -> Option<Event> {
        Self::events().into_iter().find(|e| e.id == event_id)
    }
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorefrontApi for FixtureStore {
    async fn public_content(&self) -> ClientResult<PublicContent> {
        Ok(PublicContent {
            menu: Self::menu_sections(),
            events: Self::events(),
            posts: Self::posts(),
        })
    }

    async fn menu(&self) -> ClientResult<Vec<MenuSection>> {
        Ok(Self::menu_sections())
    }

    async fn submit_order(&self, order: OrderSubmission) -> ClientResult<Order> {
        if order.items.is_empty() {
            return Err(ClientError::Rejected("Order has no items".to_string()));
        }

        let menu: HashMap<String, MenuItem> = Self::menu_sections()
            .into_iter()
            .flat_map(|s| s.items)
            .map(|i| (i.id.clone(), i))
            .collect();

        let mut lines = Vec::new();
        let mut total = 0.0;
        for input in &order.items {
            let item = menu.get(&input.menu_item).ok_or_else(|| {
                ClientError::NotFound(format!("Menu item {} not found", input.menu_item))
            })?;
            let line_total = money::line_total(item.price, input.quantity);
            total += line_total;
            lines.push(OrderLine {
                menu_item: item.id.clone(),
                name: item.name.clone(),
                unit_price: item.price,
                quantity: input.quantity,
                line_total,
            });
        }

        let sequence = self.next_sequence();
        let now = util::now_millis();
        Ok(Order {
            id: format!("order:fixture{sequence}"),
            order_number: format!("ORD-{:06}", sequence),
            customer: order.customer,
            order_type: order.order_type,
            delivery_address: order.delivery_address,
            items: lines,
            total_amount: money::round_money(total),
            status: OrderStatus::Pending,
            notes: order.notes,
            created_at: now,
            updated_at: now,
        })
    }

    async fn submit_booking(&self, booking: BookingRequest) -> ClientResult<Booking> {
        let sequence = self.next_sequence();
        let now = util::now_millis();
        Ok(Booking {
            id: format!("booking:fixture{sequence}"),
            reference: format!("BKG-{:06}", sequence),
            customer: booking.customer,
            party_size: booking.party_size,
            date: booking.date,
            time: booking.time,
            status: BookingStatus::Pending,
            notes: booking.notes,
            created_at: now,
            updated_at: now,
        })
    }

    async fn submit_message(&self, message: MessageSubmission) -> ClientResult<Message> {
        Ok(Message {
            id: format!("message:fixture{}", self.next_sequence()),
            name: message.name,
            email: message.email,
            subject: message.subject,
            body: message.body,
            is_read: false,
            created_at: util::now_millis(),
        })
    }

    async fn create_ticket_intent(
        &self,
        request: TicketIntentRequest,
    ) -> ClientResult<TicketIntentResponse> {
        if request.quantity < 1 || request.quantity > 10 {
            return Err(ClientError::Rejected(
                "Quantity must be between 1 and 10".to_string(),
            ));
        }
        let event = Self::find_event(&request.event_id)
            .ok_or_else(|| ClientError::NotFound("Event not found".to_string()))?;

        let taken = *self
            .attendees
            .lock()
            .expect("attendees lock")
            .get(&event.id)
            .unwrap_or(&event.current_attendees);
        let remaining = (event.max_attendees - taken).max(0);
        if remaining == 0 {
            return Err(ClientError::Rejected("This event is sold out".to_string()));
        }
        if request.quantity > remaining {
            return Err(ClientError::Rejected(format!(
                "Only {} ticket{} remaining",
                remaining,
                if remaining == 1 { "" } else { "s" }
            )));
        }

        let amount = money::to_minor_units(event.ticket_price, request.quantity);
        let sequence = self.next_sequence();
        let intent_id = format!("pi_fixture_{sequence}");

        self.pending.lock().expect("pending lock").insert(
            intent_id.clone(),
            PendingPurchase {
                event_id: event.id.clone(),
                event_title: event.title,
                customer_name: request.customer_name,
                quantity: request.quantity,
                total_amount: money::from_minor_units(amount),
            },
        );

        Ok(TicketIntentResponse {
            client_secret: format!("{intent_id}_secret"),
            payment_intent_id: intent_id,
            amount,
            currency: "gbp".to_string(),
            publishable_key: "pk_fixture".to_string(),
        })
    }

    async fn confirm_ticket_purchase(
        &self,
        request: TicketConfirmRequest,
    ) -> ClientResult<TicketConfirmResponse> {
        // 重复确认回放首次结果
        if let Some(existing) = self
            .confirmed
            .lock()
            .expect("confirmed lock")
            .get(&request.payment_intent_id)
        {
            return Ok(existing.clone());
        }

        let pending = self
            .pending
            .lock()
            .expect("pending lock")
            .remove(&request.payment_intent_id)
            .ok_or_else(|| {
                ClientError::NotFound(format!(
                    "Payment intent not found: {}",
                    request.payment_intent_id
                ))
            })?;

        let response = TicketConfirmResponse {
            confirmation_number: format_confirmation_number(self.next_sequence()),
            event_title: pending.event_title,
            customer_name: pending.customer_name,
            quantity: pending.quantity,
            total_amount: pending.total_amount,
        };

        // 累加占座，容量校验在下一次 create_ticket_intent 生效
        if let Some(event) = Self::find_event(&pending.event_id) {
            let mut attendees = self.attendees.lock().expect("attendees lock");
            let entry = attendees
                .entry(event.id.clone())
                .or_insert(event.current_attendees);
            *entry += pending.quantity;
        }

        self.confirmed
            .lock()
            .expect("confirmed lock")
            .insert(request.payment_intent_id, response.clone());

        Ok(response)
    }
}
