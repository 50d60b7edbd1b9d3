//! Ticket purchase service

use std::collections::HashMap;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{EventRecord, TicketSaleCreate};
use crate::db::repository::counter::SEQ_TICKET_SALES;
use crate::db::repository::{
    CounterRepository, EventRepository, RepoError, TicketSaleRepository, parse_record_id,
};
use crate::payments::{CreateIntentRequest, PaymentIntentStatus, PaymentService};
use shared::models::{
    Customer, MAX_TICKETS_PER_PURCHASE, TicketConfirmRequest, TicketConfirmResponse,
    TicketIntentRequest, TicketIntentResponse, format_confirmation_number,
};
use shared::{AppError, AppResult, ErrorCode, money};

// Metadata keys attached to the payment intent. The confirmation step reads
// the sale from these, never from a second user-supplied payload.
const META_EVENT_ID: &str = "event_id";
const META_EVENT_TITLE: &str = "event_title";
const META_EVENT_DATE: &str = "event_date";
const META_QUANTITY: &str = "quantity";
const META_UNIT_PRICE: &str = "unit_price";
const META_CUSTOMER_NAME: &str = "customer_name";
const META_CUSTOMER_EMAIL: &str = "customer_email";
const META_CUSTOMER_PHONE: &str = "customer_phone";

/// Ticket purchase workflow service
#[derive(Clone)]
pub struct TicketService {
    events: EventRepository,
    sales: TicketSaleRepository,
    counters: CounterRepository,
    payments: PaymentService,
    currency: String,
}

impl TicketService {
    pub fn new(db: Surreal<Db>, payments: PaymentService, currency: String) -> Self {
        Self {
            events: EventRepository::new(db.clone()),
            sales: TicketSaleRepository::new(db.clone()),
            counters: CounterRepository::new(db),
            payments,
            currency,
        }
    }

    /// Step 1: create a payment intent for a ticket purchase
    ///
    /// Validates the request against the event's current state and registers
    /// the amount plus order context with the payment processor. Nothing is
    /// written to the database; the sale exists only once payment succeeds.
    pub async fn create_payment_intent(
        &self,
        req: TicketIntentRequest,
    ) -> AppResult<TicketIntentResponse> {
        if req.customer_name.trim().is_empty() || req.customer_email.trim().is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Name and email are required",
            ));
        }
        if req.quantity < 1 || req.quantity > MAX_TICKETS_PER_PURCHASE {
            return Err(AppError::with_message(
                ErrorCode::TicketInvalidQuantity,
                format!("Quantity must be between 1 and {}", MAX_TICKETS_PER_PURCHASE),
            ));
        }

        let event = self.load_sellable_event(&req.event_id, req.quantity).await?;

        let amount = money::to_minor_units(event.ticket_price, req.quantity);

        let mut metadata = HashMap::new();
        metadata.insert(
            META_EVENT_ID.to_string(),
            event.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        );
        metadata.insert(META_EVENT_TITLE.to_string(), event.title.clone());
        metadata.insert(META_EVENT_DATE.to_string(), event.event_date.clone());
        metadata.insert(META_QUANTITY.to_string(), req.quantity.to_string());
        metadata.insert(META_UNIT_PRICE.to_string(), event.ticket_price.to_string());
        metadata.insert(META_CUSTOMER_NAME.to_string(), req.customer_name.clone());
        metadata.insert(META_CUSTOMER_EMAIL.to_string(), req.customer_email.clone());
        if let Some(phone) = &req.customer_phone {
            metadata.insert(META_CUSTOMER_PHONE.to_string(), phone.clone());
        }

        let intent = self
            .payments
            .provider()
            .create_intent(CreateIntentRequest {
                amount,
                currency: self.currency.clone(),
                metadata,
            })
            .await?;

        tracing::info!(
            event = %event.title,
            quantity = req.quantity,
            amount,
            intent = %intent.id,
            "Created ticket payment intent"
        );

        Ok(TicketIntentResponse {
            payment_intent_id: intent.id,
            client_secret: intent.client_secret,
            amount,
            currency: self.currency.clone(),
            publishable_key: self.payments.publishable_key().to_string(),
        })
    }

    /// Step 2: confirm a completed payment and record the sale
    ///
    /// Re-fetches the intent from the processor (the source of truth) and
    /// requires `succeeded`. The sale record is derived from the intent
    /// metadata; the attendee count is incremented atomically in the
    /// database. Confirming the same intent twice returns the original
    /// confirmation without counting attendees again.
    pub async fn confirm_purchase(
        &self,
        req: TicketConfirmRequest,
    ) -> AppResult<TicketConfirmResponse> {
        // 幂等：该意向已确认过则直接回放原确认信息
        if let Some(existing) = self.sales.find_by_intent(&req.payment_intent_id).await? {
            return Ok(confirmation_of(
                existing.sale_number,
                existing.event_title,
                existing.customer.name,
                existing.quantity,
                existing.total_amount,
            ));
        }

        let intent = self
            .payments
            .provider()
            .retrieve_intent(&req.payment_intent_id)
            .await?;

        if intent.status != PaymentIntentStatus::Succeeded {
            return Err(AppError::with_message(
                ErrorCode::PaymentNotCompleted,
                "Payment has not been completed",
            ));
        }

        // 销售内容完全取自意向元数据，防止确认阶段篡改
        let meta = |key: &str| -> AppResult<String> {
            intent.metadata.get(key).cloned().ok_or_else(|| {
                AppError::payment_provider(format!("Payment intent metadata missing '{}'", key))
            })
        };

        let event_id = meta(META_EVENT_ID)?;
        let event_record_id = parse_record_id("event", &event_id)
            .map_err(|_| AppError::payment_provider("Payment intent carries an invalid event id"))?;
        let quantity: i32 = meta(META_QUANTITY)?
            .parse()
            .map_err(|_| AppError::payment_provider("Payment intent carries an invalid quantity"))?;
        let unit_price: f64 = meta(META_UNIT_PRICE)?
            .parse()
            .map_err(|_| AppError::payment_provider("Payment intent carries an invalid price"))?;

        let customer = Customer {
            name: meta(META_CUSTOMER_NAME)?,
            email: meta(META_CUSTOMER_EMAIL)?,
            phone: intent.metadata.get(META_CUSTOMER_PHONE).cloned(),
        };
        let event_title = meta(META_EVENT_TITLE)?;
        let total_amount = money::from_minor_units(intent.amount);

        let sale_number = self.counters.next(SEQ_TICKET_SALES).await?;
        let created = self
            .sales
            .create(
                sale_number,
                TicketSaleCreate {
                    event: event_record_id.clone(),
                    event_title: event_title.clone(),
                    customer: customer.clone(),
                    quantity,
                    unit_price,
                    total_amount,
                    payment_intent_id: req.payment_intent_id.clone(),
                },
            )
            .await;

        let sale = match created {
            Ok(sale) => sale,
            // 并发确认撞到唯一索引：回放已有记录，不再累加人数
            Err(RepoError::Database(msg)) if msg.contains("uniq_sale_intent") => {
                let existing = self
                    .sales
                    .find_by_intent(&req.payment_intent_id)
                    .await?
                    .ok_or_else(|| AppError::database(msg))?;
                return Ok(confirmation_of(
                    existing.sale_number,
                    existing.event_title,
                    existing.customer.name,
                    existing.quantity,
                    existing.total_amount,
                ));
            }
            Err(e) => return Err(e.into()),
        };

        // 人数在数据库内自增 (current_attendees += quantity)
        let event = self.events.add_attendees(&event_record_id, quantity).await?;

        tracing::info!(
            confirmation = %format_confirmation_number(sale.sale_number),
            event = %event.title,
            quantity,
            attendees = event.current_attendees,
            "Confirmed ticket purchase"
        );

        Ok(confirmation_of(
            sale.sale_number,
            event_title,
            customer.name,
            quantity,
            total_amount,
        ))
    }

    /// Fetch the event and check it can sell `quantity` tickets right now
    async fn load_sellable_event(&self, event_id: &str, quantity: i32) -> AppResult<EventRecord> {
        let event = match self.events.find_by_id(event_id).await {
            Ok(Some(event)) => event,
            Ok(None) | Err(RepoError::NotFound(_)) => {
                return Err(AppError::with_message(
                    ErrorCode::EventNotFound,
                    "Event not found",
                ));
            }
            Err(e) => return Err(e.into()),
        };

        if !event.is_published {
            return Err(AppError::with_message(
                ErrorCode::EventNotPublished,
                "Event is not available",
            ));
        }
        if event.ticket_price <= 0.0 {
            return Err(AppError::with_message(
                ErrorCode::EventTicketsNotSold,
                "Tickets are not sold for this event",
            ));
        }

        let remaining = event.remaining_capacity();
        if remaining == 0 {
            return Err(AppError::with_message(
                ErrorCode::EventSoldOut,
                "This event is sold out",
            ));
        }
        if quantity > remaining {
            return Err(AppError::with_message(
                ErrorCode::EventInsufficientCapacity,
                format!(
                    "Only {} ticket{} remaining",
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                ),
            ));
        }

        Ok(event)
    }
}

fn confirmation_of(
    sale_number: i64,
    event_title: String,
    customer_name: String,
    quantity: i32,
    total_amount: f64,
) -> TicketConfirmResponse {
    TicketConfirmResponse {
        confirmation_number: format_confirmation_number(sale_number),
        event_title,
        customer_name,
        quantity,
        total_amount,
    }
}
