//! Orders API Handlers
//!
//! 下单定价完全在服务端进行：行项单价取当前菜单价格，
//! 客户端提交的只有商品 id 和数量。

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{MenuItemRecord, OrderCreate};
use crate::db::repository::counter::SEQ_ORDERS;
use crate::db::repository::{CounterRepository, MenuItemRepository, OrderRepository};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use shared::models::{Order, OrderLine, OrderLineInput, OrderStatus, OrderSubmission, OrderType, StatusUpdate};
use shared::{ApiResponse, AppError, AppResult, ErrorCode, money};

/// Price the requested lines against the current menu
///
/// Unknown or unavailable items abort the checkout; totals go through
/// Decimal. Returns the priced lines and the order total.
fn price_lines(
    menu: &HashMap<String, MenuItemRecord>,
    inputs: &[OrderLineInput],
) -> AppResult<(Vec<OrderLine>, f64)> {
    let mut lines = Vec::with_capacity(inputs.len());
    let mut total = 0.0;

    for input in inputs {
        if input.quantity <= 0 {
            return Err(AppError::validation(format!(
                "Quantity for {} must be positive",
                input.menu_item
            )));
        }
        let item = menu.get(&input.menu_item).ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("Menu item {} not found", input.menu_item),
            )
        })?;
        if !item.is_available {
            return Err(AppError::with_message(
                ErrorCode::MenuItemUnavailable,
                format!("{} is not available right now", item.name),
            ));
        }

        let line_total = money::line_total(item.price, input.quantity);
        total += line_total;
        lines.push(OrderLine {
            menu_item: input.menu_item.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: input.quantity,
            line_total,
        });
    }

    Ok((lines, money::round_money(total)))
}

/// POST /api/orders - 门店结账下单
pub async fn checkout(
    State(state): State<ServerState>,
    Json(payload): Json<OrderSubmission>,
) -> AppResult<Json<ApiResponse<Order>>> {
    validate_required_text(&payload.customer.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.customer.email)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if payload.order_type == OrderType::Delivery {
        let address_missing = payload
            .delivery_address
            .as_deref()
            .map(|a| a.trim().is_empty())
            .unwrap_or(true);
        if address_missing {
            return Err(AppError::new(ErrorCode::OrderDeliveryAddressRequired));
        }
        validate_optional_text(&payload.delivery_address, "delivery_address", MAX_ADDRESS_LEN)?;
    }

    let db = state.get_db();
    let items_repo = MenuItemRepository::new(db.clone());
    let menu: HashMap<String, MenuItemRecord> = items_repo
        .find_all()
        .await?
        .into_iter()
        .filter_map(|item| item.id.as_ref().map(|id| (id.to_string(), item.clone())))
        .collect();

    let (lines, total) = price_lines(&menu, &payload.items)?;

    let sequence = CounterRepository::new(db.clone()).next(SEQ_ORDERS).await?;
    let order = OrderRepository::new(db)
        .create(OrderCreate {
            order_number: format!("ORD-{:06}", sequence),
            customer: payload.customer,
            order_type: payload.order_type,
            delivery_address: payload.delivery_address,
            items: lines,
            total_amount: total,
            notes: payload.notes,
        })
        .await?;

    tracing::info!(
        order = %order.order_number,
        total = order.total_amount,
        "Storefront order placed"
    );

    Ok(Json(ApiResponse::success(order.into())))
}

/// GET /api/orders - 后台订单看板
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_all().await?;
    Ok(Json(ApiResponse::success(
        orders.into_iter().map(Into::into).collect(),
    )))
}

/// PUT /api/orders/:id/status - 推进订单状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate<OrderStatus>>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .update_status(&id, payload.status)
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::Validation(msg) => {
                AppError::with_message(ErrorCode::OrderInvalidTransition, msg)
            }
            other => other.into(),
        })?;
    Ok(Json(ApiResponse::success(order.into())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::RecordId;

    fn menu_with(items: &[(&str, f64, bool)]) -> HashMap<String, MenuItemRecord> {
        items
            .iter()
            .map(|(key, price, available)| {
                let id = RecordId::from_table_key("menu_item", *key);
                (
                    id.to_string(),
                    MenuItemRecord {
                        id: Some(id),
                        name: key.to_string(),
                        description: None,
                        price: *price,
                        category: None,
                        image_url: None,
                        is_available: *available,
                        is_featured: false,
                        sort_order: 0,
                        tags: vec![],
                    },
                )
            })
            .collect()
    }

    fn line(key: &str, quantity: i32) -> OrderLineInput {
        OrderLineInput {
            menu_item: RecordId::from_table_key("menu_item", key).to_string(),
            quantity,
        }
    }

    #[test]
    fn test_pricing_uses_menu_prices() {
        let menu = menu_with(&[("flat_white", 3.40, true), ("brownie", 2.80, true)]);
        let (lines, total) = price_lines(&menu, &[line("flat_white", 2), line("brownie", 1)]).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_total, 6.80);
        assert_eq!(total, 9.60);
    }

    #[test]
    fn test_unknown_item_rejected() {
        let menu = menu_with(&[("flat_white", 3.40, true)]);
        let err = price_lines(&menu, &[line("ghost", 1)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);
    }

    #[test]
    fn test_unavailable_item_rejected() {
        let menu = menu_with(&[("flat_white", 3.40, false)]);
        let err = price_lines(&menu, &[line("flat_white", 1)]).unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemUnavailable);
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let menu = menu_with(&[("flat_white", 3.40, true)]);
        assert!(price_lines(&menu, &[line("flat_white", 0)]).is_err());
    }
}
