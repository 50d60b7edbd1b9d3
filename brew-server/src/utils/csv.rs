//! CSV rendering for back-office exports
//!
//! 手写转义足够覆盖导出需求：逗号/引号/换行的字段加引号，
//! 引号翻倍。金额列固定 `£X.XX` 格式。

use shared::models::TicketSale;
use shared::{money, util};

/// Escape a single CSV field
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render ticket sales as CSV: header + one row per sale
pub fn ticket_sales_csv(sales: &[TicketSale]) -> String {
    let mut out = String::from(
        "Confirmation,Event,Customer,Email,Quantity,Total Amount,Status,Purchased At\n",
    );
    for sale in sales {
        let status = match sale.status {
            shared::models::TicketSaleStatus::Confirmed => "confirmed",
            shared::models::TicketSaleStatus::Refunded => "refunded",
        };
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            escape(&sale.confirmation_number()),
            escape(&sale.event_title),
            escape(&sale.customer.name),
            escape(&sale.customer.email),
            sale.quantity,
            escape(&money::format_gbp(sale.total_amount)),
            status,
            escape(&util::format_millis(sale.purchased_at)),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Customer, TicketSaleStatus};

    fn sale(n: i64, name: &str, total: f64) -> TicketSale {
        TicketSale {
            id: format!("ticket_sale:{n}"),
            sale_number: n,
            event: "event:tasting".to_string(),
            event_title: "Cupping Night".to_string(),
            customer: Customer {
                name: name.to_string(),
                email: "a@example.com".to_string(),
                phone: None,
            },
            quantity: 2,
            unit_price: total / 2.0,
            total_amount: total,
            payment_intent_id: format!("pi_{n}"),
            status: TicketSaleStatus::Confirmed,
            purchased_at: 1_704_067_200_000,
        }
    }

    #[test]
    fn test_n_plus_one_lines() {
        let sales = vec![sale(1, "Ada", 10.0), sale(2, "Grace", 15.0), sale(3, "Edsger", 5.0)];
        let csv = ticket_sales_csv(&sales);
        assert_eq!(csv.trim_end().lines().count(), sales.len() + 1);
    }

    #[test]
    fn test_gbp_formatting() {
        let csv = ticket_sales_csv(&[sale(1, "Ada", 10.0)]);
        assert!(csv.contains("£10.00"));
        assert!(csv.contains("TKT-000001"));
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let csv = ticket_sales_csv(&[sale(1, "Lovelace, Ada", 10.0)]);
        assert!(csv.contains("\"Lovelace, Ada\""));
    }

    #[test]
    fn test_quotes_doubled() {
        let csv = ticket_sales_csv(&[sale(1, "Ada \"The Countess\"", 10.0)]);
        assert!(csv.contains("\"Ada \"\"The Countess\"\"\""));
    }

    #[test]
    fn test_empty_export_is_header_only() {
        let csv = ticket_sales_csv(&[]);
        assert_eq!(csv.trim_end().lines().count(), 1);
        assert!(csv.starts_with("Confirmation,Event,Customer"));
    }
}
