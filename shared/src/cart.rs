//! Storefront cart state
//!
//! 购物车是不可变记录，所有变更通过纯函数 [`reduce`] 完成：
//! 前端持有当前 [`Cart`]，派发 [`CartAction`]，拿回新的 Cart。
//! 没有全局状态，也没有内部可变性。

use crate::money;
use serde::{Deserialize, Serialize};

/// One line in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Menu item id
    pub menu_item: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
}

/// Immutable cart record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartLine>,
}

/// Cart mutation, applied through [`reduce`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    /// Add an item; merges with an existing line for the same menu item
    AddItem {
        menu_item: String,
        name: String,
        unit_price: f64,
        quantity: i32,
    },
    /// Remove a line entirely
    RemoveItem { menu_item: String },
    /// Set the quantity of a line; 0 removes the line
    UpdateQuantity { menu_item: String, quantity: i32 },
    /// Empty the cart
    Clear,
}

/// Apply an action to a cart, returning the new cart
///
/// The input cart is never mutated. Actions referencing unknown lines are
/// no-ops; non-positive added quantities are ignored.
pub fn reduce(cart: &Cart, action: CartAction) -> Cart {
    match action {
        CartAction::AddItem {
            menu_item,
            name,
            unit_price,
            quantity,
        } => {
            if quantity <= 0 {
                return cart.clone();
            }
            let mut items = cart.items.clone();
            match items.iter_mut().find(|l| l.menu_item == menu_item) {
                Some(line) => line.quantity += quantity,
                None => items.push(CartLine {
                    menu_item,
                    name,
                    unit_price,
                    quantity,
                }),
            }
            Cart { items }
        }
        CartAction::RemoveItem { menu_item } => Cart {
            items: cart
                .items
                .iter()
                .filter(|l| l.menu_item != menu_item)
                .cloned()
                .collect(),
        },
        CartAction::UpdateQuantity {
            menu_item,
            quantity,
        } => {
            if quantity <= 0 {
                return reduce(cart, CartAction::RemoveItem { menu_item });
            }
            Cart {
                items: cart
                    .items
                    .iter()
                    .map(|l| {
                        if l.menu_item == menu_item {
                            CartLine {
                                quantity,
                                ..l.clone()
                            }
                        } else {
                            l.clone()
                        }
                    })
                    .collect(),
            }
        }
        CartAction::Clear => Cart::default(),
    }
}

impl Cart {
    /// Total number of units across all lines
    pub fn total_quantity(&self) -> i32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Cart subtotal in pounds
    pub fn subtotal(&self) -> f64 {
        money::round_money(
            self.items
                .iter()
                .map(|l| money::line_total(l.unit_price, l.quantity))
                .sum(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(menu_item: &str, price: f64, qty: i32) -> CartAction {
        CartAction::AddItem {
            menu_item: menu_item.to_string(),
            name: menu_item.to_string(),
            unit_price: price,
            quantity: qty,
        }
    }

    #[test]
    fn test_add_merges_same_item() {
        let cart = reduce(&Cart::default(), add("menu_item:flat_white", 3.40, 1));
        let cart = reduce(&cart, add("menu_item:flat_white", 3.40, 2));

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_add_non_positive_is_noop() {
        let cart = reduce(&Cart::default(), add("menu_item:mocha", 3.80, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove() {
        let cart = reduce(&Cart::default(), add("menu_item:espresso", 2.20, 1));
        let cart = reduce(&cart, add("menu_item:cortado", 3.00, 1));
        let cart = reduce(
            &cart,
            CartAction::RemoveItem {
                menu_item: "menu_item:espresso".to_string(),
            },
        );

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].menu_item, "menu_item:cortado");
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let cart = reduce(&Cart::default(), add("menu_item:latte", 3.60, 2));
        let cart = reduce(
            &cart,
            CartAction::UpdateQuantity {
                menu_item: "menu_item:latte".to_string(),
                quantity: 0,
            },
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let cart = reduce(&Cart::default(), add("menu_item:latte", 3.60, 2));
        let cart = reduce(
            &cart,
            CartAction::UpdateQuantity {
                menu_item: "menu_item:latte".to_string(),
                quantity: 5,
            },
        );
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[test]
    fn test_clear() {
        let cart = reduce(&Cart::default(), add("menu_item:latte", 3.60, 2));
        let cart = reduce(&cart, CartAction::Clear);
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0.0);
    }

    #[test]
    fn test_subtotal() {
        let cart = reduce(&Cart::default(), add("menu_item:flat_white", 3.40, 2));
        let cart = reduce(&cart, add("menu_item:brownie", 2.80, 1));
        assert_eq!(cart.subtotal(), 9.60);
    }

    #[test]
    fn test_reduce_does_not_mutate_input() {
        let original = reduce(&Cart::default(), add("menu_item:latte", 3.60, 2));
        let snapshot = original.clone();
        let _ = reduce(&original, CartAction::Clear);
        let _ = reduce(
            &original,
            CartAction::UpdateQuantity {
                menu_item: "menu_item:latte".to_string(),
                quantity: 9,
            },
        );
        assert_eq!(original, snapshot);
    }
}
