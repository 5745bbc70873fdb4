use crate::domain::{ItemStatus, Order, OrderStatus};
use crate::templates::{
    alert,
    components::{item_badge, order_badge, price},
    desktop_layout, links, AlertKind,
};
use maud::{html, Markup};

pub fn orders_page(orders: &[Order], cart_count: usize) -> Markup {
    desktop_layout(
        "My Orders",
        cart_count,
        html! {
            h1 { "My orders" }
            @if orders.is_empty() {
                p { "No orders yet." }
            }
            @for order in orders {
                (order_section(order))
            }
        },
    )
}

pub fn confirmation_page(order: &Order, cart_count: usize) -> Markup {
    desktop_layout(
        "Order Confirmation",
        cart_count,
        html! {
            h1 { "Thank you for your order" }
            p { "Your order reference is " strong class="order-ref" { (order.id) } "." }
            @if order.status == OrderStatus::Processing {
                (alert(AlertKind::Info, "Your documents are being prepared. This page will show download links once they are ready."))
            }
            (order_section(order))
            p {
                a href=(links::confirmation(&order.id)) { "Refresh status" }
                " · "
                a href="/orders" { "All orders" }
            }
        },
    )
}

fn order_section(order: &Order) -> Markup {
    html! {
        section class="card order" id={ "order-" (order.id) } {
            header {
                h2 { a href=(links::confirmation(&order.id)) { "Order " (order.id) } }
                (order_badge(order.status))
                " "
                time datetime=(order.created_at.to_rfc3339()) {
                    (order.created_at.format("%d %b %Y %H:%M UTC"))
                }
            }
            @if let Some(reason) = &order.failure_reason {
                (alert(AlertKind::Error, reason))
            }
            ul class="order-items" {
                @for (index, item) in order.items.iter().enumerate() {
                    li {
                        (item.document.doc_type.label()) " for " (item.address) " "
                        (price(item.price_cents)) " "
                        (item_badge(item.status))
                        @if item.status == ItemStatus::Ready {
                            " " a href=(links::download(&order.id, index)) { "Download" }
                        }
                    }
                }
            }
            p { "Total: " (price(order.total_cents)) }
        }
    }
}
