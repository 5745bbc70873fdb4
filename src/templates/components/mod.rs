use maud::{html, Markup};

use crate::domain::{format_price, ItemStatus, OrderStatus};

pub mod error;

pub use error::error_page;

#[derive(Debug, Clone, Copy)]
pub enum AlertKind {
    Info,
    Error,
}

pub fn alert(kind: AlertKind, message: &str) -> Markup {
    let class = match kind {
        AlertKind::Info => "alert alert-info",
        AlertKind::Error => "alert alert-error",
    };
    html! {
        div class=(class) role="alert" { (message) }
    }
}

pub fn price(cents: i64) -> Markup {
    html! { span class="price" { (format_price(cents)) } }
}

pub fn order_badge(status: OrderStatus) -> Markup {
    let label = match status {
        OrderStatus::Processing => "Processing",
        OrderStatus::Completed => "Completed",
        OrderStatus::Failed => "Failed",
    };
    html! {
        span class={ "badge badge-" (status.as_str()) } { (label) }
    }
}

pub fn item_badge(status: ItemStatus) -> Markup {
    let label = match status {
        ItemStatus::Processing => "Processing",
        ItemStatus::Ready => "Ready",
    };
    html! {
        span class={ "badge badge-" (status.as_str()) } { (label) }
    }
}

pub fn search_form(query: &str) -> Markup {
    html! {
        form method="get" action="/search" class="search-form" {
            label class="sr-only" for="q" { "Address, title reference or lot/plan" }
            input
                type="search"
                id="q"
                name="q"
                value=(query)
                placeholder="e.g. 1 Test Street, Sydney NSW 2000"
                autocomplete="off";
            button type="submit" class="primary" { "Search" }
        }
    }
}
