use crate::domain::Cart;
use crate::templates::{alert, components::price, desktop_layout, links, AlertKind};
use maud::{html, Markup};

pub fn cart_page(cart: &Cart, error: Option<&str>) -> Markup {
    desktop_layout(
        "Cart",
        cart.len(),
        html! {
            h1 { "Your cart" }

            @if let Some(msg) = error {
                (alert(AlertKind::Error, msg))
            }

            @if cart.is_empty() {
                p { "Your cart is empty. " a href="/" { "Search for a property" } "." }
            } @else {
                table class="cart" {
                    thead {
                        tr { th { "Property" } th { "Document" } th { "Price" } th {} }
                    }
                    tbody {
                        @for item in cart.items() {
                            tr {
                                td { a href=(links::property(&item.property_id)) { (item.address) } }
                                td { (item.document.doc_type.label()) }
                                td { (price(item.document.price_cents)) }
                                td {
                                    form method="post" action="/cart/remove" class="inline" {
                                        input type="hidden" name="property_id" value=(item.property_id);
                                        input type="hidden" name="document_id" value=(item.document.id);
                                        button type="submit" { "Remove" }
                                    }
                                }
                            }
                        }
                    }
                    tfoot {
                        tr {
                            th colspan="2" { "Total" }
                            th { (price(cart.total_cents())) }
                            th {}
                        }
                    }
                }

                form method="post" action="/checkout" {
                    button type="submit" class="primary" { "Place order" }
                }
            }
        },
    )
}
