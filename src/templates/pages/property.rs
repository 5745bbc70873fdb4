use crate::domain::{AddressResult, Cart, PropertyDocument};
use crate::templates::{components::price, desktop_layout};
use maud::{html, Markup};

pub fn property_page(property: &AddressResult, documents: &[PropertyDocument], cart: &Cart) -> Markup {
    desktop_layout(
        &property.full_address,
        cart.len(),
        html! {
            p { a href="/" { "← New search" } }
            h1 { (property.full_address) }
            dl class="property-details" {
                @if let Some(title) = &property.title_reference {
                    dt { "Title reference" } dd { (title) }
                }
                @if let Some(lot_plan) = &property.lot_plan {
                    dt { "Lot/Plan" } dd { (lot_plan) }
                }
                @if !property.state.is_empty() {
                    dt { "State" } dd { (property.state) " " (property.postcode) }
                }
            }

            h2 { "Available documents" }
            table class="documents" {
                thead {
                    tr { th { "Document" } th { "Description" } th { "Price" } th {} }
                }
                tbody {
                    @for doc in documents {
                        @let in_cart = cart.contains(&property.id, doc.id);
                        tr class=[in_cart.then_some("in-cart")] {
                            td { (doc.doc_type.label()) }
                            td { (doc.description) }
                            td { (price(doc.price_cents)) }
                            td {
                                @if in_cart {
                                    span class="badge" { "In cart" }
                                    (cart_form("/cart/remove", &property.id, doc.id, "Remove"))
                                } @else if doc.available {
                                    (cart_form("/cart/add", &property.id, doc.id, "Add to cart"))
                                } @else {
                                    span class="muted" { "Unavailable" }
                                }
                            }
                        }
                    }
                }
            }

            p { a href="/cart" { "View cart (" (cart.len()) ")" } }
        },
    )
}

fn cart_form(action: &str, property_id: &str, document_id: &str, label: &str) -> Markup {
    html! {
        form method="post" action=(action) class="inline" {
            input type="hidden" name="property_id" value=(property_id);
            input type="hidden" name="document_id" value=(document_id);
            button type="submit" { (label) }
        }
    }
}
