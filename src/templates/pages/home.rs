// templates/pages/home.rs

use crate::domain::AddressResult;
use crate::mock::TEST_SCENARIOS;
use crate::templates::{
    alert,
    components::search_form,
    desktop_layout, links, AlertKind,
};
use maud::{html, Markup};

pub fn home_page(cart_count: usize) -> Markup {
    search_page(&SearchVm {
        query: "",
        results: None,
        error: None,
        cart_count,
    })
}

pub struct SearchVm<'a> {
    pub query: &'a str,
    /// `None` until a search has run.
    pub results: Option<&'a [AddressResult]>,
    pub error: Option<&'a str>,
    pub cart_count: usize,
}

pub fn search_page(vm: &SearchVm) -> Markup {
    desktop_layout(
        "Property Search",
        vm.cart_count,
        html! {
            h1 { "Find a property" }
            p class="lead" {
                "Search by street address, title reference or lot/plan to order official documents."
            }

            (search_form(vm.query))

            @if let Some(msg) = vm.error {
                (alert(AlertKind::Error, msg))
            }

            @match vm.results {
                Some(results) if results.is_empty() => {
                    (alert(AlertKind::Info, "No properties matched your search."))
                }
                Some(results) => {
                    section class="results" {
                        h2 { (results.len()) " result(s) for \"" (vm.query) "\"" }
                        ul class="result-list" {
                            @for r in results {
                                li class="result" {
                                    a href=(links::property(&r.id)) { strong { (r.full_address) } }
                                    div class="result-meta" {
                                        @if let Some(title) = &r.title_reference {
                                            span { "Title: " (title) }
                                        }
                                        @if let Some(lot_plan) = &r.lot_plan {
                                            " " span { "Lot/Plan: " (lot_plan) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                None => {
                    section class="scenarios" {
                        h2 { "Test scenarios" }
                        ul {
                            @for s in &TEST_SCENARIOS {
                                li {
                                    a href=(links::search(s.query)) { (s.label) }
                                    " " small { (s.description) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
