// templates/links.rs
use url::form_urlencoded;

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

pub fn search(query: &str) -> String {
    format!("/search?q={}", encode(query))
}

pub fn property(id: &str) -> String {
    format!("/property?id={}", encode(id))
}

pub fn confirmation(order_id: &str) -> String {
    format!("/orders/confirmation?id={}", encode(order_id))
}

pub fn download(order_id: &str, item: usize) -> String {
    format!("/orders/download?order={}&item={item}", encode(order_id))
}
