pub mod cart;
pub mod home;
pub mod orders;
pub mod property;

pub use cart::cart_page;
pub use home::{home_page, search_page, SearchVm};
pub use orders::{confirmation_page, orders_page};
pub use property::property_page;
