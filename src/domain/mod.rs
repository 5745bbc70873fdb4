pub mod address;
pub mod cart;
pub mod document;
pub mod order;

pub use address::AddressResult;
pub use cart::{Cart, CartItem};
pub use document::{format_price, DocumentType, PropertyDocument};
pub use order::{ItemStatus, Order, OrderItem, OrderStatus, TransitionError};
