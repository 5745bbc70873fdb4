pub mod carts;
pub mod connection;
pub mod orders;
pub mod searches;

pub use connection::Database;
