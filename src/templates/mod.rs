pub mod components;
pub mod layouts;
pub mod links;
pub mod pages;

// Re-exports for convenience
pub use components::{alert, error_page, AlertKind};
pub use layouts::desktop::desktop_layout;
