pub mod token;
pub mod visitor;

pub use visitor::Visitor;
