//! Plain data: stored entities, their DTOs and list filters, and order requests.

pub mod order;
pub mod product;
pub mod request;

pub use order::*;
pub use product::*;
pub use request::*;
