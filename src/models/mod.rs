pub mod common;
pub mod response;
pub mod stock;
pub mod weather;

pub use common::*;
pub use response::*;
pub use stock::*;
pub use weather::*;
