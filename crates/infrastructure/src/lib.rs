pub mod connection;
pub mod dynamodb;
pub mod memory;
pub mod models;
pub mod repositories;

pub use connection::*;
pub use dynamodb::*;
pub use memory::*;
pub use models::*;
pub use repositories::*;
