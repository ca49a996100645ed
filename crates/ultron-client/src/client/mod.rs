pub mod client;
pub mod connection;
pub mod constants;
pub mod query;

pub use client::{ArrivalParams, GameQueryClient};
pub use connection::GameQueryServer;
pub use constants::*;
pub use query::{ActionResult, BlockInfo, PlayerEntry, PlayerStatus, Query, Response};
