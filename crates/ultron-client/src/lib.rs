pub mod client;
pub mod config;
pub mod error;

pub use client::{ArrivalParams, GameQueryClient, GameQueryServer, PlayerStatus, Query};
pub use error::ClientError;
