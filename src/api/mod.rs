pub mod client;
pub mod error;
pub mod logging;
#[cfg(test)]
pub mod mock_client;

pub use client::{EngineClient, EngineRoute};
pub use error::{ExecutionFailure, TopologyError, TransportFault};
