pub mod engine;

pub use engine::{Disk, ExecuteResponse, Partition};
