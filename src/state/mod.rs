pub mod console;
pub mod lifecycle;
pub mod topology;

pub use console::{ExecuteRejected, ExecutionConsole, EXECUTION_FAILURE_MESSAGE};
pub use lifecycle::{ComponentHandle, ComponentId};
pub use topology::{FetchPhase, PartitionVisibility, TopologyViewer};
