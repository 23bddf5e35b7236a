pub mod api;
pub mod app;
pub mod batch;
pub mod config;
pub mod runtime;
pub mod state;
pub mod telemetry;
pub mod terminal;
pub mod types;
pub mod ui;
pub mod util;

#[cfg(test)]
mod test_support;
