pub mod commands;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod queue;
pub mod silent;
pub mod state;
pub mod traits;
pub mod util;
