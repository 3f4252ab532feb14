pub mod audio;
pub mod config;
pub mod context;
pub mod event;
pub mod task;
pub mod ui;
pub mod util;
