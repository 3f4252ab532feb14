pub mod app;
pub mod components;
pub mod handler;
pub mod input;
pub mod message;
pub mod state;
pub mod tui;
