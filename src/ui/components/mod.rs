pub mod app;
pub mod feed;
pub mod navbar;
pub mod player;
pub mod spinner;
