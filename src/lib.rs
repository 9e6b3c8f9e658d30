pub mod app;
pub mod cli;
pub mod database;
pub mod error;
pub mod model;
pub mod render;
pub mod store;
pub mod types;
pub mod utils;
