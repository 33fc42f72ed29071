pub mod auth;
pub mod config;
pub mod generate;
pub mod journal;
pub mod play;
mod render;
