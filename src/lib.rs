pub mod bot;
pub mod config;
pub mod error;
pub mod practicum;
pub mod shutdown;
pub mod telegram;
