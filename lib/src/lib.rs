pub mod api;
pub mod client;
pub mod config;
pub mod email;
pub mod error;

pub use client::{Client, EmailTransport};
pub use error::Error;
