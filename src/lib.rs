pub mod checksum;
pub mod config;
pub mod handlers;
pub mod observability;
pub mod providers;
pub mod server;
