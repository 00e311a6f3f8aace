pub mod config;
pub mod convert;
pub mod logging;
pub mod server;
pub mod upload;
