pub mod app_config;
pub mod domain;
pub mod feed;
pub mod map_sync;
pub mod server;
pub mod weather;
