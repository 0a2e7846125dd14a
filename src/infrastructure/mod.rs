// Infrastructure layer - Element tree and configuration adapters
pub mod config;
pub mod dom;
