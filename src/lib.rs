// Visual console - Widget composition engine and its preview service
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
