pub mod browser;
pub mod config;
pub mod cookie_store;
pub mod export;
pub mod fetcher;
pub mod parser;
pub mod schema;
pub mod selector_table;
