pub mod cli;
pub mod config;
pub mod crud;
pub mod db;
pub mod export;
pub mod http_client;
pub mod ingest;
pub mod live_feed;
pub mod queries;
pub mod state;
pub mod table;
