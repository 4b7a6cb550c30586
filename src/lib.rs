pub mod bill;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod message;
pub mod routes;
pub mod schemas;
pub mod state;
