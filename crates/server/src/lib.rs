pub mod clients;
pub mod config;
pub mod error;
pub mod render;
pub mod report;
pub mod routes;
pub mod state;
