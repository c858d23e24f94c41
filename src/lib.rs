pub mod ai;
pub mod config;
pub mod error;
pub mod gateway;
pub mod relay;
pub mod routes;
pub mod snowflake;
pub mod state;
