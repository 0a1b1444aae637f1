pub mod api;
pub mod collections;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod state;
pub mod sync;
pub mod uploads;
