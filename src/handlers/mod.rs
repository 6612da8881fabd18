pub mod auth;
pub mod data;
pub mod health;
