// src/handlers/mod.rs

pub mod analysis;
pub mod auth;
pub mod exam;
pub mod user;
