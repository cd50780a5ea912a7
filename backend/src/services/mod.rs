// src/services/mod.rs

pub mod dashboard;
pub mod exam_store;
pub mod identity;
pub mod pomodoro;
pub mod session;
