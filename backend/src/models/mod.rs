// src/models/mod.rs

pub mod dashboard;
pub mod exam_record;
pub mod subject;
pub mod user;
