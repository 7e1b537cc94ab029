// src/models/mod.rs

pub mod analysis;
pub mod category;
pub mod question;
pub mod quiz_result;
pub mod settings;
pub mod user;
