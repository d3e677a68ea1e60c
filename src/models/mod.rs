// src/models/mod.rs

pub mod question;
pub mod session_log;
