// src/utils/mod.rs

pub mod docx;
