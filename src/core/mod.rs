// src/core/mod.rs

pub mod converter;
pub mod dictionary;
pub mod engine;
pub mod table;
pub mod types;
