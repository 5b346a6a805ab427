// src/handlers/mod.rs
pub mod bounds;
pub mod calculate;
pub mod error;
