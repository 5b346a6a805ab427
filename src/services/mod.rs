// src/services/mod.rs
pub mod calculations;
pub mod formatting;
pub mod session;
pub mod validation;
