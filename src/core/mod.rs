// src/core/mod.rs
pub mod cache;
pub mod engine;
pub mod stats;
