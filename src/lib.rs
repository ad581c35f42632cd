// src/lib.rs
// Main library module declarations

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exchange;
pub mod trading;
