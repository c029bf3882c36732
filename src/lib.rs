// src/lib.rs

pub mod config;
pub mod server;
pub mod sheets;
pub mod transpose;
