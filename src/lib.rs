//! Air Quality Health Report (AQHR) Library
//!
//! Report normalization, advisory rules, report store client and PDF export.

pub mod advisory;
pub mod build_info;
pub mod config;
pub mod db;
pub mod export;
pub mod mcp;
pub mod models;
pub mod store;
pub mod tools;
pub mod view;
