//! AQHR Tools module
//!
//! MCP tool implementations for the Air Quality Health Report service.

pub mod advisories;
pub mod reports;
pub mod session;
pub mod status;
