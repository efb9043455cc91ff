//! MCP tools implementation

pub mod health;
pub mod search;
