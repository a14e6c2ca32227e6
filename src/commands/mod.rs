//! Command implementations for the CLI
//!
//! - start: Start the API server
//! - test: Test configuration validity
//! - config: Configuration display and validation
//! - quote: Price a pickup from JSON files without starting the server

pub mod config;
pub mod quote;
pub mod start;
pub mod test;
