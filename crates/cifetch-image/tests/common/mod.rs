//! Common test infrastructure for cifetch-image tests
//!
//! # Modules
//!
//! - `constants`: Layer IDs, blob digests, credentials
//! - `fixtures`: Schema-1 manifest builders and runtime config helpers
//! - `mock_server`: Wiremock setup helpers for registry endpoints

// Not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod constants;
pub mod fixtures;
pub mod mock_server;

pub use constants::*;
pub use fixtures::*;
pub use mock_server::*;
