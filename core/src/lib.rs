// Core assistant relay functionality:
// - API client for the hosted assistant (OpenAI Assistants v2)
// - Request/response data structures
// - Relay state machine (thread, message, run, poll, reply)
// - Configuration loading
// - Shared error types

// Export client module - API client for the assistant service
pub mod client;
pub use client::*;

// Export types module - Request/response data structures
pub mod types;
pub use types::*;

// Export relay module - Conversation relay state machine
pub mod relay;
pub use relay::*;

// Export config module - Configuration loading
pub mod config;
pub use config::*;

// Export errors module - Shared error types
pub mod errors;
pub use errors::*;
