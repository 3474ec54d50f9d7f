//! Agent-backed business-profile extraction.
//!
//! Composes three pieces: an HTTP client for the external extraction service
//! ([`AgentClient`]), a timeout-bounded orchestrator ([`Analyzer`]), and a
//! resilient parser that recovers a [`sitelens_core::BusinessProfile`] from
//! the service's free-text output ([`extract::extract_profile`]).

pub mod analyzer;
pub mod client;
pub mod error;
pub mod extract;
pub mod prompt;

pub use analyzer::Analyzer;
pub use client::AgentClient;
pub use error::AgentError;
pub use extract::extract_profile;
