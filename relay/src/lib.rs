//! HTTP relay daemon for the autodiag suite.
//!
//! Accepts conversation turns over HTTP, forwards them to the hosted
//! assistant through [`autodiag_core::Relay`] and also exposes the local
//! symptom matcher.

pub mod config;
pub mod http_server;
