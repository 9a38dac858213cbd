//! Shared configuration, data model, and error types for the n8n
//! workflow lifecycle client.
//!
//! This crate has no HTTP dependencies so the provider layer and the CLI
//! can both build on it.

pub mod config;
pub mod error;
pub mod types;
