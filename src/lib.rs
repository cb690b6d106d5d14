//! Snaplink - a minimalist in-memory URL shortener
//!
//! This library provides the core functionality for the Snaplink service:
//! a concurrent short-code store, asynchronous click counting, and the
//! HTTP handlers that expose them.
//!
//! # Architecture
//! - `storage`: the concurrent code → record mapping
//! - `analytics`: buffered click counting and flushing
//! - `services`: HTTP handlers (shorten, redirect, list, analytics)
//! - `config`: environment-driven configuration
//! - `system`: logging and process-level utilities

pub mod analytics;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod structs;
pub mod system;
pub mod utils;
