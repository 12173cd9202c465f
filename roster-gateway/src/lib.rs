//! HTTP API gateway for Roster student records.
//!
//! Decodes and validates requests, calls the injected record store, and
//! wraps every outcome in a uniform JSON envelope.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod routes;
