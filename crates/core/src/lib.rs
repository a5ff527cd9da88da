//! OpenRad Core - Shared types library.
//!
//! This crate provides common types used across all OpenRad components:
//! - `client` - Typed gateway to the backend REST API
//! - `portal` - Web front-end binary (session handling, role-gated routes)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session state. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Response envelopes, paging, roles, DICOM entities, and the
//!   viewer mode rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
