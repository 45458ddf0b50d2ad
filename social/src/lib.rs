//! Domain records and pure logic shared by the NicheNet host and browser client.
//!
//! This crate owns everything that does not need a browser or a socket:
//! backend record shapes, form validation, display formatting, pagination,
//! the real-time merge and its Phoenix-channel codec, request builders for the
//! backend-as-a-service, idea prompt/parse logic, payment demo mode, wallet
//! chain config, and the injected application store.

pub mod error;
pub mod format;
pub mod ideas;
pub mod model;
pub mod page;
pub mod payment;
pub mod realtime;
pub mod rest;
pub mod store;
pub mod validate;
pub mod wallet;

pub use error::ApiError;
