//! Presswire Core - button identity types and watch-set handling
//!
//! This crate provides the foundational types for the Presswire system:
//! - Button identity records (label, hardware address, callback target, payload)
//! - Ordered watch sets with first-match source-address lookup

pub mod button;

pub use button::{Button, ButtonError, ButtonSet, Payload};
