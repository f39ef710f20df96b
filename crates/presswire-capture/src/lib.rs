//! Presswire Capture - the live ARP capture pipeline
//!
//! This crate provides the capture side of Presswire:
//! - BPF filter construction from a watch set
//! - Live promiscuous capture sessions over pcap
//! - Classification of captured frames back to watched buttons

pub mod classify;
pub mod filter;
pub mod session;

pub use classify::{classify_frame, Classification, MalformedFrame};
pub use filter::{arp_source_filter, FilterError};
pub use session::{CaptureError, CaptureFrame, CaptureSession};
