//! Classification of captured frames against the watch set

use pnet::packet::ethernet::EthernetPacket;
use pnet::util::MacAddr;
use presswire_core::{Button, ButtonSet};
use thiserror::Error;

/// The frame is too short to carry a decodable Ethernet header.
#[derive(Debug, Error)]
#[error("frame of {len} bytes lacks a decodable Ethernet header")]
pub struct MalformedFrame {
    pub len: usize,
}

/// Outcome of matching one frame against the watch set
#[derive(Debug)]
pub enum Classification<'a> {
    /// The frame's source address belongs to this button
    Match(&'a Button),
    /// Decodable frame from a sender not on the watch list
    Unknown(MacAddr),
}

/// Resolve a frame's Ethernet source address to at most one watched button.
///
/// First match in set order wins; `Unknown` carries the source address so
/// the caller can log the unrecognized sender and move on.
pub fn classify_frame<'a>(
    frame: &[u8],
    set: &'a ButtonSet,
) -> Result<Classification<'a>, MalformedFrame> {
    let ethernet = EthernetPacket::new(frame).ok_or(MalformedFrame { len: frame.len() })?;
    let source = ethernet.get_source();

    match set.match_source(source) {
        Some(button) => Ok(Classification::Match(button)),
        None => Ok(Classification::Unknown(source)),
    }
}
