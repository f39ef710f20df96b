//! Button identity types for tracking watched hardware addresses

use pnet::util::MacAddr;
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Opaque, order-preserving key/value payload forwarded verbatim on dispatch
pub type Payload = Map<String, Value>;

#[derive(Debug, Error)]
pub enum ButtonError {
    #[error("button {label:?} has invalid hardware address {address:?}")]
    InvalidAddress { label: String, address: String },
}

/// One watched wireless button
#[derive(Debug, Clone)]
pub struct Button {
    /// Human-readable name used in logs
    pub label: String,
    /// Link-layer source address the button announces itself with
    pub mac: MacAddr,
    /// Callback target invoked when the button is pressed
    pub url: String,
    /// Free-form JSON object forwarded verbatim to the callback
    pub payload: Payload,
}

impl Button {
    /// Build a button entry, canonicalizing its hardware address.
    ///
    /// Accepts colon- or hyphen-separated hex pairs in either case; the
    /// canonical form used everywhere downstream is lowercase colon-hex.
    pub fn new(
        label: impl Into<String>,
        address: &str,
        url: impl Into<String>,
        payload: Payload,
    ) -> Result<Self, ButtonError> {
        let label = label.into();
        let normalized = address.trim().replace('-', ":");
        let mac = MacAddr::from_str(&normalized).map_err(|_| ButtonError::InvalidAddress {
            label: label.clone(),
            address: address.to_string(),
        })?;

        Ok(Self {
            label,
            mac,
            url: url.into(),
            payload,
        })
    }
}

/// The ordered set of watched buttons for one process instance.
///
/// The set is supplied once at startup and never mutated afterwards; a
/// configuration change requires a process restart.
#[derive(Debug, Clone)]
pub struct ButtonSet {
    buttons: Vec<Button>,
}

impl ButtonSet {
    /// Build a watch set, preserving configuration order.
    ///
    /// Duplicate hardware addresses are not rejected, but only the first
    /// entry in set order will ever match; each duplicate is flagged loudly
    /// at startup.
    pub fn new(buttons: Vec<Button>) -> Self {
        for (i, button) in buttons.iter().enumerate() {
            if let Some(first) = buttons[..i].iter().find(|b| b.mac == button.mac) {
                warn!(
                    mac = %button.mac,
                    kept = %first.label,
                    shadowed = %button.label,
                    "Duplicate hardware address in watch set; only the first entry will match"
                );
            }
        }
        Self { buttons }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// First button whose hardware address equals `source`, in set order.
    ///
    /// Exact byte-wise comparison of all six octets; no prefix matching.
    pub fn match_source(&self, source: MacAddr) -> Option<&Button> {
        self.buttons.iter().find(|b| b.mac == source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(label: &str, mac: &str) -> Button {
        Button::new(label, mac, "http://localhost/hook", Payload::new()).unwrap()
    }

    #[test]
    fn test_parse_canonical_address() {
        let b = button("doorbell", "aa:bb:cc:dd:ee:ff");
        assert_eq!(b.mac.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_parse_normalizes_case_and_separators() {
        let b = button("doorbell", "AA-BB-CC-DD-EE-FF");
        assert_eq!(b.mac.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_reject_wrong_length() {
        let err = Button::new("short", "aa:bb:cc", "http://localhost", Payload::new());
        assert!(matches!(
            err,
            Err(ButtonError::InvalidAddress { ref label, .. }) if label == "short"
        ));
    }

    #[test]
    fn test_reject_non_hex() {
        let err = Button::new("bad", "aa:bb:cc:dd:ee:zz", "http://localhost", Payload::new());
        assert!(err.is_err());
    }

    #[test]
    fn test_match_source_first_wins_on_duplicates() {
        let set = ButtonSet::new(vec![
            button("first", "aa:bb:cc:dd:ee:ff"),
            button("second", "aa:bb:cc:dd:ee:ff"),
        ]);
        let source = "aa:bb:cc:dd:ee:ff".parse().unwrap();
        // Repeat the lookup: the outcome must be stable.
        for _ in 0..3 {
            assert_eq!(set.match_source(source).unwrap().label, "first");
        }
    }

    #[test]
    fn test_match_source_unknown() {
        let set = ButtonSet::new(vec![button("doorbell", "aa:bb:cc:dd:ee:ff")]);
        assert!(set.match_source("11:22:33:44:55:66".parse().unwrap()).is_none());
    }
}
