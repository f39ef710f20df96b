//! BPF capture-filter construction from a watch set

use presswire_core::ButtonSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("watch set is empty; refusing to build a capture filter")]
    EmptyWatchSet,
}

/// Build the BPF expression restricting capture to ARP frames whose source
/// address belongs to a watched button.
///
/// The expression is a pure function of the set: the same buttons in the
/// same order always yield a byte-identical string, with exactly one
/// `ether src host` predicate per button in canonical lowercase colon-hex
/// form. Scoping to ARP keeps the buttons' unrelated traffic out of the
/// capture path entirely.
pub fn arp_source_filter(set: &ButtonSet) -> Result<String, FilterError> {
    if set.is_empty() {
        return Err(FilterError::EmptyWatchSet);
    }

    let predicates: Vec<String> = set
        .buttons()
        .iter()
        .map(|b| format!("(ether src host {})", b.mac))
        .collect();

    Ok(format!("arp and ({})", predicates.join(" or ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use presswire_core::{Button, Payload};

    fn set(macs: &[&str]) -> ButtonSet {
        ButtonSet::new(
            macs.iter()
                .enumerate()
                .map(|(i, mac)| {
                    Button::new(format!("button-{i}"), mac, "http://localhost", Payload::new())
                        .unwrap()
                })
                .collect(),
        )
    }

    #[test]
    fn test_single_entry() {
        let filter = arp_source_filter(&set(&["AA:BB:CC:DD:EE:FF"])).unwrap();
        assert_eq!(filter, "arp and ((ether src host aa:bb:cc:dd:ee:ff))");
    }

    #[test]
    fn test_multiple_entries_joined_with_or() {
        let filter = arp_source_filter(&set(&["aa:bb:cc:dd:ee:ff", "11:22:33:44:55:66"])).unwrap();
        assert_eq!(
            filter,
            "arp and ((ether src host aa:bb:cc:dd:ee:ff) or (ether src host 11:22:33:44:55:66))"
        );
    }

    #[test]
    fn test_one_predicate_per_entry() {
        let filter = arp_source_filter(&set(&[
            "aa:bb:cc:dd:ee:ff",
            "11:22:33:44:55:66",
            "de:ad:be:ef:00:01",
        ]))
        .unwrap();
        assert_eq!(filter.matches("ether src host").count(), 3);
    }

    #[test]
    fn test_deterministic() {
        let buttons = set(&["aa:bb:cc:dd:ee:ff", "11:22:33:44:55:66"]);
        assert_eq!(
            arp_source_filter(&buttons).unwrap(),
            arp_source_filter(&buttons).unwrap()
        );
    }

    #[test]
    fn test_empty_set_is_an_error() {
        let empty = ButtonSet::new(Vec::new());
        assert!(matches!(
            arp_source_filter(&empty),
            Err(FilterError::EmptyWatchSet)
        ));
    }
}
