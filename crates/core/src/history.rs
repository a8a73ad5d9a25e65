use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::pocket::Pocket;
use crate::MAX_HISTORY;

/// Newest-first record of entered pockets, never longer than [`MAX_HISTORY`].
///
/// Serializes as a plain JSON array, index 0 being the most recent entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Pocket>", into = "Vec<Pocket>")]
pub struct History {
    entries: VecDeque<Pocket>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push to the front, dropping the oldest entry when full.
    pub fn add(&mut self, pocket: Pocket) {
        self.entries.push_front(pocket);
        self.entries.truncate(MAX_HISTORY);
    }

    /// Remove the newest entry. `None` means there was nothing to undo.
    pub fn undo(&mut self) -> Option<Pocket> {
        self.entries.pop_front()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<Pocket> {
        self.entries.front().copied()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = Pocket> + '_ {
        self.entries.iter().copied()
    }

    pub fn recent(&self, k: usize) -> impl Iterator<Item = Pocket> + '_ {
        self.iter().take(k)
    }

    pub fn to_vec(&self) -> Vec<Pocket> {
        self.entries.iter().copied().collect()
    }
}

impl From<Vec<Pocket>> for History {
    // Snapshots written under a larger bound keep only their newest entries.
    fn from(mut v: Vec<Pocket>) -> Self {
        v.truncate(MAX_HISTORY);
        History {
            entries: v.into(),
        }
    }
}

impl From<History> for Vec<Pocket> {
    fn from(h: History) -> Self {
        h.entries.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: i64) -> Pocket {
        Pocket::new(v).unwrap()
    }

    fn values(h: &History) -> Vec<u8> {
        h.iter().map(Pocket::value).collect()
    }

    fn filled(n: usize) -> History {
        let mut h = History::new();
        for i in 0..n {
            h.add(p((i % 37) as i64));
        }
        h
    }

    #[test]
    fn add_prepends_below_the_bound() {
        for n in [0usize, 1, 5, MAX_HISTORY - 1] {
            let before = filled(n);
            let mut after = before.clone();
            after.add(p(21));
            assert_eq!(after.len(), n + 1);
            assert_eq!(after.latest(), Some(p(21)));
            assert_eq!(after.iter().skip(1).collect::<Vec<_>>(), before.to_vec());
        }
    }

    #[test]
    fn add_at_the_bound_drops_the_oldest() {
        let before = filled(MAX_HISTORY);
        let mut after = before.clone();
        after.add(p(3));
        assert_eq!(after.len(), MAX_HISTORY);
        assert_eq!(after.latest(), Some(p(3)));
        assert_eq!(
            after.iter().skip(1).collect::<Vec<_>>(),
            before.iter().take(MAX_HISTORY - 1).collect::<Vec<_>>()
        );
    }

    #[test]
    fn undo_reverses_add_unless_full() {
        let before = filled(7);
        let mut h = before.clone();
        h.add(p(30));
        assert_eq!(h.undo(), Some(p(30)));
        assert_eq!(h, before);

        // At the bound the dropped tail is gone for good.
        let full = filled(MAX_HISTORY);
        let mut h = full.clone();
        h.add(p(30));
        h.undo();
        assert_eq!(h.len(), MAX_HISTORY - 1);
        assert_ne!(h, full);
    }

    #[test]
    fn undo_on_empty_is_a_noop() {
        let mut h = History::new();
        assert_eq!(h.undo(), None);
        assert!(h.is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let mut h = filled(12);
        h.reset();
        assert!(h.is_empty());
        assert_eq!(serde_json::to_string(&h).unwrap(), "[]");
    }

    #[test]
    fn duplicates_are_kept() {
        let mut h = History::new();
        h.add(p(5));
        h.add(p(12));
        h.add(p(5));
        assert_eq!(values(&h), vec![5, 12, 5]);
        assert_eq!(serde_json::to_string(&h).unwrap(), "[5,12,5]");
    }

    #[test]
    fn snapshot_parsing() {
        let h: History = serde_json::from_str("[4,0,36]").unwrap();
        assert_eq!(values(&h), vec![4, 0, 36]);

        let long: Vec<u8> = (0..40).map(|i| i % 37).collect();
        let raw = serde_json::to_string(&long).unwrap();
        let h: History = serde_json::from_str(&raw).unwrap();
        assert_eq!(h.len(), MAX_HISTORY);
        assert_eq!(values(&h), long[..MAX_HISTORY].to_vec());

        assert!(serde_json::from_str::<History>("[1,99]").is_err());
        assert!(serde_json::from_str::<History>("[1.5]").is_err());
        assert!(serde_json::from_str::<History>("{\"a\":1}").is_err());
    }
}
