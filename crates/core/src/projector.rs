use std::collections::BTreeSet;

use crate::history::History;
use crate::pocket::Pocket;

/// Distinct pockets among the newest `k` entries.
///
/// Recomputed from scratch every time; history is small enough that this is free.
pub fn project(history: &History, k: usize) -> BTreeSet<Pocket> {
    history.recent(k).collect()
}
