//! Section Order Controller.
//!
//! `relocate` implements drag-to-position semantics: the element is removed first and
//! the target index is read against the shortened list. Indices are a caller
//! precondition; this layer does no bounds work (an out-of-range index panics inside
//! `Vec::remove`/`Vec::insert`). The HTTP layer checks bounds before calling.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::models::document::SectionKind;

/// Moves the section at `from` to position `to`.
///
/// Returns `Cow::Borrowed(order)` when `from == to`, so callers can compare by
/// reference to detect a no-op; otherwise a new owned sequence. The input is never
/// mutated.
pub fn relocate<T: Clone>(order: &[T], from: usize, to: usize) -> Cow<'_, [T]> {
    if from == to {
        return Cow::Borrowed(order);
    }
    let mut next = order.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Cow::Owned(next)
}

/// Deduplicates `order` (first occurrence wins) and appends every canonical kind it
/// is missing, in canonical order.
pub fn reconcile(order: &[SectionKind]) -> Vec<SectionKind> {
    let mut seen = HashSet::new();
    let mut out: Vec<SectionKind> = order.iter().copied().filter(|k| seen.insert(*k)).collect();
    for kind in SectionKind::CANONICAL {
        if seen.insert(kind) {
            out.push(kind);
        }
    }
    out
}

/// True when `order` holds every canonical kind exactly once.
pub fn is_complete(order: &[SectionKind]) -> bool {
    let unique: HashSet<_> = order.iter().collect();
    order.len() == SectionKind::CANONICAL.len()
        && unique.len() == order.len()
        && SectionKind::CANONICAL.iter().all(|k| unique.contains(k))
}
