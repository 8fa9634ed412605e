mod types;
pub use types::*;

use crate::delta::Delta;
use crate::error::{FailureReason, PatchFailed};
use std::cmp::Reverse;
use std::fmt::Debug;

impl<T> Patch<T> {
    pub fn new() -> Self {
        Patch { deltas: vec![] }
    }

    pub fn add_delta(&mut self, delta: Delta<T>) {
        self.deltas.push(delta);
    }

    pub fn deltas(&self) -> &[Delta<T>] {
        &self.deltas
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Delta indices from the highest original position down. At equal
    /// positions the wider span goes first, so an insert lands in front of
    /// a region removed at the same spot.
    fn apply_order(&self) -> Result<Vec<usize>, PatchFailed> {
        let mut order: Vec<usize> = (0..self.deltas.len()).collect();
        order.sort_by_key(|&i| {
            let original = self.deltas[i].original();
            Reverse((original.position(), original.size()))
        });

        for pair in order.windows(2) {
            let (upper, lower) = (&self.deltas[pair[0]], &self.deltas[pair[1]]);
            let (upper_span, lower_span) = (upper.original(), lower.original());
            let stacked_inserts = upper_span.is_empty()
                && lower_span.is_empty()
                && upper_span.position() == lower_span.position();
            if lower_span.end() > upper_span.position() || stacked_inserts {
                return Err(PatchFailed::new(
                    lower.kind(),
                    lower_span.position(),
                    FailureReason::Overlap { other: pair[0] },
                )
                .at_delta(pair[1]));
            }
        }
        Ok(order)
    }

    /// Delta indices from the lowest revised position up. Adjacent deletes
    /// share a revised position, so ties fall back to the original one.
    fn restore_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.deltas.len()).collect();
        order.sort_by_key(|&i| {
            let delta = &self.deltas[i];
            (
                delta.revised().position(),
                delta.revised().size(),
                delta.original().position(),
            )
        });
        order
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::new()
    }
}

impl<T> FromIterator<Delta<T>> for Patch<T> {
    fn from_iter<I: IntoIterator<Item = Delta<T>>>(iter: I) -> Self {
        Patch {
            deltas: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<Delta<T>> for Patch<T> {
    fn extend<I: IntoIterator<Item = Delta<T>>>(&mut self, iter: I) {
        self.deltas.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a Patch<T> {
    type Item = &'a Delta<T>;
    type IntoIter = std::slice::Iter<'a, Delta<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.iter()
    }
}

impl<T: Clone + PartialEq + Debug> Patch<T> {
    /// Applies every delta to `target` in place.
    ///
    /// Deltas run from the highest original position down, so each one
    /// still finds its region where the original sequence had it. Each delta
    /// is verified right before it mutates `target`. Overlapping deltas are
    /// rejected before anything is touched.
    ///
    /// On failure the error names the failing delta, and how much of
    /// `target` was already rewritten is unspecified. Use
    /// [`apply`](Self::apply) for all-or-nothing behaviour.
    pub fn apply_to(&self, target: &mut Vec<T>) -> Result<(), PatchFailed> {
        let order = self.apply_order().map_err(|e| {
            tracing::debug!(error = %e, "patch: rejected overlapping deltas");
            e
        })?;
        tracing::debug!(
            deltas = order.len(),
            target_len = target.len(),
            "patch: applying"
        );
        for index in order {
            let delta = &self.deltas[index];
            tracing::trace!(
                index,
                kind = %delta.kind(),
                position = delta.original().position(),
                "patch: applying delta"
            );
            delta.apply_to(target).map_err(|e| {
                let e = e.at_delta(index);
                tracing::debug!(error = %e, "patch: delta failed");
                e
            })?;
        }
        Ok(())
    }

    /// Applies the patch to a copy of `original` and returns it. `original`
    /// is left as is whether or not the patch fits.
    ///
    /// # Examples
    ///
    /// ```
    /// use patchdelta::{Chunk, Delta, Patch};
    ///
    /// let mut patch = Patch::new();
    /// patch.add_delta(Delta::insert(Chunk::new(2, vec![]), Chunk::new(2, vec!["X"])));
    /// patch.add_delta(Delta::delete(Chunk::new(5, vec!["F"]), Chunk::new(6, vec![])));
    ///
    /// let original = vec!["A", "B", "C", "D", "E", "F"];
    /// let revised = patch.apply(&original).unwrap();
    /// assert_eq!(revised, ["A", "B", "X", "C", "D", "E"]);
    /// assert_eq!(patch.restore(&revised), original);
    /// ```
    pub fn apply(&self, original: &[T]) -> Result<Vec<T>, PatchFailed> {
        let mut result = original.to_vec();
        self.apply_to(&mut result)?;
        Ok(result)
    }

    /// Reverts every delta in `target` in place.
    ///
    /// Deltas run from the lowest revised position up; each position is
    /// shifted by the size change of the deltas already reverted below it.
    /// Nothing is verified: `target` must be what a successful apply
    /// produced, otherwise the result is unspecified.
    pub fn restore_to(&self, target: &mut Vec<T>) {
        let order = self.restore_order();
        tracing::debug!(
            deltas = order.len(),
            target_len = target.len(),
            "patch: restoring"
        );
        let mut shift = 0isize;
        for index in order {
            let delta = &self.deltas[index];
            tracing::trace!(
                index,
                kind = %delta.kind(),
                position = delta.revised().position(),
                shift,
                "patch: restoring delta"
            );
            delta.restore_shifted(target, shift);
            shift -= delta.growth();
        }
    }

    /// Restores a copy of `revised`.
    pub fn restore(&self, revised: &[T]) -> Vec<T> {
        let mut result = revised.to_vec();
        self.restore_to(&mut result);
        result
    }

    /// Like [`restore`](Self::restore), but first checks that every
    /// delta's revised chunk is present in `revised`.
    pub fn restore_checked(&self, revised: &[T]) -> Result<Vec<T>, PatchFailed> {
        for (index, delta) in self.deltas.iter().enumerate() {
            delta.verify_restore(revised).map_err(|e| {
                let e = e.at_delta(index);
                tracing::debug!(error = %e, "patch: target is not in the revised state");
                e
            })?;
        }
        Ok(self.restore(revised))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::delta::DeltaKind;

    fn chunk(position: usize, lines: &[&'static str]) -> Chunk<&'static str> {
        Chunk::new(position, lines.to_vec())
    }

    fn insert_and_delete() -> Patch<&'static str> {
        vec![
            Delta::insert(chunk(2, &[]), chunk(2, &["X"])),
            Delta::delete(chunk(5, &["F"]), chunk(6, &[])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_apply_descending() {
        let patch = insert_and_delete();
        let mut target = vec!["A", "B", "C", "D", "E", "F"];
        patch.apply_to(&mut target).unwrap();
        assert_eq!(target, ["A", "B", "X", "C", "D", "E"]);
    }

    #[test]
    fn test_ascending_order_breaks() {
        let patch = insert_and_delete();
        let mut target = vec!["A", "B", "C", "D", "E", "F"];
        let result: Result<(), PatchFailed> = patch
            .deltas()
            .iter()
            .try_for_each(|delta| delta.apply_to(&mut target));
        // after the insert, index 5 holds "E" instead of "F"
        let err = result.unwrap_err();
        assert_eq!(err.kind, DeltaKind::Delete);
        assert!(matches!(err.reason, FailureReason::Mismatch { index: 5, .. }));
        assert_ne!(target, ["A", "B", "X", "C", "D", "E"]);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let forward = insert_and_delete();
        let backward: Patch<_> = forward.deltas().iter().rev().cloned().collect();
        let original = vec!["A", "B", "C", "D", "E", "F"];
        assert_eq!(forward.apply(&original), backward.apply(&original));
        let revised = forward.apply(&original).unwrap();
        assert_eq!(backward.restore(&revised), original);
    }

    #[test]
    fn test_restore_ascending_with_shift() {
        let patch = insert_and_delete();
        let mut target = vec!["A", "B", "X", "C", "D", "E"];
        patch.restore_to(&mut target);
        assert_eq!(target, ["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_mixed_roundtrip() {
        let original = vec!["a", "b", "c", "d", "e", "f", "g", "h"];
        let revised = vec!["a", "x", "y", "c", "d", "f", "g", "z", "h"];
        let patch: Patch<_> = vec![
            Delta::change(chunk(1, &["b"]), chunk(1, &["x", "y"])),
            Delta::delete(chunk(4, &["e"]), chunk(5, &[])),
            Delta::insert(chunk(7, &[]), chunk(7, &["z"])),
        ]
        .into_iter()
        .collect();
        assert_eq!(patch.apply(&original), Ok(revised.clone()));
        assert_eq!(patch.restore(&revised), original);
        assert_eq!(patch.restore_checked(&revised), Ok(original));
    }

    #[test]
    fn test_insert_next_to_delete_at_same_position() {
        let original = vec!["a", "b", "c"];
        let patch: Patch<_> = vec![
            Delta::insert(chunk(1, &[]), chunk(1, &["x"])),
            Delta::delete(chunk(1, &["b"]), chunk(2, &[])),
        ]
        .into_iter()
        .collect();
        let revised = patch.apply(&original).unwrap();
        assert_eq!(revised, ["a", "x", "c"]);
        assert_eq!(patch.restore(&revised), original);
    }

    #[test]
    fn test_adjacent_deletes_restore_in_original_order() {
        let original = vec!["a", "b", "c", "d"];
        let patch: Patch<_> = vec![
            Delta::delete(chunk(2, &["c"]), chunk(1, &[])),
            Delta::delete(chunk(1, &["b"]), chunk(1, &[])),
        ]
        .into_iter()
        .collect();
        let revised = patch.apply(&original).unwrap();
        assert_eq!(revised, ["a", "d"]);
        assert_eq!(patch.restore(&revised), original);
        assert_eq!(patch.restore_checked(&revised), Ok(original));
    }

    #[test]
    fn test_delete_next_to_insert_roundtrip() {
        let original = vec!["a", "b", "c"];
        let patch: Patch<_> = vec![
            Delta::insert(chunk(2, &[]), chunk(1, &["x", "y"])),
            Delta::delete(chunk(1, &["b"]), chunk(1, &[])),
        ]
        .into_iter()
        .collect();
        let revised = patch.apply(&original).unwrap();
        assert_eq!(revised, ["a", "x", "y", "c"]);
        assert_eq!(patch.restore(&revised), original);
    }

    #[test]
    fn test_failure_names_delta_index() {
        let patch: Patch<_> = vec![
            Delta::change(chunk(0, &["a"]), chunk(0, &["A"])),
            Delta::delete(chunk(2, &["zzz"]), chunk(2, &[])),
        ]
        .into_iter()
        .collect();
        let err = patch.apply(&["a", "b", "c"]).unwrap_err();
        assert_eq!(err.delta, Some(1));
        assert_eq!(err.kind, DeltaKind::Delete);
        assert_eq!(err.position, 2);
    }

    #[test]
    fn test_apply_leaves_input_untouched_on_failure() {
        let patch: Patch<_> = vec![
            Delta::change(chunk(2, &["c"]), chunk(2, &["C"])),
            Delta::change(chunk(0, &["nope"]), chunk(0, &["A"])),
        ]
        .into_iter()
        .collect();
        let original = vec!["a", "b", "c"];
        assert!(patch.apply(&original).is_err());
        assert_eq!(original, ["a", "b", "c"]);
    }

    #[test]
    fn test_overlap_rejected_before_mutation() {
        let patch: Patch<_> = vec![
            Delta::delete(chunk(1, &["b", "c"]), chunk(1, &[])),
            Delta::change(chunk(2, &["c"]), chunk(1, &["C"])),
        ]
        .into_iter()
        .collect();
        let mut target = vec!["a", "b", "c", "d"];
        let err = patch.apply_to(&mut target).unwrap_err();
        assert_eq!(err.reason, FailureReason::Overlap { other: 1 });
        assert_eq!(err.delta, Some(0));
        assert_eq!(target, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_stacked_inserts_rejected() {
        let patch: Patch<_> = vec![
            Delta::insert(chunk(1, &[]), chunk(1, &["x"])),
            Delta::insert(chunk(1, &[]), chunk(2, &["y"])),
        ]
        .into_iter()
        .collect();
        let err = patch.apply(&["a", "b"]).unwrap_err();
        assert!(matches!(err.reason, FailureReason::Overlap { .. }));
    }

    #[test]
    fn test_restore_checked_rejects_unpatched_target() {
        let patch = insert_and_delete();
        let original = vec!["A", "B", "C", "D", "E", "F"];
        let err = patch.restore_checked(&original).unwrap_err();
        assert_eq!(err.delta, Some(0));
    }

    #[test]
    fn test_empty_patch() {
        let patch: Patch<u8> = Patch::default();
        assert!(patch.is_empty());
        assert_eq!(patch.apply(&[1, 2, 3]), Ok(vec![1, 2, 3]));
        assert_eq!(patch.restore(&[1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_extend_and_iterate() {
        let mut patch = Patch::new();
        patch.add_delta(Delta::insert(chunk(0, &[]), chunk(0, &["a"])));
        patch.extend(vec![Delta::delete(chunk(3, &["d"]), chunk(4, &[]))]);
        assert_eq!(patch.len(), 2);
        let kinds: Vec<DeltaKind> = (&patch).into_iter().map(Delta::kind).collect();
        assert_eq!(kinds, [DeltaKind::Insert, DeltaKind::Delete]);
    }
}
