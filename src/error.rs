use crate::delta::DeltaKind;
use thiserror::Error;

/// Why a target sequence could not take a delta.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// The delta reaches past the end of the target.
    #[error("span ends at {end} but the target has {len} elements")]
    OutOfBounds { end: usize, len: usize },
    /// The target holds different content where the delta expects its chunk.
    #[error("expected {expected} at index {index}, found {actual}")]
    Mismatch {
        index: usize,
        expected: String,
        actual: String,
    },
    /// Two deltas of the same patch claim intersecting spans.
    #[error("overlaps delta #{other}")]
    Overlap { other: usize },
}

/// The patch does not fit the target it is applied to.
///
/// Raised before the offending delta mutates anything. When raised by a
/// [`Patch`](crate::Patch), `delta` is the index of the failing delta in
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{kind} delta{} at position {position} failed: {reason}",
    .delta.map(|i| format!(" #{i}")).unwrap_or_default()
)]
pub struct PatchFailed {
    pub kind: DeltaKind,
    pub position: usize,
    pub delta: Option<usize>,
    #[source]
    pub reason: FailureReason,
}

impl PatchFailed {
    pub(crate) fn new(kind: DeltaKind, position: usize, reason: FailureReason) -> Self {
        PatchFailed {
            kind,
            position,
            delta: None,
            reason,
        }
    }

    pub(crate) fn at_delta(mut self, index: usize) -> Self {
        self.delta = Some(index);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_index() {
        let err = PatchFailed::new(
            DeltaKind::Insert,
            7,
            FailureReason::OutOfBounds { end: 7, len: 3 },
        );
        assert_eq!(
            err.to_string(),
            "insert delta at position 7 failed: span ends at 7 but the target has 3 elements"
        );
    }

    #[test]
    fn test_display_with_index() {
        let err = PatchFailed::new(
            DeltaKind::Change,
            1,
            FailureReason::Mismatch {
                index: 1,
                expected: "\"B\"".to_string(),
                actual: "\"X\"".to_string(),
            },
        )
        .at_delta(2);
        assert_eq!(
            err.to_string(),
            "change delta #2 at position 1 failed: expected \"B\" at index 1, found \"X\""
        );
    }
}
