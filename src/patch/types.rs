use crate::delta::Delta;

/// All deltas describing how an original sequence became a revised one.
///
/// Deltas are kept in the order they were added; `apply` and `restore`
/// pick their own processing order, so producers may add them in any order.
/// Deltas must not overlap in original coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patch<T> {
    pub(super) deltas: Vec<Delta<T>>,
}
