use crate::chunk::Chunk;
use std::fmt;

/// The three ways an original region can turn into a revised one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeltaKind {
    /// Elements present only in the revised sequence
    Insert,
    /// Elements present only in the original sequence
    Delete,
    /// Original elements replaced by revised ones
    Change,
}

impl fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeltaKind::Insert => "insert",
            DeltaKind::Delete => "delete",
            DeltaKind::Change => "change",
        };
        f.write_str(name)
    }
}

/// One contiguous region where the original and revised sequences diverge.
///
/// The `kind` always agrees with which chunks are empty: an insert has an
/// empty original chunk, a delete an empty revised chunk, and a change has
/// neither. The constructors refuse anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta<T> {
    pub(super) kind: DeltaKind,
    pub(super) original: Chunk<T>,
    pub(super) revised: Chunk<T>,
}
