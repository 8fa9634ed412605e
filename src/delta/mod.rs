mod types;
pub use types::*;

use crate::chunk::Chunk;
use crate::error::{FailureReason, PatchFailed};
use std::fmt::{self, Debug};

impl<T> Delta<T> {
    /// Builds an insert delta.
    ///
    /// # Panics
    ///
    /// Panics if `original` has elements.
    pub fn insert(original: Chunk<T>, revised: Chunk<T>) -> Self {
        assert!(
            original.is_empty(),
            "insert delta must have an empty original chunk"
        );
        Delta {
            kind: DeltaKind::Insert,
            original,
            revised,
        }
    }

    /// Builds a delete delta.
    ///
    /// # Panics
    ///
    /// Panics if `revised` has elements.
    pub fn delete(original: Chunk<T>, revised: Chunk<T>) -> Self {
        assert!(
            revised.is_empty(),
            "delete delta must have an empty revised chunk"
        );
        Delta {
            kind: DeltaKind::Delete,
            original,
            revised,
        }
    }

    /// Builds a change delta.
    ///
    /// # Panics
    ///
    /// Panics if either chunk is empty.
    pub fn change(original: Chunk<T>, revised: Chunk<T>) -> Self {
        assert!(
            !original.is_empty() && !revised.is_empty(),
            "change delta needs elements on both sides"
        );
        Delta {
            kind: DeltaKind::Change,
            original,
            revised,
        }
    }

    /// Builds a delta whose kind follows from which chunks are empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use patchdelta::{Chunk, Delta, DeltaKind};
    ///
    /// let delta = Delta::new(Chunk::new(1, vec![]), Chunk::new(1, vec!["x"]));
    /// assert_eq!(delta.kind(), DeltaKind::Insert);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if both chunks are empty.
    pub fn new(original: Chunk<T>, revised: Chunk<T>) -> Self {
        match (original.is_empty(), revised.is_empty()) {
            (true, true) => panic!("delta needs elements on at least one side"),
            (true, false) => Delta::insert(original, revised),
            (false, true) => Delta::delete(original, revised),
            (false, false) => Delta::change(original, revised),
        }
    }

    pub fn kind(&self) -> DeltaKind {
        self.kind
    }

    pub fn original(&self) -> &Chunk<T> {
        &self.original
    }

    pub fn revised(&self) -> &Chunk<T> {
        &self.revised
    }

    fn failed(&self, reason: FailureReason) -> PatchFailed {
        PatchFailed::new(self.kind, self.original.position(), reason)
    }
}

impl<T: Clone + PartialEq + Debug> Delta<T> {
    /// Checks that `target`, still in its original state around this delta,
    /// can take it.
    pub fn verify(&self, target: &[T]) -> Result<(), PatchFailed> {
        match self.kind {
            DeltaKind::Insert => {
                let position = self.original.position();
                if position > target.len() {
                    return Err(self.failed(FailureReason::OutOfBounds {
                        end: position,
                        len: target.len(),
                    }));
                }
                Ok(())
            }
            DeltaKind::Delete | DeltaKind::Change => self
                .original
                .verify(target)
                .map_err(|reason| self.failed(reason)),
        }
    }

    /// Checks that `target` holds this delta's revised chunk, i.e. that
    /// [`restore`](Self::restore) would undo an earlier apply.
    pub fn verify_restore(&self, target: &[T]) -> Result<(), PatchFailed> {
        self.revised
            .verify(target)
            .map_err(|reason| self.failed(reason))
    }

    /// Verifies, then rewrites the original region of `target` into the
    /// revised one. Nothing is touched when verification fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use patchdelta::{Chunk, Delta};
    ///
    /// let delta = Delta::insert(Chunk::new(1, vec![]), Chunk::new(1, vec!["x", "y"]));
    /// let mut target = vec!["a", "b", "c"];
    /// delta.apply_to(&mut target).unwrap();
    /// assert_eq!(target, ["a", "x", "y", "b", "c"]);
    /// delta.restore(&mut target);
    /// assert_eq!(target, ["a", "b", "c"]);
    /// ```
    pub fn apply_to(&self, target: &mut Vec<T>) -> Result<(), PatchFailed> {
        self.verify(target)?;
        let position = self.original.position();
        match self.kind {
            DeltaKind::Insert => {
                target.splice(position..position, self.revised.lines().iter().cloned());
            }
            DeltaKind::Delete => {
                target.drain(position..self.original.end());
            }
            DeltaKind::Change => {
                target.splice(
                    position..self.original.end(),
                    self.revised.lines().iter().cloned(),
                );
            }
        }
        Ok(())
    }

    /// Turns the revised region of `target` back into the original one.
    ///
    /// Every kind works in revised coordinates: the region is located at
    /// `revised.position`, including a delete, whose original elements are
    /// reinserted at `revised.position` rather than `original.position`.
    ///
    /// Nothing is checked: `target` must be in the state a successful
    /// [`apply_to`](Self::apply_to) left it in. On any other target the
    /// result is unspecified, though it never panics. Use
    /// [`verify_restore`](Self::verify_restore) first when in doubt.
    pub fn restore(&self, target: &mut Vec<T>) {
        self.restore_shifted(target, 0);
    }

    /// Restores at `revised.position + shift`, for callers that already
    /// restored earlier regions of the same sequence.
    pub(crate) fn restore_shifted(&self, target: &mut Vec<T>, shift: isize) {
        let position = self
            .revised
            .position()
            .saturating_add_signed(shift)
            .min(target.len());
        let end = (position + self.revised.size()).min(target.len());
        match self.kind {
            DeltaKind::Insert => {
                target.drain(position..end);
            }
            DeltaKind::Delete => {
                target.splice(position..position, self.original.lines().iter().cloned());
            }
            DeltaKind::Change => {
                target.splice(position..end, self.original.lines().iter().cloned());
            }
        }
    }

    /// How much this delta grows (positive) or shrinks the sequence.
    pub(crate) fn growth(&self) -> isize {
        self.revised.size() as isize - self.original.size() as isize
    }
}

impl<T: Debug> fmt::Display for Delta<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = match self.kind {
            DeltaKind::Delete => self.original.lines(),
            _ => self.revised.lines(),
        };
        write!(
            f,
            "[{} delta, original position: {}, revised position: {}, lines: {:?}]",
            self.kind,
            self.original.position(),
            self.revised.position(),
            lines
        )
    }
}
