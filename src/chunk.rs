use crate::error::FailureReason;
use std::fmt::Debug;

/// A run of elements located at `position` in its owning sequence,
/// either the original or the revised one.
///
/// Chunks are built once by whatever computed the difference and are never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chunk<T> {
    position: usize,
    lines: Vec<T>,
}

impl<T> Chunk<T> {
    pub fn new(position: usize, lines: Vec<T>) -> Self {
        Chunk { position, lines }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn lines(&self) -> &[T] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<T> {
        self.lines
    }

    pub fn size(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Index of the last element, or `position` for an empty chunk.
    pub fn last_position(&self) -> usize {
        (self.position + self.size()).saturating_sub(1).max(self.position)
    }

    /// One past the last element.
    pub fn end(&self) -> usize {
        self.position + self.size()
    }
}

impl<T: PartialEq + Debug> Chunk<T> {
    /// Checks that `target` holds exactly this chunk's elements at
    /// `position`. Reports the first differing index on mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// use patchdelta::Chunk;
    ///
    /// let chunk = Chunk::new(1, vec!["b", "c"]);
    /// assert!(chunk.verify(&["a", "b", "c"]).is_ok());
    /// assert!(chunk.verify(&["a", "b", "x"]).is_err());
    /// assert!(chunk.verify(&["a", "b"]).is_err());
    /// ```
    pub fn verify(&self, target: &[T]) -> Result<(), FailureReason> {
        if self.end() > target.len() {
            return Err(FailureReason::OutOfBounds {
                end: self.end(),
                len: target.len(),
            });
        }
        let window = &target[self.position..self.end()];
        match self.lines.iter().zip(window).position(|(a, b)| a != b) {
            Some(offset) => Err(FailureReason::Mismatch {
                index: self.position + offset,
                expected: format!("{:?}", self.lines[offset]),
                actual: format!("{:?}", window[offset]),
            }),
            None => Ok(()),
        }
    }
}
