//! Reversible deltas over ordered sequences.
//!
//! A [`Patch`] is a set of [`Delta`]s, each pairing a [`Chunk`] of the
//! original sequence with the [`Chunk`] that replaced it in the revised one.
//! Applying a patch rewrites a target from original to revised; restoring
//! undoes it. Computing the deltas is left to a diff algorithm.

pub mod chunk;
pub mod delta;
pub mod error;
pub mod patch;

pub use chunk::Chunk;
pub use delta::{Delta, DeltaKind};
pub use error::{FailureReason, PatchFailed};
pub use patch::Patch;
