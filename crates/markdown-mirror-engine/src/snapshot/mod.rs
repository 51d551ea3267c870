//! Test-facing views of a parsed document: invariant assertions and a
//! serializable structural summary.

pub mod invariants;
pub mod normalize;

pub use invariants::check;
pub use normalize::{normalize, BlockSnap, InlineSnap, Snap};
