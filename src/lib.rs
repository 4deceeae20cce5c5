// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod content;
pub mod domain;
pub mod fetch;
pub mod metrics;
pub mod normalize;
pub mod scorer;
pub mod weights;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::scorer::{score, score_with, ScoreResult};
pub use crate::weights::ScoringWeights;
