//! Error block extraction from correlator logs.
//!
//! ```text
//! log lines
//!   ↓
//! ErrorBlockExtractor::feed_line()   (grammar: universal_lines, ERROR detection, field stripping)
//!   ↓
//! closed block → Emission { message, mismatch?, divergence? }
//!                          (grammar: actual/expected payloads, divergence_index)
//! ```

mod extractor;
pub mod grammar;
mod mismatch;
mod model;

pub use extractor::ErrorBlockExtractor;
pub use mismatch::{divergence_index, extract_mismatch};
pub use model::{Emission, MismatchPair, ScanMode};
