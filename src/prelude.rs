//! Commonly used imports
//!
//! Use `use outcome::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Absent, Maybe, Outcome, Payload, Track};

// Aggregation
pub use crate::{all, any};

// Do-notation
pub use crate::{generator, sequence, sequence_async, start_with, Step};
