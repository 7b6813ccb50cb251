//! # Outcome: Option and Result Containers With Pending Payloads
//!
//! Chain transformations over values that may exist now or only later, with the
//! same short-circuiting rules either way.
//!
//! ## Core Types
//!
//! - **[`Outcome<T, E>`]**: A success or a failure whose payload is either a direct
//!   value or a pending future
//! - **[`Maybe<T>`]**: An `Outcome` whose failure is the singleton [`Absent`]
//! - **[`Payload<V>`]**: A direct value or a shared, settle-once [`Deferred`] value
//!
//! ## Key Features
//!
//! - **Short-circuiting**: Success operators skip failures and failure operators skip
//!   successes, without calling the supplied closure
//! - **Promise infection**: Anything pending in, pending out; direct in, direct out
//! - **Aggregation**: [`all`] and [`any`] over any number of outcomes
//! - **Do-notation**: [`sequence`] and [`sequence_async`] drive a [`Routine`] that binds
//!   one outcome at a time, in constant stack space
//!
//! ## Example
//!
//! ```
//! use outcome::Outcome;
//!
//! let parsed = Outcome::<&str, String>::success("21")
//!     .flat_map(|s| Outcome::from(s.parse::<i32>().map_err(|e| e.to_string())))
//!     .map(|n| n * 2);
//! assert_eq!(parsed.ready(), Some(Ok(42)));
//!
//! let failed = Outcome::<&str, String>::success("x")
//!     .flat_map(|s| Outcome::from(s.parse::<i32>().map_err(|e| e.to_string())))
//!     .map(|n| n * 2);
//! assert!(failed.is_failure());
//! ```
//!
//! ## Common Functions
//!
//! **Building Outcomes:**
//! - [`Outcome::success`] / [`Outcome::failure`] - Direct payloads
//! - [`Outcome::success_from_future`] / [`Outcome::failure_from_future`] - Pending payloads
//! - [`Outcome::from_future`] - Track decided by a future
//! - [`Outcome::try_catch`] / [`Outcome::try_async_catch`] - Capture a producer's error
//!
//! **Extraction:**
//! - [`Outcome::resolve`] - Settle everything pending
//! - [`Outcome::unwrap`] / [`Outcome::try_unwrap`] - Take the success value
//! - [`Outcome::unwrap_or`] / [`Outcome::safe_unwrap`] - Take it without failing

mod absent;
mod aggregate;
mod error;
mod maybe;
mod outcome;
mod payload;
mod routine;
mod sequence;
mod step;

pub mod prelude;

pub use absent::Absent;
pub use aggregate::{all, any};
pub use error::UnwrapError;
pub use outcome::{Maybe, Outcome, Track};
pub use payload::{Deferred, Payload};
pub use routine::{from_fn, generator, start_with, FromFn, Generator, Routine, Start};
pub use sequence::{sequence, sequence_async, Bind};
pub use step::Step;
