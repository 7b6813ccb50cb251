//! The dual-mode outcome.
//!
//! An [`Outcome<T, E>`] sits on one of two tracks, success or failure, decided when it
//! is built. The value on that track is a [`Payload`]: either direct or pending. A third
//! state, [`Track::Unsettled`], covers outcomes built from a future of a whole outcome,
//! whose track is only known once that future settles.
//!
//! Operators live in `ops`, extraction and resolution in `extract`; the
//! presence/absence specialisation is [`Maybe`](crate::Maybe).

use std::{fmt, future::Future};

use crate::{
    payload::{Deferred, Payload},
    Absent,
};

mod extract;
mod ops;

/// Which side of an outcome holds the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// The success (or presence) track.
    Success,
    /// The failure (or absence) track.
    Failure,
    /// Not known until the outcome is resolved.
    Unsettled,
}

/// A value on the success or failure track, available now or later.
///
/// Operators consume the receiver and build a new outcome, so clones of one outcome
/// evolve independently.
///
/// ```
/// use outcome::Outcome;
///
/// let parsed: Outcome<i32, String> = Outcome::success(20);
/// let doubled = parsed.map(|x| x * 2);
/// assert_eq!(doubled.ready(), Some(Ok(40)));
/// ```
pub struct Outcome<T, E> {
    pub(crate) state: State<T, E>,
}

pub(crate) enum State<T, E> {
    Success(Payload<T>),
    Failure(Payload<E>),
    Unsettled(Deferred<Outcome<T, E>>),
}

impl<T: Clone + 'static, E: Clone + 'static> Clone for Outcome<T, E> {
    fn clone(&self) -> Self {
        let state = match &self.state {
            State::Success(p) => State::Success(p.clone()),
            State::Failure(p) => State::Failure(p.clone()),
            State::Unsettled(d) => State::Unsettled(d.clone()),
        };
        Outcome { state }
    }
}

/// Presence/absence outcome: `Outcome` whose failure track holds [`Absent`].
pub type Maybe<T> = Outcome<T, Absent>;

impl<T, E> Outcome<T, E> {
    /// A success holding `value`.
    #[inline]
    pub const fn success(value: T) -> Self {
        Outcome::from_success(Payload::Direct(value))
    }

    /// A failure holding `error`.
    #[inline]
    pub const fn failure(error: E) -> Self {
        Outcome::from_failure(Payload::Direct(error))
    }

    /// A success holding `payload`, direct or pending.
    #[inline]
    pub const fn from_success(payload: Payload<T>) -> Self {
        Outcome {
            state: State::Success(payload),
        }
    }

    /// A failure holding `payload`, direct or pending.
    #[inline]
    pub const fn from_failure(payload: Payload<E>) -> Self {
        Outcome {
            state: State::Failure(payload),
        }
    }

    /// A success when `value` is `Some`, otherwise a failure holding `error`.
    pub fn from_option(value: Option<T>, error: E) -> Self {
        match value {
            Some(v) => Outcome::success(v),
            None => Outcome::failure(error),
        }
    }

    /// A success when `pred` accepts `value`, otherwise a failure holding `error`.
    pub fn from_predicate<P>(value: T, pred: P, error: E) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        if pred(&value) {
            Outcome::success(value)
        } else {
            Outcome::failure(error)
        }
    }

    /// Run a fallible producer, converting its error with `map_error`.
    ///
    /// `map_error` runs at most once, and only when the producer fails.
    pub fn try_catch<X, P, M>(producer: P, map_error: M) -> Self
    where
        P: FnOnce() -> Result<T, X>,
        M: FnOnce(X) -> E,
    {
        match producer() {
            Ok(v) => Outcome::success(v),
            Err(x) => {
                tracing::trace!("try_catch: producer failed, mapping error");
                Outcome::failure(map_error(x))
            }
        }
    }

    /// The track this outcome currently reports.
    #[inline]
    pub fn track(&self) -> Track {
        match self.state {
            State::Success(_) => Track::Success,
            State::Failure(_) => Track::Failure,
            State::Unsettled(_) => Track::Unsettled,
        }
    }

    /// Returns `true` on the success track. Unsettled outcomes report `false`.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self.state, State::Success(_))
    }

    /// Returns `true` on the failure track. Unsettled outcomes report `false`.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self.state, State::Failure(_))
    }

    /// Returns `true` if the track is not yet known.
    #[inline]
    pub fn is_unsettled(&self) -> bool {
        matches!(self.state, State::Unsettled(_))
    }

    /// Returns `true` if anything about this outcome still waits on a future.
    pub fn is_pending(&self) -> bool {
        match &self.state {
            State::Success(p) => p.is_pending(),
            State::Failure(p) => p.is_pending(),
            State::Unsettled(_) => true,
        }
    }

    /// Borrows a direct success value.
    pub fn success_ref(&self) -> Option<&T> {
        match &self.state {
            State::Success(p) => p.as_direct(),
            _ => None,
        }
    }

    /// Borrows a direct failure value.
    pub fn failure_ref(&self) -> Option<&E> {
        match &self.state {
            State::Failure(p) => p.as_direct(),
            _ => None,
        }
    }

    /// The settled value as a `Result`, if both track and payload are known now.
    pub fn ready(self) -> Option<Result<T, E>> {
        match self.state {
            State::Success(p) => p.direct().map(Ok),
            State::Failure(p) => p.direct().map(Err),
            State::Unsettled(_) => None,
        }
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Outcome<T, E> {
    /// A success whose value is produced by `future`.
    pub fn success_from_future<F>(future: F) -> Self
    where
        F: Future<Output = T> + 'static,
    {
        Outcome::from_success(Payload::from_future(future))
    }

    /// A failure whose error is produced by `future`.
    pub fn failure_from_future<F>(future: F) -> Self
    where
        F: Future<Output = E> + 'static,
    {
        Outcome::from_failure(Payload::from_future(future))
    }

    /// An unsettled outcome revealed by a future of a whole outcome.
    ///
    /// The track reads [`Track::Unsettled`] until [`resolve`](Outcome::resolve) runs.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = Outcome<T, E>> + 'static,
    {
        Outcome::unsettled(Deferred::new(future))
    }

    /// Await a fallible future, converting its error with `map_error`.
    ///
    /// The result is unsettled: whether the future fails is only known once it settles.
    pub fn try_async_catch<X, F, M>(future: F, map_error: M) -> Self
    where
        F: Future<Output = Result<T, X>> + 'static,
        M: FnOnce(X) -> E + 'static,
    {
        Outcome::from_future(async move {
            match future.await {
                Ok(v) => Outcome::success(v),
                Err(x) => {
                    tracing::trace!("try_async_catch: future failed, mapping error");
                    Outcome::failure(map_error(x))
                }
            }
        })
    }

    #[inline]
    pub(crate) fn unsettled(deferred: Deferred<Outcome<T, E>>) -> Self {
        Outcome {
            state: State::Unsettled(deferred),
        }
    }
}

impl<E> Outcome<(), E> {
    /// The success holding the unit value.
    #[inline]
    pub const fn unit() -> Self {
        Outcome::success(())
    }

    /// Returns `true` if this is a direct success holding the unit value.
    #[inline]
    pub fn is_unit(&self) -> bool {
        matches!(self.state, State::Success(Payload::Direct(())))
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Outcome::success(v),
            Err(e) => Outcome::failure(e),
        }
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        Outcome::from_option(value, Absent::get())
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Outcome<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side<V: fmt::Debug>(
            f: &mut fmt::Formatter<'_>,
            name: &str,
            payload: &Payload<V>,
        ) -> fmt::Result {
            match payload {
                Payload::Direct(v) => f.debug_tuple(name).field(v).finish(),
                Payload::Pending(d) => f.debug_tuple(name).field(d).finish(),
            }
        }

        match &self.state {
            State::Success(p) => side(f, "Success", p),
            State::Failure(p) => side(f, "Failure", p),
            State::Unsettled(d) => f.debug_tuple("Unsettled").field(d).finish(),
        }
    }
}

/// Outcomes compare equal when both are direct, on the same track, with equal values.
///
/// Anything still pending compares unequal; resolve first to compare settled values.
impl<T: PartialEq, E: PartialEq> PartialEq for Outcome<T, E> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.state, &other.state) {
            (State::Success(Payload::Direct(a)), State::Success(Payload::Direct(b))) => a == b,
            (State::Failure(Payload::Direct(a)), State::Failure(Payload::Direct(b))) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_fix_track() {
        let ok: Outcome<i32, &str> = Outcome::success(1);
        let err: Outcome<i32, &str> = Outcome::failure("boom");

        assert_eq!(ok.track(), Track::Success);
        assert!(ok.is_success() && !ok.is_failure());
        assert_eq!(err.track(), Track::Failure);
        assert!(err.is_failure() && !err.is_success());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Outcome::from_option(Some(3), "missing"), Outcome::success(3));
        assert_eq!(Outcome::<i32, _>::from_option(None, "missing"), Outcome::failure("missing"));

        let maybe: Maybe<i32> = None.into();
        assert!(maybe.is_failure());
        assert!(maybe.failure_ref().is_some_and(|a| a.same_instance(&Absent::get())));
    }

    #[test]
    fn test_from_predicate() {
        let even = |x: &i32| x % 2 == 0;
        assert_eq!(Outcome::from_predicate(4, even, "odd"), Outcome::success(4));
        assert_eq!(Outcome::from_predicate(5, even, "odd"), Outcome::failure("odd"));
    }

    #[test]
    fn test_try_catch_maps_error_once() {
        let mut mapped = 0;
        let out: Outcome<i32, String> = Outcome::try_catch(
            || "x".parse::<i32>(),
            |e| {
                mapped += 1;
                e.to_string()
            },
        );
        assert!(out.is_failure());
        assert_eq!(mapped, 1);

        let out: Outcome<i32, String> = Outcome::try_catch(|| "12".parse::<i32>(), |e| e.to_string());
        assert_eq!(out.ready(), Some(Ok(12)));
    }

    #[test]
    fn test_pending_constructors() {
        let ok: Outcome<i32, String> = Outcome::success_from_future(async { 1 });
        assert!(ok.is_success());
        assert!(ok.is_pending());
        assert_eq!(ok.success_ref(), None);

        let err: Outcome<i32, String> = Outcome::failure_from_future(async { "late".to_string() });
        assert!(err.is_failure());
        assert!(err.is_pending());
    }

    #[test]
    fn test_from_future_is_unsettled() {
        let out: Outcome<i32, String> = Outcome::from_future(async { Outcome::failure("x".into()) });
        assert_eq!(out.track(), Track::Unsettled);
        assert!(!out.is_success());
        assert!(!out.is_failure());
        assert!(out.is_pending());
    }

    #[test]
    fn test_is_unit() {
        assert!(Outcome::<(), String>::unit().is_unit());
        assert!(!Outcome::<(), String>::failure("no".into()).is_unit());
        assert!(!Outcome::<(), String>::success_from_future(async {}).is_unit());
    }

    #[test]
    fn test_debug_snapshot() {
        let ok: Outcome<i32, &str> = Outcome::success(1);
        assert_eq!(format!("{ok:?}"), "Success(1)");

        let pending: Outcome<i32, &str> = Outcome::success_from_future(async { 1 });
        assert_eq!(format!("{pending:?}"), "Success(<pending>)");

        let none: Maybe<i32> = Maybe::none();
        assert_eq!(format!("{none:?}"), "Failure(None)");
    }

    #[test]
    fn test_pending_never_compares_equal() {
        let a: Outcome<i32, &str> = Outcome::success_from_future(async { 1 });
        assert_ne!(a.clone(), a);
    }

    #[test]
    fn test_from_result() {
        let ok: Outcome<i32, &str> = Ok(5).into();
        assert_eq!(ok.ready(), Some(Ok(5)));
        let err: Outcome<i32, &str> = Err("e").into();
        assert_eq!(err.ready(), Some(Err("e")));
    }
}
