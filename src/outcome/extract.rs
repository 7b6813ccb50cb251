//! Resolution and extraction.
//!
//! [`Outcome::resolve`] is the one place pending work is awaited: it reveals the track
//! of unsettled outcomes and returns an outcome whose payload is direct. The `unwrap`
//! family hands back a [`Payload`], so a pending value stays deferred and the caller
//! awaits it in their own context.

use std::{fmt, future::Future};

use super::{Maybe, Outcome, State};
use crate::{error::UnwrapError, payload::Payload, Absent};

impl<T: Clone + 'static, E: Clone + 'static> Outcome<T, E> {
    /// Wait for everything pending and return a fully direct outcome.
    ///
    /// Unsettled outcomes reveal their real track here. Resolving clones of one outcome
    /// yields equal results and drives the underlying work once.
    pub fn resolve(self) -> impl Future<Output = Outcome<T, E>> + 'static {
        async move {
            let mut current = self;
            loop {
                match current.state {
                    State::Success(p) => return Outcome::success(p.settle().await),
                    State::Failure(p) => return Outcome::failure(p.settle().await),
                    State::Unsettled(d) => current = d.await,
                }
            }
        }
    }

    /// Resolve into a standard `Result`.
    pub fn into_result(self) -> impl Future<Output = Result<T, E>> + 'static {
        let resolved = self.resolve();
        async move {
            match resolved.await.state {
                State::Success(Payload::Direct(v)) => Ok(v),
                State::Failure(Payload::Direct(e)) => Err(e),
                _ => unreachable!("resolve always returns a direct outcome"),
            }
        }
    }

    /// The success value, or [`UnwrapError`] if this is a failure.
    ///
    /// Unsettled outcomes report [`UnwrapError::Unsettled`].
    pub fn try_unwrap(self) -> Result<Payload<T>, UnwrapError>
    where
        T: fmt::Debug,
        E: fmt::Debug,
    {
        match self.state {
            State::Success(p) => Ok(p),
            State::Failure(_) => Err(UnwrapError::OnFailure {
                outcome: format!("{self:?}"),
            }),
            State::Unsettled(_) => Err(UnwrapError::Unsettled),
        }
    }

    /// The failure value, or [`UnwrapError`] if this is a success.
    pub fn try_unwrap_err(self) -> Result<Payload<E>, UnwrapError>
    where
        T: fmt::Debug,
        E: fmt::Debug,
    {
        match self.state {
            State::Failure(p) => Ok(p),
            State::Success(_) => Err(UnwrapError::FailureOnSuccess {
                outcome: format!("{self:?}"),
            }),
            State::Unsettled(_) => Err(UnwrapError::Unsettled),
        }
    }

    /// The success value.
    ///
    /// A pending value comes back as [`Payload::Pending`] for the caller to await. On an
    /// unsettled outcome the track check happens when that payload is awaited.
    ///
    /// # Panics
    ///
    /// Panics with [`UnwrapError::OnFailure`] if this is a failure.
    pub fn unwrap(self) -> Payload<T>
    where
        T: fmt::Debug,
        E: fmt::Debug,
    {
        match self.state {
            State::Unsettled(d) => Payload::from_future(async move {
                d.await.resolve().await.unwrap().unwrap_direct()
            }),
            _ => match self.try_unwrap() {
                Ok(p) => p,
                Err(e) => panic!("{e}"),
            },
        }
    }

    /// The failure value.
    ///
    /// # Panics
    ///
    /// Panics with [`UnwrapError::FailureOnSuccess`] if this is a success.
    pub fn unwrap_err(self) -> Payload<E>
    where
        T: fmt::Debug,
        E: fmt::Debug,
    {
        match self.state {
            State::Unsettled(d) => Payload::from_future(async move {
                d.await.resolve().await.unwrap_err().unwrap_direct()
            }),
            _ => match self.try_unwrap_err() {
                Ok(p) => p,
                Err(e) => panic!("{e}"),
            },
        }
    }

    /// The success value, or `default` on failure.
    pub fn unwrap_or(self, default: T) -> Payload<T> {
        match self.state {
            State::Success(p) => p,
            State::Failure(_) => Payload::Direct(default),
            State::Unsettled(d) => {
                Payload::from_future(async move { d.await.unwrap_or(default).settle().await })
            }
        }
    }

    /// The success value, or one computed from the failure.
    ///
    /// A pending failure composes with `f` into a pending value.
    pub fn unwrap_or_else<F>(self, f: F) -> Payload<T>
    where
        F: FnOnce(E) -> T + 'static,
    {
        match self.state {
            State::Success(p) => p,
            State::Failure(p) => p.map(f),
            State::Unsettled(d) => {
                Payload::from_future(async move { d.await.unwrap_or_else(f).settle().await })
            }
        }
    }

    /// The success value as `Some`, or `None` on failure. Never panics.
    pub fn safe_unwrap(self) -> Payload<Option<T>> {
        match self.state {
            State::Success(p) => p.map(Some),
            State::Failure(_) => Payload::Direct(None),
            State::Unsettled(d) => {
                Payload::from_future(async move { d.await.safe_unwrap().settle().await })
            }
        }
    }

    /// Discard the failure, keeping presence or absence.
    pub fn ok(self) -> Maybe<T> {
        match self.state {
            State::Success(p) => Outcome::from_success(p),
            State::Failure(_) => Outcome::none(),
            State::Unsettled(d) => Outcome::unsettled(d.then_map(Outcome::ok)),
        }
    }

    /// Keep the failure as the present value, discarding any success.
    pub fn err(self) -> Maybe<E> {
        match self.state {
            State::Success(_) => Outcome::none(),
            State::Failure(p) => Outcome::from_success(p),
            State::Unsettled(d) => Outcome::unsettled(d.then_map(Outcome::err)),
        }
    }
}

impl<T: Clone + 'static> Maybe<T> {
    /// Present values become successes; absence becomes a failure holding `error`.
    pub fn ok_or<E: Clone + 'static>(self, error: E) -> Outcome<T, E> {
        self.map_err(move |_| error)
    }

    /// Like [`ok_or`](Outcome::ok_or), computing the failure only when absent.
    pub fn ok_or_else<E, F>(self, f: F) -> Outcome<T, E>
    where
        E: Clone + 'static,
        F: FnOnce() -> E + 'static,
    {
        self.map_err(move |_: Absent| f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Track;
    use std::{cell::Cell, rc::Rc};

    type Out = Outcome<i32, String>;

    #[test]
    fn test_unwrap_direct() {
        assert_eq!(Out::success(3).unwrap().direct(), Some(3));
        assert_eq!(Out::failure("e".into()).unwrap_err().direct(), Some("e".to_string()));
    }

    #[test]
    #[should_panic(expected = "called `unwrap()` on a failure outcome: Failure(\"boom\")")]
    fn test_unwrap_on_failure_panics_with_snapshot() {
        Out::failure("boom".into()).unwrap();
    }

    #[test]
    #[should_panic(expected = "called `unwrap_err()` on a success outcome: Success(1)")]
    fn test_unwrap_err_on_success_panics_with_snapshot() {
        Out::success(1).unwrap_err();
    }

    #[test]
    fn test_try_unwrap_reports_flavor() {
        assert_eq!(
            Out::failure("boom".into()).try_unwrap().err(),
            Some(UnwrapError::OnFailure {
                outcome: "Failure(\"boom\")".to_string()
            })
        );
        assert_eq!(
            Out::success(1).try_unwrap_err().err(),
            Some(UnwrapError::FailureOnSuccess {
                outcome: "Success(1)".to_string()
            })
        );
        let unsettled = Out::from_future(async { Out::success(1) });
        assert_eq!(unsettled.try_unwrap().err(), Some(UnwrapError::Unsettled));
    }

    #[test]
    fn test_try_unwrap_pending_failure_snapshot() {
        let err = Out::failure_from_future(async { "x".to_string() })
            .try_unwrap()
            .err();
        assert_eq!(
            err,
            Some(UnwrapError::OnFailure {
                outcome: "Failure(<pending>)".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_unwrap_pending_is_deferred() {
        let value = Out::success_from_future(async { 9 }).unwrap();
        assert!(value.is_pending());
        assert_eq!(value.await, 9);

        let value = Out::from_future(async { Out::success(4) }).unwrap();
        assert_eq!(value.await, 4);
    }

    #[tokio::test]
    async fn test_unwrap_or_family() {
        assert_eq!(Out::failure("e".into()).unwrap_or(0).direct(), Some(0));
        assert_eq!(Out::success(5).unwrap_or(0).direct(), Some(5));

        let pending = Out::success_from_future(async { 5 }).unwrap_or(0);
        assert!(pending.is_pending());
        assert_eq!(pending.await, 5);

        let computed = Out::failure("four".into()).unwrap_or_else(|e| e.len() as i32);
        assert_eq!(computed.direct(), Some(4));

        let late = Out::failure_from_future(async { "abc".to_string() }).unwrap_or_else(|e| e.len() as i32);
        assert!(late.is_pending());
        assert_eq!(late.await, 3);

        let unsettled = Out::from_future(async { Out::failure("e".into()) }).unwrap_or(-1);
        assert_eq!(unsettled.await, -1);
    }

    #[tokio::test]
    async fn test_safe_unwrap_never_panics() {
        assert_eq!(Out::success(1).safe_unwrap().direct(), Some(Some(1)));
        assert_eq!(Out::failure("e".into()).safe_unwrap().direct(), Some(None));
        assert_eq!(Out::success_from_future(async { 2 }).safe_unwrap().await, Some(2));
    }

    #[tokio::test]
    async fn test_resolve_reveals_unsettled_track() {
        let out = Out::from_future(async { Out::failure("late".into()) });
        assert_eq!(out.track(), Track::Unsettled);
        let resolved = out.resolve().await;
        assert_eq!(resolved.track(), Track::Failure);
        assert!(!resolved.is_pending());
        assert_eq!(resolved, Out::failure("late".into()));
    }

    #[tokio::test]
    async fn test_resolve_nested_unsettled() {
        let out = Out::from_future(async {
            Out::from_future(async { Out::success_from_future(async { 6 }) })
        });
        assert_eq!(out.resolve().await, Out::success(6));
    }

    #[tokio::test]
    async fn test_resolve_idempotent() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let out = Out::success_from_future(async move {
            counter.set(counter.get() + 1);
            11
        });

        let first = out.clone().resolve().await;
        let second = out.resolve().await;
        assert_eq!(first, second);
        assert_eq!(first, Out::success(11));
        assert_eq!(runs.get(), 1);
    }

    #[tokio::test]
    async fn test_into_result() {
        assert_eq!(Out::success_from_future(async { 1 }).into_result().await, Ok(1));
        assert_eq!(
            Out::from_future(async { Out::failure("x".into()) }).into_result().await,
            Err("x".to_string())
        );
    }

    #[tokio::test]
    async fn test_try_async_catch() {
        let out: Out = Outcome::try_async_catch(async { "17".parse::<i32>() }, |e| e.to_string());
        assert!(out.is_unsettled());
        assert_eq!(out.resolve().await, Out::success(17));

        let mapped = Rc::new(Cell::new(0));
        let counter = Rc::clone(&mapped);
        let out: Out = Outcome::try_async_catch(async { "x".parse::<i32>() }, move |e| {
            counter.set(counter.get() + 1);
            e.to_string()
        });
        assert!(out.resolve().await.is_failure());
        assert_eq!(mapped.get(), 1);
    }

    #[tokio::test]
    async fn test_cross_conversions() {
        let some = Out::success(1).ok();
        assert!(some.is_some());
        assert!(Out::failure("e".into()).ok().is_none());
        assert_eq!(Out::failure("e".into()).err().ready(), Some(Ok("e".to_string())));
        assert!(Out::success(1).err().is_none());

        let back: Out = Maybe::some(2).ok_or("missing".to_string());
        assert_eq!(back, Out::success(2));
        let back: Out = Maybe::none().ok_or("missing".to_string());
        assert_eq!(back, Out::failure("missing".into()));
        let back: Out = Maybe::none().ok_or_else(|| "computed".to_string());
        assert_eq!(back.ready(), Some(Err("computed".to_string())));

        let unsettled = Out::from_future(async { Out::failure("e".into()) }).ok();
        assert!(unsettled.resolve().await.is_none());
    }
}
