//! Transformation operators.
//!
//! Every operator checks the track first. On the opposite track it hands back the same
//! track and payload without calling its function. On the matching track it calls the
//! function now (direct payload) or attaches it as a continuation (pending payload). A
//! function returning a future makes the result pending; so does a pending input.
//!
//! | payload | function | result  |
//! |---------|----------|---------|
//! | direct  | sync     | direct  |
//! | direct  | async    | pending |
//! | pending | sync     | pending |
//! | pending | async    | pending |
//!
//! Unsettled outcomes defer the whole operator until their track is revealed.

use std::future::Future;

use super::{Outcome, State};
use crate::payload::{join_payloads, Deferred, Payload};

/// Apply `f` once the unsettled outcome behind `deferred` is revealed.
fn defer<T, E, U, E2, F>(deferred: Deferred<Outcome<T, E>>, f: F) -> Outcome<U, E2>
where
    T: Clone + 'static,
    E: Clone + 'static,
    U: Clone + 'static,
    E2: Clone + 'static,
    F: FnOnce(Outcome<T, E>) -> Outcome<U, E2> + 'static,
{
    Outcome::unsettled(deferred.then_map(f))
}

impl<T: Clone + 'static, E: Clone + 'static> Outcome<T, E> {
    /// Transform the success value with a synchronous function.
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let out: Outcome<i32, &str> = Outcome::success(2);
    /// assert_eq!(out.map(|x| x + 1).ready(), Some(Ok(3)));
    /// ```
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> U + 'static,
    {
        match self.state {
            State::Success(p) => Outcome::from_success(p.map(f)),
            State::Failure(p) => Outcome::from_failure(p),
            State::Unsettled(d) => defer(d, move |o| o.map(f)),
        }
    }

    /// Transform the success value with a function returning a payload.
    ///
    /// The returned payload's mode decides the result's mode, so a function that only
    /// sometimes waits can say so per call.
    pub fn map_payload<U, F>(self, f: F) -> Outcome<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> Payload<U> + 'static,
    {
        match self.state {
            State::Success(p) => Outcome::from_success(p.lift(f)),
            State::Failure(p) => Outcome::from_failure(p),
            State::Unsettled(d) => defer(d, move |o| o.map_payload(f)),
        }
    }

    /// Transform the success value with an asynchronous function.
    pub fn map_async<U, F, Fut>(self, f: F) -> Outcome<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> Fut + 'static,
        Fut: Future<Output = U> + 'static,
    {
        self.map_payload(move |v| Payload::from_future(f(v)))
    }

    /// Chain a function returning another outcome; its track becomes the result's track.
    ///
    /// Over a pending success value the next track cannot be known before the value
    /// settles, so the result is unsettled.
    pub fn flat_map<U, F>(self, f: F) -> Outcome<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> Outcome<U, E> + 'static,
    {
        match self.state {
            State::Success(Payload::Direct(v)) => f(v),
            State::Success(Payload::Pending(d)) => Outcome::unsettled(d.then_map(f)),
            State::Failure(p) => Outcome::from_failure(p),
            State::Unsettled(d) => defer(d, move |o| o.flat_map(f)),
        }
    }

    /// Chain an asynchronous function returning another outcome.
    pub fn flat_map_async<U, F, Fut>(self, f: F) -> Outcome<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> Fut + 'static,
        Fut: Future<Output = Outcome<U, E>> + 'static,
    {
        self.flat_map(move |v| Outcome::from_future(f(v)))
    }

    /// Pair the success value with `f`'s result.
    pub fn zip<U, F>(self, f: F) -> Outcome<(T, U), E>
    where
        U: Clone + 'static,
        F: FnOnce(&T) -> U + 'static,
    {
        self.map(move |v| {
            let u = f(&v);
            (v, u)
        })
    }

    /// Pair the success value with the value of `f`'s future.
    pub fn zip_async<U, F, Fut>(self, f: F) -> Outcome<(T, U), E>
    where
        U: Clone + 'static,
        F: FnOnce(&T) -> Fut + 'static,
        Fut: Future<Output = U> + 'static,
    {
        self.map_payload(move |v| {
            let fut = f(&v);
            Payload::from_future(async move { (v, fut.await) })
        })
    }

    /// Pair the success value with the success of `f`'s outcome.
    ///
    /// If `f`'s outcome fails, the result carries that failure.
    pub fn flat_zip<U, F>(self, f: F) -> Outcome<(T, U), E>
    where
        U: Clone + 'static,
        F: FnOnce(&T) -> Outcome<U, E> + 'static,
    {
        self.flat_map(move |v| {
            let paired = f(&v);
            paired.map(move |u| (v, u))
        })
    }

    /// Asynchronous [`flat_zip`](Outcome::flat_zip).
    pub fn flat_zip_async<U, F, Fut>(self, f: F) -> Outcome<(T, U), E>
    where
        U: Clone + 'static,
        F: FnOnce(&T) -> Fut + 'static,
        Fut: Future<Output = Outcome<U, E>> + 'static,
    {
        self.flat_map(move |v| {
            let fut = f(&v);
            Outcome::from_future(fut).map(move |u| (v, u))
        })
    }

    /// Transform the failure value with a synchronous function.
    pub fn map_err<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        E2: Clone + 'static,
        F: FnOnce(E) -> E2 + 'static,
    {
        match self.state {
            State::Success(p) => Outcome::from_success(p),
            State::Failure(p) => Outcome::from_failure(p.map(f)),
            State::Unsettled(d) => defer(d, move |o| o.map_err(f)),
        }
    }

    /// Transform the failure value with an asynchronous function.
    pub fn map_err_async<E2, F, Fut>(self, f: F) -> Outcome<T, E2>
    where
        E2: Clone + 'static,
        F: FnOnce(E) -> Fut + 'static,
        Fut: Future<Output = E2> + 'static,
    {
        match self.state {
            State::Success(p) => Outcome::from_success(p),
            State::Failure(p) => {
                Outcome::from_failure(p.lift(move |e| Payload::from_future(f(e))))
            }
            State::Unsettled(d) => defer(d, move |o| o.map_err_async(f)),
        }
    }

    /// Transform whichever side is present. Exactly one of the functions runs.
    pub fn map_both<U, E2, FS, FE>(self, on_success: FS, on_failure: FE) -> Outcome<U, E2>
    where
        U: Clone + 'static,
        E2: Clone + 'static,
        FS: FnOnce(T) -> U + 'static,
        FE: FnOnce(E) -> E2 + 'static,
    {
        match self.state {
            State::Success(p) => Outcome::from_success(p.map(on_success)),
            State::Failure(p) => Outcome::from_failure(p.map(on_failure)),
            State::Unsettled(d) => defer(d, move |o| o.map_both(on_success, on_failure)),
        }
    }

    /// Recover from a failure with a replacement outcome, which may be on either track.
    pub fn or_else<E2, F>(self, f: F) -> Outcome<T, E2>
    where
        E2: Clone + 'static,
        F: FnOnce(E) -> Outcome<T, E2> + 'static,
    {
        match self.state {
            State::Success(p) => Outcome::from_success(p),
            State::Failure(Payload::Direct(e)) => f(e),
            State::Failure(Payload::Pending(d)) => Outcome::unsettled(d.then_map(f)),
            State::Unsettled(d) => defer(d, move |o| o.or_else(f)),
        }
    }

    /// Recover from a failure with an asynchronously produced outcome.
    pub fn or_else_async<E2, F, Fut>(self, f: F) -> Outcome<T, E2>
    where
        E2: Clone + 'static,
        F: FnOnce(E) -> Fut + 'static,
        Fut: Future<Output = Outcome<T, E2>> + 'static,
    {
        self.or_else(move |e| Outcome::from_future(f(e)))
    }

    /// Observe the success value without changing it.
    ///
    /// On a pending value the observer is queued behind the value and runs when the
    /// returned outcome, or a clone of it, is driven. Dropping the returned outcome
    /// before that drops the observer unrun, even if other readers settle the source.
    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) + 'static,
    {
        match self.state {
            State::Success(p) => Outcome::from_success(p.inspect(f)),
            State::Failure(p) => Outcome::from_failure(p),
            State::Unsettled(d) => defer(d, move |o| o.tap(f)),
        }
    }

    /// Observe the failure value without changing it.
    ///
    /// Pending errors are observed lazily, as with [`tap`](Outcome::tap).
    pub fn tap_err<F>(self, f: F) -> Self
    where
        F: FnOnce(&E) + 'static,
    {
        match self.state {
            State::Success(p) => Outcome::from_success(p),
            State::Failure(p) => Outcome::from_failure(p.inspect(f)),
            State::Unsettled(d) => defer(d, move |o| o.tap_err(f)),
        }
    }

    /// Run every validator against the success value, collecting all failures.
    ///
    /// Validators run in order and none is skipped after a failure. If all pass the
    /// original success is kept. An existing failure `e` becomes `vec![e]`.
    ///
    /// ```
    /// use outcome::Outcome;
    ///
    /// let positive = |x: &i32| Outcome::from_predicate((), |_| *x > 0, "not positive");
    /// let even = |x: &i32| Outcome::from_predicate((), |_| x % 2 == 0, "odd");
    ///
    /// let checked = Outcome::<i32, &str>::success(-3).validate([
    ///     Box::new(positive) as Box<dyn FnOnce(&i32) -> Outcome<(), &'static str>>,
    ///     Box::new(even),
    /// ]);
    /// assert_eq!(checked.ready(), Some(Err(vec!["not positive", "odd"])));
    /// ```
    pub fn validate<I, V, W>(self, validators: I) -> Outcome<T, Vec<E>>
    where
        I: IntoIterator<Item = V>,
        V: FnOnce(&T) -> Outcome<W, E> + 'static,
        W: Clone + 'static,
    {
        let validators: Vec<V> = validators.into_iter().collect();
        match self.state {
            State::Success(Payload::Direct(v)) => run_validators(v, validators),
            State::Success(Payload::Pending(d)) => {
                Outcome::unsettled(d.then_map(move |v| run_validators(v, validators)))
            }
            State::Failure(p) => Outcome::from_failure(p.map(|e| vec![e])),
            State::Unsettled(d) => defer(d, move |o| o.validate(validators)),
        }
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Outcome<Outcome<T, E>, E> {
    /// Remove one level of nesting.
    pub fn flatten(self) -> Outcome<T, E> {
        self.flat_map(|inner| inner)
    }
}

fn run_validators<T, E, V, W>(value: T, validators: Vec<V>) -> Outcome<T, Vec<E>>
where
    T: Clone + 'static,
    E: Clone + 'static,
    V: FnOnce(&T) -> Outcome<W, E>,
    W: Clone + 'static,
{
    let checks: Vec<Outcome<W, E>> = validators.into_iter().map(|check| check(&value)).collect();
    if checks.iter().any(Outcome::is_unsettled) {
        return Outcome::from_future(async move {
            let settled = futures::future::join_all(checks.into_iter().map(Outcome::resolve)).await;
            verdict(value, settled)
        });
    }
    verdict(value, checks)
}

fn verdict<T, E, W>(value: T, checks: Vec<Outcome<W, E>>) -> Outcome<T, Vec<E>>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    let failures: Vec<Payload<E>> = checks
        .into_iter()
        .filter_map(|check| match check.state {
            State::Failure(p) => Some(p),
            _ => None,
        })
        .collect();

    if failures.is_empty() {
        Outcome::success(value)
    } else {
        tracing::trace!(failures = failures.len(), "validate: collected failures");
        Outcome::from_failure(join_payloads(failures))
    }
}
