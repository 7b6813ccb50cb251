//! Drivers for do-notation.
//!
//! A routine binds outcomes one at a time; the driver unwraps each success and
//! resumes the routine with it. The first failure ends the run: the routine is never
//! resumed again and the failure becomes the result. Both drivers use a plain loop,
//! so the stack does not grow with the number of bindings.
//!
//! ```rust
//! use outcome::{generator, sequence, Outcome, Step};
//!
//! let mut sum = 0;
//! let mut n = 0;
//! let total = sequence(generator(move |prev: Option<i32>| {
//!     sum += prev.unwrap_or(0);
//!     n += 1;
//!     if n <= 3 {
//!         Step::Bind(Outcome::<i32, String>::success(n))
//!     } else {
//!         Step::Done(sum)
//!     }
//! }));
//! assert_eq!(total.ready(), Some(Ok(6)));
//! ```

use either::Either;
use futures::future::{FutureExt, LocalBoxFuture};

use crate::{
    outcome::State,
    payload::{Deferred, Payload},
    routine::{Routine, Start},
    step::Step,
    Outcome,
};

/// Something the async driver can wait on to obtain a settled outcome.
pub trait Bind<T, E> {
    /// Wait for the bound outcome and return its settled value.
    fn bind(self) -> LocalBoxFuture<'static, Result<T, E>>;
}

impl<T: Clone + 'static, E: Clone + 'static> Bind<T, E> for Outcome<T, E> {
    fn bind(self) -> LocalBoxFuture<'static, Result<T, E>> {
        self.into_result().boxed_local()
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Bind<T, E> for Deferred<Outcome<T, E>> {
    fn bind(self) -> LocalBoxFuture<'static, Result<T, E>> {
        async move { self.await.into_result().await }.boxed_local()
    }
}

impl<T: Clone + 'static, E: Clone + 'static> Bind<T, E> for LocalBoxFuture<'static, Outcome<T, E>> {
    fn bind(self) -> LocalBoxFuture<'static, Result<T, E>> {
        async move { self.await.into_result().await }.boxed_local()
    }
}

impl<T, E, L, R> Bind<T, E> for Either<L, R>
where
    L: Bind<T, E>,
    R: Bind<T, E>,
{
    fn bind(self) -> LocalBoxFuture<'static, Result<T, E>> {
        match self {
            Either::Left(l) => l.bind(),
            Either::Right(r) => r.bind(),
        }
    }
}

/// Drive a routine to completion without waiting.
///
/// Direct successes are fed straight back into the routine. A failure, even one whose
/// error is still pending, ends the run immediately. When a binding is pending or
/// unsettled, the remaining steps move into an unsettled outcome that continues once
/// the binding settles.
pub fn sequence<S, T, E, R>(routine: S) -> Outcome<R, E>
where
    S: Start<T, Outcome<T, E>>,
    S::Next: Routine<T, Outcome<T, E>, Return = R> + 'static,
    T: Clone + 'static,
    E: Clone + 'static,
    R: Clone + 'static,
{
    let (mut bound, mut next) = match routine.start() {
        Step::Bind(first) => first,
        Step::Done(r) => return Outcome::success(r),
    };

    let mut steps = 0usize;
    loop {
        let value = match bound.state {
            State::Success(Payload::Direct(v)) => v,
            State::Failure(p) => {
                tracing::trace!(steps, "sequence: short-circuited on failure");
                return Outcome::from_failure(p);
            }
            state => {
                tracing::trace!(steps, "sequence: pending binding, continuing asynchronously");
                return Outcome::from_future(drive(Outcome { state }, next));
            }
        };

        steps += 1;
        match next.resume(value) {
            Step::Bind(o) => bound = o,
            Step::Done(r) => return Outcome::success(r),
        }
    }
}

/// Drive a routine to completion, waiting on each binding.
///
/// Bindings may be outcomes or futures of outcomes; see [`Bind`].
pub async fn sequence_async<S, B, T, E, R>(routine: S) -> Outcome<R, E>
where
    S: Start<T, B>,
    S::Next: Routine<T, B, Return = R>,
    B: Bind<T, E>,
{
    match routine.start() {
        Step::Bind((first, next)) => drive(first, next).await,
        Step::Done(r) => Outcome::success(r),
    }
}

async fn drive<B, N, T, E, R>(mut bound: B, mut next: N) -> Outcome<R, E>
where
    B: Bind<T, E>,
    N: Routine<T, B, Return = R>,
{
    let mut steps = 0usize;
    loop {
        let value = match bound.bind().await {
            Ok(v) => v,
            Err(e) => {
                tracing::trace!(steps, "sequence_async: short-circuited on failure");
                return Outcome::failure(e);
            }
        };

        steps += 1;
        match next.resume(value) {
            Step::Bind(b) => bound = b,
            Step::Done(r) => return Outcome::success(r),
        }
    }
}
