//! Resumable routines for do-notation.
//!
//! A [`Routine`] is a stateful computation that is resumed with the success value of
//! the outcome it last bound, and answers with the next [`Step`]: another outcome to
//! bind, or its finished value. [`Start`] is the entry point, producing the first
//! binding before any value exists.
//!
//! Routines are plain state machines; the drivers in [`sequence`](crate::sequence)
//! decide what happens between steps.
//!
//! # Examples
//!
//! ```rust
//! use outcome::{generator, Outcome, Routine, Start, Step};
//!
//! let mut calls = 0;
//! let routine = generator(move |prev: Option<i32>| {
//!     calls += 1;
//!     match prev {
//!         None => Step::Bind(Outcome::<i32, ()>::success(1)),
//!         Some(v) if calls < 3 => Step::Bind(Outcome::success(v + 1)),
//!         Some(v) => Step::Done(v),
//!     }
//! });
//!
//! let (first, mut next) = routine.start().unwrap_bind();
//! assert_eq!(first.ready(), Some(Ok(1)));
//! assert_eq!(next.resume(1).unwrap_bind().ready(), Some(Ok(2)));
//! assert_eq!(next.resume(2).unwrap_done(), 2);
//! ```

use crate::step::Step;

/// A computation resumed with input `I` that binds values of type `O`.
pub trait Routine<I, O> {
    /// Type of the finished value.
    type Return;

    /// Resume with the last bound value, returning the next binding or the result.
    fn resume(&mut self, input: I) -> Step<O, Self::Return>;

    fn boxed(self) -> Box<dyn Routine<I, O, Return = Self::Return>>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<I, O, R> Routine<I, O> for Box<R>
where
    R: Routine<I, O> + ?Sized,
{
    type Return = R::Return;

    fn resume(&mut self, input: I) -> Step<O, Self::Return> {
        (**self).resume(input)
    }
}

/// A routine that produces its first binding without input.
pub trait Start<I, O> {
    type Next: Routine<I, O>;

    /// Produce the first binding together with the routine that continues after it,
    /// or finish immediately.
    #[allow(clippy::type_complexity)]
    fn start(self) -> Step<(O, Self::Next), <Self::Next as Routine<I, O>>::Return>;
}

impl<I, O, R> Start<I, O> for (O, R)
where
    R: Routine<I, O>,
{
    type Next = R;

    fn start(self) -> Step<(O, R), R::Return> {
        Step::Bind(self)
    }
}

/// Routine backed by a closure over the resumed value.
pub struct FromFn<F>(F);

impl<I, O, D, F> Routine<I, O> for FromFn<F>
where
    F: FnMut(I) -> Step<O, D>,
{
    type Return = D;

    fn resume(&mut self, input: I) -> Step<O, D> {
        (self.0)(input)
    }
}

/// Create a routine from a closure.
///
/// ```rust
/// use outcome::{from_fn, Outcome, Routine, Step};
///
/// let mut halve = from_fn(|x: i32| {
///     if x % 2 == 0 { Step::Bind(Outcome::<i32, ()>::success(x / 2)) } else { Step::Done(x) }
/// });
/// assert!(halve.resume(8).is_bind());
/// assert_eq!(halve.resume(3).unwrap_done(), 3);
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// Bind `first`, then continue with a closure routine.
pub fn start_with<I, O, D, F>(first: O, f: F) -> (O, FromFn<F>)
where
    F: FnMut(I) -> Step<O, D>,
{
    (first, FromFn(f))
}

/// Generator-shaped routine: one closure called with `None` to start and with the
/// previous success value afterwards.
pub struct Generator<F>(F);

/// Create a generator-shaped routine.
pub fn generator<F>(f: F) -> Generator<F> {
    Generator(f)
}

impl<I, O, D, F> Routine<I, O> for Generator<F>
where
    F: FnMut(Option<I>) -> Step<O, D>,
{
    type Return = D;

    fn resume(&mut self, input: I) -> Step<O, D> {
        (self.0)(Some(input))
    }
}

impl<I, O, D, F> Start<I, O> for Generator<F>
where
    F: FnMut(Option<I>) -> Step<O, D>,
{
    type Next = Self;

    fn start(mut self) -> Step<(O, Self), D> {
        match (self.0)(None) {
            Step::Bind(o) => Step::Bind((o, self)),
            Step::Done(d) => Step::Done(d),
        }
    }
}
