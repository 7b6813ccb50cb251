//! Presence/absence operators.
//!
//! [`Maybe<T>`] is an [`Outcome`] whose failure track holds the singleton [`Absent`].
//! Everything on `Outcome` applies; this module adds the constructors and the
//! operators that only make sense without an error value.

use std::future::Future;

use crate::{outcome::State, payload::Payload, Absent, Maybe, Outcome};

impl<T> Outcome<T, Absent> {
    /// A present value.
    #[inline]
    pub const fn some(value: T) -> Self {
        Outcome::success(value)
    }

    /// The absent value.
    ///
    /// Every absent outcome carries the same [`Absent`] instance.
    ///
    /// ```
    /// use outcome::Maybe;
    ///
    /// let a: Maybe<i32> = Maybe::none();
    /// let b: Maybe<String> = Maybe::none();
    /// assert!(a.failure_ref().unwrap().same_instance(b.failure_ref().unwrap()));
    /// ```
    #[inline]
    pub fn none() -> Self {
        Outcome::failure(Absent::get())
    }

    /// Present when `pred` accepts `value`.
    pub fn some_if<P>(value: T, pred: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        Outcome::from_predicate(value, pred, Absent::get())
    }

    /// Returns `true` if the value is present.
    #[inline]
    pub fn is_some(&self) -> bool {
        self.is_success()
    }

    /// Returns `true` if the value is absent.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.is_failure()
    }
}

impl<T: Clone + 'static> Maybe<T> {
    /// Keep the value only if `pred` accepts it.
    ///
    /// A direct value with a rejecting predicate becomes [`Maybe::none`] immediately;
    /// over a pending value the verdict waits for the value, so the result is unsettled.
    pub fn filter<P>(self, pred: P) -> Self
    where
        P: FnOnce(&T) -> bool + 'static,
    {
        self.flat_map(move |v| Maybe::some_if(v, pred))
    }

    /// Keep the value only if the future returned by `pred` resolves to `true`.
    pub fn filter_async<P, Fut>(self, pred: P) -> Self
    where
        P: FnOnce(&T) -> Fut + 'static,
        Fut: Future<Output = bool> + 'static,
    {
        self.flat_map(move |v| {
            let verdict = pred(&v);
            Outcome::from_future(async move {
                if verdict.await {
                    Maybe::some(v)
                } else {
                    Maybe::none()
                }
            })
        })
    }

    /// The present value, or `None`, when known now.
    pub fn into_option(self) -> Option<Option<T>> {
        match self.state {
            State::Success(Payload::Direct(v)) => Some(Some(v)),
            State::Failure(_) => Some(None),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Track;
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn test_none_is_singleton() {
        let a: Maybe<i32> = Maybe::none();
        let b: Maybe<Vec<u8>> = Maybe::from(None::<Vec<u8>>);
        let x = a.failure_ref().copied();
        let y = b.failure_ref().copied();
        assert!(x.zip(y).is_some_and(|(x, y)| x.same_instance(&y)));
    }

    #[test]
    fn test_some_and_predicates() {
        assert!(Maybe::some(1).is_some());
        assert!(Maybe::<i32>::none().is_none());
        assert!(Maybe::some_if(4, |x| x % 2 == 0).is_some());
        assert!(Maybe::some_if(3, |x| x % 2 == 0).is_none());
    }

    #[test]
    fn test_filter_direct() {
        assert_eq!(Maybe::some(4).filter(|x| *x > 3), Maybe::some(4));
        assert_eq!(Maybe::some(2).filter(|x| *x > 3), Maybe::none());
    }

    #[test]
    fn test_filter_skips_absent() {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let out = Maybe::<i32>::none().filter(move |_| {
            c.set(c.get() + 1);
            true
        });
        assert!(out.is_none());
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_filter_skips_pending_absent() {
        let calls = Rc::new(Cell::new(0));
        let (c1, c2) = (Rc::clone(&calls), Rc::clone(&calls));
        let out = Maybe::<i32>::failure_from_future(async { Absent::get() })
            .filter(move |_| {
                c1.set(c1.get() + 1);
                true
            })
            .filter_async(move |_| {
                c2.set(c2.get() + 1);
                async { true }
            });
        assert!(out.is_none() && out.is_pending());
        let settled = out.resolve().await;
        assert!(settled.failure_ref().is_some_and(|a| a.same_instance(&Absent::get())));
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_filter_infection() {
        let direct_async = Maybe::some(4).filter_async(|x| {
            let keep = *x > 3;
            async move { keep }
        });
        assert_eq!(direct_async.track(), Track::Unsettled);
        assert_eq!(direct_async.resolve().await, Maybe::some(4));

        let pending_sync = Maybe::success_from_future(async { 1 }).filter(|x| *x > 3);
        assert!(pending_sync.is_pending());
        assert!(pending_sync.resolve().await.is_none());

        let pending_async = Maybe::success_from_future(async { 5 }).filter_async(|_| async { false });
        assert!(pending_async.resolve().await.is_none());
    }

    #[test]
    fn test_into_option() {
        assert_eq!(Maybe::some(1).into_option(), Some(Some(1)));
        assert_eq!(Maybe::<i32>::none().into_option(), Some(None));
        assert_eq!(Maybe::success_from_future(async { 1 }).into_option(), None);
    }
}
