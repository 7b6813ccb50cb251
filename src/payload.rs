//! Payload cells: the value held by an outcome's track.
//!
//! A [`Payload`] is either [`Payload::Direct`], holding a value available now, or
//! [`Payload::Pending`], holding a [`Deferred`] that settles later. Combinators on
//! [`Payload`] are the lifting rules every outcome operator is built from: a direct
//! value transformed by a synchronous function stays direct, and anything touching a
//! pending value stays pending.
//!
//! # Examples
//!
//! ```
//! use outcome::Payload;
//!
//! let direct = Payload::Direct(2).map(|x| x * 10);
//! assert_eq!(direct.direct(), Some(20));
//!
//! let pending = Payload::from_future(async { 2 }).map(|x| x * 10);
//! assert!(pending.is_pending());
//! ```

use std::{
    any::Any,
    cell::RefCell,
    collections::VecDeque,
    fmt,
    future::{Future, IntoFuture},
    pin::Pin,
    task::{ready, Context, Poll},
};

use futures::future::{self, FutureExt, LocalBoxFuture, Shared};

type Erased = Box<dyn Any>;

fn erase<V: 'static>(value: V) -> Erased {
    Box::new(value)
}

fn downcast<V: 'static>(value: Erased) -> V {
    match value.downcast::<V>() {
        Ok(v) => *v,
        Err(_) => unreachable!("continuation produced a value of another type"),
    }
}

/// A step applied to the settled value of a chain.
enum Continuation {
    Map(Box<dyn FnOnce(Erased) -> Erased>),
    Then(Box<dyn FnOnce(Erased) -> LocalBoxFuture<'static, Erased>>),
}

/// A source future followed by continuations, run in order by one loop.
///
/// Appending a continuation never wraps the source, so polling depth stays
/// constant however long the chain grows.
struct Chain {
    current: LocalBoxFuture<'static, Erased>,
    continuations: VecDeque<Continuation>,
}

impl Chain {
    fn new<V, F>(source: F) -> Self
    where
        V: 'static,
        F: Future<Output = V> + 'static,
    {
        Chain {
            current: source.map(erase).boxed_local(),
            continuations: VecDeque::new(),
        }
    }

    fn poll_chain(&mut self, cx: &mut Context<'_>) -> Poll<Erased> {
        loop {
            let mut value = ready!(self.current.poll_unpin(cx));
            loop {
                match self.continuations.pop_front() {
                    None => return Poll::Ready(value),
                    Some(Continuation::Map(f)) => value = f(value),
                    Some(Continuation::Then(f)) => {
                        self.current = f(value);
                        break;
                    }
                }
            }
        }
    }

    fn take(&mut self) -> Chain {
        Chain {
            current: std::mem::replace(&mut self.current, future::pending().boxed_local()),
            continuations: std::mem::take(&mut self.continuations),
        }
    }

    fn into_shared<V: Clone + 'static>(mut self) -> Shared<LocalBoxFuture<'static, V>> {
        future::poll_fn(move |cx| self.poll_chain(cx))
            .map(downcast::<V>)
            .boxed_local()
            .shared()
    }
}

enum Inner<V> {
    /// Owned by a single reader; continuations are queued.
    Chain(Chain),
    /// Read by several clones; settles once.
    Shared(Shared<LocalBoxFuture<'static, V>>),
}

/// A value that settles later, readable by any number of clones.
///
/// Continuations attached with [`then_map`](Deferred::then_map) are queued, not nested.
/// Cloning turns the queue into a shared computation that is driven once; every clone
/// observes a copy of the same settled value.
pub struct Deferred<V>(RefCell<Inner<V>>);

impl<V: Clone + 'static> Clone for Deferred<V> {
    fn clone(&self) -> Self {
        let mut inner = self.0.borrow_mut();
        let shared = match &mut *inner {
            Inner::Shared(shared) => shared.clone(),
            Inner::Chain(chain) => {
                let shared = chain.take().into_shared::<V>();
                *inner = Inner::Shared(shared.clone());
                shared
            }
        };
        Deferred(RefCell::new(Inner::Shared(shared)))
    }
}

impl<V: Clone + 'static> Deferred<V> {
    /// Wrap a future so it can be shared.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = V> + 'static,
    {
        Deferred(RefCell::new(Inner::Chain(Chain::new(future))))
    }

    /// Attach a continuation, producing a new deferred value.
    ///
    /// `f` runs once, when the returned value is first driven past this point.
    pub fn then_map<U, F>(self, f: F) -> Deferred<U>
    where
        U: Clone + 'static,
        F: FnOnce(V) -> U + 'static,
    {
        self.push(Continuation::Map(Box::new(move |v| erase(f(downcast::<V>(v))))))
    }

    /// Attach an asynchronous continuation; its future is awaited in place.
    pub(crate) fn then_await<U, F, Fut>(self, f: F) -> Deferred<U>
    where
        U: Clone + 'static,
        F: FnOnce(V) -> Fut + 'static,
        Fut: Future<Output = U> + 'static,
    {
        self.push(Continuation::Then(Box::new(move |v| {
            f(downcast::<V>(v)).map(erase).boxed_local()
        })))
    }

    fn push<U>(self, continuation: Continuation) -> Deferred<U> {
        let mut chain = match self.0.into_inner() {
            Inner::Chain(chain) => chain,
            Inner::Shared(shared) => Chain::new(shared),
        };
        chain.continuations.push_back(continuation);
        Deferred(RefCell::new(Inner::Chain(chain)))
    }
}

impl<V: Clone + 'static> Future for Deferred<V> {
    type Output = V;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<V> {
        match self.get_mut().0.get_mut() {
            Inner::Chain(chain) => chain.poll_chain(cx).map(downcast::<V>),
            Inner::Shared(shared) => shared.poll_unpin(cx),
        }
    }
}

impl<V> fmt::Debug for Deferred<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<pending>")
    }
}

/// The value carried by an outcome's track.
pub enum Payload<V> {
    /// Available now.
    Direct(V),
    /// Settles later.
    Pending(Deferred<V>),
}

impl<V: Clone + 'static> Clone for Payload<V> {
    fn clone(&self) -> Self {
        match self {
            Payload::Direct(v) => Payload::Direct(v.clone()),
            Payload::Pending(d) => Payload::Pending(d.clone()),
        }
    }
}

impl<V> Payload<V> {
    /// Returns `true` if the payload is available now.
    #[inline]
    pub const fn is_direct(&self) -> bool {
        matches!(self, Payload::Direct(_))
    }

    /// Returns `true` if the payload is still waiting on a future.
    #[inline]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Payload::Pending(_))
    }

    /// Converts a direct payload into `Some(value)`, discarding pending ones.
    #[inline]
    pub fn direct(self) -> Option<V> {
        match self {
            Payload::Direct(v) => Some(v),
            Payload::Pending(_) => None,
        }
    }

    /// Borrows the value of a direct payload.
    #[inline]
    pub const fn as_direct(&self) -> Option<&V> {
        match self {
            Payload::Direct(v) => Some(v),
            Payload::Pending(_) => None,
        }
    }

    /// Returns the direct value.
    ///
    /// # Panics
    ///
    /// Panics if the payload is pending.
    #[inline]
    pub fn unwrap_direct(self) -> V {
        match self {
            Payload::Direct(v) => v,
            Payload::Pending(_) => panic!("called `Payload::unwrap_direct()` on a `Pending` value"),
        }
    }
}

impl<V: Clone + 'static> Payload<V> {
    /// A pending payload settled by `future`.
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = V> + 'static,
    {
        Payload::Pending(Deferred::new(future))
    }

    /// Transform the value with a synchronous function.
    ///
    /// Direct stays direct and `f` runs now; pending stays pending and `f` runs once
    /// the value settles.
    pub fn map<U, F>(self, f: F) -> Payload<U>
    where
        U: Clone + 'static,
        F: FnOnce(V) -> U + 'static,
    {
        match self {
            Payload::Direct(v) => Payload::Direct(f(v)),
            Payload::Pending(d) => Payload::Pending(d.then_map(f)),
        }
    }

    /// Transform the value with a function whose result may itself be pending.
    ///
    /// On a direct payload `f` runs now and its payload is returned as-is, so its mode
    /// decides the result. On a pending payload the result is pending regardless.
    pub fn lift<U, F>(self, f: F) -> Payload<U>
    where
        U: Clone + 'static,
        F: FnOnce(V) -> Payload<U> + 'static,
    {
        match self {
            Payload::Direct(v) => f(v),
            Payload::Pending(d) => Payload::Pending(d.then_await(move |v| f(v).settle())),
        }
    }

    /// Wait for the value.
    pub async fn settle(self) -> V {
        match self {
            Payload::Direct(v) => v,
            Payload::Pending(d) => d.await,
        }
    }

    /// Runs `f` on the value by reference, leaving it unchanged.
    pub(crate) fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&V) + 'static,
    {
        self.map(move |v| {
            f(&v);
            v
        })
    }
}

impl<V: Clone + 'static> IntoFuture for Payload<V> {
    type Output = V;
    type IntoFuture = LocalBoxFuture<'static, V>;

    fn into_future(self) -> Self::IntoFuture {
        self.settle().boxed_local()
    }
}

impl<V> From<Deferred<V>> for Payload<V> {
    fn from(d: Deferred<V>) -> Self {
        Payload::Pending(d)
    }
}

impl<V: fmt::Debug> fmt::Debug for Payload<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Direct(v) => f.debug_tuple("Direct").field(v).finish(),
            Payload::Pending(d) => f.debug_tuple("Pending").field(d).finish(),
        }
    }
}

/// Join payloads in order, staying direct when every member is direct.
pub(crate) fn join_payloads<V: Clone + 'static>(payloads: Vec<Payload<V>>) -> Payload<Vec<V>> {
    if payloads.iter().all(Payload::is_direct) {
        Payload::Direct(payloads.into_iter().filter_map(Payload::direct).collect())
    } else {
        Payload::from_future(futures::future::join_all(payloads.into_iter().map(Payload::settle)))
    }
}
