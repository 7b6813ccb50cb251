/// What a routine does next: bind another outcome, or finish with a value.
///
/// `Step` is the return type of [`Routine::resume`](crate::Routine::resume) and
/// [`Start::start`](crate::Start::start).
///
/// # Examples
///
/// ```rust
/// use outcome::Step;
///
/// let binding: Step<i32, String> = Step::Bind(42);
/// let finished: Step<i32, String> = Step::Done("finished".to_string());
///
/// assert_eq!(binding.map_bind(|x| x * 2), Step::Bind(84));
/// assert!(finished.is_done());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step<B, D> {
    /// Hand an outcome to the driver and wait for its success value.
    Bind(B),
    /// Finish the routine.
    Done(D),
}

impl<B, D> Step<B, D> {
    /// Returns `true` if the step is `Bind`.
    #[inline]
    pub const fn is_bind(&self) -> bool {
        matches!(self, Step::Bind(_))
    }

    /// Returns `true` if the step is `Done`.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    /// Maps the bound value, leaving `Done` untouched.
    #[inline]
    pub fn map_bind<B2, F>(self, f: F) -> Step<B2, D>
    where
        F: FnOnce(B) -> B2,
    {
        match self {
            Step::Bind(b) => Step::Bind(f(b)),
            Step::Done(d) => Step::Done(d),
        }
    }

    /// Maps the finished value, leaving `Bind` untouched.
    #[inline]
    pub fn map_done<D2, F>(self, f: F) -> Step<B, D2>
    where
        F: FnOnce(D) -> D2,
    {
        match self {
            Step::Bind(b) => Step::Bind(b),
            Step::Done(d) => Step::Done(f(d)),
        }
    }

    /// Converts from `Step<B, D>` to `Option<D>`.
    #[inline]
    pub fn done_value(self) -> Option<D> {
        match self {
            Step::Bind(_) => None,
            Step::Done(d) => Some(d),
        }
    }

    /// Returns the bound value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Done`.
    #[inline]
    pub fn unwrap_bind(self) -> B {
        match self {
            Step::Bind(b) => b,
            Step::Done(_) => panic!("called `Step::unwrap_bind()` on a `Done` value"),
        }
    }

    /// Returns the finished value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Bind`.
    #[inline]
    pub fn unwrap_done(self) -> D {
        match self {
            Step::Bind(_) => panic!("called `Step::unwrap_done()` on a `Bind` value"),
            Step::Done(d) => d,
        }
    }
}
