//! The absence marker carried on the failure track of a [`Maybe`](crate::Maybe).

use std::{fmt, hash::Hash, ptr};

use once_cell::sync::Lazy;

struct Token {
    label: &'static str,
}

static ABSENT: Lazy<Token> = Lazy::new(|| Token { label: "None" });

/// Handle to the single process-wide absence value.
///
/// Every `Absent` points at the same lazily initialised static, so absent outcomes
/// built by unrelated calls share one instance.
///
/// ```
/// use outcome::Absent;
///
/// assert!(Absent::get().same_instance(&Absent::get()));
/// ```
#[derive(Clone, Copy)]
pub struct Absent(&'static Token);

impl Absent {
    /// The canonical absence value.
    #[inline]
    pub fn get() -> Self {
        Absent(&ABSENT)
    }

    /// Returns `true` if both handles refer to the same instance.
    #[inline]
    pub fn same_instance(&self, other: &Absent) -> bool {
        ptr::eq(self.0, other.0)
    }
}

impl Default for Absent {
    fn default() -> Self {
        Absent::get()
    }
}

impl PartialEq for Absent {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Eq for Absent {}

impl Hash for Absent {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.label.hash(state);
    }
}

impl fmt::Debug for Absent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.label)
    }
}
