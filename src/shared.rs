use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::{Deferred, Eager, LResult, LazyErr, LazyValue};

/// A read-only, reference counted handle to a lazy value.
///
/// Clones point to the same strategy instance: evaluating through
/// one handle evaluates it for every other handle as well, and the
/// producer still runs only once. The instance is dropped together
/// with the last owner.
///
/// ```
/// use lazyval::{Deferred, Shared};
///
/// let first = Shared::from_lazy(Deferred::new(|| 6 * 7));
/// let second = first.clone();
///
/// assert!(!second.is_evaluated());
/// assert_eq!(*first.get_value(), 42);
/// assert!(second.is_evaluated());
/// ```
///
/// The handle offers no way to change the value:
///
/// ```compile_fail
/// use lazyval::{Deferred, Shared};
///
/// let shared = Shared::from_lazy(Deferred::new(|| 3));
/// shared.reassign(5);
/// ```
///
/// ```compile_fail
/// use lazyval::{Eager, Shared};
///
/// let shared = Shared::from(Eager::new(3));
/// *shared.get_value() = 5;
/// ```
pub struct Shared<T>(Rc<RefCell<dyn LazyValue<T>>>);

impl<T> Shared<T> {
    /// Shares an instance the caller already put behind an `Rc`.
    ///
    /// The caller may keep its own `Rc` and reassign through it,
    /// every handle will observe the new value.
    pub fn new<L: LazyValue<T> + 'static>(lazy: Rc<RefCell<L>>) -> Self {
        Self(lazy)
    }

    pub fn from_lazy<L: LazyValue<T> + 'static>(lazy: L) -> Self {
        Self(Rc::new(RefCell::new(lazy)))
    }

    /// Borrows the value, evaluating it first if no owner did so yet.
    ///
    /// Takes `&self` but may mutate the shared instance: the first
    /// access through any handle stores the evaluated value.
    ///
    /// # Panics
    /// on reentrant access from inside the producer,
    /// or if a fallible producer returns an error.
    pub fn get_value(&self) -> Ref<'_, T> {
        match self.try_get_value() {
            Ok(value) => value,
            Err(e) => panic!("shared lazy value failed to evaluate: {e}"),
        }
    }

    pub fn try_get_value(&self) -> LResult<Ref<'_, T>> {
        if !self.is_evaluated() {
            let mut lazy = self.0.try_borrow_mut().map_err(|_| reentrant())?;
            lazy.try_get_value()?;
        }

        let lazy = self.0.try_borrow().map_err(|_| reentrant())?;

        Ref::filter_map(lazy, |it| it.peek()).map_err(|_| LazyErr::NoValue)
    }

    /// Reports `false` while the value is being evaluated.
    pub fn is_evaluated(&self) -> bool {
        self.0.try_borrow().is_ok_and(|lazy| lazy.is_evaluated())
    }

    /// Whether both handles share one instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of owners of the shared instance, this handle included.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

fn reentrant() -> LazyErr {
    tracing::debug!("reentrant access to a shared lazy value");
    LazyErr::Reentrant
}

// no `T: Clone` bound, only the `Rc` is cloned
impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: 'static> From<Eager<T>> for Shared<T> {
    fn from(lazy: Eager<T>) -> Self {
        Self::from_lazy(lazy)
    }
}

impl<T: 'static, F: FnMut() -> T + 'static> From<Deferred<T, F>> for Shared<T> {
    fn from(lazy: Deferred<T, F>) -> Self {
        Self::from_lazy(lazy)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tuple = f.debug_tuple(stringify!(Shared));

        match self.0.try_borrow() {
            Ok(lazy) => match lazy.peek() {
                Some(value) => tuple.field(value),
                None => tuple.field(&format_args!("<unevaluated>")),
            }
            .finish(),
            Err(_) => tuple.field(&format_args!("<evaluating>")).finish(),
        }
    }
}
