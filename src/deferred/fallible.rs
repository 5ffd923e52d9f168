use std::any::type_name;

use anyhow::Context;
use tap::TapFallible;

use super::Slot;
use crate::{LResult, LazyValue};

/// A [`super::Deferred`] whose producer may fail.
///
/// A failed producer is kept and runs again on the next access.
/// Only a successful result is cached.
#[derive(Clone)]
pub struct TryDeferred<T, F> {
    slot: Slot<T, F>,
}

impl<T, F: FnMut() -> anyhow::Result<T>> TryDeferred<T, F> {
    pub const fn new(producer: F) -> Self {
        Self {
            slot: Slot::Producer(producer),
        }
    }

    fn evaluate(&mut self) -> LResult<&mut T> {
        if let Slot::Producer(produce) = &mut self.slot {
            tracing::trace!(value = type_name::<T>(), "evaluating fallible deferred value");

            let value = produce()
                .with_context(|| format!("evaluating {}", type_name::<T>()))
                .tap_err(|e| {
                    tracing::debug!("producer failed, keeping it for the next access: {e:#}");
                })?;

            self.slot = Slot::Value(value);
        }

        match &mut self.slot {
            Slot::Value(value) => Ok(value),
            Slot::Producer(_) => unreachable!("the producer was just replaced by its value"),
        }
    }
}

impl<T, F: FnMut() -> anyhow::Result<T>> LazyValue<T> for TryDeferred<T, F> {
    fn try_get_value(&mut self) -> LResult<&mut T> {
        self.evaluate()
    }

    fn peek(&self) -> Option<&T> {
        match &self.slot {
            Slot::Value(value) => Some(value),
            Slot::Producer(_) => None,
        }
    }

    fn is_evaluated(&self) -> bool {
        matches!(self.slot, Slot::Value(_))
    }

    fn reassign(&mut self, value: T) {
        self.slot = Slot::Value(value);
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for TryDeferred<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tuple = f.debug_tuple(stringify!(TryDeferred));

        match &self.slot {
            Slot::Value(value) => tuple.field(value),
            Slot::Producer(_) => tuple.field(&format_args!("<unevaluated>")),
        }
        .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use anyhow::bail;

    use super::*;
    use crate::LazyErr;

    #[test]
    fn test_success_is_cached() {
        let calls = Cell::new(0);
        let mut lazy = TryDeferred::new(|| {
            calls.set(calls.get() + 1);
            Ok(calls.get() * 10)
        });

        assert!(!lazy.is_evaluated());
        assert_eq!(*lazy.try_get_value().unwrap(), 10);
        assert_eq!(*lazy.get_value(), 10);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failure_retries() {
        let calls = Cell::new(0);
        let mut lazy = TryDeferred::new(|| {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                bail!("attempt {} failed", calls.get());
            }
            Ok("ready")
        });

        let err = lazy.try_get_value().unwrap_err();
        assert!(matches!(err, LazyErr::Producer(_)));
        assert!(err.to_string().contains("attempt 1 failed"));
        assert!(!lazy.is_evaluated());

        assert!(lazy.try_get_value().is_err());
        assert_eq!(*lazy.try_get_value().unwrap(), "ready");
        assert_eq!(*lazy.try_get_value().unwrap(), "ready");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_reassign_drops_failing_producer() {
        let mut lazy = TryDeferred::new(|| -> anyhow::Result<i32> { bail!("never works") });

        assert!(lazy.try_get_value().is_err());

        lazy.reassign(4);
        assert!(lazy.is_evaluated());
        assert_eq!(*lazy.try_get_value().unwrap(), 4);
        assert_eq!(format!("{lazy:?}"), "TryDeferred(4)");
    }

    #[test]
    #[should_panic(expected = "never works")]
    fn test_get_value_panics_on_failure() {
        let mut lazy = TryDeferred::new(|| -> anyhow::Result<i32> { bail!("never works") });
        lazy.get_value();
    }
}
