//! Explicit, idempotent resource release.

use std::ops::{Deref, DerefMut};

/// A value whose resources must be released exactly once.
///
/// `dispose` must be idempotent: calling it a second time is a no-op and
/// never releases anything twice.
pub trait Disposable {
    /// Release held resources.
    fn dispose(&mut self);

    /// Whether `dispose` has already run.
    fn is_disposed(&self) -> bool;
}

impl<T: Disposable + ?Sized> Disposable for Box<T> {
    fn dispose(&mut self) {
        (**self).dispose();
    }

    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}

/// Scope guard that disposes the wrapped value when it goes out of scope.
///
/// Every early return out of a block holding a `Scoped<T>` still releases
/// the value.
pub struct Scoped<T: Disposable> {
    inner: Option<T>,
}

impl<T: Disposable> Scoped<T> {
    pub fn new(value: T) -> Self {
        Self { inner: Some(value) }
    }

    /// Take the value out without disposing it.
    pub fn into_inner(mut self) -> T {
        // `inner` is only `None` after this call, which consumes the guard.
        match self.inner.take() {
            Some(value) => value,
            None => unreachable!("scoped value taken twice"),
        }
    }
}

impl<T: Disposable> Deref for Scoped<T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.inner {
            Some(value) => value,
            None => unreachable!("scoped value already taken"),
        }
    }
}

impl<T: Disposable> DerefMut for Scoped<T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.inner {
            Some(value) => value,
            None => unreachable!("scoped value already taken"),
        }
    }
}

impl<T: Disposable> Drop for Scoped<T> {
    fn drop(&mut self) {
        if let Some(mut value) = self.inner.take() {
            value.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counted {
        releases: Arc<AtomicUsize>,
        disposed: bool,
    }

    impl Disposable for Counted {
        fn dispose(&mut self) {
            if !self.disposed {
                self.disposed = true;
                self.releases.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn is_disposed(&self) -> bool {
            self.disposed
        }
    }

    fn counted() -> (Counted, Arc<AtomicUsize>) {
        let releases = Arc::new(AtomicUsize::new(0));
        (
            Counted {
                releases: releases.clone(),
                disposed: false,
            },
            releases,
        )
    }

    #[test]
    fn test_scoped_disposes_on_early_return() {
        let (value, releases) = counted();

        fn early(value: Counted) -> Option<()> {
            let _guard = Scoped::new(value);
            let missing: Option<()> = None;
            missing?;
            Some(())
        }

        assert!(early(value).is_none());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_into_inner_skips_dispose() {
        let (value, releases) = counted();
        let value = Scoped::new(value).into_inner();
        assert!(!value.is_disposed());
        assert_eq!(releases.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_boxed_dispose_forwards() {
        let (value, releases) = counted();
        let mut boxed: Box<Counted> = Box::new(value);
        boxed.dispose();
        boxed.dispose();
        assert!(boxed.is_disposed());
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }
}
