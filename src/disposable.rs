//! Disposable: a releasable handle to the resources of a subscription.

use std::fmt::{Debug, Formatter};

use crate::dispose_bag::DisposeBag;

/// A cancellable resource.
///
/// `dispose` consumes the handle; handles that may be released from several
/// places (such as [`Subscription`](crate::subscriber::Subscription)) are
/// `Clone` and idempotent, so a second disposal through another clone is a
/// no-op.
pub trait Disposable {
  /// Release the resource.
  fn dispose(self);

  fn is_disposed(&self) -> bool;
}

/// The empty disposable, for producers with nothing to clean up.
impl Disposable for () {
  #[inline]
  fn dispose(self) {}

  #[inline]
  fn is_disposed(&self) -> bool { true }
}

impl<D: Disposable> Disposable for Option<D> {
  fn dispose(self) {
    if let Some(inner) = self {
      inner.dispose()
    }
  }

  fn is_disposed(&self) -> bool { self.as_ref().is_none_or(Disposable::is_disposed) }
}

impl<D1: Disposable, D2: Disposable> Disposable for (D1, D2) {
  fn dispose(self) {
    self.0.dispose();
    self.1.dispose();
  }

  fn is_disposed(&self) -> bool { self.0.is_disposed() && self.1.is_disposed() }
}

// ==================== ClosureDisposable ====================

/// Runs a closure on disposal.
pub struct ClosureDisposable<F: FnOnce()>(pub F);

impl<F: FnOnce()> Disposable for ClosureDisposable<F> {
  #[inline]
  fn dispose(self) { (self.0)() }

  #[inline]
  fn is_disposed(&self) -> bool { false }
}

// ==================== BoxedDisposable ====================

/// Helper trait for calling dispose on boxed trait objects
///
/// Since `Disposable::dispose(self)` requires `Sized`, we need this
/// workaround trait to enable `Box<dyn Disposable>` to call dispose.
pub trait BoxedDisposableInner {
  fn boxed_dispose(self: Box<Self>);
  fn boxed_is_disposed(&self) -> bool;
}

impl<T: Disposable> BoxedDisposableInner for T {
  #[inline]
  fn boxed_dispose(self: Box<Self>) { (*self).dispose() }

  #[inline]
  fn boxed_is_disposed(&self) -> bool { self.is_disposed() }
}

/// A type-erased, thread-safe disposable.
///
/// Disposables are control handles, not data views: they are stored in
/// subscriptions and bags and called at an arbitrary later time, possibly on
/// another thread, so they are `Send + 'static`.
pub struct BoxedDisposable(Box<dyn BoxedDisposableInner + Send>);

impl BoxedDisposable {
  #[inline]
  pub fn new(disposable: impl Disposable + Send + 'static) -> Self { Self(Box::new(disposable)) }

  /// A disposable that does nothing.
  #[inline]
  pub fn empty() -> Self { Self::new(()) }

  /// A disposable running `f` on disposal.
  #[inline]
  pub fn from_fn(f: impl FnOnce() + Send + 'static) -> Self { Self::new(ClosureDisposable(f)) }
}

impl Disposable for BoxedDisposable {
  #[inline]
  fn dispose(self) { self.0.boxed_dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.boxed_is_disposed() }
}

impl Debug for BoxedDisposable {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BoxedDisposable")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}

// ==================== Extension & guard ====================

pub trait DisposableExt: Disposable + Sized + Send + 'static {
  /// Hand the disposable to `bag`; it is released when the bag is.
  fn disposed_by(self, bag: &DisposeBag) { bag.insert(self); }

  /// Activates "RAII" behavior: the disposable is released as soon as the
  /// returned guard goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `dispose()` is called immediately.
  fn dispose_when_dropped(self) -> DisposableGuard<Self> { DisposableGuard::new(self) }
}

impl<T: Disposable + Send + 'static> DisposableExt for T {}

/// An RAII implementation of a scoped disposable. When this structure is
/// dropped (falls out of scope), the disposable is released.
#[must_use]
pub struct DisposableGuard<T: Disposable>(Option<T>);

impl<T: Disposable> DisposableGuard<T> {
  pub fn new(disposable: T) -> Self { Self(Some(disposable)) }

  /// Give up the guard without disposing.
  pub fn into_inner(mut self) -> T {
    match self.0.take() {
      Some(inner) => inner,
      None => unreachable!("guard is only emptied on drop"),
    }
  }
}

impl<T: Disposable> Drop for DisposableGuard<T> {
  #[inline]
  fn drop(&mut self) {
    if let Some(inner) = self.0.take() {
      inner.dispose();
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use super::*;

  fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let hits = Arc::new(AtomicUsize::new(0));
    let c_hits = hits.clone();
    (hits, move || {
      c_hits.fetch_add(1, Ordering::SeqCst);
    })
  }

  #[test]
  fn boxed_closure_runs_once() {
    let (hits, f) = counter();
    let boxed = BoxedDisposable::from_fn(f);
    assert!(!boxed.is_disposed());
    boxed.dispose();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn tuple_disposes_both() {
    let (h1, f1) = counter();
    let (h2, f2) = counter();
    (ClosureDisposable(f1), Some(ClosureDisposable(f2))).dispose();
    assert_eq!(h1.load(Ordering::SeqCst), 1);
    assert_eq!(h2.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn guard_disposes_on_drop() {
    let (hits, f) = counter();
    {
      let _guard = ClosureDisposable(f).dispose_when_dropped();
      assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn guard_into_inner_skips_dispose() {
    let (hits, f) = counter();
    let inner = DisposableGuard::new(ClosureDisposable(f)).into_inner();
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    inner.dispose();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
  }
}
