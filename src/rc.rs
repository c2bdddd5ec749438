//! Shared mutable pointer used by every stateful piece of the crate.
//!
//! `MutArc<T>` is an `Arc<Mutex<T>>` that tolerates poisoning: a panic inside
//! one observer callback must not wedge every other subscriber of the same
//! subject, so a poisoned lock is simply recovered.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

#[derive(Default)]
pub struct MutArc<T>(Arc<Mutex<T>>);

/// Non-owning counterpart of [`MutArc`].
pub struct WeakMutArc<T>(Weak<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }

  #[inline]
  pub fn rc_deref_mut(&self) -> MutexGuard<'_, T> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn downgrade(&self) -> WeakMutArc<T> { WeakMutArc(Arc::downgrade(&self.0)) }

  pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.0, &other.0) }
}

impl<T> WeakMutArc<T> {
  pub fn upgrade(&self) -> Option<MutArc<T>> { self.0.upgrade().map(MutArc) }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> Clone for WeakMutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> From<T> for MutArc<T> {
  fn from(value: T) -> Self { Self::own(value) }
}

#[cfg(test)]
mod tests {
  use std::thread;

  use super::*;

  #[test]
  fn poisoned_lock_is_recovered() {
    let cell = MutArc::own(1);
    let c_cell = cell.clone();
    let _ = thread::spawn(move || {
      let _guard = c_cell.rc_deref_mut();
      panic!("poison");
    })
    .join();

    *cell.rc_deref_mut() += 1;
    assert_eq!(*cell.rc_deref_mut(), 2);
  }

  #[test]
  fn weak_upgrade_follows_owner() {
    let cell = MutArc::own(5);
    let weak = cell.downgrade();
    assert!(weak.upgrade().is_some_and(|c| c.ptr_eq(&cell)));
    drop(cell);
    assert!(weak.upgrade().is_none());
  }
}
