//! DisposeBag: an aggregate owner that releases its disposables together.

use std::fmt::{Debug, Formatter};

use smallvec::SmallVec;
use tracing::debug;

use crate::{
  disposable::{BoxedDisposable, Disposable},
  rc::MutArc,
};

/// Owns an ordered collection of disposables and releases all of them, in
/// insertion order and exactly once, when the bag is torn down.
///
/// Teardown happens when the last handle to the bag is dropped, or earlier
/// through [`Disposable::dispose`] on any clone. A torn-down bag stays
/// terminal: anything inserted afterwards is disposed immediately.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let bag = DisposeBag::new();
/// Observable::<_, ()>::of(["A", "B", "C"])
///   .subscribe(|v| println!("{v}"))
///   .disposed_by(&bag);
/// ```
#[derive(Clone, Default)]
pub struct DisposeBag(MutArc<Inner>);

#[derive(Default)]
struct Inner {
  disposed: bool,
  teardown: SmallVec<[BoxedDisposable; 4]>,
}

impl DisposeBag {
  pub fn new() -> Self { Self::default() }

  /// Take ownership of `disposable`.
  pub fn insert(&self, disposable: impl Disposable + Send + 'static) {
    let mut inner = self.0.rc_deref_mut();
    if inner.disposed {
      drop(inner);
      debug!("insert into a disposed bag, disposing immediately");
      disposable.dispose();
    } else {
      inner.teardown.retain(|d| !d.is_disposed());
      inner.teardown.push(BoxedDisposable::new(disposable));
    }
  }

  /// Number of disposables currently owned.
  pub fn len(&self) -> usize { self.0.rc_deref_mut().teardown.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  pub fn is_disposed(&self) -> bool { self.0.rc_deref_mut().disposed }

  fn teardown(&self) {
    let teardown = {
      let mut inner = self.0.rc_deref_mut();
      if inner.disposed {
        return;
      }
      inner.disposed = true;
      std::mem::take(&mut inner.teardown)
    };
    debug!(count = teardown.len(), "dispose bag torn down");
    for d in teardown {
      d.dispose();
    }
  }
}

impl Disposable for DisposeBag {
  /// Release every owned disposable now. Later calls are no-ops.
  #[inline]
  fn dispose(self) { self.teardown() }

  #[inline]
  fn is_disposed(&self) -> bool { DisposeBag::is_disposed(self) }
}

impl Drop for Inner {
  fn drop(&mut self) {
    if !self.disposed {
      self.disposed = true;
      debug!(count = self.teardown.len(), "dispose bag dropped");
      for d in self.teardown.drain(..) {
        d.dispose();
      }
    }
  }
}

impl Debug for DisposeBag {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.rc_deref_mut();
    f.debug_struct("DisposeBag")
      .field("disposed", &inner.disposed)
      .field("len", &inner.teardown.len())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use super::*;
  use crate::disposable::ClosureDisposable;

  fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> BoxedDisposable {
    let log = log.clone();
    BoxedDisposable::from_fn(move || log.lock().unwrap().push(name))
  }

  #[test]
  fn disposes_in_insertion_order_on_drop() {
    let log = Arc::new(Mutex::new(vec![]));
    {
      let bag = DisposeBag::new();
      bag.insert(recorder(&log, "a"));
      bag.insert(recorder(&log, "b"));
      bag.insert(recorder(&log, "c"));
      assert_eq!(bag.len(), 3);
      assert!(log.lock().unwrap().is_empty());
    }
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
  }

  #[test]
  fn explicit_dispose_runs_once() {
    let log = Arc::new(Mutex::new(vec![]));
    let bag = DisposeBag::new();
    bag.insert(recorder(&log, "a"));
    bag.clone().dispose();
    bag.clone().dispose();
    drop(bag);
    assert_eq!(*log.lock().unwrap(), vec!["a"]);
  }

  #[test]
  fn insert_after_dispose_disposes_immediately() {
    let log = Arc::new(Mutex::new(vec![]));
    let bag = DisposeBag::new();
    bag.clone().dispose();
    assert!(bag.is_disposed());

    bag.insert(recorder(&log, "late"));
    assert_eq!(*log.lock().unwrap(), vec!["late"]);
    assert!(bag.is_empty());
  }

  #[test]
  fn clone_keeps_bag_alive() {
    let log = Arc::new(Mutex::new(vec![]));
    let bag = DisposeBag::new();
    let c_bag = bag.clone();
    bag.insert(recorder(&log, "a"));
    drop(bag);
    assert!(log.lock().unwrap().is_empty());
    drop(c_bag);
    assert_eq!(*log.lock().unwrap(), vec!["a"]);
  }

  #[test]
  fn already_disposed_members_are_pruned() {
    let bag = DisposeBag::new();
    bag.insert(());
    bag.insert(ClosureDisposable(|| {}));
    assert_eq!(bag.len(), 1);
  }
}
