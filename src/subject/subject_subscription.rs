use super::SubjectState;
use crate::{disposable::Disposable, rc::WeakMutArc};

/// Removes one subscriber from a Subject when disposed.
///
/// Holds the Subject's state weakly: a subscription must not keep a Subject
/// alive, and disposing after the Subject is gone is a no-op.
pub(crate) struct SubjectSubscription<Item, Err, R> {
  state: WeakMutArc<SubjectState<Item, Err, R>>,
  id: usize,
}

impl<Item, Err, R> SubjectSubscription<Item, Err, R> {
  pub(crate) fn new(state: WeakMutArc<SubjectState<Item, Err, R>>, id: usize) -> Self {
    Self { state, id }
  }
}

impl<Item, Err, R> Disposable for SubjectSubscription<Item, Err, R> {
  fn dispose(self) {
    if let Some(state) = self.state.upgrade() {
      // dropped after the lock is released
      let _removed = state.rc_deref_mut().observers.remove(self.id);
    }
  }

  fn is_disposed(&self) -> bool {
    self
      .state
      .upgrade()
      .is_none_or(|state| !state.rc_deref_mut().observers.contains(self.id))
  }
}
