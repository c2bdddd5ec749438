use super::{Retention, Subject};

/// Remembers the most recent value.
#[derive(Clone, Debug)]
pub struct Latest<Item>(Item);

impl<Item> Latest<Item> {
  #[inline]
  pub fn get(&self) -> &Item { &self.0 }
}

impl<Item: Clone + Send> Retention<Item> for Latest<Item> {
  #[inline]
  fn record(&mut self, value: &Item) { self.0 = value.clone(); }

  #[inline]
  fn for_each_retained(&self, f: &mut dyn FnMut(&Item)) { f(&self.0) }
}

/// A subject that always holds a current value and hands it to every new
/// subscriber before any later event.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use rxlite::prelude::*;
///
/// let subject = BehaviorSubject::<_, ()>::new("Initial value");
/// let seen = Arc::new(Mutex::new(vec![]));
/// let c_seen = seen.clone();
/// subject.subscribe(move |v| c_seen.lock().unwrap().push(v));
/// subject.on_next("X");
///
/// assert_eq!(*seen.lock().unwrap(), vec!["Initial value", "X"]);
/// assert_eq!(subject.value(), "X");
/// ```
pub type BehaviorSubject<Item, Err> = Subject<Item, Err, Latest<Item>>;

impl<Item, Err> Subject<Item, Err, Latest<Item>> {
  #[inline]
  pub fn new(seed: Item) -> Self { Self::with_retention(Latest(seed)) }

  /// The current value. Still readable after termination.
  pub fn value(&self) -> Item
  where
    Item: Clone,
  {
    self.state.rc_deref_mut().retention.get().clone()
  }
}
