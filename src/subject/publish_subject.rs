use super::{Retention, Subject};

/// Remembers nothing: late subscribers only see future events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRetention;

impl<Item> Retention<Item> for NoRetention {
  #[inline]
  fn record(&mut self, _: &Item) {}

  #[inline]
  fn for_each_retained(&self, _: &mut dyn FnMut(&Item)) {}
}

/// A subject that only forwards events pushed after a subscriber attached.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use rxlite::prelude::*;
///
/// let subject = PublishSubject::<&str, ()>::new();
/// subject.on_next("missed");
///
/// let seen = Arc::new(Mutex::new(vec![]));
/// let c_seen = seen.clone();
/// subject.subscribe(move |v| c_seen.lock().unwrap().push(v));
/// subject.on_next("1");
/// subject.on_next("2");
///
/// assert_eq!(*seen.lock().unwrap(), vec!["1", "2"]);
/// ```
pub type PublishSubject<Item, Err> = Subject<Item, Err, NoRetention>;

impl<Item, Err> Subject<Item, Err, NoRetention> {
  #[inline]
  pub fn new() -> Self { Self::with_retention(NoRetention) }
}

impl<Item, Err> Default for Subject<Item, Err, NoRetention> {
  #[inline]
  fn default() -> Self { Self::new() }
}
