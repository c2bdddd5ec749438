use std::collections::VecDeque;

use super::{Retention, Subject};

/// Remembers the last `capacity` values, or every value when unbounded.
#[derive(Clone, Debug)]
pub struct ReplayBuffer<Item> {
  capacity: Option<usize>,
  items: VecDeque<Item>,
}

impl<Item> ReplayBuffer<Item> {
  pub fn new(capacity: usize) -> Self {
    Self { capacity: Some(capacity), items: VecDeque::new() }
  }

  pub fn unbounded() -> Self { Self { capacity: None, items: VecDeque::new() } }

  #[inline]
  pub fn capacity(&self) -> Option<usize> { self.capacity }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl<Item: Clone + Send> Retention<Item> for ReplayBuffer<Item> {
  fn record(&mut self, value: &Item) {
    if self.capacity == Some(0) {
      return;
    }
    self.items.push_back(value.clone());
    if let Some(capacity) = self.capacity {
      while self.items.len() > capacity {
        self.items.pop_front();
      }
    }
  }

  fn for_each_retained(&self, f: &mut dyn FnMut(&Item)) { self.items.iter().for_each(f) }
}

/// A subject that replays up to `buffer_size` of the latest values to every
/// new subscriber, oldest first.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use rxlite::prelude::*;
///
/// let subject = ReplaySubject::<_, ()>::new(2);
/// subject.on_next("1");
/// subject.on_next("2");
/// subject.on_next("3");
///
/// let seen = Arc::new(Mutex::new(vec![]));
/// let c_seen = seen.clone();
/// subject.subscribe(move |v| c_seen.lock().unwrap().push(v));
/// assert_eq!(*seen.lock().unwrap(), vec!["2", "3"]);
/// ```
pub type ReplaySubject<Item, Err> = Subject<Item, Err, ReplayBuffer<Item>>;

impl<Item, Err> Subject<Item, Err, ReplayBuffer<Item>> {
  #[inline]
  pub fn new(buffer_size: usize) -> Self { Self::with_retention(ReplayBuffer::new(buffer_size)) }

  #[inline]
  pub fn unbounded() -> Self { Self::with_retention(ReplayBuffer::unbounded()) }

  /// The configured bound, `None` when unbounded.
  pub fn buffer_size(&self) -> Option<usize> { self.state.rc_deref_mut().retention.capacity() }
}
