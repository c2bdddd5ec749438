use super::Observable;
use crate::disposable::BoxedDisposable;

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Completes immediately without emitting values.
  pub fn empty() -> Self {
    Self::from_producer(|subscriber| {
      subscriber.complete();
      BoxedDisposable::empty()
    })
  }

  /// Never emits and never terminates.
  pub fn never() -> Self { Self::from_producer(|_| BoxedDisposable::empty()) }

  /// Fails immediately with `err`.
  pub fn throw(err: Err) -> Self
  where
    Err: Clone + Send + Sync + 'static,
  {
    Self::from_producer(move |subscriber| {
      subscriber.error(err.clone());
      BoxedDisposable::empty()
    })
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  fn record<Err: Send + 'static>(
    source: &Observable<i32, Err>,
  ) -> (Arc<Mutex<Vec<Event<i32, Err>>>>, Subscription) {
    let log = Arc::new(Mutex::new(vec![]));
    let c_log = log.clone();
    let subscription = source.subscribe_event(move |e| c_log.lock().unwrap().push(e));
    (log, subscription)
  }

  #[test]
  fn empty_only_completes() {
    let (log, subscription) = record(&Observable::<i32, ()>::empty());
    assert_eq!(*log.lock().unwrap(), vec![Event::Completed]);
    assert!(subscription.is_disposed());
  }

  #[test]
  fn never_stays_silent() {
    let (log, subscription) = record(&Observable::<i32, ()>::never());
    assert!(log.lock().unwrap().is_empty());
    assert!(!subscription.is_disposed());
    subscription.dispose();
    assert!(log.lock().unwrap().is_empty());
  }

  #[test]
  fn throw_errors() {
    let (log, _) = record(&Observable::throw("anError"));
    assert_eq!(*log.lock().unwrap(), vec![Event::Error("anError")]);
  }
}
