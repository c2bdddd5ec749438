use std::sync::Mutex;

use super::{Observable, Subscribable};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Creates an observable that, on every subscription, asks `factory` for a
  /// fresh observable and subscribes to that one.
  ///
  /// `factory` may keep state between calls:
  ///
  /// ```rust
  /// use rxlite::prelude::*;
  ///
  /// let mut flip = false;
  /// let factory = Observable::<i32, ()>::defer(move || {
  ///   flip = !flip;
  ///   if flip { Observable::of([1, 2, 3]) } else { Observable::of([4, 5, 6]) }
  /// });
  /// factory.subscribe(|v| print!("{v}")); // 123
  /// factory.subscribe(|v| print!("{v}")); // 456
  /// ```
  pub fn defer<F>(factory: F) -> Self
  where
    F: FnMut() -> Observable<Item, Err> + Send + 'static,
  {
    let factory = Mutex::new(factory);
    Self::from_producer(move |subscriber| {
      // the factory lock is released before subscribing, so a deferred
      // source may itself subscribe to this observable
      let source = {
        let mut factory = factory.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        factory()
      };
      source.actual_subscribe(subscriber)
    })
  }
}
