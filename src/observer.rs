//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

use crate::event::Event;

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable
  ///
  /// This consumes the observer, as no more values can be emitted after an
  /// error
  fn error(self, err: Err);

  /// Handle completion of the observable
  ///
  /// This consumes the observer, as no more values can be emitted after
  /// completion
  fn complete(self);

  /// Returns `true` if the observer will not accept more values.
  fn is_closed(&self) -> bool;
}

// ============================================================================
// DynObserver Trait - Object-safe Observer
// ============================================================================

/// Helper trait to enable object-safe Observers (Box<dyn Observer>)
///
/// Standard Observer trait is not object-safe because the terminal methods
/// take `self` by value. DynObserver mirrors the interface but adapts it for
/// vtables.
pub trait DynObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err);
  fn box_complete(self: Box<Self>);
  fn box_is_closed(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  fn box_next(&mut self, value: Item) { self.next(value); }
  fn box_error(self: Box<Self>, err: Err) { self.error(err); }
  fn box_complete(self: Box<Self>) { self.complete(); }
  fn box_is_closed(&self) -> bool { self.is_closed() }
}

/// Boxed observer. Observers may be driven from any thread, hence `Send`.
pub type BoxedObserver<Item, Err> = Box<dyn DynObserver<Item, Err> + Send>;

impl<Item, Err> Observer<Item, Err> for BoxedObserver<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }

  #[inline]
  fn error(self, err: Err) { self.box_error(err) }

  #[inline]
  fn complete(self) { self.box_complete() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).box_is_closed() }
}

/// Deliver one event to a consuming observer.
///
/// Returns the observer back when it can still receive events.
pub(crate) fn dispatch<O, Item, Err>(mut observer: O, event: Event<Item, Err>) -> Option<O>
where
  O: Observer<Item, Err>,
{
  match event {
    Event::Next(v) => {
      observer.next(v);
      Some(observer)
    }
    Event::Error(e) => {
      observer.error(e);
      None
    }
    Event::Completed => {
      observer.complete();
      None
    }
  }
}

// ============================================================================
// FnObserver - Closure adapter
// ============================================================================

/// Closure adapter: the closure becomes the `next` handler, while `error`
/// and `complete` are ignored.
#[derive(Clone)]
pub struct FnObserver<F>(pub F);

impl<F, Item, Err> Observer<Item, Err> for FnObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }

  #[inline]
  fn error(self, _err: Err) {}

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Closure adapter that receives every notification as an [`Event`].
#[derive(Clone)]
pub struct EventObserver<F>(pub F);

impl<F, Item, Err> Observer<Item, Err> for EventObserver<F>
where
  F: FnMut(Event<Item, Err>),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(Event::Next(v)); }

  #[inline]
  fn error(mut self, err: Err) { (self.0)(Event::Error(err)); }

  #[inline]
  fn complete(mut self) { (self.0)(Event::Completed); }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// Callbacks - optional handler set
// ============================================================================

type NextFn<Item> = Box<dyn FnMut(Item) + Send>;
type ErrorFn<Err> = Box<dyn FnOnce(Err) + Send>;
type DoneFn = Box<dyn FnOnce() + Send>;

/// A set of optional handlers, one per event kind plus `on_disposed`.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let callbacks = Callbacks::<i32, String>::new()
///   .on_next(|v| println!("{v}"))
///   .on_completed(|| println!("Completed"))
///   .on_disposed(|| println!("Disposed"));
/// Observable::of(vec![1, 2, 3]).subscribe_with(callbacks);
/// ```
pub struct Callbacks<Item, Err> {
  next: Option<NextFn<Item>>,
  error: Option<ErrorFn<Err>>,
  completed: Option<DoneFn>,
  pub(crate) disposed: Option<DoneFn>,
}

impl<Item, Err> Default for Callbacks<Item, Err> {
  fn default() -> Self { Self { next: None, error: None, completed: None, disposed: None } }
}

impl<Item, Err> Callbacks<Item, Err> {
  pub fn new() -> Self { Self::default() }

  pub fn on_next(mut self, f: impl FnMut(Item) + Send + 'static) -> Self {
    self.next = Some(Box::new(f));
    self
  }

  pub fn on_error(mut self, f: impl FnOnce(Err) + Send + 'static) -> Self {
    self.error = Some(Box::new(f));
    self
  }

  pub fn on_completed(mut self, f: impl FnOnce() + Send + 'static) -> Self {
    self.completed = Some(Box::new(f));
    self
  }

  /// Runs once when the subscription is torn down, after a terminal event or
  /// on explicit disposal.
  pub fn on_disposed(mut self, f: impl FnOnce() + Send + 'static) -> Self {
    self.disposed = Some(Box::new(f));
    self
  }
}

impl<Item, Err> Observer<Item, Err> for Callbacks<Item, Err> {
  fn next(&mut self, value: Item) {
    if let Some(next) = self.next.as_mut() {
      next(value);
    }
  }

  fn error(self, err: Err) {
    if let Some(error) = self.error {
      error(err);
    }
  }

  fn complete(self) {
    if let Some(completed) = self.completed {
      completed();
    }
  }

  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use super::*;

  struct TestObserver {
    values: Vec<i32>,
  }

  impl Observer<i32, ()> for TestObserver {
    fn next(&mut self, value: i32) { self.values.push(value); }

    fn error(self, _: ()) {}

    fn complete(self) {}

    fn is_closed(&self) -> bool { false }
  }

  #[test]
  fn test_observer_trait() {
    let mut obs = TestObserver { values: vec![] };
    obs.next(1);
    obs.next(2);
    assert_eq!(obs.values, vec![1, 2]);
    assert!(!obs.is_closed());
  }

  #[test]
  fn test_closure_as_observer() {
    let mut count = 0;
    let mut closure_obs = FnObserver(|v: i32| {
      count += v;
    });

    Observer::<i32, ()>::next(&mut closure_obs, 10);
    Observer::<i32, ()>::next(&mut closure_obs, 20);
    assert_eq!(count, 30);
  }

  #[test]
  fn boxed_observer_forwards_terminal() {
    let log = Arc::new(Mutex::new(vec![]));
    let c_log = log.clone();
    let mut boxed: BoxedObserver<i32, &'static str> =
      Box::new(EventObserver(move |e: Event<i32, &'static str>| c_log.lock().unwrap().push(e)));

    boxed.next(7);
    assert!(!boxed.is_closed());
    boxed.error("bad");

    assert_eq!(*log.lock().unwrap(), vec![Event::Next(7), Event::Error("bad")]);
  }

  #[test]
  fn dispatch_drops_observer_on_terminal() {
    let obs = FnObserver(|_: i32| {});
    let obs = dispatch::<_, i32, ()>(obs, Event::Next(1));
    assert!(obs.is_some());
    assert!(dispatch::<_, i32, ()>(obs.unwrap(), Event::Completed).is_none());
  }

  #[test]
  fn callbacks_route_each_event_kind() {
    let log = Arc::new(Mutex::new(vec![]));
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    let mut callbacks = Callbacks::<i32, String>::new()
      .on_next(move |v| l1.lock().unwrap().push(format!("next {v}")))
      .on_error(move |e| l2.lock().unwrap().push(format!("error {e}")))
      .on_completed(move || l3.lock().unwrap().push("completed".to_owned()));

    callbacks.next(1);
    callbacks.error("x".to_owned());

    assert_eq!(*log.lock().unwrap(), vec!["next 1", "error x"]);
  }
}
