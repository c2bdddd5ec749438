//! Observable: a lazy producer of an event sequence.
//!
//! An [`Observable`] is a cold source: every subscription runs its producer
//! anew. Creation operators live in the submodules and are exposed as
//! associated functions (`Observable::of`, `Observable::defer`, ...).
//!
//! The [`Subscribable`] trait carries every `subscribe` form and is shared by
//! observables and subjects.

use std::sync::Arc;

use crate::{
  disposable::BoxedDisposable,
  event::Event,
  observer::{Callbacks, EventObserver, FnObserver, Observer},
  subscriber::{Subscriber, Subscription},
};

mod create;
mod defer;
mod of;
mod trivial;

type Producer<Item, Err> = dyn Fn(Subscriber<Item, Err>) -> BoxedDisposable + Send + Sync;

/// A cold, repeatable source of `Item`s that may fail with `Err`.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use rxlite::prelude::*;
///
/// let seen = Arc::new(Mutex::new(vec![]));
/// let c_seen = seen.clone();
/// Observable::<_, ()>::of([1, 2, 3]).subscribe(move |v| c_seen.lock().unwrap().push(v));
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
/// ```
pub struct Observable<Item, Err> {
  producer: Arc<Producer<Item, Err>>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  #[inline]
  fn clone(&self) -> Self { Self { producer: self.producer.clone() } }
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  pub(crate) fn from_producer(
    producer: impl Fn(Subscriber<Item, Err>) -> BoxedDisposable + Send + Sync + 'static,
  ) -> Self {
    Self { producer: Arc::new(producer) }
  }
}

// ============================================================================
// Subscribable
// ============================================================================

/// Anything that can be subscribed to.
///
/// Implementors only provide [`actual_subscribe`](Self::actual_subscribe);
/// every user-facing `subscribe` form is built on top of it and returns a
/// [`Subscription`].
pub trait Subscribable<Item, Err> {
  /// Bind `subscriber` to this source and return what must be released
  /// when the subscription is disposed.
  fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) -> BoxedDisposable;

  /// Subscribe with a full [`Observer`].
  fn subscribe_observer<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Item, Err> + Send + 'static,
    Item: Send + 'static,
    Err: Send + 'static,
  {
    subscribe_parts(self, observer, None)
  }

  /// Subscribe to values only; errors and completion are ignored.
  fn subscribe<F>(&self, on_next: F) -> Subscription
  where
    F: FnMut(Item) + Send + 'static,
    Item: Send + 'static,
    Err: Send + 'static,
  {
    self.subscribe_observer(FnObserver(on_next))
  }

  /// Subscribe to every notification as an [`Event`].
  fn subscribe_event<F>(&self, on_event: F) -> Subscription
  where
    F: FnMut(Event<Item, Err>) + Send + 'static,
    Item: Send + 'static,
    Err: Send + 'static,
  {
    self.subscribe_observer(EventObserver(on_event))
  }

  /// Subscribe with a set of optional handlers, including `on_disposed`.
  fn subscribe_with(&self, mut callbacks: Callbacks<Item, Err>) -> Subscription
  where
    Item: Send + 'static,
    Err: Send + 'static,
  {
    let on_disposed = callbacks.disposed.take();
    subscribe_parts(self, callbacks, on_disposed.map(BoxedDisposable::from_fn))
  }
}

fn subscribe_parts<S, O, Item, Err>(
  source: &S,
  observer: O,
  on_disposed: Option<BoxedDisposable>,
) -> Subscription
where
  S: Subscribable<Item, Err> + ?Sized,
  O: Observer<Item, Err> + Send + 'static,
  Item: Send + 'static,
  Err: Send + 'static,
{
  let subscriber = Subscriber::new(observer);
  let teardown = source.actual_subscribe(subscriber.clone());
  subscriber.add_teardown(teardown);
  if let Some(on_disposed) = on_disposed {
    subscriber.add_teardown(on_disposed);
  }
  Subscription::new(subscriber)
}

impl<Item, Err> Subscribable<Item, Err> for Observable<Item, Err> {
  #[inline]
  fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) -> BoxedDisposable {
    (self.producer)(subscriber)
  }
}
