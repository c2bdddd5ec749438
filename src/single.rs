//! Single: a source that resolves exactly once, with a value or an error.

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use tracing::trace;

use crate::{
  disposable::Disposable,
  observable::{Observable, Subscribable},
  observer::Observer,
  subscriber::{Subscriber, Subscription},
};

/// A cold source that emits exactly one of a success value or an error.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// Single::<_, String>::just(42).subscribe(|result| match result {
///   Ok(v) => println!("got {v}"),
///   Err(e) => println!("failed: {e}"),
/// });
/// ```
pub struct Single<T, E> {
  observable: Observable<T, E>,
}

impl<T, E> Clone for Single<T, E> {
  #[inline]
  fn clone(&self) -> Self { Self { observable: self.observable.clone() } }
}

/// Handed to the producer of [`Single::create`]. The first call to
/// [`on`](Self::on) (or its shorthands) resolves the single; later calls do
/// nothing.
pub struct SingleEmitter<T, E> {
  subscriber: Subscriber<T, E>,
  fired: Arc<AtomicBool>,
}

impl<T, E> Clone for SingleEmitter<T, E> {
  fn clone(&self) -> Self { Self { subscriber: self.subscriber.clone(), fired: self.fired.clone() } }
}

impl<T, E> SingleEmitter<T, E> {
  #[inline]
  pub fn success(&self, value: T) { self.on(Ok(value)) }

  #[inline]
  pub fn error(&self, err: E) { self.on(Err(err)) }

  pub fn on(&self, result: Result<T, E>) {
    if self.fired.swap(true, Ordering::AcqRel) {
      trace!(ok = result.is_ok(), "single already resolved");
      return;
    }
    match result {
      Ok(value) => {
        self.subscriber.next(value);
        self.subscriber.complete();
      }
      Err(err) => self.subscriber.error(err),
    }
  }

  /// `true` once resolved or once the subscriber went away.
  #[inline]
  pub fn is_closed(&self) -> bool { self.subscriber.is_closed() }
}

impl<T: 'static, E: 'static> Single<T, E> {
  /// Single driven by a producer closure, run once per subscription.
  ///
  /// The producer returns what must be released on disposal, `()` when
  /// there is nothing.
  pub fn create<F, D>(producer: F) -> Self
  where
    F: Fn(SingleEmitter<T, E>) -> D + Send + Sync + 'static,
    D: Disposable + Send + 'static,
  {
    let observable = Observable::create(move |subscriber| {
      producer(SingleEmitter { subscriber, fired: Arc::new(AtomicBool::new(false)) })
    });
    Self { observable }
  }

  pub fn just(value: T) -> Self
  where
    T: Clone + Send + Sync,
  {
    Self::create(move |emitter| emitter.success(value.clone()))
  }

  pub fn error(err: E) -> Self
  where
    E: Clone + Send + Sync,
  {
    Self::create(move |emitter| emitter.error(err.clone()))
  }

  /// Deliver the result to `on_result`.
  ///
  /// When the producer resolves synchronously, `on_result` has run by the
  /// time this returns.
  pub fn subscribe<F>(&self, on_result: F) -> Subscription
  where
    F: FnOnce(Result<T, E>) + Send + 'static,
    T: Send,
    E: Send,
  {
    self.observable.subscribe_observer(ResultObserver(Some(on_result)))
  }

  /// The single as an observable: `Next(v)` then `Completed`, or `Error(e)`.
  #[inline]
  pub fn into_observable(self) -> Observable<T, E> { self.observable }

  #[inline]
  pub fn as_observable(&self) -> Observable<T, E> { self.observable.clone() }
}

struct ResultObserver<F>(Option<F>);

impl<T, E, F> Observer<T, E> for ResultObserver<F>
where
  F: FnOnce(Result<T, E>),
{
  fn next(&mut self, value: T) {
    if let Some(f) = self.0.take() {
      f(Ok(value));
    }
  }

  fn error(self, err: E) {
    if let Some(f) = self.0 {
      f(Err(err));
    }
  }

  fn complete(self) {}

  fn is_closed(&self) -> bool { self.0.is_none() }
}

#[cfg(feature = "into-future")]
pub use future::SingleFuture;

#[cfg(feature = "into-future")]
mod future {
  use std::{
    future::{Future, IntoFuture},
    pin::Pin,
    task::{Context, Poll, Waker},
  };

  use super::Single;
  use crate::{disposable::Disposable, rc::MutArc, subscriber::Subscription};

  struct Slot<T, E> {
    result: Option<Result<T, E>>,
    waker: Option<Waker>,
  }

  /// Future returned by awaiting a [`Single`].
  ///
  /// Dropping it before it resolves disposes the underlying subscription.
  pub struct SingleFuture<T, E> {
    slot: MutArc<Slot<T, E>>,
    subscription: Subscription,
  }

  impl<T, E> Future for SingleFuture<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
      let mut slot = self.slot.rc_deref_mut();
      match slot.result.take() {
        Some(result) => Poll::Ready(result),
        None => {
          slot.waker = Some(cx.waker().clone());
          Poll::Pending
        }
      }
    }
  }

  impl<T, E> Drop for SingleFuture<T, E> {
    fn drop(&mut self) { self.subscription.clone().dispose() }
  }

  impl<T, E> IntoFuture for Single<T, E>
  where
    T: Send + 'static,
    E: Send + 'static,
  {
    type Output = Result<T, E>;
    type IntoFuture = SingleFuture<T, E>;

    fn into_future(self) -> Self::IntoFuture {
      let slot = MutArc::own(Slot { result: None, waker: None });
      let c_slot = slot.clone();
      let subscription = self.subscribe(move |result| {
        let waker = {
          let mut slot = c_slot.rc_deref_mut();
          slot.result = Some(result);
          slot.waker.take()
        };
        if let Some(waker) = waker {
          waker.wake();
        }
      });
      SingleFuture { slot, subscription }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  fn collect<T: Send + 'static, E: Send + 'static>(
    single: &Single<T, E>,
  ) -> Arc<Mutex<Vec<Result<T, E>>>> {
    let results = Arc::new(Mutex::new(vec![]));
    let c_results = results.clone();
    single.subscribe(move |r| c_results.lock().unwrap().push(r));
    results
  }

  #[test]
  fn resolves_once_even_when_emitted_twice() {
    let single = Single::<i32, &str>::create(|emitter| {
      emitter.success(1);
      emitter.success(2);
      emitter.error("late");
    });

    assert_eq!(*collect(&single).lock().unwrap(), vec![Ok(1)]);
  }

  #[test]
  fn error_is_delivered() {
    let single = Single::<i32, &str>::error("nope");
    assert_eq!(*collect(&single).lock().unwrap(), vec![Err("nope")]);
  }

  #[test]
  fn each_subscription_resolves_independently() {
    let single = Single::<_, ()>::just("hi");
    let a = collect(&single);
    let b = collect(&single);
    assert_eq!(*a.lock().unwrap(), vec![Ok("hi")]);
    assert_eq!(*b.lock().unwrap(), vec![Ok("hi")]);
  }

  #[test]
  fn as_observable_emits_value_then_completes() {
    let log = Arc::new(Mutex::new(vec![]));
    let c_log = log.clone();
    Single::<_, ()>::just(7)
      .into_observable()
      .subscribe_event(move |e| c_log.lock().unwrap().push(e));
    assert_eq!(*log.lock().unwrap(), vec![Event::Next(7), Event::Completed]);
  }

  #[test]
  fn disposal_releases_producer_resources() {
    let released = Arc::new(Mutex::new(false));
    let c_released = released.clone();
    let single = Single::<i32, ()>::create(move |_| {
      let c_released = c_released.clone();
      ClosureDisposable(move || *c_released.lock().unwrap() = true)
    });

    let subscription = single.subscribe(|_| {});
    assert!(!*released.lock().unwrap());
    subscription.dispose();
    assert!(*released.lock().unwrap());
  }

  #[cfg(feature = "into-future")]
  #[test]
  fn awaiting_a_synchronous_single() {
    let value = futures::executor::block_on(async { Single::<_, ()>::just(5).await });
    assert_eq!(value, Ok(5));
  }

  #[cfg(feature = "into-future")]
  #[tokio::test]
  async fn awaiting_a_single_resolved_on_another_thread() {
    let single = Single::<String, ()>::create(|emitter| {
      std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(10));
        emitter.success("done".to_owned());
      });
    });

    assert_eq!(single.await, Ok("done".to_owned()));
  }

  #[cfg(feature = "into-future")]
  #[test]
  fn dropping_the_future_disposes() {
    use std::future::IntoFuture;

    let released = Arc::new(Mutex::new(false));
    let c_released = released.clone();
    let single = Single::<i32, ()>::create(move |_| {
      let c_released = c_released.clone();
      ClosureDisposable(move || *c_released.lock().unwrap() = true)
    });

    let future = single.into_future();
    assert!(!*released.lock().unwrap());
    drop(future);
    assert!(*released.lock().unwrap());
  }
}
