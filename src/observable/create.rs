use super::Observable;
use crate::{
  disposable::{BoxedDisposable, Disposable},
  subscriber::Subscriber,
};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Observable driven by a producer closure.
  ///
  /// `producer` runs synchronously inside every `subscribe` call. It may emit
  /// right away or keep the [`Subscriber`] and emit later from any thread.
  /// The disposable it returns is released when the subscription is
  /// disposed or terminates.
  ///
  /// ```rust
  /// use rxlite::prelude::*;
  ///
  /// Observable::<&str, String>::create(|subscriber| {
  ///   subscriber.next("1");
  ///   subscriber.next("?");
  ///   BoxedDisposable::empty()
  /// })
  /// .subscribe(|v| println!("{v}"));
  /// ```
  pub fn create<F, D>(producer: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> D + Send + Sync + 'static,
    D: Disposable + Send + 'static,
  {
    Self::from_producer(move |subscriber| BoxedDisposable::new(producer(subscriber)))
  }
}

#[cfg(test)]
mod tests {
  use std::{
    sync::{Arc, Mutex},
    thread,
  };

  use crate::prelude::*;

  #[test]
  fn test_create_next_complete() {
    let log = Arc::new(Mutex::new(vec![]));
    let c_log = log.clone();

    Observable::<_, ()>::create(|s| {
      s.next(1);
      s.next(2);
      s.complete();
      s.next(3);
    })
    .subscribe_event(move |e| c_log.lock().unwrap().push(e));

    assert_eq!(*log.lock().unwrap(), vec![Event::Next(1), Event::Next(2), Event::Completed]);
  }

  #[test]
  fn test_create_error() {
    let error = Arc::new(Mutex::new(None));
    let c_error = error.clone();

    Observable::<(), _>::create(|s| {
      s.error("oops");
      s.complete();
    })
    .subscribe_with(Callbacks::new().on_error(move |e| *c_error.lock().unwrap() = Some(e)));

    assert_eq!(*error.lock().unwrap(), Some("oops"));
  }

  #[test]
  fn test_create_teardown() {
    let disposed = Arc::new(Mutex::new(false));
    let c_disposed = disposed.clone();

    let subscription = Observable::<i32, ()>::create(move |s| {
      s.next(1);
      let c_disposed = c_disposed.clone();
      ClosureDisposable(move || *c_disposed.lock().unwrap() = true)
    })
    .subscribe(|_| {});

    assert!(!*disposed.lock().unwrap());
    subscription.dispose();
    assert!(*disposed.lock().unwrap());
  }

  #[test]
  fn async_producer_stops_after_dispose() {
    let (tx, rx) = std::sync::mpsc::channel::<()>();
    let rx = Arc::new(Mutex::new(rx));
    let log = Arc::new(Mutex::new(vec![]));
    let c_log = log.clone();

    let handle = Arc::new(Mutex::new(None));
    let c_handle = handle.clone();
    let subscription = Observable::<i32, ()>::create(move |s| {
      let rx = rx.clone();
      let worker = thread::spawn(move || {
        s.next(1);
        let _ = rx.lock().unwrap().recv();
        s.next(2);
        s.complete();
      });
      *c_handle.lock().unwrap() = Some(worker);
    })
    .subscribe_event(move |e| c_log.lock().unwrap().push(e));

    // wait until the first value is observed
    while log.lock().unwrap().is_empty() {
      thread::yield_now();
    }
    subscription.dispose();
    tx.send(()).unwrap();
    if let Some(worker) = handle.lock().unwrap().take() {
      worker.join().unwrap();
    }

    assert_eq!(*log.lock().unwrap(), vec![Event::Next(1)]);
  }
}
