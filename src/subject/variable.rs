use std::convert::Infallible;

use super::BehaviorSubject;
use crate::observable::Observable;

/// A mutable cell whose changes can be observed.
///
/// Every [`set`](Self::set) is pushed to subscribers of
/// [`as_observable`](Self::as_observable), which also receive the current
/// value on subscription. A variable never errors; dropping it completes its
/// subscribers.
///
/// ```rust
/// use std::sync::{Arc, Mutex};
///
/// use rxlite::prelude::*;
///
/// let mut user = Variable::new("guest".to_owned());
/// let seen = Arc::new(Mutex::new(vec![]));
/// let c_seen = seen.clone();
/// user.as_observable().subscribe(move |v| c_seen.lock().unwrap().push(v));
/// user.set("alice".to_owned());
///
/// assert_eq!(user.get(), "alice");
/// assert_eq!(*seen.lock().unwrap(), vec!["guest", "alice"]);
/// ```
pub struct Variable<T: Clone + Send + 'static> {
  subject: BehaviorSubject<T, Infallible>,
}

impl<T: Clone + Send + 'static> Variable<T> {
  pub fn new(value: T) -> Self { Self { subject: BehaviorSubject::new(value) } }

  #[inline]
  pub fn get(&self) -> T { self.subject.value() }

  pub fn set(&mut self, value: T) { self.subject.on_next(value) }

  /// Modify the value in place, then notify subscribers.
  pub fn update(&mut self, f: impl FnOnce(&mut T)) {
    let mut value = self.get();
    f(&mut value);
    self.set(value);
  }

  /// The stream of values: the current one first, then every change.
  pub fn as_observable(&self) -> Observable<T, Infallible> { self.subject.to_observable() }
}

impl<T: Clone + Send + 'static> Drop for Variable<T> {
  fn drop(&mut self) { self.subject.on_completed() }
}

impl<T: Clone + Send + std::fmt::Debug + 'static> std::fmt::Debug for Variable<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("Variable").field(&self.get()).finish()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  #[test]
  fn set_and_update_notify_subscribers() {
    let mut counter = Variable::new(0);
    let log = Arc::new(Mutex::new(vec![]));
    let c_log = log.clone();
    counter
      .as_observable()
      .subscribe_event(move |e| c_log.lock().unwrap().push(e));

    counter.set(5);
    counter.update(|v| *v += 1);
    assert_eq!(counter.get(), 6);

    drop(counter);
    assert_eq!(
      *log.lock().unwrap(),
      vec![Event::Next(0), Event::Next(5), Event::Next(6), Event::Completed]
    );
  }

  #[test]
  fn subscription_ends_when_variable_is_dropped() {
    let variable = Variable::new("a");
    let completed = Arc::new(Mutex::new(false));
    let c_completed = completed.clone();
    let subscription = variable
      .as_observable()
      .subscribe_with(Callbacks::new().on_completed(move || *c_completed.lock().unwrap() = true));

    assert!(!subscription.is_disposed());
    drop(variable);
    assert!(*completed.lock().unwrap());
    assert!(subscription.is_disposed());
  }
}
