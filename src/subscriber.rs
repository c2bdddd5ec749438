//! Subscriber: the sink a producer emits into, and the `Subscription` handle
//! returned to the caller.
//!
//! A `Subscriber` wraps one observer and enforces the event grammar for it:
//!
//! - events are queued and delivered one at a time, in push order, even when
//!   they are pushed from several threads or re-entrantly from inside the
//!   observer's own callback;
//! - nothing is accepted after the first `Error`/`Completed`;
//! - once disposed, no further event is handed to the observer and every
//!   registered teardown runs exactly once;
//! - an observer that reports [`Observer::is_closed`] or panics ends the
//!   subscription, as if it had been disposed.
//!
//! No lock is held while the observer runs.

use std::{
  collections::VecDeque,
  fmt::{Debug, Formatter},
  sync::Arc,
};

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
  disposable::{BoxedDisposable, Disposable},
  event::Event,
  observer::{dispatch, BoxedObserver, Observer},
  rc::MutArc,
};

struct State<Item, Err> {
  observer: Option<BoxedObserver<Item, Err>>,
  queue: VecDeque<Event<Item, Err>>,
  draining: bool,
  stopped: bool,
  disposed: bool,
  teardown: SmallVec<[BoxedDisposable; 1]>,
}

/// Producer-side handle of one subscription.
///
/// Cloning is cheap and every clone feeds the same observer, so a producer
/// may keep a clone and emit later from another thread.
pub struct Subscriber<Item, Err>(MutArc<State<Item, Err>>);

impl<Item, Err> Clone for Subscriber<Item, Err> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<Item, Err> Subscriber<Item, Err> {
  pub fn new(observer: impl Observer<Item, Err> + Send + 'static) -> Self {
    Self(MutArc::own(State {
      observer: Some(Box::new(observer)),
      queue: VecDeque::new(),
      draining: false,
      stopped: false,
      disposed: false,
      teardown: SmallVec::new(),
    }))
  }

  #[inline]
  pub fn next(&self, value: Item) { self.on(Event::Next(value)) }

  #[inline]
  pub fn error(&self, err: Err) { self.on(Event::Error(err)) }

  #[inline]
  pub fn complete(&self) { self.on(Event::Completed) }

  /// Push one event. Ignored once the subscriber is stopped or disposed.
  pub fn on(&self, event: Event<Item, Err>) {
    if self.enqueue(event) {
      self.drain();
    }
  }

  /// `true` after a terminal event was accepted or after disposal. An
  /// observer that reports itself closed disposes its subscriber.
  ///
  /// Long-running producers poll this to stop early.
  pub fn is_closed(&self) -> bool {
    let state = self.0.rc_deref_mut();
    state.stopped || state.disposed
  }

  /// Queue an event without delivering it. Returns `false` when the event
  /// was rejected because the subscriber is already closed.
  pub(crate) fn enqueue(&self, event: Event<Item, Err>) -> bool {
    let mut state = self.0.rc_deref_mut();
    if state.stopped || state.disposed {
      trace!(terminal = event.is_terminal(), "event after termination ignored");
      return false;
    }
    if event.is_terminal() {
      state.stopped = true;
    }
    state.queue.push_back(event);
    true
  }

  /// Deliver queued events until the queue is empty. Returns at once if
  /// another call is already draining; that call picks up the new events.
  ///
  /// The subscription is disposed once the observer has taken a terminal
  /// event. An observer that closes itself or panics ends it too.
  pub(crate) fn drain(&self) {
    let mut state = self.0.rc_deref_mut();
    if state.draining {
      return;
    }
    state.draining = true;
    let mut unwind = DrainGuard(Some(self));
    let mut finished = false;
    while !state.disposed {
      let Some(event) = state.queue.pop_front() else { break };
      let Some(observer) = state.observer.take() else { break };
      drop(state);
      let rest = if observer.is_closed() {
        trace!(terminal = event.is_terminal(), "observer closed, event dropped");
        None
      } else {
        dispatch(observer, event).filter(|observer| !observer.is_closed())
      };
      state = self.0.rc_deref_mut();
      match rest {
        Some(observer) => state.observer = Some(observer),
        None => {
          finished = true;
          break;
        }
      }
    }
    unwind.0 = None;
    state.draining = false;
    let leftover = if state.disposed { state.observer.take() } else { None };
    drop(state);
    drop(leftover);

    if finished {
      self.dispose();
    }
  }

  /// Register work to run when the subscription is torn down. Runs at once
  /// if that already happened.
  pub(crate) fn add_teardown(&self, teardown: BoxedDisposable) {
    let mut state = self.0.rc_deref_mut();
    if state.disposed {
      drop(state);
      teardown.dispose();
    } else {
      state.teardown.push(teardown);
    }
  }

  /// Tear the subscription down. Idempotent.
  pub(crate) fn dispose(&self) {
    let (observer, queue, teardown) = {
      let mut state = self.0.rc_deref_mut();
      if state.disposed {
        return;
      }
      state.disposed = true;
      (
        state.observer.take(),
        std::mem::take(&mut state.queue),
        std::mem::take(&mut state.teardown),
      )
    };
    trace!(pending = queue.len(), "subscription disposed");
    drop(observer);
    drop(queue);
    for d in teardown {
      d.dispose();
    }
  }

  pub(crate) fn is_disposed(&self) -> bool { self.0.rc_deref_mut().disposed }
}

/// Armed while an observer callback runs. If the callback unwinds, the
/// subscriber stops draining and is disposed, which also detaches it from
/// its source.
struct DrainGuard<'a, Item, Err>(Option<&'a Subscriber<Item, Err>>);

impl<Item, Err> Drop for DrainGuard<'_, Item, Err> {
  fn drop(&mut self) {
    if let Some(subscriber) = self.0.take() {
      debug!("observer panicked, disposing its subscription");
      subscriber.0.rc_deref_mut().draining = false;
      subscriber.dispose();
    }
  }
}

// ============================================================================
// Subscription
// ============================================================================

trait SubscriptionLike {
  fn dispose(&self);
  fn is_disposed(&self) -> bool;
}

impl<Item, Err> SubscriptionLike for Subscriber<Item, Err> {
  fn dispose(&self) { Subscriber::dispose(self) }

  fn is_disposed(&self) -> bool { Subscriber::is_disposed(self) }
}

/// Caller-side handle of one subscription, returned by every `subscribe`.
///
/// Disposing it (through any clone) stops delivery and releases the
/// producer's resources. A subscription also disposes itself after
/// delivering its terminal event.
#[derive(Clone)]
pub struct Subscription(Arc<dyn SubscriptionLike + Send + Sync>);

impl Subscription {
  pub(crate) fn new<Item, Err>(subscriber: Subscriber<Item, Err>) -> Self
  where
    Item: Send + 'static,
    Err: Send + 'static,
  {
    Self(Arc::new(subscriber))
  }
}

impl Disposable for Subscription {
  #[inline]
  fn dispose(self) { self.0.dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_disposed() }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("is_disposed", &self.is_disposed())
      .finish()
  }
}
