//! Hot, multicasting sources.
//!
//! A [`Subject`] is both a sink (events are pushed into it with
//! [`on_next`](Subject::on_next) and friends) and a source (it implements
//! [`Subscribable`]). Every pushed event fans out to the subscribers attached
//! at that moment.
//!
//! The variants only differ in what they remember for subscribers that
//! arrive later, expressed by the [`Retention`] parameter:
//!
//! | alias              | retention        | a new subscriber first receives |
//! |--------------------|------------------|---------------------------------|
//! | [`PublishSubject`] | [`NoRetention`]  | nothing                         |
//! | [`BehaviorSubject`]| [`Latest`]       | the latest value                |
//! | [`ReplaySubject`]  | [`ReplayBuffer`] | the buffered values, oldest first |
//!
//! Once terminated, a subject ignores further pushes; new subscribers get the
//! retained values followed by the terminal event.
//!
//! Fan-out takes a snapshot of the subscriber set under the subject lock and
//! queues the event on each, then delivers outside the lock. Subscribing,
//! disposing or pushing from inside a callback is therefore allowed.

use std::fmt::{Debug, Formatter};

use smallvec::SmallVec;
use tracing::debug;

use crate::{
  disposable::BoxedDisposable,
  event::Event,
  observable::{Observable, Subscribable},
  observer::Observer,
  rc::MutArc,
  subscriber::Subscriber,
};

mod behavior_subject;
mod publish_subject;
mod replay_subject;
mod subject_subscription;
mod subscribers;
mod variable;

pub use behavior_subject::{BehaviorSubject, Latest};
pub use publish_subject::{NoRetention, PublishSubject};
pub use replay_subject::{ReplayBuffer, ReplaySubject};
pub use variable::Variable;

use subject_subscription::SubjectSubscription;
use subscribers::Subscribers;

/// What a subject remembers for subscribers that arrive later.
pub trait Retention<Item>: Send {
  /// Called with every `Next` value before it is fanned out.
  fn record(&mut self, value: &Item);

  /// Visit the remembered values, oldest first.
  fn for_each_retained(&self, f: &mut dyn FnMut(&Item));
}

pub(crate) struct SubjectState<Item, Err, R> {
  observers: Subscribers<Subscriber<Item, Err>>,
  retention: R,
  stopped: Option<Event<Item, Err>>,
}

/// A hot source that multicasts pushed events. See the [module
/// docs](self).
///
/// Clones share the same subscribers and state.
pub struct Subject<Item, Err, R> {
  state: MutArc<SubjectState<Item, Err, R>>,
}

impl<Item, Err, R> Clone for Subject<Item, Err, R> {
  #[inline]
  fn clone(&self) -> Self { Self { state: self.state.clone() } }
}

impl<Item, Err, R> Subject<Item, Err, R> {
  pub(crate) fn with_retention(retention: R) -> Self {
    Self {
      state: MutArc::own(SubjectState {
        observers: Subscribers::default(),
        retention,
        stopped: None,
      }),
    }
  }

  /// Number of subscribers currently attached.
  pub fn subscriber_count(&self) -> usize { self.state.rc_deref_mut().observers.len() }

  pub fn has_observers(&self) -> bool { !self.state.rc_deref_mut().observers.is_empty() }

  /// `true` once an `Error` or `Completed` was pushed.
  pub fn is_terminated(&self) -> bool { self.state.rc_deref_mut().stopped.is_some() }
}

impl<Item, Err, R> Subject<Item, Err, R>
where
  Item: Clone,
  Err: Clone,
  R: Retention<Item>,
{
  #[inline]
  pub fn on_next(&self, value: Item) { self.on(Event::Next(value)) }

  #[inline]
  pub fn on_error(&self, err: Err) { self.on(Event::Error(err)) }

  #[inline]
  pub fn on_completed(&self) { self.on(Event::Completed) }

  /// Push one event to every current subscriber.
  pub fn on(&self, event: Event<Item, Err>) {
    let targets: SmallVec<[Subscriber<Item, Err>; 2]> = {
      let mut state = self.state.rc_deref_mut();
      if state.stopped.is_some() {
        debug!(terminal = event.is_terminal(), "event pushed to a terminated subject ignored");
        return;
      }
      let targets: SmallVec<[_; 2]> = match &event {
        Event::Next(v) => {
          state.retention.record(v);
          state.observers.iter().cloned().collect()
        }
        _ => {
          state.stopped = Some(event.clone());
          debug!(subscribers = state.observers.len(), "subject terminated");
          state.observers.drain().collect()
        }
      };
      for subscriber in &targets {
        subscriber.enqueue(event.clone());
      }
      targets
    };

    for subscriber in targets {
      subscriber.drain();
    }
  }
}

impl<Item, Err, R> Subject<Item, Err, R>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
  R: Retention<Item> + 'static,
{
  /// Hide the pushing side and expose the subject as a plain
  /// [`Observable`].
  pub fn to_observable(&self) -> Observable<Item, Err> {
    let subject = self.clone();
    Observable::from_producer(move |subscriber| subject.actual_subscribe(subscriber))
  }
}

impl<Item, Err, R> Subscribable<Item, Err> for Subject<Item, Err, R>
where
  Item: Clone + Send + 'static,
  Err: Clone + Send + 'static,
  R: Retention<Item> + 'static,
{
  fn actual_subscribe(&self, subscriber: Subscriber<Item, Err>) -> BoxedDisposable {
    // retained values are queued under the subject lock so no concurrent
    // push can slip in between them and the registration
    let id = {
      let mut state = self.state.rc_deref_mut();
      state.retention.for_each_retained(&mut |v| {
        subscriber.enqueue(Event::Next(v.clone()));
      });
      match state.stopped.clone() {
        Some(stop) => {
          subscriber.enqueue(stop);
          None
        }
        None => Some(state.observers.add(subscriber.clone())),
      }
    };
    subscriber.drain();

    match id {
      Some(id) => BoxedDisposable::new(SubjectSubscription::new(self.state.downgrade(), id)),
      None => BoxedDisposable::empty(),
    }
  }
}

impl<Item, Err, R> Observer<Item, Err> for Subject<Item, Err, R>
where
  Item: Clone,
  Err: Clone,
  R: Retention<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.on_next(value) }

  #[inline]
  fn error(self, err: Err) { self.on_error(err) }

  #[inline]
  fn complete(self) { self.on_completed() }

  #[inline]
  fn is_closed(&self) -> bool { self.is_terminated() }
}

impl<Item, Err, R> Debug for Subject<Item, Err, R> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let state = self.state.rc_deref_mut();
    f.debug_struct("Subject")
      .field("subscribers", &state.observers.len())
      .field("terminated", &state.stopped.is_some())
      .finish()
  }
}
