//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

#[cfg(feature = "into-future")]
pub use crate::single::SingleFuture;
pub use crate::{
  disposable::{
    BoxedDisposable, ClosureDisposable, Disposable, DisposableExt, DisposableGuard,
  },
  dispose_bag::DisposeBag,
  event::Event,
  observable::{Observable, Subscribable},
  observer::{BoxedObserver, Callbacks, EventObserver, FnObserver, Observer},
  single::{Single, SingleEmitter},
  subject::{
    BehaviorSubject, Latest, NoRetention, PublishSubject, ReplayBuffer, ReplaySubject, Retention,
    Subject, Variable,
  },
  subscriber::{Subscriber, Subscription},
  text_source::{load_text, DirTextSource, FileReadError, TextSource},
};
