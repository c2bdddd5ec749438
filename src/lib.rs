//! # rxlite: a small reactive-stream core
//!
//! Observables, subjects, disposables and singles in the style of
//! [Reactive Extensions](http://reactivex.io/), without schedulers or an
//! operator algebra.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let bag = DisposeBag::new();
//! let subject = BehaviorSubject::<i32, ()>::new(0);
//! subject
//!   .subscribe(|v| println!("Value: {}", v))
//!   .disposed_by(&bag);
//! subject.on_next(1);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Cold source, re-runs its producer for every subscription |
//! | [`Subject`] | Hot source that multicasts pushed events |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`DisposeBag`] | Releases every disposable it owns when dropped |
//! | [`Single`] | Resolves exactly once with a value or an error |
//!
//! Delivery is synchronous: no thread hop is ever introduced. Producers may
//! emit from any thread; every subscription still sees its events one at a
//! time and in order.
//!
//! ## Feature Flags
//!
//! - **`into-future`** (default): `Single` implements `IntoFuture`
//!
//! [`Observable`]: observable::Observable
//! [`Subject`]: subject::Subject
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscriber::Subscription
//! [`DisposeBag`]: dispose_bag::DisposeBag
//! [`Single`]: single::Single

pub mod disposable;
pub mod dispose_bag;
pub mod event;
pub mod observable;
pub mod observer;
pub mod prelude;
pub mod rc;
pub mod single;
pub mod subject;
pub mod subscriber;
pub mod text_source;

// Re-export the prelude module
pub use prelude::*;

#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
