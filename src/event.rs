//! The three-event algebra delivered to observers.

use std::fmt::{Display, Formatter};

/// A single notification of a stream.
///
/// A well-formed sequence is `Next*` optionally followed by exactly one of
/// `Error` or `Completed`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event<Item, Err> {
  Next(Item),
  Error(Err),
  Completed,
}

impl<Item, Err> Event<Item, Err> {
  /// The carried value, if this is a `Next` event.
  pub fn element(&self) -> Option<&Item> {
    match self {
      Event::Next(v) => Some(v),
      _ => None,
    }
  }

  pub fn into_element(self) -> Option<Item> {
    match self {
      Event::Next(v) => Some(v),
      _ => None,
    }
  }

  /// The carried error, if this is an `Error` event.
  pub fn error(&self) -> Option<&Err> {
    match self {
      Event::Error(e) => Some(e),
      _ => None,
    }
  }

  /// `true` for `Error` and `Completed`.
  #[inline]
  pub fn is_terminal(&self) -> bool { !matches!(self, Event::Next(_)) }

  #[inline]
  pub fn is_completed(&self) -> bool { matches!(self, Event::Completed) }
}

impl<Item: Display, Err: Display> Display for Event<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Event::Next(v) => write!(f, "next({v})"),
      Event::Error(e) => write!(f, "error({e})"),
      Event::Completed => f.write_str("completed"),
    }
  }
}
