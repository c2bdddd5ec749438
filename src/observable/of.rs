use super::Observable;
use crate::disposable::BoxedDisposable;

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Emits `value` then completes.
  pub fn just(value: Item) -> Self
  where
    Item: Clone + Send + Sync + 'static,
  {
    Self::from_producer(move |subscriber| {
      subscriber.next(value.clone());
      subscriber.complete();
      BoxedDisposable::empty()
    })
  }

  /// Emits each of `items` in order then completes.
  ///
  /// ```rust
  /// use rxlite::prelude::*;
  ///
  /// Observable::<_, ()>::of(["A", "B", "C"]).subscribe(|v| println!("{v}"));
  /// ```
  pub fn of<I>(items: I) -> Self
  where
    I: IntoIterator<Item = Item>,
    I::IntoIter: Clone + Send + Sync + 'static,
  {
    Self::from_iter(items)
  }

  /// Emits the items produced by a fresh clone of `iter` on every
  /// subscription, then completes. Emission stops early once the
  /// subscription is disposed.
  pub fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Item>,
    I::IntoIter: Clone + Send + Sync + 'static,
  {
    let iter = iter.into_iter();
    Self::from_producer(move |subscriber| {
      for v in iter.clone() {
        if subscriber.is_closed() {
          break;
        }
        subscriber.next(v);
      }
      subscriber.complete();
      BoxedDisposable::empty()
    })
  }
}

impl<Err: 'static> Observable<i64, Err> {
  /// Emits `count` consecutive integers starting at `start`, then completes.
  ///
  /// The sequence is cut short rather than overflowing `i64::MAX`.
  pub fn range(start: i64, count: usize) -> Self {
    Self::from_iter((0..count).map_while(move |offset| {
      i64::try_from(offset)
        .ok()
        .and_then(|offset| start.checked_add(offset))
    }))
  }
}
