use smallvec::SmallVec;

/// Subscribers container with ID-based management.
///
/// Holds the subscribers currently attached to a Subject. Each entry gets a
/// unique ID on insertion so a subscription can later remove exactly its own
/// entry, regardless of what was added or removed in between.
///
/// Uses `SmallVec<[_; 2]>` to avoid heap allocation for the common case of
/// one or two subscribers.
pub(crate) struct Subscribers<Ob> {
  next_id: usize,
  items: SmallVec<[(usize, Ob); 2]>,
}

impl<Ob> Default for Subscribers<Ob> {
  fn default() -> Self { Self { next_id: 0, items: SmallVec::new() } }
}

impl<Ob> Subscribers<Ob> {
  /// Add an observer and return its unique ID.
  #[inline]
  pub fn add(&mut self, observer: Ob) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.items.push((id, observer));
    id
  }

  /// Remove an observer by ID.
  pub fn remove(&mut self, id: usize) -> Option<Ob> {
    self
      .items
      .iter()
      .position(|(i, _)| *i == id)
      .map(|pos| self.items.remove(pos).1)
  }

  /// Check if an ID exists.
  #[inline]
  pub fn contains(&self, id: usize) -> bool { self.items.iter().any(|(i, _)| *i == id) }

  #[inline]
  pub fn len(&self) -> usize { self.items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &Ob> { self.items.iter().map(|(_, ob)| ob) }

  /// Remove and return every observer.
  #[inline]
  pub fn drain(&mut self) -> impl Iterator<Item = Ob> + '_ {
    self.items.drain(..).map(|(_, ob)| ob)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ids_stay_unique_after_removal() {
    let mut subs = Subscribers::default();
    let a = subs.add("a");
    let b = subs.add("b");
    assert_eq!(subs.remove(a), Some("a"));
    let c = subs.add("c");
    assert_ne!(b, c);
    assert_eq!(subs.remove(a), None);
    assert!(!subs.contains(a));
    assert!(subs.contains(c));
    assert_eq!(subs.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);
  }

  #[test]
  fn drain_empties() {
    let mut subs = Subscribers::default();
    subs.add(1);
    subs.add(2);
    assert_eq!(subs.drain().collect::<Vec<_>>(), vec![1, 2]);
    assert!(subs.is_empty());
    assert_eq!(subs.len(), 0);
  }
}
