/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

/// A key-bearing payload.  Equality, ordering and hashing only look at `key`, so a
/// [`RedBlackTree`](crate::RedBlackTree) of entries behaves like a map with unique keys.
///
/// ```
/// # use topdown_rbtree::*;
/// #
/// let mut tree = RedBlackTree::new();
///
/// tree.insert(Entry::new(2, "two")).unwrap();
/// tree.insert(Entry::new(1, "one")).unwrap();
///
/// assert_eq!(tree.find_by(|e| 2.cmp(&e.key)).map(|e| e.value), Some("two"));
/// ```
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    #[must_use]
    pub fn new(key: K, value: V) -> Entry<K, V> {
        Entry { key, value }
    }
}

impl<K: PartialEq, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Entry<K, V>) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for Entry<K, V> {}

impl<K: PartialOrd, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Entry<K, V>) -> Option<Ordering> {
        self.key.partial_cmp(&other.key)
    }
}

impl<K: Ord, V> Ord for Entry<K, V> {
    fn cmp(&self, other: &Entry<K, V>) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K: Hash, V> Hash for Entry<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ordering_ignores_value() {
        let a = Entry::new(1, "a");
        let b = Entry::new(1, "b");
        let c = Entry::new(2, "a");

        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.cmp(&c), Ordering::Less);
        assert_eq!(c.partial_cmp(&b), Some(Ordering::Greater));
    }
}
