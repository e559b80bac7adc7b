/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::compare::Natural;
use crate::tree::{Dir, NodeId, RedBlackTree, MAX_HEIGHT};
use crate::utils;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalState {
    /// Neither [`Traversal::first()`] nor [`Traversal::last()`] has been called yet.
    Uninitialized,
    Positioned,
    /// The traversal walked past one end of the tree (or the tree was empty).
    Exhausted,
}

/// A cursor over the payloads of a [`RedBlackTree`] in order, in either direction.
///
/// The traversal keeps the ancestors of the current node in its own stack, so the nodes carry no
/// parent links.  It borrows the tree it walks, which therefore cannot be mutated while the
/// traversal is alive.
///
/// ```
/// # use topdown_rbtree::*;
/// #
/// let tree = rbtree![20, 10, 30];
/// let mut traversal = Traversal::new();
///
/// assert_eq!(traversal.first(&tree), Some(&10));
/// assert_eq!(traversal.next(), Some(&20));
/// assert_eq!(traversal.next(), Some(&30));
/// assert_eq!(traversal.next(), None);
///
/// assert_eq!(traversal.last(&tree), Some(&30));
/// assert_eq!(traversal.prev(), Some(&20));
/// ```
pub struct Traversal<'t, T, C = Natural> {
    tree: Option<&'t RedBlackTree<T, C>>,
    current: Option<NodeId>,
    // Ancestors of `current` that are still to be revisited, the nearest on top.
    path: Vec<NodeId>,
}

impl<'t, T, C> Traversal<'t, T, C> {
    #[must_use]
    pub fn new() -> Traversal<'t, T, C> {
        Traversal { tree: None, current: None, path: Vec::new() }
    }

    #[must_use]
    pub fn state(&self) -> TraversalState {
        match (self.tree, self.current) {
            (None, _) => TraversalState::Uninitialized,
            (Some(_), Some(_)) => TraversalState::Positioned,
            (Some(_), None) => TraversalState::Exhausted,
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&'t T> {
        let tree = self.tree?;

        self.current.map(|id| tree.value(id))
    }

    #[must_use]
    pub fn current_id(&self) -> Option<NodeId> {
        self.current
    }

    /// Binds the traversal to `tree` and moves to its smallest payload.
    pub fn first(&mut self, tree: &'t RedBlackTree<T, C>) -> Option<&'t T> {
        self.start(tree, Dir::Left)
    }

    /// Binds the traversal to `tree` and moves to its largest payload.
    pub fn last(&mut self, tree: &'t RedBlackTree<T, C>) -> Option<&'t T> {
        self.start(tree, Dir::Right)
    }

    /// Moves to the next larger payload.  Returns `None` once past the end, or if the traversal
    /// is not positioned.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'t T> {
        self.step(Dir::Right)
    }

    /// Moves to the next smaller payload.
    pub fn prev(&mut self) -> Option<&'t T> {
        self.step(Dir::Left)
    }

    fn start(&mut self, tree: &'t RedBlackTree<T, C>, dir: Dir) -> Option<&'t T> {
        self.tree = Some(tree);
        self.current = tree.root();
        self.path.clear();
        self.path.reserve(utils::conservative_height(tree.len()));

        if let Some(root) = self.current {
            self.current = Some(self.descend(tree, root, dir));
        }

        self.current()
    }

    fn step(&mut self, dir: Dir) -> Option<&'t T> {
        let (Some(tree), Some(it)) = (self.tree, self.current) else {
            return None;
        };

        match tree.link(it, dir) {
            Some(child) => {
                self.path.push(it);
                self.current = Some(self.descend(tree, child, !dir));
            }
            None => {
                // Climb until we leave a subtree that hangs off the opposite side: that ancestor
                // comes next.
                let mut from = it;

                self.current = loop {
                    let Some(ancestor) = self.path.pop() else {
                        break None;
                    };

                    if tree.link(ancestor, dir) != Some(from) {
                        break Some(ancestor);
                    }

                    from = ancestor;
                };
            }
        }

        self.current()
    }

    /// Walks from `from` as far as possible toward `dir`, stacking every node passed.
    fn descend(&mut self, tree: &'t RedBlackTree<T, C>, from: NodeId, dir: Dir) -> NodeId {
        let mut it = from;

        while let Some(child) = tree.link(it, dir) {
            self.path.push(it);
            it = child;
        }

        debug_assert!(self.path.len() < MAX_HEIGHT, "tree is taller than MAX_HEIGHT");

        it
    }
}

impl<T, C> Default for Traversal<'_, T, C> {
    fn default() -> Self {
        Traversal::new()
    }
}

impl<T, C> Clone for Traversal<'_, T, C> {
    fn clone(&self) -> Self {
        Traversal { tree: self.tree, current: self.current, path: self.path.clone() }
    }
}

impl<T, C> fmt::Debug for Traversal<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("state", &self.state())
            .field("current", &self.current)
            .field("path", &self.path)
            .finish()
    }
}

/// Iterator over the payloads of a [`RedBlackTree`] in ascending order.  It can also be consumed
/// from the back; the two ends never cross.
#[derive(Debug)]
pub struct Iter<'t, T, C = Natural> {
    tree: &'t RedBlackTree<T, C>,

    forward: Option<Traversal<'t, T, C>>,
    backward: Option<Traversal<'t, T, C>>,

    remaining: usize,
}

impl<'t, T, C> Iter<'t, T, C> {
    pub(crate) fn new(tree: &'t RedBlackTree<T, C>) -> Iter<'t, T, C> {
        Iter { tree, forward: None, backward: None, remaining: tree.len() }
    }

    #[inline]
    fn non_empty(&self) -> bool {
        self.remaining > 0
    }
}

impl<'t, T, C> Iterator for Iter<'t, T, C> {
    type Item = &'t T;

    fn next(&mut self) -> Option<&'t T> {
        if !self.non_empty() {
            return None;
        }

        let current = match self.forward {
            Some(ref mut traversal) => traversal.next(),
            None => {
                let mut traversal = Traversal::new();
                let current = traversal.first(self.tree);

                self.forward = Some(traversal);

                current
            }
        };

        if current.is_some() {
            self.remaining -= 1;
        }

        current
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'t, T, C> DoubleEndedIterator for Iter<'t, T, C> {
    fn next_back(&mut self) -> Option<&'t T> {
        if !self.non_empty() {
            return None;
        }

        let current = match self.backward {
            Some(ref mut traversal) => traversal.prev(),
            None => {
                let mut traversal = Traversal::new();
                let current = traversal.last(self.tree);

                self.backward = Some(traversal);

                current
            }
        };

        if current.is_some() {
            self.remaining -= 1;
        }

        current
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {}

impl<T, C> FusedIterator for Iter<'_, T, C> {}
