/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

use crate::compare::{Comparator, Natural};
use crate::error::InsertError;
use crate::traversal::Iter;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::{self, Display};
use core::hash::{Hash, Hasher};
use core::iter::FromIterator;
use core::mem;
use core::ops::Not;

/// Tallest tree a [`Traversal`](crate::Traversal) is expected to walk.  A red-black tree of
/// height 64 holds at least 2³² - 1 elements.
pub const MAX_HEIGHT: usize = 64;

/// Creates a [`RedBlackTree`](crate::RedBlackTree) containing the given arguments:
///
/// ```
/// # use topdown_rbtree::*;
/// #
/// let mut t = RedBlackTree::new();
///
/// t.insert(1).unwrap();
/// t.insert(2).unwrap();
/// t.insert(3).unwrap();
///
/// assert_eq!(rbtree![3, 1, 2], t);
/// ```
///
/// # Panics
///
/// Panics if storage for a node cannot be allocated.
#[macro_export]
macro_rules! rbtree {
    ($($e:expr),* $(,)?) => {
        {
            #[allow(unused_mut)]
            let mut t = $crate::RedBlackTree::new();
            $(
                ::core::iter::Extend::extend(&mut t, ::core::iter::once($e));
            )*
            t
        }
    };
}

/// Handle to a node slot of a [`RedBlackTree`].
///
/// A `NodeId` stays valid until the next call that mutates the tree: [`RedBlackTree::erase()`]
/// physically unlinks a leaf-most node and may move the payload of the matched node into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Outcome of a successful [`RedBlackTree::insert()`].
#[derive(Debug, PartialEq, Eq)]
pub enum Insertion<T> {
    /// The payload was stored in a new node.
    Inserted(NodeId),
    /// An equal payload was already stored.  The set of payloads and every [`NodeId`] stay as they
    /// were and the new payload is handed back.  Colors and shape may still change, since the
    /// descent splits and rotates nodes before it reaches the equal one.
    Present { existing: NodeId, rejected: T },
}

impl<T> Insertion<T> {
    /// The node that holds the payload equal to the inserted one.
    #[must_use]
    pub fn node(&self) -> NodeId {
        match *self {
            Insertion::Inserted(id) => id,
            Insertion::Present { existing, .. } => existing,
        }
    }

    #[must_use]
    pub fn is_inserted(&self) -> bool {
        matches!(self, Insertion::Inserted(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Child side.  `Left` is link 0 and holds smaller payloads, `Right` is link 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Dir {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    /// The side to descend into when the sought payload compares as `ordering` against a node.
    #[inline]
    fn toward(ordering: Ordering) -> Dir {
        match ordering {
            Ordering::Greater => Dir::Right,
            Ordering::Less | Ordering::Equal => Dir::Left,
        }
    }
}

impl Not for Dir {
    type Output = Dir;

    #[inline]
    fn not(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    color: Color,
    link: [Option<NodeId>; 2],
}

#[derive(Clone, Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next: Option<NodeId> },
}

/// Owner of a link during top-down passes: either a node or the false head that sits above the
/// root.  The head's right link is the root link; its left link is always empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    Head,
    Node(NodeId),
}

/// An ordered container of unique payloads implemented as a red-black tree.  Rebalancing is
/// done top-down in a single pass for both insertion and deletion.
///
/// # Complexity
///
/// Let *n* be the number of elements in the tree.
///
/// ## Temporal complexity
///
/// | Operation                  | Average   | Worst case  |
/// |:-------------------------- | ---------:| -----------:|
/// | `new()`                    |      Θ(1) |        Θ(1) |
/// | `insert()`                 | Θ(log(n)) |   Θ(log(n)) |
/// | `erase()`                  | Θ(log(n)) |   Θ(log(n)) |
/// | `find()`                   | Θ(log(n)) |   Θ(log(n)) |
/// | `first()` / `last()`       | Θ(log(n)) |   Θ(log(n)) |
/// | `len()`                    |      Θ(1) |        Θ(1) |
/// | traversal step             |      Θ(1) |   Θ(log(n)) |
/// | traversal full             |      Θ(n) |        Θ(n) |
///
/// # Implementation details
///
/// Nodes live in an arena and refer to their children by [`NodeId`], so rotations are plain
/// index rewrites.  Insertion splits nodes with two red children on the way down and repairs
/// red-red violations with a single or double rotation at the grandparent.  Deletion pushes a
/// red node down the search path so that the node finally unlinked is red (or the root), and
/// swaps the matched payload into that node before detaching it.  Neither pass walks back up.
///
/// The order is defined by the comparator `C`, which defaults to [`Natural`].
pub struct RedBlackTree<T, C = Natural> {
    slots: Vec<Slot<T>>,
    free: Option<NodeId>,
    root: Option<NodeId>,
    len: usize,
    comparator: C,
}

impl<T: Ord> RedBlackTree<T> {
    #[must_use]
    pub fn new() -> RedBlackTree<T> {
        RedBlackTree::with_comparator(Natural)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> RedBlackTree<T> {
        RedBlackTree {
            slots: Vec::with_capacity(capacity),
            free: None,
            root: None,
            len: 0,
            comparator: Natural,
        }
    }
}

impl<T, C> RedBlackTree<T, C>
where
    C: Comparator<T>,
{
    #[must_use]
    pub fn with_comparator(comparator: C) -> RedBlackTree<T, C> {
        RedBlackTree { slots: Vec::new(), free: None, root: None, len: 0, comparator }
    }

    /// Finds the payload equal to `probe`.
    #[must_use]
    pub fn find(&self, probe: &T) -> Option<&T> {
        self.find_id(probe).map(|id| self.value(id))
    }

    #[must_use]
    pub fn find_id(&self, probe: &T) -> Option<NodeId> {
        self.find_id_by(|value| self.comparator.compare(probe, value))
    }

    /// Finds a payload by a key-only search.  `f` must return how the sought key compares to the
    /// payload it is given, consistently with the tree's comparator.
    #[must_use]
    pub fn find_by<F>(&self, f: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.find_id_by(f).map(|id| self.value(id))
    }

    #[must_use]
    pub fn find_id_by<F>(&self, mut f: F) -> Option<NodeId>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut it = self.root;

        while let Some(id) = it {
            match f(self.value(id)) {
                Ordering::Equal => return Some(id),
                ordering => it = self.link(id, Dir::toward(ordering)),
            }
        }

        None
    }

    #[must_use]
    pub fn contains(&self, probe: &T) -> bool {
        self.find_id(probe).is_some()
    }

    /// Inserts `value` unless an equal payload is already present, in which case the stored
    /// payloads are kept and `value` is returned inside [`Insertion::Present`].  The descent may
    /// recolor and rotate on its way down in both cases.
    ///
    /// # Errors
    ///
    /// The node is allocated before the tree is searched, so storage is needed even when an equal
    /// payload turns out to be present (a vacant slot left by an earlier erase is reused first).
    /// If allocation fails the tree is unchanged and the payload comes back inside the
    /// [`InsertError`].
    pub fn insert(&mut self, value: T) -> Result<Insertion<T>, InsertError<T>> {
        let new = self.allocate(value)?;

        let Some(root) = self.root else {
            self.set_color(new, Color::Black);
            self.root = Some(new);
            self.len += 1;

            return Ok(Insertion::Inserted(new));
        };

        // `t`, `g` and `p` trail `q` as great-grandparent, grandparent and parent.
        let mut t = Anchor::Head;
        let mut g: Option<NodeId> = None;
        let mut p: Option<NodeId> = None;
        let mut q = root;
        let mut dir = Dir::Left;
        let mut last = Dir::Left;

        loop {
            let links = self.node(q).link;

            if let [Some(left), Some(right)] = links {
                if self.is_red(Some(left)) && self.is_red(Some(right)) {
                    self.set_color(q, Color::Red);
                    self.set_color(left, Color::Black);
                    self.set_color(right, Color::Black);
                }
            }

            if self.is_red(Some(q)) && self.is_red(p) {
                let (Some(parent), Some(grand)) = (p, g) else {
                    unreachable!("a red parent below a black root has a grandparent");
                };

                let dir2 = if self.child(t, Dir::Right) == Some(grand) { Dir::Right } else { Dir::Left };
                let subtree = if self.link(parent, last) == Some(q) {
                    self.rotate_single(grand, !last)
                } else {
                    self.rotate_double(grand, !last)
                };

                self.set_child(t, dir2, Some(subtree));
            }

            // The new node compares equal to itself, so this also stops right after attaching it.
            let ordering = self.comparator.compare(self.value(new), self.value(q));

            if ordering == Ordering::Equal {
                break;
            }

            last = dir;
            dir = Dir::toward(ordering);

            if let Some(grand) = g {
                t = Anchor::Node(grand);
            }

            g = p;
            p = Some(q);
            q = match self.link(q, dir) {
                Some(child) => child,
                None => {
                    self.set_link(q, dir, Some(new));
                    new
                }
            };
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }

        if q == new {
            self.len += 1;

            Ok(Insertion::Inserted(new))
        } else {
            log::trace!("red-black tree insertion found an equal payload at {:?}", q);

            Ok(Insertion::Present { existing: q, rejected: self.release(new) })
        }
    }

    /// Removes the payload equal to `probe` and returns it, or returns `None` if there is no
    /// such payload.
    pub fn erase(&mut self, probe: &T) -> Option<T> {
        self.erase_with(|comparator, value| comparator.compare(probe, value))
    }

    /// Removes a payload by a key-only search.  `f` must return how the sought key compares to
    /// the payload it is given, consistently with the tree's comparator.
    pub fn erase_by<F>(&mut self, mut f: F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.erase_with(|_, value| f(value))
    }

    fn erase_with<F>(&mut self, mut f: F) -> Option<T>
    where
        F: FnMut(&C, &T) -> Ordering,
    {
        self.root?;

        let mut p = Anchor::Head;
        let mut q = Anchor::Head;
        let mut found: Option<NodeId> = None;
        let mut dir = Dir::Right;

        // Walk to the in-order predecessor of the match (or the match itself when it has no left
        // subtree), making sure every node we step into is red or gets a red child on our path.
        while let Some(next) = self.child(q, dir) {
            let last = dir;
            let g = p;

            p = q;
            q = Anchor::Node(next);

            let ordering = f(&self.comparator, self.value(next));

            if ordering == Ordering::Equal {
                found = Some(next);
            }

            dir = Dir::toward(ordering);

            if self.is_red(Some(next)) || self.is_red(self.link(next, dir)) {
                continue;
            }

            if self.is_red(self.link(next, !dir)) {
                let subtree = self.rotate_single(next, dir);

                self.set_child(p, last, Some(subtree));
                p = Anchor::Node(subtree);
            } else if let Some(sibling) = self.child(p, !last) {
                let Anchor::Node(parent) = p else {
                    unreachable!("the false head has no left subtree");
                };

                if !self.is_red(self.link(sibling, last)) && !self.is_red(self.link(sibling, !last)) {
                    self.set_color(parent, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.set_color(next, Color::Red);
                } else {
                    let dir2 = if self.child(g, Dir::Right) == Some(parent) { Dir::Right } else { Dir::Left };
                    let subtree = if self.is_red(self.link(sibling, last)) {
                        self.rotate_double(parent, last)
                    } else {
                        self.rotate_single(parent, last)
                    };

                    self.set_child(g, dir2, Some(subtree));

                    self.set_color(next, Color::Red);
                    self.set_color(subtree, Color::Red);

                    let links = self.node(subtree).link;

                    for child in links.into_iter().flatten() {
                        self.set_color(child, Color::Black);
                    }
                }
            }
        }

        let removed = match (found, q) {
            (Some(found), Anchor::Node(leaf)) => {
                self.swap_values(found, leaf);

                let side = if self.child(p, Dir::Right) == Some(leaf) { Dir::Right } else { Dir::Left };
                let orphan = match self.link(leaf, Dir::Left) {
                    None => self.link(leaf, Dir::Right),
                    left => left,
                };

                self.set_child(p, side, orphan);
                self.len -= 1;

                Some(self.release(leaf))
            }
            _ => {
                log::trace!("red-black tree erase found no matching payload");

                None
            }
        };

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }

        removed
    }

    /// Promotes the child of `root` opposite to `dir`, moving `root` down on the `dir` side.
    /// The demoted node becomes red and the promoted one black.
    fn rotate_single(&mut self, root: NodeId, dir: Dir) -> NodeId {
        let save = self
            .link(root, !dir)
            .expect("single rotation requires a child opposite to the rotation direction");

        let inner = self.link(save, dir);

        self.set_link(root, !dir, inner);
        self.set_link(save, dir, Some(root));

        self.set_color(root, Color::Red);
        self.set_color(save, Color::Black);

        save
    }

    /// Lifts the inner grandchild of `root` (on the side opposite to `dir`) to the top.
    fn rotate_double(&mut self, root: NodeId, dir: Dir) -> NodeId {
        let child = self
            .link(root, !dir)
            .expect("double rotation requires a child opposite to the rotation direction");
        let lifted = self.rotate_single(child, !dir);

        self.set_link(root, !dir, Some(lifted));

        self.rotate_single(root, dir)
    }
}

impl<T, C> RedBlackTree<T, C> {
    #[must_use]
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every payload and releases the node arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.root = None;
        self.len = 0;
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns the payload stored in `id`, or `None` if the slot is not in use.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(&node.value),
            _ => None,
        }
    }

    /// Smallest payload.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.extreme(Dir::Left).map(|id| self.value(id))
    }

    /// Largest payload.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.extreme(Dir::Right).map(|id| self.value(id))
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(self)
    }

    fn extreme(&self, dir: Dir) -> Option<NodeId> {
        let mut it = self.root?;

        while let Some(child) = self.link(it, dir) {
            it = child;
        }

        Some(it)
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to a vacant slot"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to a vacant slot"),
        }
    }

    #[inline]
    pub(crate) fn value(&self, id: NodeId) -> &T {
        &self.node(id).value
    }

    #[inline]
    pub(crate) fn link(&self, id: NodeId, dir: Dir) -> Option<NodeId> {
        self.node(id).link[dir.index()]
    }

    #[inline]
    fn set_link(&mut self, id: NodeId, dir: Dir, child: Option<NodeId>) {
        self.node_mut(id).link[dir.index()] = child;
    }

    fn child(&self, anchor: Anchor, dir: Dir) -> Option<NodeId> {
        match (anchor, dir) {
            (Anchor::Head, Dir::Right) => self.root,
            (Anchor::Head, Dir::Left) => None,
            (Anchor::Node(id), _) => self.link(id, dir),
        }
    }

    fn set_child(&mut self, anchor: Anchor, dir: Dir, child: Option<NodeId>) {
        match anchor {
            Anchor::Head => {
                debug_assert_eq!(dir, Dir::Right);
                self.root = child;
            }
            Anchor::Node(id) => self.set_link(id, dir, child),
        }
    }

    #[inline]
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.node(id).color == Color::Red)
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    /// Stores `value` in a fresh, detached red node.
    fn allocate(&mut self, value: T) -> Result<NodeId, InsertError<T>> {
        let node = Node { value, color: Color::Red, link: [None, None] };

        match self.free {
            Some(id) => {
                self.free = match self.slots[id.0] {
                    Slot::Vacant { next } => next,
                    Slot::Occupied(_) => unreachable!("occupied slot on the free list"),
                };
                self.slots[id.0] = Slot::Occupied(node);

                Ok(id)
            }
            None => {
                if let Err(source) = self.slots.try_reserve(1) {
                    log::debug!("red-black tree could not allocate a node: {}", source);

                    return Err(InsertError::new(node.value, source));
                }

                let id = NodeId(self.slots.len());

                self.slots.push(Slot::Occupied(node));

                Ok(id)
            }
        }
    }

    /// Vacates the slot of a detached node and hands its payload back.
    fn release(&mut self, id: NodeId) -> T {
        let slot = mem::replace(&mut self.slots[id.0], Slot::Vacant { next: self.free });

        self.free = Some(id);

        match slot {
            Slot::Occupied(node) => node.value,
            Slot::Vacant { .. } => unreachable!("released a vacant slot"),
        }
    }

    fn swap_values(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }

        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.slots.split_at_mut(high);

        match (&mut head[low], &mut tail[0]) {
            (Slot::Occupied(x), Slot::Occupied(y)) => mem::swap(&mut x.value, &mut y.value),
            _ => unreachable!("payload swap with a vacant slot"),
        }
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> RedBlackTree<T> {
        RedBlackTree::new()
    }
}

impl<T: Clone, C: Clone> Clone for RedBlackTree<T, C> {
    fn clone(&self) -> RedBlackTree<T, C> {
        RedBlackTree {
            slots: self.slots.clone(),
            free: self.free,
            root: self.root,
            len: self.len,
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RedBlackTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Display, C> Display for RedBlackTree<T, C> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        fmt.write_str("{")?;

        for v in self.iter() {
            if !first {
                fmt.write_str(", ")?;
            }
            v.fmt(fmt)?;
            first = false;
        }

        fmt.write_str("}")
    }
}

impl<T: PartialEq, C> PartialEq for RedBlackTree<T, C> {
    fn eq(&self, other: &RedBlackTree<T, C>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for RedBlackTree<T, C> {}

impl<T: PartialOrd, C> PartialOrd for RedBlackTree<T, C> {
    fn partial_cmp(&self, other: &RedBlackTree<T, C>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, C> Ord for RedBlackTree<T, C> {
    fn cmp(&self, other: &RedBlackTree<T, C>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, C> Hash for RedBlackTree<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Add the hash of length so that if two collections are added one after the other it
        // doesn't hash to the same thing as a single collection with the same elements in the same
        // order.
        self.len().hash(state);

        for e in self {
            e.hash(state);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Iter<'a, T, C> {
        self.iter()
    }
}

/// # Panics
///
/// Panics if storage for a node cannot be allocated.  Use [`RedBlackTree::insert()`] to handle
/// that case.
impl<T, C: Comparator<T>> Extend<T> for RedBlackTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(error) = self.insert(value) {
                panic!("{}", error);
            }
        }
    }
}

impl<T, C> FromIterator<T> for RedBlackTree<T, C>
where
    C: Comparator<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> RedBlackTree<T, C> {
        let mut tree = RedBlackTree::with_comparator(C::default());

        tree.extend(into_iter);

        tree
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    use super::*;
    use ::serde::de::{Deserialize, Deserializer, Error, SeqAccess, Visitor};
    use ::serde::ser::{Serialize, Serializer};
    use core::marker::PhantomData;

    impl<T: Serialize, C> Serialize for RedBlackTree<T, C> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self)
        }
    }

    impl<'de, T, C> Deserialize<'de> for RedBlackTree<T, C>
    where
        T: Deserialize<'de>,
        C: Comparator<T> + Default,
    {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<RedBlackTree<T, C>, D::Error> {
            deserializer.deserialize_seq(RedBlackTreeVisitor { phantom: PhantomData })
        }
    }

    struct RedBlackTreeVisitor<T, C> {
        phantom: PhantomData<(T, C)>,
    }

    impl<'de, T, C> Visitor<'de> for RedBlackTreeVisitor<T, C>
    where
        T: Deserialize<'de>,
        C: Comparator<T> + Default,
    {
        type Value = RedBlackTree<T, C>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a sequence")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<RedBlackTree<T, C>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut tree = RedBlackTree::with_comparator(C::default());

            while let Some(value) = seq.next_element()? {
                tree.insert(value).map_err(A::Error::custom)?;
            }

            Ok(tree)
        }
    }
}
