//! The tree itself: an unbalanced BST over owned elements, ordered by a
//! caller-supplied comparison function, with an optional hook run on each
//! element as it is destroyed.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

/// The ordering function a tree is built around.
type CompareFn<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// The hook run on each element as it is destroyed.
type CleanupFn<T> = Box<dyn FnMut(&mut T)>;

type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree ordered by a caller-supplied comparison
/// function. This can be used for inserting, finding, iterating over, and
/// removing elements.
///
/// Two elements are equivalent when the ordering function returns
/// [`Ordering::Equal`] for them, whatever `Eq` impl the element type may
/// have. Equivalent elements can be stored at the same time; lookups resolve
/// to the one closest to the root.
///
/// Dropping the tree destroys every element, children before parents,
/// running the cleanup hook (if the tree was built with one) once per
/// element.
///
/// # Examples
///
/// ```
/// use bstree::Tree;
///
/// let mut tree = Tree::new(|a: &i32, b: &i32| a.cmp(b));
///
/// // Nothing in here yet.
/// assert_eq!(tree.find(&1), None);
///
/// tree.insert(1);
/// tree.insert(2);
///
/// assert_eq!(tree.find(&1), Some(&1));
/// assert_eq!(tree.len(), 2);
///
/// tree.remove(&1);
/// assert_eq!(tree.find(&1), None);
/// ```
pub struct Tree<T> {
    root: Link<T>,
    compare: CompareFn<T>,
    // `None` when the tree was built without a cleanup hook.
    cleanup: Option<CleanupFn<T>>,
}

impl<T: Ord + 'static> Default for Tree<T> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<T> Drop for Tree<T> {
    // TODO stack based teardown for deep, list-shaped trees
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root).finish()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree` ordered by `compare`.
    ///
    /// `compare` must be a total order: for every pair of elements exactly
    /// one of less, equal, and greater holds, and the relation is
    /// transitive. An ordering that disagrees with itself across calls
    /// leaves lookups unable to retrace insertions.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized. Elements are stored by value and a
    /// zero-sized element carries nothing to order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// // Order strings by length instead of lexicographically.
    /// let mut tree = Tree::new(|a: &String, b: &String| a.len().cmp(&b.len()));
    ///
    /// tree.insert("pear".to_string());
    /// tree.insert("fig".to_string());
    ///
    /// // Any three-letter string is equivalent to "fig" under this ordering.
    /// assert_eq!(tree.find(&"abc".to_string()), Some(&"fig".to_string()));
    /// ```
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        assert!(
            mem::size_of::<T>() > 0,
            "zero-sized element types cannot be stored in a `Tree`"
        );
        Self {
            root: None,
            compare: Box::new(compare),
            cleanup: None,
        }
    }

    /// Generate a new, empty `Tree` ordered by `compare` whose elements are
    /// passed to `cleanup` as they are destroyed.
    ///
    /// The hook runs exactly once per element, on removal and on
    /// [`clear`](Tree::clear) or drop, just before the element's own storage
    /// is released. It is meant for elements holding resources their
    /// destructor alone cannot release, such as entries registered in some
    /// other structure.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized, as with [`Tree::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// use bstree::Tree;
    ///
    /// let released = Rc::new(Cell::new(0));
    /// let hook = Rc::clone(&released);
    ///
    /// let mut tree = Tree::with_cleanup(
    ///     |a: &i32, b: &i32| a.cmp(b),
    ///     move |_: &mut i32| hook.set(hook.get() + 1),
    /// );
    ///
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// // Removal destroys the element, so the hook runs.
    /// tree.remove(&1);
    /// assert_eq!(released.get(), 1);
    ///
    /// // Dropping the tree destroys whatever is left.
    /// drop(tree);
    /// assert_eq!(released.get(), 2);
    /// ```
    pub fn with_cleanup<F, D>(compare: F, cleanup: D) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
        D: FnMut(&mut T) + 'static,
    {
        let mut tree = Self::new(compare);
        tree.cleanup = Some(Box::new(cleanup));
        tree
    }

    /// Inserts the given element into the tree.
    ///
    /// An element that compares equal to one already present is stored in
    /// that element's left subtree. The tree therefore keeps duplicates
    /// instead of overwriting them, and [`find`](Tree::find) resolves to the
    /// earliest surviving insert.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::natural();
    ///
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T) {
        let new = Box::new(Node::new(value));
        match self.root {
            Some(ref mut root) => root.insert(new, &self.compare),
            None => self.root = Some(new),
        }
    }

    /// Potentially finds an element equivalent to `probe` in this tree. If
    /// no stored element compares equal to `probe`, `None` is returned.
    ///
    /// When several stored elements compare equal to `probe`, the one
    /// closest to the root is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::natural();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, probe: &T) -> Option<&T> {
        self.root
            .as_deref()
            .and_then(|n| n.find(probe, &self.compare))
    }

    /// Removes the element equivalent to `probe` from the tree and destroys
    /// it, running the cleanup hook if one was configured. If the tree does
    /// not contain such an element, nothing happens.
    ///
    /// When several stored elements compare equal to `probe`, the one
    /// closest to the root is removed. A removed element with two children
    /// is replaced by its in-order predecessor (the largest element of its
    /// left subtree).
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::natural();
    /// tree.insert(1);
    ///
    /// tree.remove(&1);
    /// assert_eq!(tree.find(&1), None);
    ///
    /// // Removing an element that was never there is fine.
    /// tree.remove(&42);
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, probe: &T) {
        if let Some(root) = self.root.take() {
            self.root = Node::remove_from(root, probe, &self.compare, &mut self.cleanup);
        }
    }

    /// Visits every element in sorted order, smallest first.
    ///
    /// The traversal is in-order: left subtree, then node, then right
    /// subtree. For a lazier walk over the same sequence see
    /// [`iter`](Tree::iter).
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::natural();
    /// for x in [2, 1, 3] {
    ///     tree.insert(x);
    /// }
    ///
    /// let mut seen = Vec::new();
    /// tree.for_each(|x| seen.push(*x));
    ///
    /// assert_eq!(seen, [1, 2, 3]);
    /// ```
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        if let Some(root) = self.root.as_deref() {
            root.visit_in_order(&mut visit);
        }
    }

    /// Returns an iterator over the elements in sorted order, smallest
    /// first.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::natural();
    /// for x in [2, 1, 3] {
    ///     tree.insert(x);
    /// }
    ///
    /// let in_order: Vec<_> = tree.iter().collect();
    /// assert_eq!(in_order, [&1, &2, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref())
    }

    /// Returns the number of elements in the tree.
    ///
    /// The count is not cached. Every call walks the whole tree, so this is
    /// `O(n)`; callers that need the size frequently should track it
    /// themselves.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::natural();
    /// assert_eq!(tree.len(), 0);
    ///
    /// tree.insert(7);
    /// tree.insert(7);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.root.as_deref().map_or(0, |n| n.count())
    }

    /// Returns `true` if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes and destroys every element, leaving the tree empty but
    /// usable.
    ///
    /// Elements are destroyed children first, each passed to the cleanup
    /// hook if one was configured. Dropping the tree does the same.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            Node::teardown(root, &mut self.cleanup);
        }
    }
}

impl<T: Ord + 'static> Tree<T> {
    /// Generate a new, empty `Tree` ordered by `T`'s own [`Ord`] impl.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::natural();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// ```
    pub fn natural() -> Self {
        Self::new(T::cmp)
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node {
            value,
            left: None,
            right: None,
        }
    }

    fn insert(&mut self, new: Box<Self>, compare: &CompareFn<T>) {
        match compare(&new.value, &self.value) {
            // Equal elements go left, so the earliest insert stays
            // shallowest and is found first.
            Ordering::Less | Ordering::Equal => match self.left {
                Some(ref mut left) => left.insert(new, compare),
                None => self.left = Some(new),
            },
            Ordering::Greater => match self.right {
                Some(ref mut right) => right.insert(new, compare),
                None => self.right = Some(new),
            },
        }

        if cfg!(debug_assertions) {
            if let Some(left) = self.left.as_deref() {
                assert!(compare(&left.value, &self.value) != Ordering::Greater);
            }
            if let Some(right) = self.right.as_deref() {
                assert!(compare(&right.value, &self.value) == Ordering::Greater);
            }
        }
    }

    fn find(&self, probe: &T, compare: &CompareFn<T>) -> Option<&T> {
        match compare(probe, &self.value) {
            Ordering::Less => self.left.as_deref().and_then(|n| n.find(probe, compare)),
            Ordering::Equal => Some(&self.value),
            Ordering::Greater => self.right.as_deref().and_then(|n| n.find(probe, compare)),
        }
    }

    fn visit_in_order<F>(&self, visit: &mut F)
    where
        F: FnMut(&T),
    {
        if let Some(left) = self.left.as_deref() {
            left.visit_in_order(visit);
        }
        visit(&self.value);
        if let Some(right) = self.right.as_deref() {
            right.visit_in_order(visit);
        }
    }

    fn count(&self) -> usize {
        let left = self.left.as_deref().map_or(0, |n| n.count());
        let right = self.right.as_deref().map_or(0, |n| n.count());
        1 + left + right
    }

    /// Removes the node matching `probe` from the subtree rooted at `node`
    /// and returns what remains of that subtree.
    fn remove_from(
        mut node: Box<Self>,
        probe: &T,
        compare: &CompareFn<T>,
        cleanup: &mut Option<CleanupFn<T>>,
    ) -> Link<T> {
        match compare(probe, &node.value) {
            Ordering::Less => {
                if let Some(left) = node.left.take() {
                    node.left = Self::remove_from(left, probe, compare, cleanup);
                }
                Some(node)
            }
            Ordering::Greater => {
                if let Some(right) = node.right.take() {
                    node.right = Self::remove_from(right, probe, compare, cleanup);
                }
                Some(node)
            }
            Ordering::Equal => Self::unlink(node, cleanup),
        }
    }

    /// Takes `node` out of the tree, destroying its value, and returns the
    /// subtree that replaces it.
    fn unlink(mut node: Box<Self>, cleanup: &mut Option<CleanupFn<T>>) -> Link<T> {
        match (node.left.take(), node.right.take()) {
            (None, None) => {
                Self::dispose(node, cleanup);
                None
            }
            (Some(child), None) | (None, Some(child)) => {
                Self::dispose(node, cleanup);
                Some(child)
            }
            (Some(left), Some(right)) => {
                // A node with two children cannot be spliced out, so its
                // in-order predecessor takes over its slot and the
                // predecessor's node is the one destroyed. Swapping values
                // keeps the destroyed value the removed one.
                let (remaining, mut predecessor) = Self::detach_max(left);
                node.left = remaining;
                node.right = Some(right);
                mem::swap(&mut node.value, &mut predecessor.value);
                Self::dispose(predecessor, cleanup);
                Some(node)
            }
        }
    }

    /// Detaches the largest node of the subtree rooted at `node` by
    /// recursing to the right until there is no right child. Returns the
    /// remaining subtree and the detached node, whose children are cut.
    fn detach_max(mut node: Box<Self>) -> (Link<T>, Box<Self>) {
        match node.right.take() {
            Some(right) => {
                let (remaining, max) = Self::detach_max(right);
                node.right = remaining;
                (Some(node), max)
            }
            None => {
                let remaining = node.left.take();
                (remaining, node)
            }
        }
    }

    /// Destroys a detached node, running the cleanup hook on its value
    /// first.
    fn dispose(mut node: Box<Self>, cleanup: &mut Option<CleanupFn<T>>) {
        debug_assert!(node.left.is_none() && node.right.is_none());
        if let Some(hook) = cleanup.as_mut() {
            hook(&mut node.value);
        }
    }

    /// Destroys the whole subtree rooted at `node`, children before
    /// parents, running the cleanup hook on each value.
    fn teardown(mut node: Box<Self>, cleanup: &mut Option<CleanupFn<T>>) {
        if let Some(left) = node.left.take() {
            Self::teardown(left, cleanup);
        }
        if let Some(right) = node.right.take() {
            Self::teardown(right, cleanup);
        }
        if let Some(hook) = cleanup.as_mut() {
            hook(&mut node.value);
        }
    }
}

/// A borrowing iterator over a [`Tree`]'s elements in sorted order. Created
/// by [`Tree::iter`].
pub struct Iter<'a, T> {
    // Nodes whose value and right subtree are still to be yielded, deepest
    // unvisited ancestor on top.
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    /// Pushes `node` and the chain of left children below it, so the next
    /// value yielded is the smallest of that subtree.
    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.value)
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
