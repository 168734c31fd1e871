use crate::avl_tree::error::{Error, Result};
use crate::avl_tree::tree::{self, Direction};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign};
use std::result;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Every operation that changes
/// the structure of the tree rebalances each node on the path between the root and the changed
/// node before returning.
///
/// Nodes can be addressed by a path of `Direction`s from the root. An empty path addresses the
/// root itself.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::{AvlSet, Direction};
///
/// let mut set = AvlSet::new();
/// set.insert('a');
/// set.insert('b');
/// set.insert('c');
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.value_at(&[]), Some(&'b'));
/// assert_eq!(set.value_at(&[Direction::Left]), Some(&'a'));
///
/// assert_eq!(set.pop_min(), Ok('a'));
/// assert_eq!(set.pop_first_of(&'c', &[]), Ok('c'));
/// assert!(set.pop_first_of(&'c', &[]).is_err());
/// ```
#[derive(Clone)]
pub struct AvlSet<T> {
    tree: tree::Tree<T>,
    len: usize,
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        AvlSet {
            tree: None,
            len: 0,
        }
    }

    /// Inserts a value into the set. Returns `false` and leaves the set unchanged if an equal
    /// value is already present.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let inserted = tree::insert(&mut self.tree, value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Removes the node addressed by `path` and returns its value. A node with two children is
    /// replaced by its in-order successor.
    ///
    /// # Errors
    /// Returns `Error::EmptyTree` if the set is empty and `Error::InvalidPosition` if `path` does
    /// not address a node.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlSet, Direction, Error};
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.pop_node(&[Direction::Right]), Ok(3));
    /// assert_eq!(set.pop_node(&[Direction::Right]), Err(Error::InvalidPosition));
    /// assert_eq!(set.pop_node(&[]), Ok(2));
    /// ```
    pub fn pop_node(&mut self, path: &[Direction]) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyTree);
        }
        let value = tree::descend(&mut self.tree, path, tree::pop_node)
            .and_then(|value| value)
            .ok_or(Error::InvalidPosition)?;
        self.len -= 1;
        Ok(value)
    }

    /// Removes the root of the set and returns its value.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlSet, Error};
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.pop_root(), Err(Error::EmptyTree));
    /// set.insert(1);
    /// assert_eq!(set.pop_root(), Ok(1));
    /// ```
    pub fn pop_root(&mut self) -> Result<T> {
        self.pop_node(&[])
    }

    /// Removes the minimum value of the subtree rooted at the node addressed by `path` and
    /// returns it.
    ///
    /// # Errors
    /// Returns `Error::EmptyTree` if the set is empty and `Error::InvalidPosition` if `path` does
    /// not address a node.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlSet, Direction};
    ///
    /// let mut set = AvlSet::new();
    /// for value in 1..8 {
    ///     set.insert(value);
    /// }
    ///
    /// assert_eq!(set.pop_low(&[Direction::Right]), Ok(5));
    /// assert_eq!(set.pop_low(&[]), Ok(1));
    /// ```
    pub fn pop_low(&mut self, path: &[Direction]) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyTree);
        }
        let value = tree::descend(&mut self.tree, path, tree::pop_low)
            .and_then(|value| value)
            .ok_or(Error::InvalidPosition)?;
        self.len -= 1;
        Ok(value)
    }

    /// Removes the minimum value of the set and returns it.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(3);
    /// set.insert(1);
    /// assert_eq!(set.pop_min(), Ok(1));
    /// assert_eq!(set.pop_min(), Ok(3));
    /// assert!(set.pop_min().is_err());
    /// ```
    pub fn pop_min(&mut self) -> Result<T> {
        self.pop_low(&[])
    }

    /// Searches the subtree rooted at the node addressed by `start` for a value equal to `value`,
    /// removes it, and returns it.
    ///
    /// # Errors
    /// Returns `Error::EmptyTree` if the set is empty, `Error::InvalidPosition` if `start` does not
    /// address a node, and `Error::NotFound` if the subtree contains no equal value. The set is
    /// unchanged on error.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlSet, Direction, Error};
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// assert_eq!(set.pop_first_of(&1, &[Direction::Right]), Err(Error::NotFound));
    /// assert_eq!(set.pop_first_of(&1, &[]), Ok(1));
    /// ```
    pub fn pop_first_of(&mut self, value: &T, start: &[Direction]) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyTree);
        }
        let ret = tree::descend(&mut self.tree, start, |subtree| {
            tree::pop_first_of(subtree, value)
        });
        match ret {
            None => Err(Error::InvalidPosition),
            Some(None) => Err(Error::NotFound),
            Some(Some(value)) => {
                self.len -= 1;
                Ok(value)
            },
        }
    }

    /// Removes a value equal to `value` from the set and returns it.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlSet, Error};
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Ok(1));
    /// assert_eq!(set.remove(&1), Err(Error::EmptyTree));
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<T> {
        self.pop_first_of(value, &[])
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        tree::contains(&self.tree, value)
    }

    /// Returns the value of the node addressed by `path`, or `None` if there is no such node.
    pub fn value_at(&self, path: &[Direction]) -> Option<&T> {
        tree::find(&self.tree, path).map(|node| &node.value)
    }

    /// Returns the height of the left subtree minus the height of the right subtree of the node
    /// addressed by `path`.
    ///
    /// # Errors
    /// Returns `Error::InvalidPosition` if `path` does not address a node.
    pub fn height_difference(&self, path: &[Direction]) -> Result<i32> {
        tree::find(&self.tree, path)
            .map(|node| node.balance())
            .ok_or(Error::InvalidPosition)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
        self.len = 0;
    }

    /// Returns the height of the tree. An empty set has height zero and a set with a single
    /// element has height one.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.height(), 0);
    /// for value in 0..7 {
    ///     set.insert(value);
    /// }
    /// assert_eq!(set.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.tree)
    }

    /// Returns the minimum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.tree)
    }

    /// Returns the maximum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.tree)
    }

    /// Inserts every value of `other` into the set. `other` is copied and drained one minimum at
    /// a time, so merging takes `O(m log(n + m))` time.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// let mut other = AvlSet::new();
    /// other.insert(2);
    /// other.insert(3);
    ///
    /// set.merge(&other);
    /// assert_eq!(set.len(), 3);
    /// assert_eq!(other.len(), 2);
    /// ```
    pub fn merge(&mut self, other: &AvlSet<T>)
    where
        T: Clone,
    {
        let mut drained = other.tree.clone();
        while let Some(value) = tree::pop_low(&mut drained) {
            self.insert(value);
        }
    }

    /// Returns the values of the set grouped by depth, root level first.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.insert(3);
    /// assert_eq!(set.levels(), vec![vec![&2], vec![&1, &3]]);
    /// ```
    pub fn levels(&self) -> Vec<Vec<&T>> {
        tree::levels(&self.tree)
    }

    /// Writes the values of the set to `out` one level per line, root level first. The format is
    /// meant for display and may change.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert('a');
    /// set.insert('b');
    /// set.insert('c');
    ///
    /// let mut out = Vec::new();
    /// set.write_levels(&mut out).unwrap();
    /// assert_eq!(String::from_utf8(out).unwrap(), "b\na c\n");
    /// ```
    pub fn write_levels<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: Write,
        T: fmt::Display,
    {
        for level in self.levels() {
            let line = level
                .iter()
                .map(|value| value.to_string())
                .collect::<Vec<String>>()
                .join(" ");
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn values(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.len);
        tree::in_order(&self.tree, &mut values);
        values
    }
}

impl<T> Default for AvlSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PartialEq for AvlSet<T>
where
    T: Ord,
{
    fn eq(&self, other: &AvlSet<T>) -> bool {
        self.len == other.len && self.values() == other.values()
    }
}

impl<T> Eq for AvlSet<T> where T: Ord {}

impl<T> fmt::Debug for AvlSet<T>
where
    T: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.values()).finish()
    }
}

impl<'a, T> AddAssign<&'a AvlSet<T>> for AvlSet<T>
where
    T: Ord + Clone,
{
    fn add_assign(&mut self, other: &'a AvlSet<T>) {
        self.merge(other);
    }
}

impl<T> AddAssign<T> for AvlSet<T>
where
    T: Ord,
{
    fn add_assign(&mut self, value: T) {
        self.insert(value);
    }
}

impl<T> Add<T> for AvlSet<T>
where
    T: Ord,
{
    type Output = AvlSet<T>;

    fn add(mut self, value: T) -> AvlSet<T> {
        self.insert(value);
        self
    }
}

impl<'a, T> Add<T> for &'a AvlSet<T>
where
    T: Ord + Clone,
{
    type Output = AvlSet<T>;

    fn add(self, value: T) -> AvlSet<T> {
        self.clone() + value
    }
}

// Values are written in level order. Reinserting them in that order rebuilds the same shape
// without any rotations.
impl<T> Serialize for AvlSet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len))?;
        for level in tree::levels(&self.tree) {
            for value in level {
                seq.serialize_element(value)?;
            }
        }
        seq.end()
    }
}

struct AvlSetVisitor<T> {
    marker: PhantomData<fn() -> AvlSet<T>>,
}

impl<'de, T> Visitor<'de> for AvlSetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = AvlSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of values")
    }

    fn visit_seq<A>(self, mut seq: A) -> result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = AvlSet::new();
        while let Some(value) = seq.next_element()? {
            set.insert(value);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for AvlSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(AvlSetVisitor {
            marker: PhantomData,
        })
    }
}
