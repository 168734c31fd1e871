use crate::avl_tree::node::Node;
use std::cmp::Ordering;
use std::mem;

pub type Tree<T> = Option<Box<Node<T>>>;

/// A single step from a node to one of its children. A slice of directions addresses a node
/// relative to the root of a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

pub fn height<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height(),
    }
}

pub fn height_difference<T>(tree: &Tree<T>) -> i32 {
    match tree {
        None => 0,
        Some(ref node) => node.balance(),
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

fn rotate_left_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}

fn rotate_right_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

/// Refreshes the height of the subtree root and restores the AVL invariant at that node. The
/// children of the node must already satisfy the invariant.
pub fn rebalance<T>(tree: &mut Tree<T>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    let balance = node.balance();
    if balance > 1 {
        node = if height_difference(&node.left) >= 0 {
            rotate_right(node)
        } else {
            rotate_left_right(node)
        };
    } else if balance < -1 {
        node = if height_difference(&node.right) <= 0 {
            rotate_left(node)
        } else {
            rotate_right_left(node)
        };
    }

    *tree = Some(node);
}

pub fn insert<T>(tree: &mut Tree<T>, value: T) -> bool
where
    T: Ord,
{
    let inserted = match tree {
        Some(node) => match value.cmp(&node.value) {
            Ordering::Less => insert(&mut node.left, value),
            Ordering::Greater => insert(&mut node.right, value),
            Ordering::Equal => return false,
        },
        None => {
            *tree = Some(Box::new(Node::new(value)));
            return true;
        },
    };

    if inserted {
        rebalance(tree);
    }
    inserted
}

/// Removes the root of the subtree and returns its value. A node with two children takes the
/// value of its in-order successor, which is removed from the right subtree instead.
pub fn pop_node<T>(tree: &mut Tree<T>) -> Option<T> {
    let mut node = tree.take()?;

    let ret = if node.left.is_some() && node.right.is_some() {
        let successor = match pop_low(&mut node.right) {
            Some(successor) => successor,
            None => unreachable!(),
        };
        let ret = mem::replace(&mut node.value, successor);
        *tree = Some(node);
        ret
    } else {
        let Node { value, left, right, .. } = *node;
        *tree = left.or(right);
        value
    };

    rebalance(tree);
    Some(ret)
}

pub fn pop_low<T>(tree: &mut Tree<T>) -> Option<T> {
    let node = tree.as_mut()?;
    if node.left.is_none() {
        return pop_node(tree);
    }

    let ret = pop_low(&mut node.left);
    rebalance(tree);
    ret
}

pub fn pop_first_of<T>(tree: &mut Tree<T>, value: &T) -> Option<T>
where
    T: Ord,
{
    let node = tree.as_mut()?;
    let ret = match value.cmp(&node.value) {
        Ordering::Less => pop_first_of(&mut node.left, value),
        Ordering::Greater => pop_first_of(&mut node.right, value),
        Ordering::Equal => return pop_node(tree),
    };

    if ret.is_some() {
        rebalance(tree);
    }
    ret
}

/// Follows `path` from the root of the subtree and applies `op` to the slot of the node it
/// addresses, rebalancing every slot on the way back up. Returns `None` without calling `op` if
/// the path leads through or to an absent node.
pub fn descend<T, F, R>(tree: &mut Tree<T>, path: &[Direction], op: F) -> Option<R>
where
    F: FnOnce(&mut Tree<T>) -> R,
{
    let node = tree.as_mut()?;
    let ret = match path.split_first() {
        None => return Some(op(tree)),
        Some((Direction::Left, rest)) => descend(&mut node.left, rest, op),
        Some((Direction::Right, rest)) => descend(&mut node.right, rest, op),
    };

    if ret.is_some() {
        rebalance(tree);
    }
    ret
}

pub fn find<'a, T>(tree: &'a Tree<T>, path: &[Direction]) -> Option<&'a Node<T>> {
    let node = tree.as_ref()?;
    match path.split_first() {
        None => Some(&**node),
        Some((Direction::Left, rest)) => find(&node.left, rest),
        Some((Direction::Right, rest)) => find(&node.right, rest),
    }
}

pub fn contains<T>(tree: &Tree<T>, value: &T) -> bool
where
    T: Ord,
{
    match tree {
        None => false,
        Some(ref node) => match value.cmp(&node.value) {
            Ordering::Less => contains(&node.left, value),
            Ordering::Greater => contains(&node.right, value),
            Ordering::Equal => true,
        },
    }
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.value
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.value
    })
}

pub fn in_order<'a, T>(tree: &'a Tree<T>, values: &mut Vec<&'a T>) {
    if let Some(ref node) = tree {
        in_order(&node.left, values);
        values.push(&node.value);
        in_order(&node.right, values);
    }
}

/// Groups the values of the tree by depth, root level first.
pub fn levels<T>(tree: &Tree<T>) -> Vec<Vec<&T>> {
    let mut levels = Vec::new();
    let mut curr: Vec<&Node<T>> = tree.iter().map(|node| &**node).collect();

    while !curr.is_empty() {
        let mut next = Vec::with_capacity(curr.len() * 2);
        for &node in &curr {
            next.extend(node.left.iter().map(|child| &**child));
            next.extend(node.right.iter().map(|child| &**child));
        }
        levels.push(curr.iter().map(|&node| &node.value).collect());
        curr = next;
    }

    levels
}

// Checks every cached height, the balance of every node, and the ordering of values. Returns
// the height of the tree.
#[cfg(test)]
pub fn assert_invariants<T>(tree: &Tree<T>) -> usize
where
    T: Ord + std::fmt::Debug,
{
    fn check<T>(tree: &Tree<T>) -> usize
    where
        T: Ord + std::fmt::Debug,
    {
        match tree {
            None => 0,
            Some(ref node) => {
                let left_height = check(&node.left);
                let right_height = check(&node.right);
                assert_eq!(node.height, std::cmp::max(left_height, right_height) + 1);
                assert!(
                    node.balance().abs() <= 1,
                    "unbalanced at {:?}: {}",
                    node.value,
                    node.balance(),
                );
                node.height
            },
        }
    }

    let mut values = Vec::new();
    in_order(tree, &mut values);
    for pair in values.windows(2) {
        assert!(pair[0] < pair[1], "out of order: {:?} >= {:?}", pair[0], pair[1]);
    }
    check(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: u32) -> Tree<u32> {
        Some(Box::new(Node::new(value)))
    }

    fn join(left: Tree<u32>, value: u32, right: Tree<u32>) -> Tree<u32> {
        let mut node = Node::new(value);
        node.left = left;
        node.right = right;
        node.update();
        Some(Box::new(node))
    }

    fn values(tree: &Tree<u32>) -> Vec<Vec<u32>> {
        levels(tree)
            .into_iter()
            .map(|level| level.into_iter().cloned().collect())
            .collect()
    }

    #[test]
    fn test_height_difference() {
        assert_eq!(height_difference::<u32>(&None), 0);
        assert_eq!(height_difference(&leaf(1)), 0);
        assert_eq!(height_difference(&join(leaf(1), 2, None)), 1);
        assert_eq!(height_difference(&join(None, 1, leaf(2))), -1);
    }

    #[test]
    fn test_rotate_right() {
        let tree = join(join(leaf(1), 2, leaf(3)), 4, leaf(5));
        let node = rotate_right(tree.unwrap());
        let tree = Some(node);
        assert_eq!(values(&tree), vec![vec![2], vec![1, 4], vec![3, 5]]);
        assert_eq!(height(&tree), 3);
        assert_invariants(&tree);
    }

    #[test]
    fn test_rotate_left() {
        let tree = join(leaf(1), 2, join(leaf(3), 4, leaf(5)));
        let tree = Some(rotate_left(tree.unwrap()));
        assert_eq!(values(&tree), vec![vec![4], vec![2, 5], vec![1, 3]]);
        assert_eq!(height(&tree), 3);
    }

    #[test]
    fn test_rebalance_left_left() {
        let mut tree = join(join(leaf(1), 2, None), 3, None);
        rebalance(&mut tree);
        assert_eq!(values(&tree), vec![vec![2], vec![1, 3]]);
        assert_invariants(&tree);
    }

    #[test]
    fn test_rebalance_left_right() {
        let mut tree = join(join(None, 1, leaf(2)), 3, None);
        rebalance(&mut tree);
        assert_eq!(values(&tree), vec![vec![2], vec![1, 3]]);
        assert_invariants(&tree);
    }

    #[test]
    fn test_rebalance_right_right() {
        let mut tree = join(None, 1, join(None, 2, leaf(3)));
        rebalance(&mut tree);
        assert_eq!(values(&tree), vec![vec![2], vec![1, 3]]);
        assert_invariants(&tree);
    }

    #[test]
    fn test_rebalance_right_left() {
        let mut tree = join(None, 1, join(leaf(2), 3, None));
        rebalance(&mut tree);
        assert_eq!(values(&tree), vec![vec![2], vec![1, 3]]);
        assert_invariants(&tree);
    }

    #[test]
    fn test_rebalance_balanced_child_uses_single_rotation() {
        // only reachable after a deletion: the left child leans neither way
        let mut tree = join(join(leaf(1), 2, leaf(3)), 4, None);
        rebalance(&mut tree);
        assert_eq!(values(&tree), vec![vec![2], vec![1, 4], vec![3]]);
        assert_invariants(&tree);
    }

    #[test]
    fn test_rebalance_empty() {
        let mut tree: Tree<u32> = None;
        rebalance(&mut tree);
        assert!(tree.is_none());
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = None;
        assert!(insert(&mut tree, 1));
        assert!(insert(&mut tree, 2));
        assert!(!insert(&mut tree, 1));
        assert_eq!(values(&tree), vec![vec![1], vec![2]]);
    }

    #[test]
    fn test_pop_node_two_children_takes_successor() {
        let mut tree = join(leaf(1), 2, join(leaf(3), 4, None));
        assert_eq!(pop_node(&mut tree), Some(2));
        assert_eq!(values(&tree), vec![vec![3], vec![1, 4]]);
        assert_invariants(&tree);
    }

    #[test]
    fn test_pop_node_one_child() {
        let mut tree = join(None, 1, leaf(2));
        assert_eq!(pop_node(&mut tree), Some(1));
        assert_eq!(values(&tree), vec![vec![2]]);
    }

    #[test]
    fn test_pop_node_empty() {
        let mut tree: Tree<u32> = None;
        assert_eq!(pop_node(&mut tree), None);
    }

    #[test]
    fn test_pop_low() {
        let mut tree = join(join(leaf(1), 2, leaf(3)), 4, join(None, 5, leaf(6)));
        assert_eq!(pop_low(&mut tree), Some(1));
        assert_eq!(pop_low(&mut tree), Some(2));
        assert_invariants(&tree);
        assert_eq!(pop_low(&mut tree), Some(3));
        assert_invariants(&tree);
        assert_eq!(values(&tree), vec![vec![5], vec![4, 6]]);
    }

    #[test]
    fn test_pop_first_of_rebalances_ancestors() {
        let mut tree = join(
            join(join(leaf(1), 2, None), 3, leaf(4)),
            5,
            join(None, 6, leaf(7)),
        );
        assert_invariants(&tree);

        assert_eq!(pop_first_of(&mut tree, &7), Some(7));
        assert_eq!(values(&tree), vec![vec![3], vec![2, 5], vec![1, 4, 6]]);
        assert_invariants(&tree);
    }

    #[test]
    fn test_pop_first_of_missing() {
        let mut tree = join(leaf(1), 2, leaf(3));
        assert_eq!(pop_first_of(&mut tree, &4), None);
        assert_eq!(values(&tree), vec![vec![2], vec![1, 3]]);
    }

    #[test]
    fn test_descend() {
        let mut tree = join(join(leaf(1), 2, leaf(3)), 4, leaf(5));
        assert_eq!(descend(&mut tree, &[Direction::Left, Direction::Right], pop_node), Some(Some(3)));
        assert_eq!(descend(&mut tree, &[Direction::Right, Direction::Left], pop_node), None);
        assert_eq!(values(&tree), vec![vec![4], vec![2, 5], vec![1]]);
    }

    #[test]
    fn test_descend_rebalances_path() {
        let mut tree = join(join(leaf(1), 2, leaf(3)), 4, leaf(5));
        assert_eq!(descend(&mut tree, &[Direction::Right], pop_node), Some(Some(5)));
        assert_eq!(values(&tree), vec![vec![2], vec![1, 4], vec![3]]);
        assert_invariants(&tree);
    }

    #[test]
    fn test_find() {
        let tree = join(leaf(1), 2, leaf(3));
        assert_eq!(find(&tree, &[]).map(|node| node.value), Some(2));
        assert_eq!(find(&tree, &[Direction::Right]).map(|node| node.value), Some(3));
        assert!(find(&tree, &[Direction::Right, Direction::Left]).is_none());
    }

    #[test]
    fn test_min_max() {
        let tree = join(join(leaf(1), 2, None), 3, leaf(4));
        assert_eq!(min(&tree), Some(&1));
        assert_eq!(max(&tree), Some(&4));
        assert_eq!(min::<u32>(&None), None);
    }
}
