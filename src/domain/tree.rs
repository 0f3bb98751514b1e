//! Immutable binary tree folded by visitors.
//!
//! Every whole-tree operation (fold, clone, equality, debug output, drop)
//! walks an explicit work list, so tree height is limited by heap rather than
//! by the thread's call stack.

use std::convert::Infallible;
use std::fmt;
use std::mem;

use crate::domain::visitors::{Depth, FnVisitor, LeafCount, Render};

/// Strictly owned, acyclic binary tree. Never mutated after construction.
pub struct Tree<E> {
    node: Node<E>,
}

enum Node<E> {
    Leaf(E),
    Branch(Box<Tree<E>>, Box<Tree<E>>),
    /// Left behind by `Drop` once the children have been moved to the work list.
    Taken,
}

/// Borrowed view of the root of a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRef<'a, E> {
    Leaf(&'a E),
    Branch(&'a Tree<E>, &'a Tree<E>),
}

/// Folds leaves to a result and combines the results of both children of a branch.
pub trait Visitor<E> {
    type Output;

    fn leaf(&self, element: &E) -> Self::Output;

    fn branch(&self, left: Self::Output, right: Self::Output) -> Self::Output;
}

/// Fallible counterpart of [`Visitor`]: the first error aborts the fold.
pub trait TryVisitor<E> {
    type Output;
    type Error;

    fn leaf(&self, element: &E) -> Result<Self::Output, Self::Error>;

    fn branch(&self, left: Self::Output, right: Self::Output) -> Result<Self::Output, Self::Error>;
}

enum Step<'a, E> {
    Enter(&'a Tree<E>),
    Combine,
}

impl<E> Tree<E> {
    pub fn leaf(element: E) -> Self {
        Tree {
            node: Node::Leaf(element),
        }
    }

    pub fn branch(left: Tree<E>, right: Tree<E>) -> Self {
        Tree {
            node: Node::Branch(Box::new(left), Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }

    /// Root of the tree: the leaf element, or both children of a branch.
    pub fn view(&self) -> TreeRef<'_, E> {
        match &self.node {
            Node::Leaf(element) => TreeRef::Leaf(element),
            Node::Branch(left, right) => TreeRef::Branch(left, right),
            // a live tree never holds Taken; only drop leaves it behind
            Node::Taken => unreachable!("tree observed while being dropped"),
        }
    }

    /// Depth-first, post-order fold: left subtree, right subtree, then the branch.
    pub fn visit<V: Visitor<E>>(&self, visitor: &V) -> V::Output {
        let folded: Result<V::Output, Infallible> = self.fold_steps(
            |element| Ok(visitor.leaf(element)),
            |left, right| Ok(visitor.branch(left, right)),
        );
        match folded {
            Ok(output) => output,
            Err(never) => match never {},
        }
    }

    /// Like [`Tree::visit`], stopping at the first leaf or branch that fails.
    pub fn try_visit<V: TryVisitor<E>>(&self, visitor: &V) -> Result<V::Output, V::Error> {
        self.fold_steps(|element| visitor.leaf(element), |left, right| visitor.branch(left, right))
    }

    /// Fold with a pair of closures instead of a visitor type.
    pub fn fold<R>(&self, on_leaf: impl Fn(&E) -> R, on_branch: impl Fn(R, R) -> R) -> R {
        self.visit(&FnVisitor::new(on_leaf, on_branch))
    }

    /// Number of nodes on the longest root-to-leaf path; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        self.visit(&Depth)
    }

    pub fn leaf_count(&self) -> usize {
        self.visit(&LeafCount)
    }

    fn fold_steps<R, X>(
        &self,
        mut on_leaf: impl FnMut(&E) -> Result<R, X>,
        mut on_branch: impl FnMut(R, R) -> Result<R, X>,
    ) -> Result<R, X> {
        let mut pending = vec![Step::Enter(self)];
        let mut results: Vec<R> = Vec::new();

        while let Some(step) = pending.pop() {
            match step {
                Step::Enter(tree) => match tree.view() {
                    TreeRef::Leaf(element) => results.push(on_leaf(element)?),
                    TreeRef::Branch(left, right) => {
                        pending.push(Step::Combine);
                        pending.push(Step::Enter(right));
                        pending.push(Step::Enter(left));
                    }
                },
                Step::Combine => {
                    // Combine is pushed beneath both children, so both results are present.
                    debug_assert!(results.len() >= 2);
                    if let (Some(right), Some(left)) = (results.pop(), results.pop()) {
                        results.push(on_branch(left, right)?);
                    }
                }
            }
        }

        match results.pop() {
            Some(result) => Ok(result),
            None => unreachable!("every fold yields the root's result"),
        }
    }
}

impl<E> Drop for Tree<E> {
    fn drop(&mut self) {
        let mut work = Vec::new();
        if let Node::Branch(left, right) = mem::replace(&mut self.node, Node::Taken) {
            work.push(left);
            work.push(right);
        }
        while let Some(mut tree) = work.pop() {
            if let Node::Branch(left, right) = mem::replace(&mut tree.node, Node::Taken) {
                work.push(left);
                work.push(right);
            }
            // `tree` now holds Taken or a leaf and drops without recursing
        }
    }
}

impl<E: Clone> Clone for Tree<E> {
    fn clone(&self) -> Self {
        self.fold(|element| Tree::leaf(element.clone()), Tree::branch)
    }
}

impl<E: PartialEq> PartialEq for Tree<E> {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some((a, b)) = pairs.pop() {
            match (a.view(), b.view()) {
                (TreeRef::Leaf(x), TreeRef::Leaf(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (TreeRef::Branch(al, ar), TreeRef::Branch(bl, br)) => {
                    pairs.push((ar, br));
                    pairs.push((al, bl));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<E: Eq> Eq for Tree<E> {}

impl<E: fmt::Debug> fmt::Debug for Tree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.fold(
            |element| format!("Leaf({:?})", element),
            |left, right| format!("Branch({}, {})", left, right),
        );
        f.write_str(&rendered)
    }
}

impl<E: fmt::Display> fmt::Display for Tree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.visit(&Render))
    }
}
