//! Stock visitors for [`Tree`](crate::domain::Tree).

use std::fmt;
use std::marker::PhantomData;

use termtree::Tree as DisplayTree;

use crate::domain::error::DomainError;
use crate::domain::tree::{TryVisitor, Visitor};

/// Infix rendering: a leaf prints itself, a branch prints `(left^right)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Render;

impl<E: fmt::Display> Visitor<E> for Render {
    type Output = String;

    fn leaf(&self, element: &E) -> String {
        element.to_string()
    }

    fn branch(&self, left: String, right: String) -> String {
        format!("({}^{})", left, right)
    }
}

/// Numeric leaf that can be widened to `f64`, possibly losing precision for
/// 64-bit integers beyond 2^53.
pub trait AsF64 {
    fn as_f64(&self) -> f64;
}

macro_rules! impl_as_f64 {
    ($($t:ty),*) => {
        $(impl AsF64 for $t {
            fn as_f64(&self) -> f64 {
                *self as f64
            }
        })*
    };
}

impl_as_f64!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Sum of all leaves as `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl<E: AsF64> Visitor<E> for Sum {
    type Output = f64;

    fn leaf(&self, element: &E) -> f64 {
        element.as_f64()
    }

    fn branch(&self, left: f64, right: f64) -> f64 {
        left + right
    }
}

/// Exact integer sum of all leaves; fails instead of wrapping on overflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckedSum;

impl<E: Copy + Into<i64>> TryVisitor<E> for CheckedSum {
    type Output = i64;
    type Error = DomainError;

    fn leaf(&self, element: &E) -> Result<i64, DomainError> {
        Ok((*element).into())
    }

    fn branch(&self, left: i64, right: i64) -> Result<i64, DomainError> {
        left.checked_add(right)
            .ok_or(DomainError::Overflow("summing tree leaves"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Depth;

impl<E> Visitor<E> for Depth {
    type Output = usize;

    fn leaf(&self, _element: &E) -> usize {
        1
    }

    fn branch(&self, left: usize, right: usize) -> usize {
        1 + left.max(right)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LeafCount;

impl<E> Visitor<E> for LeafCount {
    type Output = usize;

    fn leaf(&self, _element: &E) -> usize {
        1
    }

    fn branch(&self, left: usize, right: usize) -> usize {
        left + right
    }
}

/// Structural rendering for the terminal: every branch becomes a `^` node
/// with its two subtrees as children.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeDisplay;

impl<E: fmt::Display> Visitor<E> for TreeDisplay {
    type Output = DisplayTree<String>;

    fn leaf(&self, element: &E) -> DisplayTree<String> {
        DisplayTree::new(element.to_string())
    }

    fn branch(&self, left: DisplayTree<String>, right: DisplayTree<String>) -> DisplayTree<String> {
        DisplayTree::new("^".to_string()).with_leaves([left, right])
    }
}

/// Adapts a leaf handler and a branch combiner into a [`Visitor`].
pub struct FnVisitor<L, B, R> {
    on_leaf: L,
    on_branch: B,
    _output: PhantomData<fn() -> R>,
}

impl<L, B, R> FnVisitor<L, B, R> {
    pub fn new(on_leaf: L, on_branch: B) -> Self {
        Self {
            on_leaf,
            on_branch,
            _output: PhantomData,
        }
    }
}

impl<E, R, L, B> Visitor<E> for FnVisitor<L, B, R>
where
    L: Fn(&E) -> R,
    B: Fn(R, R) -> R,
{
    type Output = R;

    fn leaf(&self, element: &E) -> R {
        (self.on_leaf)(element)
    }

    fn branch(&self, left: R, right: R) -> R {
        (self.on_branch)(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tree::Tree;

    #[test]
    fn test_render_nested() {
        let tree = Tree::branch(Tree::leaf("a"), Tree::branch(Tree::leaf("b"), Tree::leaf("c")));
        assert_eq!(tree.visit(&Render), "(a^(b^c))");
    }

    #[test]
    fn test_sum_of_floats() {
        let tree = Tree::branch(Tree::leaf(0.5_f32), Tree::leaf(1.25_f32));
        assert_eq!(tree.visit(&Sum), 1.75);
    }

    #[test]
    fn test_sum_of_wide_integers() {
        let longs = Tree::branch(Tree::leaf(3_000_000_000_i64), Tree::leaf(-1_i64));
        assert_eq!(longs.visit(&Sum), 2_999_999_999.0);

        let sizes = Tree::branch(Tree::leaf(2_usize), Tree::branch(Tree::leaf(3_usize), Tree::leaf(4_usize)));
        assert_eq!(sizes.visit(&Sum), 9.0);

        let unsigned = Tree::leaf(u64::from(u32::MAX) + 1);
        assert_eq!(unsigned.visit(&Sum), 4_294_967_296.0);
    }

    #[test]
    fn test_checked_sum_reports_overflow() {
        let tree = Tree::branch(Tree::leaf(i64::MAX), Tree::leaf(1_i64));
        assert_eq!(
            tree.try_visit(&CheckedSum),
            Err(DomainError::Overflow("summing tree leaves"))
        );
    }

    #[test]
    fn test_tree_display_lists_branches_and_leaves() {
        let tree = Tree::branch(Tree::leaf(1), Tree::leaf(2));
        let rendered = tree.visit(&TreeDisplay).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "^");
        assert!(lines[1].ends_with('1'));
        assert!(lines[2].ends_with('2'));
    }
}
