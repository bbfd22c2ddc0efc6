use std::fmt::{Debug, Display};
use std::hash::Hash;
use num_traits::{CheckedAdd, Zero};
use ordered_float::OrderedFloat;

use crate::graph::check_weight;
use crate::Result;

/// Label of a node in the graph
///
/// Labels are totally ordered so that every traversal of the graph, and every tie between
/// equal distances, resolves the same way on every run.
pub trait Node: Clone + Eq + Hash + Ord + Debug + Display {}

impl<T> Node for T where T: Clone + Eq + Hash + Ord + Debug + Display {}

/// Weight of an undirected edge, and the type distances are accumulated in
///
/// Edge weights are required to be non-negative numbers. Integers and `OrderedFloat`
/// implement the trait; sums of distances are checked so that large weights are reported
/// instead of wrapping around.
pub trait Weight: Zero + Copy + Ord + Debug + Display {
    /// Sum of two distances, or `None` if it cannot be represented
    fn checked_sum(self, other: Self) -> Option<Self>;

    /// Returns false for values that are not numbers (NaN and infinities)
    fn is_number(self) -> bool {
        true
    }
}

macro_rules! integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn checked_sum(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }
            }
        )*
    };
}

integer_weight!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! float_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for OrderedFloat<$t> {
                fn checked_sum(self, other: Self) -> Option<Self> {
                    let sum = self + other;
                    if sum.0.is_finite() {
                        Some(sum)
                    } else {
                        None
                    }
                }

                fn is_number(self) -> bool {
                    self.0.is_finite()
                }
            }
        )*
    };
}

float_weight!(f32, f64);

/// Trait representing a weighted undirected graph
pub trait Graph<N, W>: Debug
where
    N: Node,
    W: Weight,
{
    /// Returns the number of nodes in the graph
    fn node_count(&self) -> usize;

    /// Returns the number of undirected edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the node labels, in label order
    fn nodes(&self) -> Box<dyn Iterator<Item = &N> + '_>;

    /// Returns an iterator over the neighbors of a node and the weights of the connecting edges
    fn neighbors(&self, node: &N) -> Box<dyn Iterator<Item = (&N, W)> + '_>;

    /// Returns true if the node exists in the graph
    fn contains_node(&self, node: &N) -> bool;

    /// Returns true if there's an edge between the two nodes
    fn has_edge(&self, a: &N, b: &N) -> bool {
        self.get_edge_weight(a, b).is_some()
    }

    /// Gets the weight of an edge if it exists
    fn get_edge_weight(&self, a: &N, b: &N) -> Option<W>;

    /// Validate that every weight in the graph is a non-negative number
    ///
    /// Reports the first offending edge in label order.
    fn validate_non_negative(&self) -> Result<()> {
        for node in self.nodes() {
            for (neighbor, weight) in self.neighbors(node) {
                check_weight(node, neighbor, weight)?;
            }
        }
        Ok(())
    }
}
