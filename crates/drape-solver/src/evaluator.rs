//! Per-node evaluation hook.
//!
//! An evaluator is handed to [`SpringSystem::update_with`] and runs once per
//! unlocked node, right after that node's forces have been accumulated and
//! before any position is integrated. Typical uses are collision response
//! (editing the node's direction) and dynamic pinning (toggling `locked`).
//!
//! The evaluator sees positions read-only and cannot reach other nodes or the
//! system itself, so it can neither rewire topology nor re-enter `update`.
//!
//! [`SpringSystem::update_with`]: crate::SpringSystem::update_with

use crate::node::Node;

/// Hook invoked for every unlocked node during the force pass.
///
/// `attribs` is caller-defined side data, passed through untouched.
/// Closures of the form `FnMut(&mut Node, &[f32], &mut A)` implement this
/// trait; annotate their argument types when passing them inline.
pub trait NodeEvaluator<A: ?Sized = ()> {
    /// Processes one node. `positions` is the interleaved position arena.
    fn process_node(&mut self, node: &mut Node, positions: &[f32], attribs: &mut A);
}

impl<A: ?Sized, F> NodeEvaluator<A> for F
where
    F: FnMut(&mut Node, &[f32], &mut A),
{
    fn process_node(&mut self, node: &mut Node, positions: &[f32], attribs: &mut A) {
        self(node, positions, attribs)
    }
}

/// Evaluator that does nothing. Used by [`SpringSystem::update`].
///
/// [`SpringSystem::update`]: crate::SpringSystem::update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEvaluator;

impl<A: ?Sized> NodeEvaluator<A> for NoOpEvaluator {
    #[inline]
    fn process_node(&mut self, _node: &mut Node, _positions: &[f32], _attribs: &mut A) {}
}
