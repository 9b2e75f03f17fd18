//! The explicit `RoseTree<T>` data model (§3) and a generic cursor that
//! adapts it to `proptest`'s imperative `ValueTree` contract.
//!
//! Every generator and shrinker in this crate produces a `RoseTree`
//! directly rather than leaning on `proptest`'s auto-derived shrinking —
//! per §9, "roses everywhere... explicit, must not be replaced by
//! auto-derived rose shrinks." [`TreeCursor`] is the one place that bridges
//! this pure tree back into `proptest::strategy::ValueTree`, so the rest of
//! the crate never has to think about `simplify`/`complicate` bookkeeping.
//!
//! See [`TreeCursor`]'s own doc for the exact `simplify`/`complicate`
//! contract this adapter implements.

use std::collections::VecDeque;
use std::rc::Rc;

/// A lazily-shrinking tree: a value plus a thunk producing candidate
/// children, each strictly "smaller" in whatever sense the producer means.
#[derive(Clone)]
pub struct RoseTree<T> {
    value: T,
    #[allow(clippy::type_complexity)]
    children: Rc<dyn Fn() -> Vec<RoseTree<T>>>,
}

impl<T: Clone + 'static> RoseTree<T> {
    /// A leaf: no smaller candidates.
    pub fn singleton(value: T) -> Self {
        RoseTree {
            value,
            children: Rc::new(Vec::new),
        }
    }

    /// A node whose children are computed on demand.
    pub fn new(value: T, children: impl Fn() -> Vec<RoseTree<T>> + 'static) -> Self {
        RoseTree {
            value,
            children: Rc::new(children),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn shrinks(&self) -> Vec<RoseTree<T>> {
        (self.children)()
    }

    /// Functorial map: keeps the same shrink structure, transforms the
    /// value at every node lazily (§4.D's "args kept aligned via
    /// functorial mapping").
    pub fn map<U: Clone + 'static>(&self, f: impl Fn(&T) -> U + Clone + 'static) -> RoseTree<U> {
        let value = f(&self.value);
        let this = self.clone();
        RoseTree::new(value, move || {
            let f = f.clone();
            this.shrinks().iter().map(move |c| c.map(f.clone())).collect()
        })
    }
}

/// Adapts a pure [`RoseTree`] walk to `proptest`'s `simplify`/`complicate`
/// contract.
///
/// `proptest`'s shrink loop (see its `TestRunner::shrink`) calls `simplify`
/// exactly when the current candidate *reproduced* the failure, to try an
/// even smaller one, and `complicate` exactly when it *didn't*, to try a
/// different candidate without giving up the search. Concretely:
///
/// - `simplify` records the current node as the deepest confirmed-failing
///   witness seen so far, then descends into its first untried child
///   (pushing the rest of that child list as a new, unexplored sibling
///   level). A node is expanded this way at most once: `simplify` is only
///   ever called on a node the caller just confirmed failing, and once
///   descended past, a node is never reassigned to `self.node` again.
/// - `complicate` advances to the next untried sibling at the innermost
///   (most recently pushed) level with any left, without recomputing or
///   re-descending into anything already tried. Once a level is exhausted
///   it is dropped and the search continues one level up. Only when every
///   level is exhausted does it give up — snapping back to the deepest
///   confirmed-failing witness (never leaving `current()` on a candidate
///   that didn't reproduce) and returning `false`.
pub struct TreeCursor<T> {
    node: RoseTree<T>,
    last_confirmed_failing: RoseTree<T>,
    // untried remaining siblings at each level, innermost (deepest) last.
    ancestors: Vec<VecDeque<RoseTree<T>>>,
}

impl<T: Clone + 'static> TreeCursor<T> {
    pub fn new(root: RoseTree<T>) -> Self {
        TreeCursor {
            node: root.clone(),
            last_confirmed_failing: root,
            ancestors: Vec::new(),
        }
    }

    pub fn current(&self) -> T {
        self.node.value().clone()
    }

    pub fn simplify(&mut self) -> bool {
        self.last_confirmed_failing = self.node.clone();
        let mut children: VecDeque<RoseTree<T>> = self.node.shrinks().into();
        if let Some(first) = children.pop_front() {
            self.ancestors.push(children);
            self.node = first;
            true
        } else {
            false
        }
    }

    pub fn complicate(&mut self) -> bool {
        while let Some(siblings) = self.ancestors.last_mut() {
            if let Some(next) = siblings.pop_front() {
                self.node = next;
                return true;
            }
            self.ancestors.pop();
        }
        self.node = self.last_confirmed_failing.clone();
        false
    }
}
