//! Component F: the multi-axis shrinker over a composite case.
//!
//! Builds an explicit `RoseTree<Case<S>>` directly from a [`GenCase`] — per
//! §9 ("roses everywhere... must not be replaced by auto-derived rose
//! shrinks") this is hand-written, not `proptest`'s derived
//! `ValueTree::simplify`. The five axes below are exactly §4.F's list;
//! candidates with an empty thread are pruned before being turned into a
//! node, and nothing here checks well-formedness — that's left to the
//! `prop_filter` wrapping the top-level strategy (§4.F's closing
//! paragraph), so every produced child is still subject to it.

use crate::case::Case;
use crate::gen::GenCase;
use crate::tree::RoseTree;

fn prune_empty_threads<S: Clone + 'static>(mut gen: GenCase<S>) -> GenCase<S> {
    gen.parallel.retain(|t| !t.is_empty());
    gen
}

/// Axis 1: remove, or shrink one step, a single prefix command.
fn prefix_moves<S: Clone + 'static>(gen: &GenCase<S>) -> Vec<GenCase<S>> {
    let mut out = Vec::new();
    for i in 0..gen.sequential.len() {
        let mut removed = gen.clone();
        removed.sequential.remove(i);
        out.push(prune_empty_threads(removed));

        for child in gen.sequential[i].shrinks() {
            let mut shrunk = gen.clone();
            shrunk.sequential[i] = child;
            out.push(prune_empty_threads(shrunk));
        }
    }
    out
}

/// Axis 2: remove, or shrink one step, a single command in one thread.
fn thread_moves<S: Clone + 'static>(gen: &GenCase<S>) -> Vec<GenCase<S>> {
    let mut out = Vec::new();
    for t in 0..gen.parallel.len() {
        for i in 0..gen.parallel[t].len() {
            let mut removed = gen.clone();
            removed.parallel[t].remove(i);
            out.push(prune_empty_threads(removed));

            for child in gen.parallel[t][i].shrinks() {
                let mut shrunk = gen.clone();
                shrunk.parallel[t][i] = child;
                out.push(prune_empty_threads(shrunk));
            }
        }
    }
    out
}

/// Axis 3: pull a thread's first command into the end of the prefix. A
/// sequential prefix is always simpler to read (and to debug) than a
/// parallel race, so this move is offered whenever any thread is
/// non-empty.
fn pull_into_prefix<S: Clone + 'static>(gen: &GenCase<S>) -> Vec<GenCase<S>> {
    let mut out = Vec::new();
    for t in 0..gen.parallel.len() {
        if gen.parallel[t].is_empty() {
            continue;
        }
        let mut pulled = gen.clone();
        let head = pulled.parallel[t].remove(0);
        pulled.sequential.push(head);
        out.push(prune_empty_threads(pulled));
    }
    out
}

/// Axis 4: two prefix moves applied in sequence (§4.F "each way to
/// remove/shrink a prefix command twice").
fn prefix_double_moves<S: Clone + 'static>(gen: &GenCase<S>) -> Vec<GenCase<S>> {
    prefix_moves(gen).iter().flat_map(prefix_moves).collect()
}

/// Axis 5: two moves, within the same thread, applied in sequence.
fn thread_double_moves<S: Clone + 'static>(gen: &GenCase<S>) -> Vec<GenCase<S>> {
    let mut out = Vec::new();
    for first in thread_moves(gen) {
        out.extend(thread_moves(&first));
    }
    out
}

fn axis_children<S: Clone + 'static>(gen: &GenCase<S>) -> Vec<GenCase<S>> {
    let mut out = prefix_moves(gen);
    out.extend(thread_moves(gen));
    out.extend(pull_into_prefix(gen));
    out.extend(prefix_double_moves(gen));
    out.extend(thread_double_moves(gen));
    out
}

/// Builds the shrink tree lazily: each node's children are only computed
/// when [`RoseTree::shrinks`] is actually called.
pub fn shrink_case<S: Clone + 'static>(gen: GenCase<S>) -> RoseTree<Case<S>> {
    let value = gen.to_case();
    RoseTree::new(value, move || {
        axis_children(&gen).into_iter().map(shrink_case).collect()
    })
}
