//! Component G: lazily enumerates every topological interleaving of a
//! parallel case's prefix and threads, and validates a single sequence
//! against the model.

use std::collections::HashSet;
use std::fmt;

use crate::case::{Case, CommandCall};
use crate::command::DynCommandAdapter;
use crate::spec::Specification;
use crate::symbolic::SETUP_HANDLE;

/// Every way to merge `prefix` with one command at a time popped from the
/// front of any non-empty thread, preserving each thread's internal order.
/// There are `(n*k)! / (k!)^n` of these for `n` threads of length `k`; this
/// walks them lazily via `Iterator::flatten`, never materializing the full
/// count unless fully consumed (§4.G, §9).
pub fn every_interleaving<S: Clone + 'static>(
    prefix: Vec<CommandCall<S>>,
    threads: Vec<Vec<CommandCall<S>>>,
) -> Box<dyn Iterator<Item = Vec<CommandCall<S>>>> {
    if threads.iter().all(Vec::is_empty) {
        return Box::new(std::iter::once(prefix));
    }
    let branches: Vec<_> = (0..threads.len())
        .filter(|&i| !threads[i].is_empty())
        .map(|i| {
            let mut next_prefix = prefix.clone();
            next_prefix.push(threads[i][0].clone());
            let mut next_threads = threads.clone();
            next_threads[i] = next_threads[i][1..].to_vec();
            every_interleaving(next_prefix, next_threads)
        })
        .collect();
    Box::new(branches.into_iter().flatten())
}

fn initial_bindings(has_setup: bool) -> HashSet<String> {
    let mut bindings = HashSet::new();
    if has_setup {
        bindings.insert(SETUP_HANDLE.to_string());
    }
    bindings
}

/// Replays one linear sequence against the model, left to right: checks
/// `requires`, that every symbolic argument reference is already bound
/// (invariant I3), and `precondition`, advancing state and bindings after
/// each step. `false` as soon as any step fails.
pub fn valid_sequence<S: Clone + fmt::Debug + 'static>(
    spec: &Specification<S>,
    sequence: &[CommandCall<S>],
    state0: &S,
) -> bool {
    let mut state = state0.clone();
    let mut bindings = initial_bindings(spec.has_setup);
    for call in sequence {
        if !call.command.requires(&state) {
            return false;
        }
        if !call
            .args
            .symbolic_refs()
            .iter()
            .all(|sym| sym.is_valid(&bindings))
        {
            return false;
        }
        if !call.command.precondition(&state, call.args.as_ref()) {
            return false;
        }
        state = call.command.next_state(&state, call.args.as_ref(), &call.handle);
        bindings.insert(call.handle.name().to_string());
    }
    true
}

/// A case is well-formed iff *every* interleaving of its prefix and
/// threads validates (§4.F's closing paragraph, §4.G).
pub fn is_well_formed<S: Clone + fmt::Debug + 'static>(
    spec: &Specification<S>,
    case: &Case<S>,
    state0: &S,
) -> bool {
    every_interleaving(case.sequential.clone(), case.parallel.clone())
        .all(|sequence| valid_sequence(spec, &sequence, state0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_thread_has_one_interleaving() {
        let prefix: Vec<CommandCall<i32>> = Vec::new();
        let threads: Vec<Vec<CommandCall<i32>>> = Vec::new();
        let all: Vec<_> = every_interleaving(prefix, threads).collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
    }
}
