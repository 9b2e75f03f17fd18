//! Components D and E: draws a shrinkable sequence of commands against a
//! threaded model state, then composes a sequential prefix with N parallel
//! threads into a [`GenCase`].

use std::fmt;

use proptest::strategy::Strategy;
use proptest::test_runner::TestRunner;
use rand::Rng;
use tracing::trace;

use crate::case::{thread_letter, CommandCall};
use crate::error::Result;
use crate::picker::pick;
use crate::spec::{Options, Specification};
use crate::symbolic::SymbolicValue;
use crate::tree::RoseTree;

/// Bounds how many times a `precondition` rejection may redraw at the same
/// sequence position before this is treated as a non-converging spec
/// (§7's `PreconditionRejection` is meant to be "local, retried" — this
/// caps that retry so a degenerate spec fails loudly instead of hanging).
const MAX_PRECONDITION_RETRIES: usize = 1000;

/// Component D. Draws up to `handles.len()` commands, threading model
/// state from one draw to the next. Stops early with weight `1` against
/// weight `remaining.len()` to continue (§4.D step 4) — so shorter
/// sequences are more likely as the handle budget is consumed, without
/// ever exceeding it.
///
/// Returns one [`RoseTree`] per drawn position (the position's own args
/// strategy contributes native shrinks; removing a position outright is
/// the shrinker's job, not this function's) and the model state after the
/// whole sequence.
pub fn draw_seq_tree<S: Clone + fmt::Debug + 'static>(
    spec: &Specification<S>,
    state: &S,
    handles: &[SymbolicValue],
    runner: &mut TestRunner,
) -> Result<(Vec<RoseTree<CommandCall<S>>>, S)> {
    let mut calls = Vec::new();
    let mut cur_state = state.clone();
    let mut remaining = handles;

    while !remaining.is_empty() {
        let continue_weight = remaining.len() as u32;
        let stop_roll = runner.rng().gen_range(0..continue_weight + 1);
        if stop_roll == 0 {
            break;
        }

        let mut retries = 0;
        loop {
            let cmd = pick(spec, &cur_state, runner)?;
            let args_strategy = cmd.args_strategy(&cur_state);
            let args_tree = args_strategy.new_tree(runner)?;
            let args_val = args_tree.current();
            if cmd.precondition(&cur_state, args_val.as_ref()) {
                let handle = remaining[0].clone();
                let next_state = cmd.next_state(&cur_state, args_val.as_ref(), &handle);
                let call_tree = call_tree_from_args_tree(args_tree, cmd, handle);
                calls.push(call_tree);
                cur_state = next_state;
                remaining = &remaining[1..];
                break;
            }
            trace!(command = cmd.name(), retries, "precondition rejected draw, redrawing");
            retries += 1;
            if retries >= MAX_PRECONDITION_RETRIES {
                return Err(crate::error::Error::RetryBudgetExhausted {
                    state_debug: format!("{cur_state:?}"),
                    retries,
                });
            }
        }
    }

    Ok((calls, cur_state))
}

/// Converts a `proptest` `ValueTree<Value = Box<dyn DynArgs>>` — an
/// imperative, single-path shrink walk — into our explicit, lazy
/// `RoseTree<CommandCall<S>>`, preserving the command/handle and replacing
/// only the args at each step. Each node exposes exactly the *next*
/// `simplify()` result as its one child, which is the faithful rose-tree
/// reading of proptest's inherently sequential shrink order.
fn call_tree_from_args_tree<S: Clone + 'static>(
    args_tree: Box<dyn proptest::strategy::ValueTree<Value = Box<dyn crate::args::DynArgs>>>,
    command: std::rc::Rc<dyn crate::command::DynCommandAdapter<S>>,
    handle: SymbolicValue,
) -> RoseTree<CommandCall<S>> {
    use std::cell::RefCell;
    use std::rc::Rc;

    fn build<S: Clone + 'static>(
        vt: Rc<RefCell<Box<dyn proptest::strategy::ValueTree<Value = Box<dyn crate::args::DynArgs>>>>>,
        command: Rc<dyn crate::command::DynCommandAdapter<S>>,
        handle: SymbolicValue,
    ) -> RoseTree<CommandCall<S>> {
        let args = vt.borrow().current();
        let value = CommandCall {
            handle: handle.clone(),
            command: Rc::clone(&command),
            args,
        };
        RoseTree::new(value, move || {
            let progressed = vt.borrow_mut().simplify();
            if progressed {
                vec![build(Rc::clone(&vt), Rc::clone(&command), handle.clone())]
            } else {
                Vec::new()
            }
        })
    }

    build(Rc::new(RefCell::new(args_tree)), command, handle)
}

/// A generated case before shrinking: one [`RoseTree`] per prefix position
/// and per parallel-thread position.
pub struct GenCase<S> {
    pub sequential: Vec<RoseTree<CommandCall<S>>>,
    pub parallel: Vec<Vec<RoseTree<CommandCall<S>>>>,
}

impl<S: Clone + 'static> GenCase<S> {
    pub fn to_case(&self) -> crate::case::Case<S> {
        crate::case::Case {
            sequential: self.sequential.iter().map(|t| t.value().clone()).collect(),
            parallel: self
                .parallel
                .iter()
                .map(|thread| thread.iter().map(|t| t.value().clone()).collect())
                .collect(),
        }
    }
}

impl<S> Clone for GenCase<S> {
    fn clone(&self) -> Self {
        GenCase {
            sequential: self.sequential.clone(),
            parallel: self.parallel.clone(),
        }
    }
}

/// Component E. Scales the sequential and per-thread lengths by `size /
/// max_size` (§4.E), draws the prefix, then draws each thread independently
/// from the state *after* the prefix (threads never see each other).
pub fn draw_case<S: Clone + fmt::Debug + 'static>(
    spec: &Specification<S>,
    options: &Options,
    size: u32,
    runner: &mut TestRunner,
) -> Result<GenCase<S>> {
    options.validate()?;
    let size = size.min(options.max_size);
    let seq_len = scale(options.max_length.sequential(), size, options.max_size);
    let par_len = scale(options.max_length.parallel(), size, options.max_size);

    let setup_handle = if spec.has_setup() {
        Some(SymbolicValue::setup())
    } else {
        None
    };
    let state0 = spec.initial_state(setup_handle.as_ref());

    let prefix_handles: Vec<_> = (1..=seq_len).map(|i| SymbolicValue::new_root(i.to_string())).collect();
    let (sequential, state1) = draw_seq_tree(spec, &state0, &prefix_handles, runner)?;

    let mut parallel: Vec<Vec<RoseTree<CommandCall<S>>>> = vec![Vec::new(); options.threads];
    for t in (0..options.threads).rev() {
        let letter = thread_letter(t);
        let handles: Vec<_> = (1..=par_len)
            .map(|i| SymbolicValue::new_root(format!("{i}{letter}")))
            .collect();
        let (calls, _final_state) = draw_seq_tree(spec, &state1, &handles, runner)?;
        parallel[t] = calls;
    }

    Ok(GenCase { sequential, parallel })
}

fn scale(max: usize, size: u32, max_size: u32) -> usize {
    if max_size == 0 {
        return 0;
    }
    (max as u64 * size as u64 / max_size as u64) as usize
}
