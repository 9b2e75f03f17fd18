//! Wires components D–G into one `proptest::strategy::Strategy`.
//!
//! This is the crate's single public entry point: `generate(spec, options)`
//! returns `impl Strategy<Value = Case<S>>`, so a caller writes
//! `proptest! { #[test] fn prop(case in generate(spec.clone(), opts)) { ... } }`
//! exactly as they would for any other `proptest` strategy — matching the
//! "Design decision: built on proptest" in SPEC_FULL.md.

use std::fmt;
use std::rc::Rc;

use proptest::strategy::{NewTree, Strategy, ValueTree};
use proptest::test_runner::TestRunner;
use rand::Rng;
use tracing::trace;

use crate::case::Case;
use crate::gen::draw_case;
use crate::interleave::is_well_formed;
use crate::shrink::shrink_case;
use crate::spec::{Options, Specification};
use crate::symbolic::SymbolicValue;
use crate::tree::TreeCursor;

pub struct CaseValueTree<S> {
    cursor: TreeCursor<Case<S>>,
}

impl<S: Clone + fmt::Debug + 'static> ValueTree for CaseValueTree<S> {
    type Value = Case<S>;

    fn current(&self) -> Self::Value {
        self.cursor.current()
    }

    fn simplify(&mut self) -> bool {
        self.cursor.simplify()
    }

    fn complicate(&mut self) -> bool {
        self.cursor.complicate()
    }
}

struct CaseStrategy<S> {
    spec: Rc<Specification<S>>,
    options: Options,
}

impl<S> fmt::Debug for CaseStrategy<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseStrategy").finish_non_exhaustive()
    }
}

impl<S: Clone + fmt::Debug + 'static> Strategy for CaseStrategy<S> {
    type Tree = CaseValueTree<S>;
    type Value = Case<S>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        self.options
            .validate()
            .map_err(|e| proptest::test_runner::Reason::from(e.to_string()))?;
        let size = runner.rng().gen_range(1..=self.options.max_size.max(1));
        let gen_case = draw_case(&self.spec, &self.options, size, runner)
            .map_err(|e| proptest::test_runner::Reason::from(e.to_string()))?;
        Ok(CaseValueTree {
            cursor: TreeCursor::new(shrink_case(gen_case)),
        })
    }
}

fn initial_state<S: Clone>(spec: &Specification<S>) -> S {
    let handle = spec.has_setup().then(SymbolicValue::setup);
    spec.initial_state(handle.as_ref())
}

/// The crate's entry point (§2 data flow: Picker → SequenceTreeGen →
/// ParallelCaseGen → Shrinker → well-formedness filter → test case).
///
/// The returned strategy both generates and shrinks `Case<S>` values;
/// every value it ever yields — generated or shrunk — has already passed
/// [`is_well_formed`] against every topological interleaving.
pub fn generate<S: Clone + fmt::Debug + 'static>(
    spec: Rc<Specification<S>>,
    options: Options,
) -> impl Strategy<Value = Case<S>> {
    let state0 = initial_state(&spec);
    let filter_spec = Rc::clone(&spec);
    CaseStrategy { spec, options }.prop_filter("well-formed case", move |case| {
        let well_formed = is_well_formed(&filter_spec, case, &state0);
        if !well_formed {
            trace!(total_len = case.total_len(), "rejected ill-formed candidate");
        }
        well_formed
    })
}
