//! One `#[test]` per named scenario (§8), in the teacher's convention of a
//! dedicated scenario file alongside the property-test file.

mod support;

use std::rc::Rc;

use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::TestRunner;

use statecheck_core::{
    every_interleaving, shrink_case, CommandAdapter, CommandCall, GenCase, MaxLength, Options,
    RoseTree, Specification, SymbolicValue,
};

/// Scenario 1: a spec with a single always-applicable, no-op command never
/// produces anything longer than the sequence bound, and is always
/// well-formed.
#[test]
fn single_command_noop_case_is_well_formed() {
    let spec = Rc::new(
        Specification::<i32>::builder()
            .command(CommandAdapter::<i32>::no_args("noop"))
            .initial_state(|| 0)
            .build()
            .unwrap(),
    );
    let options = Options::default().with_max_length(MaxLength::Uniform(1));
    let strategy = statecheck_core::generate(spec, options);
    let mut runner = TestRunner::default();
    for _ in 0..20 {
        let case = strategy.new_tree(&mut runner).unwrap().current();
        assert!(case.total_len() <= 1);
    }
}

/// Scenario 2: a spec with `setup` binds the `setup` handle before any
/// command's `requires`/`precondition` runs.
#[test]
fn setup_handle_is_bound_before_generation() {
    let spec = Rc::new(
        Specification::<i64>::builder()
            .command(
                CommandAdapter::<i64, i64>::new("add", |_state| (0i64..5).boxed())
                    .next_state(|state, value, _handle| state + value),
            )
            .initial_state_with_setup(|handle| {
                assert_eq!(handle.name(), "setup");
                0i64
            })
            .build()
            .unwrap(),
    );
    assert!(spec.has_setup());
    let options = Options::default().with_max_length(MaxLength::Uniform(3));
    let strategy = statecheck_core::generate(spec, options);
    let mut runner = TestRunner::default();
    let _case = strategy.new_tree(&mut runner).unwrap().current();
}

/// Scenario 3: two threads of length two have exactly `(2*2)! / (2!)^2 = 6`
/// topological interleavings.
#[test]
fn two_threads_of_length_two_have_six_interleavings() {
    fn call(handle: &str) -> CommandCall<i32> {
        let command: Rc<dyn statecheck_core::DynCommandAdapter<i32>> =
            Rc::new(CommandAdapter::<i32>::no_args("noop"));
        CommandCall {
            handle: SymbolicValue::new_root(handle),
            command,
            args: Box::new(()),
        }
    }

    let threads = vec![
        vec![call("1a"), call("2a")],
        vec![call("1b"), call("2b")],
    ];
    let all: Vec<_> = every_interleaving(Vec::new(), threads).collect();
    assert_eq!(all.len(), 6);
    for interleaving in &all {
        assert_eq!(interleaving.len(), 4);
    }
}

/// Scenario 4: a concurrent push/pop queue case is always well-formed —
/// every generated race is one a real queue could actually observe.
#[test]
fn queue_push_pop_cases_are_well_formed() {
    let spec = support::queue_model::spec();
    let options = support::queue_model::options(2);
    let strategy = statecheck_core::generate(spec, options);
    let mut runner = TestRunner::default();
    for _ in 0..50 {
        let tree = strategy.new_tree(&mut runner).unwrap();
        let case = tree.current();
        assert!(case.parallel.len() <= 2);
    }
}

/// Scenario 5: pulling a thread's head command into the prefix is offered
/// as a shrink candidate, and shrinks the thread while growing the prefix
/// by exactly one.
#[test]
fn shrinker_offers_pull_into_prefix_move() {
    fn leaf(handle: &str) -> RoseTree<CommandCall<i32>> {
        let command: Rc<dyn statecheck_core::DynCommandAdapter<i32>> =
            Rc::new(CommandAdapter::<i32>::no_args("noop"));
        RoseTree::singleton(CommandCall {
            handle: SymbolicValue::new_root(handle),
            command,
            args: Box::new(()),
        })
    }

    let gen = GenCase {
        sequential: vec![leaf("1")],
        parallel: vec![vec![leaf("1a"), leaf("2a")]],
    };
    let tree = shrink_case(gen);
    let children = tree.shrinks();
    let pulled = children
        .iter()
        .find(|c| c.value().sequential.len() == 2 && c.value().parallel[0].len() == 1)
        .expect("pull-into-prefix candidate must be present");
    assert_eq!(pulled.value().sequential[1].handle.name(), "1a");
}

/// Scenario 6: a spec whose sole command is never `requires`-applicable
/// fails loudly with `NoCommandApplicable` rather than silently emitting an
/// empty case. Drives `pick()` directly rather than `draw_case`: the
/// sequence generator's weighted stop/continue roll (§4.D) can legitimately
/// stop before drawing any command at all, which would make this case
/// flaky if it went through `draw_case`/`Options::max_length` instead.
#[test]
fn unsatisfiable_requires_is_a_fatal_error() {
    let spec = Specification::<i32>::builder()
        .command(CommandAdapter::<i32>::no_args("never").requires(|_| false))
        .initial_state(|| 0)
        .build()
        .unwrap();
    let mut runner = TestRunner::default();
    let err = statecheck_core::pick(&spec, &0, &mut runner).unwrap_err();
    assert!(matches!(err, statecheck_core::Error::NoCommandApplicable { .. }));
}
