//! Component C: draws a random command valid at the current model state.

use std::fmt;
use std::rc::Rc;

use proptest::strategy::Strategy;
use proptest::test_runner::TestRunner;
use rand::distributions::{Distribution, WeightedIndex};
use tracing::{debug, trace};

use crate::command::DynCommandAdapter;
use crate::error::{Error, Result};
use crate::spec::Specification;

/// Bounded so a pathological `requires`/`generate_command` distribution
/// fails loudly (`Error::RetryBudgetExhausted`) instead of looping forever
/// — the spec assumes well-designed specs make this unreachable (§7).
const MAX_RETRIES: usize = 1000;

/// Pick one command satisfying `requires` at `state`.
///
/// Mirrors `radupopescu-proptest-stateful`'s own selection: uniform draw
/// via `rand::distributions::WeightedIndex` seeded from `runner.rng()`
/// (here with uniform weight 1 per applicable command, since the spec does
/// not ask for user-assigned weights in the default picker).
pub fn pick<S: Clone + fmt::Debug + 'static>(
    spec: &Specification<S>,
    state: &S,
    runner: &mut TestRunner,
) -> Result<Rc<dyn DynCommandAdapter<S>>> {
    if let Some(generate_command) = &spec.generate_command {
        for attempt in 0..MAX_RETRIES {
            let strategy = generate_command(state);
            let name = strategy.new_tree(runner)?.current();
            let Some(cmd) = spec.lookup(name) else {
                debug!(command = name, "generate_command produced an unknown command name");
                return Err(Error::NoCommandApplicable {
                    state_debug: format!("{state:?}"),
                });
            };
            if cmd.requires(state) {
                trace!(command = name, attempt, "picked command via generate_command");
                return Ok(cmd);
            }
            trace!(command = name, attempt, "requires() rejected candidate, retrying");
        }
        return Err(Error::RetryBudgetExhausted {
            state_debug: format!("{state:?}"),
            retries: MAX_RETRIES,
        });
    }

    let applicable: Vec<_> = spec
        .commands()
        .iter()
        .filter(|c| c.requires(state))
        .cloned()
        .collect();
    if applicable.is_empty() {
        debug!("no command satisfies requires() at this state");
        return Err(Error::NoCommandApplicable {
            state_debug: format!("{state:?}"),
        });
    }
    let weights = vec![1u32; applicable.len()];
    let idx = WeightedIndex::new(&weights)
        .map_err(|e| Error::Strategy(e.to_string()))?
        .sample(runner.rng());
    let chosen = &applicable[idx];
    trace!(command = chosen.name(), candidates = applicable.len(), "picked command uniformly");
    Ok(Rc::clone(chosen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandAdapter;
    use proptest::test_runner::Config;

    #[test]
    fn no_applicable_command_is_an_error() {
        let spec = Specification::<i32>::builder()
            .command(CommandAdapter::<i32>::no_args("never").requires(|_| false))
            .initial_state(|| 0)
            .build()
            .unwrap();
        let mut runner = TestRunner::new(Config::default());
        let err = pick(&spec, &0, &mut runner).unwrap_err();
        assert!(matches!(err, Error::NoCommandApplicable { .. }));
    }

    #[test]
    fn picks_the_only_applicable_command() {
        let spec = Specification::<i32>::builder()
            .command(CommandAdapter::<i32>::no_args("only"))
            .initial_state(|| 0)
            .build()
            .unwrap();
        let mut runner = TestRunner::new(Config::default());
        let cmd = pick(&spec, &0, &mut runner).unwrap();
        assert_eq!(cmd.name(), "only");
    }
}
