//! Error kinds raised by the generator and shrinker.
//!
//! Mirrors the "fail loudly, never guess" policy: the core never invents a
//! state, never inserts a no-op command, and never swallows a user callback
//! panic. See `spec.md` §7 for the policy this module implements.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors the generator/shrinker can raise.
///
/// `PreconditionRejection` from the spec is intentionally absent here: it is
/// a local, transparently-retried event and must never surface as an
/// `Error` (spec §7). `SuchThatExhaustion` is likewise absent: when the
/// well-formedness `prop_filter` rejects too many candidates in a row, that
/// surfaces as `proptest`'s own `TestCaseError::Reject`/`Reason` inside the
/// host's `TestRunner` — this crate has no boundary at which to intercept
/// that and re-wrap it, so it is not represented here.
#[derive(Debug, Error)]
pub enum Error {
    /// Zero commands satisfy `requires` at the given model state, or a
    /// `generate_command` strategy produced a name outside `commands`.
    #[error("no command applicable at state: {state_debug}")]
    NoCommandApplicable {
        /// `{state:?}` of the offending `ModelState`, captured for diagnosis.
        state_debug: String,
    },

    /// A `requires`/`precondition` distribution never stabilizes: the
    /// picker or `args_gen` kept producing rejected draws past the retry
    /// budget. The spec assumes well-designed specs make this unreachable;
    /// this variant exists so a buggy spec fails loudly instead of hanging.
    #[error("command selection did not converge after {retries} retries at state: {state_debug}")]
    RetryBudgetExhausted {
        state_debug: String,
        retries: usize,
    },

    /// `Options` described an unsupported configuration (e.g. more threads
    /// than the 26-letter handle alphabet can name).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A user-supplied `requires`/`args`/`precondition`/`next_state`
    /// closure's `args_gen` strategy could not produce a value (e.g. an
    /// empty `prop_oneof!` or a `prop_filter` that rejected everything).
    #[error("argument strategy failed: {0}")]
    Strategy(String),
}

impl From<proptest::test_runner::Reason> for Error {
    fn from(reason: proptest::test_runner::Reason) -> Self {
        Error::Strategy(reason.message().to_string())
    }
}
