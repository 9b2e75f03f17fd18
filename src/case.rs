//! The composite test case: a sequential prefix plus N parallel threads
//! (§3, §4.E).

use std::fmt;
use std::rc::Rc;

use crate::args::DynArgs;
use crate::command::DynCommandAdapter;
use crate::symbolic::SymbolicValue;

/// One command invocation bound to a symbolic result handle.
#[derive(Clone)]
pub struct CommandCall<S> {
    pub handle: SymbolicValue,
    pub command: Rc<dyn DynCommandAdapter<S>>,
    pub args: Box<dyn DynArgs>,
}

impl<S> fmt::Debug for CommandCall<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}({:?})", self.handle, self.command.name(), self.args)
    }
}

/// The test case emitted to a caller: concrete (no shrink trees), matching
/// §6's "emitted Case" shape exactly.
#[derive(Clone, Debug)]
pub struct Case<S> {
    pub sequential: Vec<CommandCall<S>>,
    pub parallel: Vec<Vec<CommandCall<S>>>,
}

impl<S> Case<S> {
    pub fn total_len(&self) -> usize {
        self.sequential.len() + self.parallel.iter().map(Vec::len).sum::<usize>()
    }
}

/// The standard alphabet used to name parallel-thread handles (`"1a"`,
/// `"2a"`, `"1b"`, ...): thread 0 is `a`, thread 1 is `b`, and so on, capped
/// at [`crate::spec::MAX_THREADS`].
pub fn thread_letter(thread_index: usize) -> char {
    (b'a' + thread_index as u8) as char
}
