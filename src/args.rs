//! Type erasure for per-command argument types.
//!
//! Every command in a spec can have its own argument shape, so the picker
//! and shrinker — which must treat all commands uniformly — operate over
//! `Box<dyn DynArgs>` rather than a single concrete type. This mirrors how
//! `radupopescu-proptest-stateful` erases its `SM::Command` behind a single
//! associated type, except here each *command* contributes its own args
//! type rather than the whole spec sharing one enum.

use std::any::Any;
use std::fmt;

use crate::symbolic::SymbolicValue;

/// Marker trait for a command's argument type.
///
/// Implement [`symbolic_refs`](CommandArgs::symbolic_refs) whenever a
/// command's arguments embed [`SymbolicValue`] placeholders (e.g. "pop the
/// queue whose handle was returned by command `$1`"); the default is
/// correct for commands whose arguments are always concrete.
pub trait CommandArgs: fmt::Debug + Clone + 'static {
    /// Symbolic handles this argument value refers to, for invariant I3
    /// ("resolvable against bindings produced by commands earlier in every
    /// interleaving being checked").
    fn symbolic_refs(&self) -> Vec<SymbolicValue> {
        Vec::new()
    }
}

impl CommandArgs for () {}
impl CommandArgs for bool {}
impl CommandArgs for i32 {}
impl CommandArgs for i64 {}
impl CommandArgs for u32 {}
impl CommandArgs for u64 {}
impl CommandArgs for usize {}
impl CommandArgs for String {}

/// Object-safe, erased view of a [`CommandArgs`] value.
pub trait DynArgs: fmt::Debug {
    fn symbolic_refs(&self) -> Vec<SymbolicValue>;
    fn clone_box(&self) -> Box<dyn DynArgs>;
    fn as_any(&self) -> &dyn Any;
}

impl<A: CommandArgs> DynArgs for A {
    fn symbolic_refs(&self) -> Vec<SymbolicValue> {
        CommandArgs::symbolic_refs(self)
    }

    fn clone_box(&self) -> Box<dyn DynArgs> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Clone for Box<dyn DynArgs> {
    fn clone(&self) -> Self {
        self.as_ref().clone_box()
    }
}

impl dyn DynArgs {
    /// Recover the concrete `A` a [`crate::command::CommandAdapter<S, A>`]
    /// boxed. Panics only if a `CommandCall` is paired with the wrong
    /// adapter, which would be an internal bug, not a user error.
    pub fn downcast_ref<A: CommandArgs>(&self) -> &A {
        self.as_any()
            .downcast_ref::<A>()
            .expect("CommandCall args type did not match its command adapter")
    }
}
