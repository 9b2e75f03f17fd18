//! Component B: a uniform view over a user-defined command.

use std::fmt;
use std::rc::Rc;

use proptest::strategy::{BoxedStrategy, Just, Strategy};

use crate::args::{CommandArgs, DynArgs};
use crate::symbolic::SymbolicValue;

type RequiresFn<S> = Rc<dyn Fn(&S) -> bool>;
type ArgsFn<S, A> = Rc<dyn Fn(&S) -> BoxedStrategy<A>>;
type PreconditionFn<S, A> = Rc<dyn Fn(&S, &A) -> bool>;
type NextStateFn<S, A> = Rc<dyn Fn(&S, &A, &SymbolicValue) -> S>;

/// A single named command, built from the four fields §4.B describes:
/// `requires`, `args`, `precondition`, `next_state`. Defaults match the
/// spec exactly — `requires` always true, `args` an empty-tuple generator,
/// `precondition` always true, `next_state` the identity.
pub struct CommandAdapter<S, A: CommandArgs = ()> {
    name: &'static str,
    requires: RequiresFn<S>,
    args: ArgsFn<S, A>,
    precondition: PreconditionFn<S, A>,
    next_state: NextStateFn<S, A>,
}

impl<S: Clone + 'static> CommandAdapter<S, ()> {
    /// A command with no arguments, useful for commands whose only effect
    /// is the state transition (e.g. `reset`).
    pub fn no_args(name: &'static str) -> Self {
        CommandAdapter::new(name, |_state: &S| Just(()).boxed())
    }
}

impl<S: Clone + 'static, A: CommandArgs> CommandAdapter<S, A> {
    pub fn new(name: &'static str, args: impl Fn(&S) -> BoxedStrategy<A> + 'static) -> Self {
        CommandAdapter {
            name,
            requires: Rc::new(|_| true),
            args: Rc::new(args),
            precondition: Rc::new(|_, _| true),
            next_state: Rc::new(|state, _, _| state.clone()),
        }
    }

    pub fn requires(mut self, f: impl Fn(&S) -> bool + 'static) -> Self {
        self.requires = Rc::new(f);
        self
    }

    pub fn precondition(mut self, f: impl Fn(&S, &A) -> bool + 'static) -> Self {
        self.precondition = Rc::new(f);
        self
    }

    pub fn next_state(mut self, f: impl Fn(&S, &A, &SymbolicValue) -> S + 'static) -> Self {
        self.next_state = Rc::new(f);
        self
    }
}

/// Object-safe view of a [`CommandAdapter`], used so the picker and
/// shrinker can hold commands of differing argument types in one list.
pub trait DynCommandAdapter<S> {
    fn name(&self) -> &'static str;
    fn requires(&self, state: &S) -> bool;
    fn args_strategy(&self, state: &S) -> BoxedStrategy<Box<dyn DynArgs>>;
    fn precondition(&self, state: &S, args: &dyn DynArgs) -> bool;
    fn next_state(&self, state: &S, args: &dyn DynArgs, handle: &SymbolicValue) -> S;
}

impl<S: Clone + 'static, A: CommandArgs> DynCommandAdapter<S> for CommandAdapter<S, A> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn requires(&self, state: &S) -> bool {
        (self.requires)(state)
    }

    fn args_strategy(&self, state: &S) -> BoxedStrategy<Box<dyn DynArgs>> {
        (self.args)(state)
            .prop_map(|a| Box::new(a) as Box<dyn DynArgs>)
            .boxed()
    }

    fn precondition(&self, state: &S, args: &dyn DynArgs) -> bool {
        (self.precondition)(state, args.downcast_ref::<A>())
    }

    fn next_state(&self, state: &S, args: &dyn DynArgs, handle: &SymbolicValue) -> S {
        (self.next_state)(state, args.downcast_ref::<A>(), handle)
    }
}

impl<S> fmt::Debug for dyn DynCommandAdapter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("name", &self.name()).finish()
    }
}
