//! §6 external interfaces: the `Specification` a user assembles, and the
//! `Options` controlling generation.

use std::collections::HashMap;
use std::rc::Rc;

use proptest::strategy::BoxedStrategy;

use crate::args::CommandArgs;
use crate::command::{CommandAdapter, DynCommandAdapter};
use crate::error::{Error, Result};
use crate::symbolic::SymbolicValue;

type InitialStateFn<S> = Rc<dyn Fn(Option<&SymbolicValue>) -> S>;
type GenerateCommandFn<S> = Rc<dyn Fn(&S) -> BoxedStrategy<&'static str>>;

/// A fully assembled model of the system under test: its commands, its
/// initial state (optionally seeded by a `setup` handle), and an optional
/// custom command-selection strategy.
pub struct Specification<S> {
    commands: Vec<Rc<dyn DynCommandAdapter<S>>>,
    by_name: HashMap<&'static str, usize>,
    initial_state: InitialStateFn<S>,
    pub(crate) has_setup: bool,
    pub(crate) generate_command: Option<GenerateCommandFn<S>>,
}

impl<S: Clone + 'static> Specification<S> {
    pub fn builder() -> SpecificationBuilder<S> {
        SpecificationBuilder::new()
    }

    pub fn commands(&self) -> &[Rc<dyn DynCommandAdapter<S>>] {
        &self.commands
    }

    pub fn lookup(&self, name: &str) -> Option<Rc<dyn DynCommandAdapter<S>>> {
        self.by_name.get(name).map(|&i| Rc::clone(&self.commands[i]))
    }

    pub fn has_setup(&self) -> bool {
        self.has_setup
    }

    /// The model state before any command runs — after `setup`'s handle
    /// (if declared) has been bound, per the `Case` lifecycle note in §3.
    pub fn initial_state(&self, setup_handle: Option<&SymbolicValue>) -> S {
        (self.initial_state)(setup_handle)
    }
}

/// Builder for [`Specification`], in the style of the teacher's
/// configuration-object builders (chained `with_*`-shaped methods, a
/// terminal `build`).
pub struct SpecificationBuilder<S> {
    commands: Vec<Rc<dyn DynCommandAdapter<S>>>,
    by_name: HashMap<&'static str, usize>,
    initial_state: Option<InitialStateFn<S>>,
    has_setup: bool,
    generate_command: Option<GenerateCommandFn<S>>,
}

impl<S: Clone + 'static> Default for SpecificationBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + 'static> SpecificationBuilder<S> {
    pub fn new() -> Self {
        SpecificationBuilder {
            commands: Vec::new(),
            by_name: HashMap::new(),
            initial_state: None,
            has_setup: false,
            generate_command: None,
        }
    }

    /// Register a command. Panics on a duplicate name — a spec wiring bug,
    /// not a runtime condition a caller should handle.
    pub fn command<A: CommandArgs>(mut self, adapter: CommandAdapter<S, A>) -> Self {
        let name = <CommandAdapter<S, A> as DynCommandAdapter<S>>::name(&adapter);
        let idx = self.commands.len();
        if self.by_name.insert(name, idx).is_some() {
            panic!("duplicate command name: {name}");
        }
        self.commands.push(Rc::new(adapter));
        self
    }

    /// A plain initial state, independent of any `setup` command.
    pub fn initial_state(mut self, f: impl Fn() -> S + 'static) -> Self {
        self.initial_state = Some(Rc::new(move |_| f()));
        self.has_setup = false;
        self
    }

    /// An initial state derived from `setup`'s symbolic result handle.
    /// Declaring this marks the spec as having a `setup` command, whose
    /// handle is named [`crate::symbolic::SETUP_HANDLE`] and is bound
    /// before command generation begins (§3, §9 "symbolic values").
    pub fn initial_state_with_setup(mut self, f: impl Fn(&SymbolicValue) -> S + 'static) -> Self {
        self.initial_state = Some(Rc::new(move |handle| {
            f(handle.expect("setup handle must be bound before initial_state_with_setup runs"))
        }));
        self.has_setup = true;
        self
    }

    /// Override the default (uniform-over-`requires`-satisfying-commands)
    /// command selection with a user-supplied `generate-command` strategy
    /// over command names (§4.C, §9).
    pub fn generate_command(mut self, f: impl Fn(&S) -> BoxedStrategy<&'static str> + 'static) -> Self {
        self.generate_command = Some(Rc::new(f));
        self
    }

    pub fn build(self) -> Result<Specification<S>> {
        let initial_state = self
            .initial_state
            .ok_or_else(|| Error::Config("Specification requires initial_state".to_string()))?;
        if self.commands.is_empty() {
            return Err(Error::Config("Specification requires at least one command".to_string()));
        }
        Ok(Specification {
            commands: self.commands,
            by_name: self.by_name,
            initial_state,
            has_setup: self.has_setup,
            generate_command: self.generate_command,
        })
    }
}

/// The `{sequential, parallel}` split of §4.E, or a single bound applied to
/// both (the common case).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaxLength {
    Uniform(usize),
    Split { sequential: usize, parallel: usize },
}

impl MaxLength {
    pub fn sequential(self) -> usize {
        match self {
            MaxLength::Uniform(n) => n,
            MaxLength::Split { sequential, .. } => sequential,
        }
    }

    pub fn parallel(self) -> usize {
        match self {
            MaxLength::Uniform(n) => n,
            MaxLength::Split { parallel, .. } => parallel,
        }
    }
}

/// Generation knobs (§6). `threads: 0` means a purely sequential case.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    pub threads: usize,
    pub max_length: MaxLength,
    pub max_size: u32,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            threads: 0,
            max_length: MaxLength::Uniform(10),
            max_size: 200,
        }
    }
}

/// The 26-letter alphabet available for naming parallel-thread handles
/// (§9 open question, resolved in SPEC_FULL.md's Open Question Decisions).
pub const MAX_THREADS: usize = 26;

impl Options {
    pub fn validate(&self) -> Result<()> {
        if self.threads > MAX_THREADS {
            return Err(Error::Config(format!(
                "threads ({}) exceeds the {MAX_THREADS}-letter handle alphabet",
                self.threads
            )));
        }
        Ok(())
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_max_length(mut self, max_length: MaxLength) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }
}
