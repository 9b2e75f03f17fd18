//! A stateful, concurrency-aware property test generator and shrinker.
//!
//! ## Overview
//!
//! Given a [`Specification`] — a model of a system under test made of named
//! commands, each with a model-state transition, an argument generator, a
//! precondition, and (outside this crate's scope) a postcondition — this
//! crate generates random [`Case`]s: a sequential prefix of commands
//! followed by zero or more parallel suffix threads. It also shrinks a
//! failing case down to a minimal one along five distinct axes, without
//! ever producing a case that isn't well-formed under every possible
//! thread interleaving.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use proptest::prelude::*;
//! use proptest::strategy::ValueTree;
//! use statecheck_core::{CommandAdapter, Options, Specification};
//!
//! let spec = Rc::new(
//!     Specification::<i64>::builder()
//!         .command(CommandAdapter::<i64, i64>::new("add", |_state| (0i64..10).boxed()))
//!         .initial_state(|| 0i64)
//!         .build()
//!         .unwrap(),
//! );
//!
//! let strategy = statecheck_core::generate(spec, Options::default());
//! let mut runner = proptest::test_runner::TestRunner::default();
//! let _case = strategy.new_tree(&mut runner).unwrap().current();
//! ```
//!
//! ## Architecture
//!
//! Generation and shrinking are built in seven layers, leaves first:
//!
//! 1. [`SymbolicValue`] — opaque result placeholders and resolvability.
//! 2. [`CommandAdapter`] — a uniform view of one user command.
//! 3. [`picker`] — draws a random command valid at a model state.
//! 4. [`gen`] — draws a shrinkable command sequence, then composes a
//!    sequential prefix with N parallel threads.
//! 5. [`shrink`] — the five-axis shrinker producing an explicit
//!    `RoseTree<Case>`.
//! 6. [`interleave`] — enumerates every topological interleaving and
//!    validates each against the model.
//! 7. [`strategy`] — wires all of the above into a single
//!    `proptest::strategy::Strategy<Value = Case>`.
//!
//! ## Key Types
//!
//! - [`SymbolicValue`]: a not-yet-resolved command result.
//! - [`CommandAdapter`] / [`Specification`]: how a system under test is
//!   described to this crate.
//! - [`Case`] / [`CommandCall`]: the generated/shrunk test case.
//! - [`Options`]: generation knobs (thread count, length/size bounds).
//! - [`Error`]: the crate's fail-loudly error type.

pub mod args;
pub mod case;
pub mod command;
pub mod error;
pub mod gen;
pub mod interleave;
pub mod picker;
pub mod shrink;
pub mod spec;
pub mod strategy;
pub mod symbolic;
pub mod tree;

pub use args::{CommandArgs, DynArgs};
pub use case::{thread_letter, Case, CommandCall};
pub use command::{CommandAdapter, DynCommandAdapter};
pub use error::{Error, Result};
pub use gen::{draw_case, draw_seq_tree, GenCase};
pub use interleave::{every_interleaving, is_well_formed, valid_sequence};
pub use picker::pick;
pub use shrink::shrink_case;
pub use spec::{MaxLength, Options, Specification, SpecificationBuilder, MAX_THREADS};
pub use strategy::generate;
pub use symbolic::{SymbolicValue, SETUP_HANDLE};
pub use tree::{RoseTree, TreeCursor};
