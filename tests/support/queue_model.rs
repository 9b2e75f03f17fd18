//! A push/pop queue model, used by the scenario tests (§8 scenario 4: a
//! shrinker finding a parallel `push`/`pop` race). Test support only, not a
//! shipped feature (SPEC_FULL.md, Supplemented Features #2).

use std::collections::VecDeque;
use std::rc::Rc;

use proptest::strategy::{Just, Strategy};

use statecheck_core::{CommandAdapter, Options, Specification};

/// The model state: the queue's contents, oldest element first.
pub type QueueModel = VecDeque<i64>;

pub fn spec() -> Rc<Specification<QueueModel>> {
    Rc::new(
        Specification::builder()
            .command(
                CommandAdapter::<QueueModel, i64>::new("push", |_state| (0i64..100).boxed())
                    .next_state(|state, value, _handle| {
                        let mut next = state.clone();
                        next.push_back(*value);
                        next
                    }),
            )
            .command(
                CommandAdapter::<QueueModel, ()>::new("pop", |_state| Just(()).boxed())
                    .precondition(|state, ()| !state.is_empty())
                    .next_state(|state, (), _handle| {
                        let mut next = state.clone();
                        next.pop_front();
                        next
                    }),
            )
            .initial_state(QueueModel::new)
            .build()
            .expect("queue_model spec is well-formed"),
    )
}

pub fn options(threads: usize) -> Options {
    Options::default().with_threads(threads)
}
