//! Generic hierarchical state machine engine: function-pointer-per-state
//! dispatch with a static parent lookup, mirroring
//! `az_mqtt5_rpc_server_hfsm.c`'s `root`/`subscribing`/`waiting` +
//! `_get_parent` shape (Design Note 9.2) but parameterized over any
//! application's state enum instead of being hand-written per machine.

use az_core::CoreError;

use crate::event::Event;

/// What a state handler did with the event it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event is fully handled; dispatch stops here.
    Handled,
    /// Not handled by this state; bubble to its parent.
    Bubble,
}

pub type StateFn<M> = fn(&mut M, &Event) -> Result<Outcome, CoreError>;

/// Implemented by the application's state machine type. `State` is
/// typically a plain `enum`; `handler`/`parent` are static lookups, so
/// there is no per-instance dispatch table to build or keep in sync.
pub trait StateMachine: Sized {
    type State: Copy + Eq + std::fmt::Debug;

    fn initial() -> Self::State;
    fn handler(state: Self::State) -> StateFn<Self>;
    fn parent(state: Self::State) -> Option<Self::State>;
}

/// Drives a [`StateMachine`]: holds the current leaf state and performs
/// event dispatch (with bubbling) and transitions (with exit/entry
/// actions run from the leaf up to, and down from, the lowest common
/// ancestor).
pub struct Hfsm<M: StateMachine> {
    current: M::State,
}

impl<M: StateMachine> Hfsm<M> {
    pub fn new() -> Self {
        Hfsm {
            current: M::initial(),
        }
    }

    pub const fn current(&self) -> M::State {
        self.current
    }

    /// Delivers `event` to the current leaf state; if it returns
    /// [`Outcome::Bubble`], tries the parent, and so on up to root. An
    /// event unhandled even by root is silently dropped — root's contract
    /// is to decide what "unhandled" means for its own event kinds (e.g.
    /// forwarding `Error`), not for this engine to treat it as a bug.
    ///
    /// Per spec §5, the HFSM is not re-entrant: a state handler must not
    /// call `dispatch` again from within its own invocation.
    pub fn dispatch(&self, machine: &mut M, event: &Event) -> Result<(), CoreError> {
        let mut state = self.current;
        loop {
            match (M::handler(state))(machine, event)? {
                Outcome::Handled => {
                    tracing::debug!(?state, event = ?event.kind, "event handled");
                    return Ok(());
                }
                Outcome::Bubble => match M::parent(state) {
                    Some(parent) => state = parent,
                    None => {
                        tracing::debug!(event = ?event.kind, "event unhandled, dropped at root");
                        return Ok(());
                    }
                },
            }
        }
    }

    /// Transitions to `target`: runs `Exit` from the current state up to
    /// (not including) the lowest common ancestor with `target`, then
    /// `Entry` from just below that ancestor down to `target`.
    pub fn transition(&mut self, machine: &mut M, target: M::State) -> Result<(), CoreError> {
        tracing::debug!(from = ?self.current, to = ?target, "state transition");
        let from_chain = ancestors(self.current);
        let to_chain = ancestors(target);

        let lca_index_in_to = from_chain
            .iter()
            .find_map(|s| to_chain.iter().position(|t| t == s));

        let exit_count = match lca_index_in_to {
            Some(_) => from_chain
                .iter()
                .position(|s| to_chain.contains(s))
                .unwrap_or(from_chain.len()),
            None => from_chain.len(),
        };
        for state in &from_chain[..exit_count] {
            (M::handler(*state))(machine, &Event::exit())?;
        }

        let entry_count = match lca_index_in_to {
            Some(idx) => idx,
            None => to_chain.len(),
        };
        for state in to_chain[..entry_count].iter().rev() {
            (M::handler(*state))(machine, &Event::entry())?;
        }

        self.current = target;
        Ok(())
    }
}

impl<M: StateMachine> Default for Hfsm<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// `state`, then its parent, then its parent's parent, ... ending at the
/// root (whose `parent()` is `None`).
fn ancestors<M: StateMachine>(state: M::State) -> Vec<M::State> {
    let mut chain = vec![state];
    let mut current = state;
    while let Some(parent) = M::parent(current) {
        chain.push(parent);
        current = parent;
    }
    chain
}
