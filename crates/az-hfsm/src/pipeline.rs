//! Policy pipeline (spec §4.6/§5): outbound events travel from the
//! application toward the transport, inbound events travel the reverse
//! direction. Policies are visited in registration order outbound and
//! reverse order inbound, each able to stop propagation early.

use az_core::CoreError;

use crate::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyResult {
    /// Pass the event on to the next policy in the chain.
    Continue,
    /// This policy fully handled the event; stop here.
    Stop,
}

/// One link in the pipeline. `Ctx` is whatever shared context the
/// application's policies need (e.g. a connection handle); the pipeline
/// itself is transport-agnostic.
pub trait Policy<Ctx> {
    fn outbound(&mut self, ctx: &mut Ctx, event: &Event) -> Result<PolicyResult, CoreError>;
    fn inbound(&mut self, ctx: &mut Ctx, event: &Event) -> Result<PolicyResult, CoreError>;
}

/// An ordered chain of policies. Index 0 is closest to the application;
/// the last policy is closest to the transport.
pub struct Pipeline<Ctx> {
    policies: Vec<Box<dyn Policy<Ctx>>>,
}

impl<Ctx> Pipeline<Ctx> {
    pub fn new() -> Self {
        Pipeline {
            policies: Vec::new(),
        }
    }

    pub fn push(&mut self, policy: Box<dyn Policy<Ctx>>) {
        self.policies.push(policy);
    }

    /// Application → transport.
    pub fn dispatch_outbound(&mut self, ctx: &mut Ctx, event: &Event) -> Result<(), CoreError> {
        for policy in self.policies.iter_mut() {
            if policy.outbound(ctx, event)? == PolicyResult::Stop {
                break;
            }
        }
        Ok(())
    }

    /// Transport → application.
    pub fn dispatch_inbound(&mut self, ctx: &mut Ctx, event: &Event) -> Result<(), CoreError> {
        for policy in self.policies.iter_mut().rev() {
            if policy.inbound(ctx, event)? == PolicyResult::Stop {
                break;
            }
        }
        Ok(())
    }
}

impl<Ctx> Default for Pipeline<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventData, EventKind};

    struct CountingPolicy {
        label: &'static str,
    }

    impl Policy<Vec<&'static str>> for CountingPolicy {
        fn outbound(
            &mut self,
            ctx: &mut Vec<&'static str>,
            _event: &Event,
        ) -> Result<PolicyResult, CoreError> {
            ctx.push(self.label);
            Ok(PolicyResult::Continue)
        }

        fn inbound(
            &mut self,
            ctx: &mut Vec<&'static str>,
            _event: &Event,
        ) -> Result<PolicyResult, CoreError> {
            ctx.push(self.label);
            Ok(PolicyResult::Continue)
        }
    }

    #[test]
    fn outbound_visits_in_registration_order() {
        let mut pipeline: Pipeline<Vec<&'static str>> = Pipeline::new();
        pipeline.push(Box::new(CountingPolicy { label: "first" }));
        pipeline.push(Box::new(CountingPolicy { label: "second" }));
        let mut ctx = Vec::new();
        pipeline
            .dispatch_outbound(&mut ctx, &Event::new(EventKind::SubReq, EventData::None))
            .unwrap();
        assert_eq!(ctx, vec!["first", "second"]);
    }

    #[test]
    fn inbound_visits_in_reverse_order() {
        let mut pipeline: Pipeline<Vec<&'static str>> = Pipeline::new();
        pipeline.push(Box::new(CountingPolicy { label: "first" }));
        pipeline.push(Box::new(CountingPolicy { label: "second" }));
        let mut ctx = Vec::new();
        pipeline
            .dispatch_inbound(&mut ctx, &Event::new(EventKind::PubRecvInd, EventData::None))
            .unwrap();
        assert_eq!(ctx, vec!["second", "first"]);
    }

    struct StoppingPolicy;

    impl Policy<Vec<&'static str>> for StoppingPolicy {
        fn outbound(
            &mut self,
            _ctx: &mut Vec<&'static str>,
            _event: &Event,
        ) -> Result<PolicyResult, CoreError> {
            Ok(PolicyResult::Stop)
        }

        fn inbound(
            &mut self,
            _ctx: &mut Vec<&'static str>,
            _event: &Event,
        ) -> Result<PolicyResult, CoreError> {
            Ok(PolicyResult::Stop)
        }
    }

    #[test]
    fn stop_result_short_circuits_remaining_policies() {
        let mut pipeline: Pipeline<Vec<&'static str>> = Pipeline::new();
        pipeline.push(Box::new(StoppingPolicy));
        pipeline.push(Box::new(CountingPolicy { label: "never-runs" }));
        let mut ctx = Vec::new();
        pipeline
            .dispatch_outbound(&mut ctx, &Event::new(EventKind::SubReq, EventData::None))
            .unwrap();
        assert!(ctx.is_empty());
    }
}
