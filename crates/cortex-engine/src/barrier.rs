//! Phase barriers separating the compute, inject, and extract phases.
//!
//! A [`PhaseBarrier`] blocks until every participating worker has arrived
//! and then tells exactly one of them that it is the leader. The parallel
//! engine uses [`std::sync::Barrier`]; the sequential engine uses
//! [`NoopBarrier`], whose single caller is always the leader.

use std::sync::{Arc, Barrier};

/// A reusable cyclic barrier that reports a single leader per generation.
pub trait PhaseBarrier {
    /// Wait for all participants. Returns `true` for exactly one of them.
    fn wait(&self) -> bool;
}

impl PhaseBarrier for Barrier {
    #[inline]
    fn wait(&self) -> bool {
        Barrier::wait(self).is_leader()
    }
}

impl<B: PhaseBarrier + ?Sized> PhaseBarrier for Arc<B> {
    #[inline]
    fn wait(&self) -> bool {
        (**self).wait()
    }
}

/// Barrier for a single participant: never blocks, always leads.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopBarrier;

impl PhaseBarrier for NoopBarrier {
    #[inline]
    fn wait(&self) -> bool {
        true
    }
}
