// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Readiness gate for the cache.
//!
//! Implements the lifecycle: NotReady → Ready → NotReady.
//! Transitions use compare-and-set so racing `start`/`stop` calls apply once.
//! The gate is advisory: tables stay fully operable in either state.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Cache lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessState {
    /// Initial state, and the state after shutdown.
    NotReady,

    /// The cache has been started and collaborators may trust it.
    Ready,
}

impl ReadinessState {
    /// Get the state name for log records.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NotReady => "NotReady",
            Self::Ready => "Ready",
        }
    }

    const fn as_u8(self) -> u8 {
        match self {
            Self::NotReady => 0,
            Self::Ready => 1,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Ready,
            _ => Self::NotReady,
        }
    }
}

impl std::fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lock-free readiness flag.
#[derive(Debug)]
pub struct Readiness {
    state: AtomicU8,
    transition_count: AtomicU64,
}

impl Readiness {
    /// Create a gate in the `NotReady` state.
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(ReadinessState::NotReady.as_u8()),
            transition_count: AtomicU64::new(0),
        }
    }

    /// Get the current state.
    pub fn state(&self) -> ReadinessState {
        ReadinessState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Non-blocking readiness check for health checks and API gatekeeping.
    pub fn is_ready(&self) -> bool {
        self.state() == ReadinessState::Ready
    }

    /// Get total number of applied transitions.
    pub fn transition_count(&self) -> u64 {
        self.transition_count.load(Ordering::Relaxed)
    }

    /// Mark the cache ready. Returns false if it already was.
    pub fn start(&self) -> bool {
        let applied = self.transition(ReadinessState::NotReady, ReadinessState::Ready);
        if applied {
            tracing::info!("Karavan cache is started");
        }
        applied
    }

    /// Mark the cache not ready. Returns false if it already was.
    pub fn stop(&self) -> bool {
        let applied = self.transition(ReadinessState::Ready, ReadinessState::NotReady);
        if applied {
            tracing::info!("Karavan cache is stopped");
        }
        applied
    }

    fn transition(&self, from: ReadinessState, to: ReadinessState) -> bool {
        let applied = self
            .state
            .compare_exchange(from.as_u8(), to.as_u8(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok();

        if applied {
            self.transition_count.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(from = from.name(), to = to.name(), "Readiness transition");
        }
        applied
    }
}

impl Default for Readiness {
    fn default() -> Self {
        Self::new()
    }
}
