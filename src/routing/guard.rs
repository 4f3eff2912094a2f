//! Build-once gate for the route table.
//!
//! # State Machine
//! ```text
//! EMPTY ──first query──▶ BUILDING ──ok──▶ READY
//!   ▲                       │
//!   └────────error──────────┘
//! ```
//!
//! # Design Decisions
//! - The installed table lives in an `ArcSwapOption`; READY reads never lock
//! - A std mutex guards only the EMPTY → BUILDING transition and is never
//!   held across an await
//! - The in-flight build is a shared future: every concurrent caller awaits
//!   the same build and receives the same result, success or error
//! - The build installs its own result, so it completes even if the caller
//!   that started it is cancelled; any later caller resumes driving it
//! - Every started build carries an epoch. `reset` and `rebuild` bump it, which
//!   detaches the build in flight: its waiters still get its result, but it no
//!   longer installs anything
//! - Panics in the build are caught and reported as a build error, the state
//!   always returns to idle

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

use arc_swap::ArcSwapOption;
use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::observability::metrics;
use crate::routing::error::{BuildError, RoutingError, RoutingResult, SourceError};
use crate::routing::table::RouteTable;

type PendingBuild = Shared<BoxFuture<'static, RoutingResult<Arc<RouteTable>>>>;

/// Observable lifecycle state of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    /// No table installed and no build running.
    Empty,
    /// A build is in flight. A previous table may still be serving reads.
    Building,
    /// A table is installed and no build is running.
    Ready,
}

enum BuildState {
    Idle,
    Building(PendingBuild),
}

struct Gate {
    build: BuildState,
    /// Identifies the only build allowed to install its result.
    epoch: u64,
}

/// Holds the installed table and serializes builds.
pub struct TableGuard {
    slot: ArcSwapOption<RouteTable>,
    gate: Mutex<Gate>,
}

impl TableGuard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            slot: ArcSwapOption::empty(),
            gate: Mutex::new(Gate {
                build: BuildState::Idle,
                epoch: 0,
            }),
        })
    }

    /// The installed table, if any. Lock-free.
    pub fn current(&self) -> Option<Arc<RouteTable>> {
        self.slot.load_full()
    }

    pub fn state(&self) -> TableState {
        let gate = self.lock_gate();
        match (&gate.build, self.slot.load().is_some()) {
            (BuildState::Building(_), _) => TableState::Building,
            (BuildState::Idle, true) => TableState::Ready,
            (BuildState::Idle, false) => TableState::Empty,
        }
    }

    /// Return the installed table, running `build` first if there is none.
    ///
    /// `build` is invoked only by the caller that wins the EMPTY → BUILDING
    /// transition; everyone else joins that build.
    pub async fn get_or_build<F>(self: &Arc<Self>, build: F) -> RoutingResult<Arc<RouteTable>>
    where
        F: FnOnce() -> BoxFuture<'static, Result<RouteTable, BuildError>>,
    {
        if let Some(table) = self.slot.load_full() {
            return Ok(table);
        }

        let pending = {
            let mut gate = self.lock_gate();
            if let Some(table) = self.slot.load_full() {
                return Ok(table);
            }
            let joined = match &gate.build {
                BuildState::Building(pending) => Some(pending.clone()),
                BuildState::Idle => None,
            };
            match joined {
                Some(pending) => pending,
                None => self.start(&mut gate, build),
            }
        };
        pending.await
    }

    /// Build a fresh table and swap it in; readers keep the previous table
    /// until the swap.
    ///
    /// A build already in flight is superseded: it still answers its own
    /// waiters but its result is never installed.
    pub async fn rebuild<F>(self: &Arc<Self>, build: F) -> RoutingResult<Arc<RouteTable>>
    where
        F: FnOnce() -> BoxFuture<'static, Result<RouteTable, BuildError>>,
    {
        let pending = {
            let mut gate = self.lock_gate();
            if matches!(gate.build, BuildState::Building(_)) {
                tracing::debug!("Superseding in-flight route table build");
            }
            self.start(&mut gate, build)
        };
        pending.await
    }

    /// Drop the installed table and detach any build in flight; the next
    /// `get_or_build` builds again.
    pub fn reset(&self) {
        let mut gate = self.lock_gate();
        gate.epoch += 1;
        gate.build = BuildState::Idle;
        self.slot.store(None);
    }

    fn start<F>(self: &Arc<Self>, gate: &mut Gate, build: F) -> PendingBuild
    where
        F: FnOnce() -> BoxFuture<'static, Result<RouteTable, BuildError>>,
    {
        gate.epoch += 1;
        let epoch = gate.epoch;

        tracing::info!(epoch, "Route table build starting");
        let guard = Arc::downgrade(self);
        let build = build();
        let pending = async move {
            let started = Instant::now();
            let result = match AssertUnwindSafe(build).catch_unwind().await {
                Ok(result) => result,
                Err(_) => Err(BuildError::Source(SourceError::Other(
                    "route table build panicked".to_string(),
                ))),
            };
            finish(guard, epoch, result, started)
        }
        .boxed()
        .shared();

        gate.build = BuildState::Building(pending.clone());
        pending
    }

    fn lock_gate(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Install the build result and return the gate to idle, unless the build
/// was detached by a reset or a newer build.
fn finish(
    guard: Weak<TableGuard>,
    epoch: u64,
    result: Result<RouteTable, BuildError>,
    started: Instant,
) -> RoutingResult<Arc<RouteTable>> {
    let elapsed = started.elapsed();
    let outcome = result.map(Arc::new).map_err(RoutingError::from);

    match &outcome {
        Ok(table) => {
            tracing::info!(
                entries = table.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Route table built"
            );
            metrics::record_build("success", elapsed);
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                elapsed_ms = elapsed.as_millis() as u64,
                "Route table build failed"
            );
            metrics::record_build("failure", elapsed);
        }
    }

    if let Some(guard) = guard.upgrade() {
        let mut gate = guard.lock_gate();
        if gate.epoch != epoch {
            tracing::debug!(epoch, current = gate.epoch, "Detached build finished, result not installed");
            return outcome;
        }
        gate.build = BuildState::Idle;
        if let Ok(table) = &outcome {
            metrics::record_table_entries(table.len());
            guard.slot.store(Some(Arc::clone(table)));
        }
    }

    outcome
}
