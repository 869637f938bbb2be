//! Process-wide timing counters for ordering and execution, enabled by
//! setting `PLANGRAPH_PROFILE`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// A snapshot of graph profiling metrics.
///
/// Profiling is enabled via the `PLANGRAPH_PROFILE` environment variable and
/// accumulates across every graph in the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphProfileSnapshot {
    /// Total nanoseconds spent computing topological orders.
    pub optimise_ns: u64,
    /// Number of orderings computed.
    pub optimise_count: u64,
    /// Total nanoseconds spent inside primitive `execute` calls.
    pub execute_ns: u64,
    /// Number of primitive `execute` calls.
    pub execute_count: u64,
    /// Total nanoseconds spent delivering incident data.
    pub incident_ns: u64,
    /// Number of incident data deliveries.
    pub incident_count: u64,
}

#[derive(Default)]
struct GraphProfileCounters {
    optimise_ns: AtomicU64,
    optimise_count: AtomicU64,
    execute_ns: AtomicU64,
    execute_count: AtomicU64,
    incident_ns: AtomicU64,
    incident_count: AtomicU64,
}

static PROFILE_ENABLED: OnceLock<bool> = OnceLock::new();
static PROFILE_COUNTERS: OnceLock<GraphProfileCounters> = OnceLock::new();

fn profiling_enabled() -> bool {
    *PROFILE_ENABLED.get_or_init(|| std::env::var_os("PLANGRAPH_PROFILE").is_some())
}

fn counters() -> Option<&'static GraphProfileCounters> {
    profiling_enabled().then(|| PROFILE_COUNTERS.get_or_init(GraphProfileCounters::default))
}

pub(crate) fn profile_timer() -> Option<Instant> {
    profiling_enabled().then(Instant::now)
}

pub(crate) enum GraphProfileKind {
    Optimise,
    Execute,
    Incident,
}

pub(crate) fn record_profile_timer(kind: GraphProfileKind, start: Option<Instant>) {
    let Some(start) = start else {
        return;
    };
    let Some(counters) = counters() else {
        return;
    };
    let nanos = start.elapsed().as_nanos().min(u64::MAX as u128) as u64;
    let (ns, count) = match kind {
        GraphProfileKind::Optimise => (&counters.optimise_ns, &counters.optimise_count),
        GraphProfileKind::Execute => (&counters.execute_ns, &counters.execute_count),
        GraphProfileKind::Incident => (&counters.incident_ns, &counters.incident_count),
    };
    ns.fetch_add(nanos, Ordering::Relaxed);
    count.fetch_add(1, Ordering::Relaxed);
}

/// Returns the accumulated counters, or `None` when profiling is disabled.
pub fn profile_snapshot() -> Option<GraphProfileSnapshot> {
    let counters = counters()?;
    Some(GraphProfileSnapshot {
        optimise_ns: counters.optimise_ns.load(Ordering::Relaxed),
        optimise_count: counters.optimise_count.load(Ordering::Relaxed),
        execute_ns: counters.execute_ns.load(Ordering::Relaxed),
        execute_count: counters.execute_count.load(Ordering::Relaxed),
        incident_ns: counters.incident_ns.load(Ordering::Relaxed),
        incident_count: counters.incident_count.load(Ordering::Relaxed),
    })
}

/// Clears the accumulated counters.
pub fn reset_profile() {
    if let Some(counters) = counters() {
        for counter in [
            &counters.optimise_ns,
            &counters.optimise_count,
            &counters.execute_ns,
            &counters.execute_count,
            &counters.incident_ns,
            &counters.incident_count,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
