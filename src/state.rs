use crate::config::AppConfig;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// ── Request Counters (lock-free) ──

pub struct PerfCounters {
    pub calculations_served: AtomicU64,
    pub calculations_rejected: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            calculations_served: AtomicU64::new(0),
            calculations_rejected: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_served(&self) {
        self.calculations_served.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rejected(&self) {
        self.calculations_rejected.fetch_add(1, Ordering::Relaxed);
    }
}

// ── Application shared state (immutable config + atomics, no locks) ──

pub struct AppState {
    pub config: AppConfig,
    pub counters: PerfCounters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            counters: PerfCounters::new(),
        })
    }
}
