//! Registry counters exposed on the `/metrics` endpoint.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Monotonic process-wide counters.
#[derive(Debug)]
pub struct RegistryMetrics {
    /// HTTP requests served
    pub http_requests: AtomicU64,
    /// Records created by registration
    pub files_created: AtomicU64,
    /// Records updated by re-registration
    pub files_updated: AtomicU64,
    /// Records removed by delete
    pub files_deleted: AtomicU64,
    /// Registrations that lost a creation race
    pub register_conflicts: AtomicU64,
    /// Store calls that failed
    pub store_errors: AtomicU64,
}

impl RegistryMetrics {
    /// Create zeroed metrics.
    pub fn new() -> Self {
        Self {
            http_requests: AtomicU64::new(0),
            files_created: AtomicU64::new(0),
            files_updated: AtomicU64::new(0),
            files_deleted: AtomicU64::new(0),
            register_conflicts: AtomicU64::new(0),
            store_errors: AtomicU64::new(0),
        }
    }

    pub fn inc_http_requests(&self) {
        self.http_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_created(&self) {
        self.files_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_updated(&self) {
        self.files_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_deleted(&self) {
        self.files_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_conflicts(&self) {
        self.register_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_store_errors(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            http_requests: self.http_requests.load(Ordering::Relaxed),
            files_created: self.files_created.load(Ordering::Relaxed),
            files_updated: self.files_updated.load(Ordering::Relaxed),
            files_deleted: self.files_deleted.load(Ordering::Relaxed),
            register_conflicts: self.register_conflicts.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
        }
    }
}

impl Default for RegistryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of [`RegistryMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub http_requests: u64,
    pub files_created: u64,
    pub files_updated: u64,
    pub files_deleted: u64,
    pub register_conflicts: u64,
    pub store_errors: u64,
}

impl MetricsSnapshot {
    /// Render the counters in the Prometheus text exposition format.
    pub fn to_prometheus(&self) -> String {
        let counters = [
            ("filo_http_requests_total", "HTTP requests served.", self.http_requests),
            ("filo_files_created_total", "File records created.", self.files_created),
            ("filo_files_updated_total", "File records updated by re-registration.", self.files_updated),
            ("filo_files_deleted_total", "File records deleted.", self.files_deleted),
            (
                "filo_register_conflicts_total",
                "Registrations rejected by a concurrent creation of the same key.",
                self.register_conflicts,
            ),
            ("filo_store_errors_total", "Failed store operations.", self.store_errors),
        ];

        let mut out = String::new();
        for (name, help, value) in counters {
            out.push_str(&format!("# HELP {name} {help}\n# TYPE {name} counter\n{name} {value}\n"));
        }
        out
    }
}
