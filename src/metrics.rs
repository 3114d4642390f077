use sysinfo::System;
use tracing::info;

use crate::TARGET_PIPELINE;

/// Documents processed between two resource usage reports.
pub const RESOURCE_LOG_INTERVAL: usize = 50;

pub struct SystemInfo {
    pub memory_usage: u64,
    pub memory_total: u64,
    pub cpu_usage: f32,
    pub thread_count: usize,
}

impl SystemInfo {
    pub fn memory_usage_mb(&self) -> f64 {
        self.memory_usage as f64 / 1024.0 / 1024.0
    }

    pub fn memory_total_mb(&self) -> f64 {
        self.memory_total as f64 / 1024.0 / 1024.0
    }
}

/// Samples memory and CPU usage over the life of a stage.
///
/// CPU usage is measured between two refreshes, so the same `System` is kept
/// across samples.
pub struct ResourceMonitor {
    sys: System,
}

impl ResourceMonitor {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        ResourceMonitor { sys }
    }

    pub fn collect(&mut self) -> SystemInfo {
        self.sys.refresh_memory();
        self.sys.refresh_cpu_usage();

        let thread_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        SystemInfo {
            memory_usage: self.sys.used_memory(),
            memory_total: self.sys.total_memory(),
            cpu_usage: self.sys.global_cpu_usage(),
            thread_count,
        }
    }

    /// Log memory and CPU usage after every `RESOURCE_LOG_INTERVAL` documents.
    pub fn log_usage(&mut self, processed: usize) {
        if processed == 0 || processed % RESOURCE_LOG_INTERVAL != 0 {
            return;
        }
        let info = self.collect();
        info!(
            target: TARGET_PIPELINE,
            "{} documents processed, CPU utilization: {:.1}%, memory: {:.2} MB of {:.2} MB, {} threads",
            processed,
            info.cpu_usage,
            info.memory_usage_mb(),
            info.memory_total_mb(),
            info.thread_count
        );
    }
}

impl Default for ResourceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_reports_memory() {
        let info = ResourceMonitor::new().collect();
        assert!(info.memory_total >= info.memory_usage);
        assert!(info.thread_count >= 1);
    }

    #[test]
    fn test_cpu_usage_is_measured_between_samples() {
        let mut monitor = ResourceMonitor::new();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        let info = monitor.collect();
        assert!(info.cpu_usage.is_finite());
        assert!((0.0..=100.0).contains(&info.cpu_usage));
    }
}
