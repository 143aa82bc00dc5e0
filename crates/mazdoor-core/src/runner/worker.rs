//! Worker thread configuration.

use std::thread;

/// Configuration applied to every worker thread in a pool
#[derive(Clone, Debug)]
pub struct WorkerConfig {
    /// Prefix for worker thread names ("<prefix>-<id>")
    pub thread_name: String,
    /// Stack size for worker threads
    pub stack_size: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            thread_name: "mazdoor-worker".to_string(),
            stack_size: 2 * 1024 * 1024, // 2 MB
        }
    }
}

impl WorkerConfig {
    /// Thread builder for worker `id`
    pub(crate) fn thread_builder(&self, id: usize) -> thread::Builder {
        thread::Builder::new()
            .name(format!("{}-{}", self.thread_name, id))
            .stack_size(self.stack_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WorkerConfig::default();
        assert_eq!(config.thread_name, "mazdoor-worker");
        assert_eq!(config.stack_size, 2 * 1024 * 1024);
    }

    #[test]
    fn test_thread_builder_names_workers() {
        let config = WorkerConfig {
            thread_name: "pool".to_string(),
            ..Default::default()
        };
        let handle = config
            .thread_builder(3)
            .spawn(|| thread::current().name().map(String::from))
            .unwrap();
        assert_eq!(handle.join().unwrap().as_deref(), Some("pool-3"));
    }
}
