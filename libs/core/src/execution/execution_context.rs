use parking_lot::Mutex;

#[derive(Debug, Default, Clone)]
pub struct ExecutionMetrics {
    pub num_input_rows: usize,
    pub num_output_rows: usize,
    pub num_watermarks: usize,
}

pub struct ExecutionContext {
    name: String,
    metrics: Mutex<ExecutionMetrics>,
}

impl ExecutionContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: Mutex::new(ExecutionMetrics::default()),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn update_metrics(&self, f: impl FnOnce(&mut ExecutionMetrics)) {
        f(&mut self.metrics.lock());
    }

    pub fn metrics(&self) -> ExecutionMetrics {
        self.metrics.lock().clone()
    }
}
