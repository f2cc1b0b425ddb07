use std::sync::Arc;
use std::time::Duration;

pub type ScanConfigRef = Arc<ScanConfig>;

pub struct ScanConfig {
    pub name: String,
    /// Cadence at which a periodic watermark generator is polled.
    pub periodic_watermark_interval: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            name: "noname".to_string(),
            periodic_watermark_interval: Duration::from_millis(200),
        }
    }
}
