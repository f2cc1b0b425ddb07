use std::fmt::{self, Debug, Display, Formatter};

use dyn_clone::DynClone;

use crate::dataset::Row;

/// A declaration that no record with event time earlier than `timestamp`
/// will arrive later in the stream from this partition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Watermark {
    pub timestamp: i64,
}

impl Watermark {
    #[inline]
    pub fn new(timestamp: i64) -> Self {
        Self { timestamp }
    }
}

impl Display for Watermark {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Watermark({})", self.timestamp)
    }
}

/// Assigner polled on a fixed cadence. It accumulates its own view of
/// event-time progress from the timestamps it observes; the core never
/// inspects that state.
pub trait PeriodicWatermarkAssigner: DynClone + Send + Sync + 'static {
    /// Observes the event timestamp of the next record.
    fn next_timestamp(&mut self, timestamp: i64);

    /// The watermark to emit now, or `None` if no timestamp has been
    /// observed yet.
    fn current_watermark(&self) -> Option<Watermark>;
}

dyn_clone::clone_trait_object!(PeriodicWatermarkAssigner);

/// Assigner consulted on every record. `record` is in the source's
/// external shape, not the internal row layout.
pub trait PunctuatedWatermarkAssigner: DynClone + Send + Sync + 'static {
    fn check_and_get_next_watermark(&mut self, record: &Row, timestamp: i64) -> Option<Watermark>;
}

dyn_clone::clone_trait_object!(PunctuatedWatermarkAssigner);

/// The watermark strategy declared by a table definition. The set of
/// strategies is closed; dispatch happens once at pipeline assembly.
#[derive(Clone)]
pub enum WatermarkStrategy {
    /// Watermarks are assumed already present on the incoming stream.
    None,
    Periodic(Box<dyn PeriodicWatermarkAssigner>),
    Punctuated(Box<dyn PunctuatedWatermarkAssigner>),
}

impl Debug for WatermarkStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            WatermarkStrategy::None => f.write_str("None"),
            WatermarkStrategy::Periodic(_) => f.write_str("Periodic"),
            WatermarkStrategy::Punctuated(_) => f.write_str("Punctuated"),
        }
    }
}

/// Periodic assigner emitting `max observed timestamp - delay`, tolerating
/// records that arrive at most `delay` milliseconds out of order.
#[derive(Debug, Clone)]
pub struct BoundedOutOfOrdernessAssigner {
    delay: i64,
    max_timestamp: Option<i64>,
}

impl BoundedOutOfOrdernessAssigner {
    pub fn new(delay: i64) -> Self {
        Self {
            delay,
            max_timestamp: None,
        }
    }
}

impl PeriodicWatermarkAssigner for BoundedOutOfOrdernessAssigner {
    fn next_timestamp(&mut self, timestamp: i64) {
        if self.max_timestamp.map_or(true, |max| timestamp > max) {
            self.max_timestamp = Some(timestamp);
        }
    }

    fn current_watermark(&self) -> Option<Watermark> {
        self.max_timestamp
            .map(|max| Watermark::new(max - self.delay))
    }
}
