use std::sync::Arc;

use crate::dataset::{DataType, Field, Row, Schema, SchemaRef};
use crate::error::ScanError;
use crate::planner::FieldIndexMapping;
use crate::source_connector::ExternalShape;
use crate::watermark::{PeriodicWatermarkAssigner, PunctuatedWatermarkAssigner, Watermark};

/// Generates watermarks on a fixed cadence from a periodic assigner.
///
/// Observation and emission are deliberately decoupled: `on_record` only
/// feeds the assigner, and watermarks leave the generator exclusively
/// through `on_timer`.
pub struct PeriodicWatermarkGenerator {
    assigner: Box<dyn PeriodicWatermarkAssigner>,
    time_field_index: usize,
}

impl PeriodicWatermarkGenerator {
    pub fn new(assigner: Box<dyn PeriodicWatermarkAssigner>, time_field_index: usize) -> Self {
        Self {
            assigner,
            time_field_index,
        }
    }

    /// Feeds the record's event time to the assigner and returns the
    /// runtime-visible record timestamp, which is always `0` — the assigner
    /// owns event-time semantics, not the runtime.
    pub fn on_record(&mut self, row: &Row) -> Result<i64, ScanError> {
        let timestamp = row.timestamp_millis(self.time_field_index).ok_or_else(|| {
            ScanError::conversion(format!(
                "field {} does not hold a millisecond timestamp",
                self.time_field_index
            ))
        })?;
        self.assigner.next_timestamp(timestamp);
        Ok(0)
    }

    /// The watermark to emit on this timer tick, if the assigner has
    /// observed anything yet.
    pub fn on_timer(&mut self) -> Option<Watermark> {
        self.assigner.current_watermark()
    }
}

/// Generates watermarks inline with records from a punctuated assigner.
///
/// The assigner sees records in the source's external shape; the shape
/// normalization (wrapping a bare scalar into a one-field row) happens once
/// here, at construction.
pub struct PunctuatedWatermarkGenerator {
    assigner: Box<dyn PunctuatedWatermarkAssigner>,
    time_field_index: usize,
    external_schema: SchemaRef,
    /// Internal-row position of each external field.
    positions: Vec<usize>,
}

impl std::fmt::Debug for PunctuatedWatermarkGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PunctuatedWatermarkGenerator")
            .field("time_field_index", &self.time_field_index)
            .field("external_schema", &self.external_schema)
            .field("positions", &self.positions)
            .finish()
    }
}

impl PunctuatedWatermarkGenerator {
    pub fn try_new(
        assigner: Box<dyn PunctuatedWatermarkAssigner>,
        time_field_index: usize,
        mapping: &FieldIndexMapping,
        source_schema: &SchemaRef,
        shape: ExternalShape,
    ) -> Result<Self, ScanError> {
        let external_schema = match shape {
            ExternalShape::Record => source_schema.clone(),
            ExternalShape::Scalar(data_type) => Arc::new(
                Schema::try_new(vec![Field::new("f0", data_type)])
                    .map_err(|err| ScanError::conversion(err.to_string()))?,
            ),
        };

        let positions = (0..external_schema.fields().len())
            .map(|source_index| {
                mapping
                    .indices()
                    .iter()
                    .position(|index| *index == source_index as i32)
                    .ok_or_else(|| {
                        ScanError::conversion(format!(
                            "source field '{}' is not present in the internal row",
                            external_schema.fields()[source_index].name
                        ))
                    })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            assigner,
            time_field_index,
            external_schema,
            positions,
        })
    }

    #[inline]
    pub fn external_schema(&self) -> &SchemaRef {
        &self.external_schema
    }

    /// Evaluates the assigner against this record. The returned watermark,
    /// if any, is emitted immediately alongside the record.
    pub fn on_record(
        &mut self,
        row: &Row,
        _record_timestamp: i64,
    ) -> Result<Option<Watermark>, ScanError> {
        let timestamp = row.raw_long(self.time_field_index).ok_or_else(|| {
            ScanError::conversion(format!(
                "field {} does not hold an event timestamp",
                self.time_field_index
            ))
        })?;
        let external = self.to_external(row)?;
        Ok(self
            .assigner
            .check_and_get_next_watermark(&external, timestamp))
    }

    /// The runtime-visible record timestamp, always `0`.
    pub fn extract_timestamp(&self, _row: &Row, _record_timestamp: i64) -> i64 {
        0
    }

    fn to_external(&self, row: &Row) -> Result<Row, ScanError> {
        self.positions
            .iter()
            .map(|position| {
                row.value(*position).cloned().ok_or_else(|| {
                    ScanError::conversion(format!(
                        "record has {} fields, expected at least {}",
                        row.len(),
                        position + 1
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Row::new)
    }
}
