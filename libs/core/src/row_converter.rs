use anyhow::Result;

use crate::dataset::{DataType, Row, Scalar, SchemaRef};
use crate::error::ScanError;
use crate::planner::{FieldIndexMapping, TIME_ATTRIBUTE_MARKER};
use crate::source_connector::SourceRecord;

/// Converts one source record into the internal row layout. The second
/// output is the materialized time attribute of this record, scoped to the
/// call; it is `None` unless the request asked for time-attribute
/// extraction.
pub type RowConverterFn =
    Box<dyn FnMut(&SourceRecord) -> Result<(Row, Option<i64>), ScanError> + Send>;

pub struct ConverterRequest<'a> {
    pub mapping: &'a FieldIndexMapping,
    pub source_schema: SchemaRef,
    pub output_schema: SchemaRef,
    /// Whether the materialized time attribute must be surfaced as the
    /// converter's extra output for the duration of each record.
    pub extract_time_attribute: bool,
    /// Human-readable operator label, for diagnostics only.
    pub name: String,
}

/// Produces a [`RowConverterFn`] for a scan whose source layout does not
/// match the internal row layout. How the function is built (interpreted,
/// generated, compiled) is up to the implementation.
pub trait RowConverterGenerator: Send + Sync {
    fn create_converter(&self, request: ConverterRequest<'_>) -> Result<RowConverterFn>;
}

enum FieldOp {
    Copy(usize),
    Cast(usize, DataType),
    MaterializeTime,
}

/// Straightforward field-by-field converter: copies or widens each mapped
/// source field and materializes the time attribute from the record's
/// attached timestamp.
pub struct InterpretedConverterGenerator;

impl RowConverterGenerator for InterpretedConverterGenerator {
    fn create_converter(&self, request: ConverterRequest<'_>) -> Result<RowConverterFn> {
        let mut ops = Vec::with_capacity(request.mapping.len());
        for (position, index) in request.mapping.indices().iter().enumerate() {
            if *index == TIME_ATTRIBUTE_MARKER {
                ops.push(FieldOp::MaterializeTime);
                continue;
            }
            let index = *index as usize;
            let source_type = request.source_schema.fields()[index].data_type;
            let output_type = request.output_schema.fields()[position].data_type;
            if source_type == output_type {
                ops.push(FieldOp::Copy(index));
            } else {
                ops.push(FieldOp::Cast(index, output_type));
            }
        }

        let extract_time_attribute = request.extract_time_attribute;
        let name = request.name;

        Ok(Box::new(move |record: &SourceRecord| {
            let mut values = Vec::with_capacity(ops.len());
            let mut extracted_time = None;

            for op in &ops {
                match op {
                    FieldOp::Copy(index) => {
                        values.push(read_field(&record.row, *index, &name)?.clone());
                    }
                    FieldOp::Cast(index, data_type) => {
                        let value = read_field(&record.row, *index, &name)?;
                        values.push(value.cast_to(*data_type).ok_or_else(|| {
                            ScanError::conversion(format!(
                                "{}: cannot cast {} value to {}",
                                name,
                                value.data_type(),
                                data_type
                            ))
                        })?);
                    }
                    FieldOp::MaterializeTime => {
                        let timestamp = record.timestamp.ok_or_else(|| {
                            ScanError::conversion(format!(
                                "{}: record carries no timestamp to materialize the rowtime attribute",
                                name
                            ))
                        })?;
                        extracted_time = Some(timestamp);
                        values.push(Scalar::Timestamp(timestamp));
                    }
                }
            }

            let extracted_time = if extract_time_attribute {
                extracted_time
            } else {
                None
            };
            Ok((Row::new(values), extracted_time))
        }))
    }
}

fn read_field<'a>(row: &'a Row, index: usize, name: &str) -> Result<&'a Scalar, ScanError> {
    row.value(index).ok_or_else(|| {
        ScanError::conversion(format!(
            "{}: record has {} fields, expected at least {}",
            name,
            row.len(),
            index + 1
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dataset::{Field, Schema};

    fn schema(fields: Vec<Field>) -> SchemaRef {
        Arc::new(Schema::try_new(fields).unwrap())
    }

    fn converter_for(
        source: &SchemaRef,
        output: &SchemaRef,
        time_attribute: Option<&str>,
    ) -> RowConverterFn {
        let mapping = FieldIndexMapping::compute(source, output, time_attribute).unwrap();
        InterpretedConverterGenerator
            .create_converter(ConverterRequest {
                extract_time_attribute: mapping.has_time_attribute(),
                mapping: &mapping,
                source_schema: source.clone(),
                output_schema: output.clone(),
                name: "test".to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_reorder_and_widen() {
        let source = schema(vec![
            Field::new("b", DataType::String),
            Field::new("a", DataType::Int32),
        ]);
        let output = schema(vec![
            Field::new("a", DataType::Int64),
            Field::new("b", DataType::String),
        ]);
        let mut convert = converter_for(&source, &output, None);

        let record = SourceRecord::new(Row::new(vec![Scalar::from("x"), Scalar::Int32(7)]));
        let (row, extracted) = convert(&record).unwrap();
        assert_eq!(
            row,
            Row::new(vec![Scalar::Int64(7), Scalar::from("x")])
        );
        assert_eq!(extracted, None);
    }

    #[test]
    fn test_materialize_time_attribute() {
        let source = schema(vec![Field::new("a", DataType::Int32)]);
        let output = schema(vec![
            Field::new("a", DataType::Int32),
            Field::new("rowtime", DataType::Timestamp(None)),
        ]);
        let mut convert = converter_for(&source, &output, Some("rowtime"));

        let record = SourceRecord::with_timestamp(Row::new(vec![Scalar::Int32(1)]), 100);
        let (row, extracted) = convert(&record).unwrap();
        assert_eq!(
            row,
            Row::new(vec![Scalar::Int32(1), Scalar::Timestamp(100)])
        );
        assert_eq!(extracted, Some(100));
    }

    #[test]
    fn test_missing_record_timestamp_fails() {
        let source = schema(vec![Field::new("a", DataType::Int32)]);
        let output = schema(vec![
            Field::new("a", DataType::Int32),
            Field::new("rowtime", DataType::Timestamp(None)),
        ]);
        let mut convert = converter_for(&source, &output, Some("rowtime"));

        let record = SourceRecord::new(Row::new(vec![Scalar::Int32(1)]));
        let err = convert(&record).unwrap_err();
        assert!(matches!(err, ScanError::Conversion(_)));
    }

    #[test]
    fn test_short_record_fails() {
        let source = schema(vec![
            Field::new("a", DataType::Int32),
            Field::new("b", DataType::String),
        ]);
        let output = schema(vec![
            Field::new("b", DataType::String),
            Field::new("a", DataType::Int32),
        ]);
        let mut convert = converter_for(&source, &output, None);

        let record = SourceRecord::new(Row::new(vec![Scalar::Int32(1)]));
        let err = convert(&record).unwrap_err();
        assert!(matches!(err, ScanError::Conversion(_)));
    }
}
