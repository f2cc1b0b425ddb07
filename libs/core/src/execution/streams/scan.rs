use std::collections::{HashMap, VecDeque};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use anyhow::Result;
use futures_util::stream::BoxStream;
use futures_util::{Stream, StreamExt};
use tokio::time::Interval;

use crate::execution::execution_context::ExecutionContext;
use crate::execution::stream::{BoxElementStream, CreateStreamContext, ElementStream, StreamElement};
use crate::execution::watermark::{PeriodicWatermarkGenerator, PunctuatedWatermarkGenerator};
use crate::planner::{needs_conversion, resolve_rowtime, FieldIndexMapping, ScanNode};
use crate::row_converter::{ConverterRequest, RowConverterFn, RowConverterGenerator};
use crate::source_connector::{SourceBatch, SourceRecord};
use crate::watermark::WatermarkStrategy;

/// Assembles the scan pipeline for `node`: maps source fields to the
/// internal layout, inserts a conversion step only when the layouts differ,
/// resolves the rowtime attribute and attaches the matching watermark
/// generator.
pub fn create_scan_stream(
    create_ctx: &mut CreateStreamContext,
    node: ScanNode,
    converter_generator: &dyn RowConverterGenerator,
) -> Result<BoxElementStream> {
    let operator_name = node.operator_name();
    let conversion_name = node.conversion_name();
    let ScanNode {
        id,
        connector,
        source_schema,
        schema,
        rowtime,
        ..
    } = node;

    let mapping = FieldIndexMapping::compute(
        &source_schema,
        &schema,
        rowtime.as_ref().map(|decl| decl.attribute_name.as_str()),
    )?;

    let converter = if needs_conversion(&mapping, &source_schema, &schema) {
        tracing::debug!(name = %conversion_name, "insert source conversion");
        Some(converter_generator.create_converter(ConverterRequest {
            extract_time_attribute: mapping.has_time_attribute(),
            mapping: &mapping,
            source_schema: source_schema.clone(),
            output_schema: schema.clone(),
            name: conversion_name,
        })?)
    } else {
        // formats already coincide, reuse the source records untouched
        None
    };

    let generator = match resolve_rowtime(rowtime, &schema)? {
        None => WatermarkGeneratorKind::None,
        Some(descriptor) => match descriptor.strategy {
            WatermarkStrategy::None => {
                // watermarks are already present on the incoming stream
                WatermarkGeneratorKind::None
            }
            WatermarkStrategy::Periodic(assigner) => {
                tracing::debug!(
                    name = %operator_name,
                    rowtime = %descriptor.attribute_name,
                    "attach periodic watermark generator"
                );
                WatermarkGeneratorKind::Periodic(PeriodicWatermarkGenerator::new(
                    assigner,
                    descriptor.field_index,
                ))
            }
            WatermarkStrategy::Punctuated(assigner) => {
                tracing::debug!(
                    name = %operator_name,
                    rowtime = %descriptor.attribute_name,
                    "attach punctuated watermark generator"
                );
                WatermarkGeneratorKind::Punctuated(PunctuatedWatermarkGenerator::try_new(
                    assigner,
                    descriptor.field_index,
                    &mapping,
                    &source_schema,
                    connector.external_shape(),
                )?)
            }
        },
    };

    let interval = match &generator {
        WatermarkGeneratorKind::Periodic(_) => Some(tokio::time::interval(
            create_ctx.config.periodic_watermark_interval,
        )),
        _ => None,
    };

    let input = match create_ctx.prev_state.remove(&id) {
        Some(data) => {
            let saved_state: Option<Vec<u8>> = bincode::deserialize(&data)?;
            connector.create_stream(saved_state)?
        }
        None => connector.create_stream(None)?,
    };

    Ok(Box::pin(ScanStream {
        id,
        ctx: create_ctx.ctx.clone(),
        converter,
        generator,
        interval,
        input,
        pending: VecDeque::new(),
        current_state: None,
    }))
}

enum WatermarkGeneratorKind {
    None,
    Periodic(PeriodicWatermarkGenerator),
    Punctuated(PunctuatedWatermarkGenerator),
}

struct ScanStream {
    id: usize,
    ctx: Arc<ExecutionContext>,
    converter: Option<RowConverterFn>,
    generator: WatermarkGeneratorKind,
    interval: Option<Interval>,
    input: BoxStream<'static, Result<SourceBatch>>,
    pending: VecDeque<StreamElement>,
    current_state: Option<Vec<u8>>,
}

impl ScanStream {
    fn process_records(&mut self, records: Vec<SourceRecord>) -> Result<()> {
        for record in records {
            let record_timestamp = record.timestamp.unwrap_or(0);
            let row = match &mut self.converter {
                Some(convert) => convert(&record)?.0,
                None => record.row,
            };
            match &mut self.generator {
                WatermarkGeneratorKind::None => {
                    self.pending.push_back(StreamElement::Record(row));
                }
                WatermarkGeneratorKind::Periodic(generator) => {
                    generator.on_record(&row)?;
                    self.pending.push_back(StreamElement::Record(row));
                }
                WatermarkGeneratorKind::Punctuated(generator) => {
                    let watermark = generator.on_record(&row, record_timestamp)?;
                    self.pending.push_back(StreamElement::Record(row));
                    if let Some(watermark) = watermark {
                        self.pending.push_back(StreamElement::Watermark(watermark));
                    }
                }
            }
        }
        Ok(())
    }
}

impl ElementStream for ScanStream {
    fn save_state(&self, state: &mut HashMap<usize, Vec<u8>>) -> Result<()> {
        let data = bincode::serialize(&self.current_state)?;
        state.insert(self.id, data);
        Ok(())
    }
}

impl Stream for ScanStream {
    type Item = Result<StreamElement>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(interval) = &mut this.interval {
            if interval.poll_tick(cx).is_ready() {
                if let WatermarkGeneratorKind::Periodic(generator) = &mut this.generator {
                    if let Some(watermark) = generator.on_timer() {
                        this.ctx
                            .update_metrics(|metrics| metrics.num_watermarks += 1);
                        return Poll::Ready(Some(Ok(StreamElement::Watermark(watermark))));
                    }
                }
            }
        }

        loop {
            if let Some(element) = this.pending.pop_front() {
                match &element {
                    StreamElement::Record(_) => this
                        .ctx
                        .update_metrics(|metrics| metrics.num_output_rows += 1),
                    StreamElement::Watermark(_) => this
                        .ctx
                        .update_metrics(|metrics| metrics.num_watermarks += 1),
                }
                return Poll::Ready(Some(Ok(element)));
            }

            match this.input.poll_next_unpin(cx) {
                Poll::Ready(Some(res)) => {
                    let SourceBatch { state, records } = res?;
                    this.ctx
                        .update_metrics(|metrics| metrics.num_input_rows += records.len());
                    this.current_state = Some(state);
                    this.process_records(records)?;
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
