pub mod planner;
pub mod sources;

mod config;
mod error;
mod execution;
mod row_converter;
mod source_connector;
mod watermark;

pub use strom_dataset as dataset;

pub use config::{ScanConfig, ScanConfigRef};
pub use error::ScanError;
pub use execution::execution_context::{ExecutionContext, ExecutionMetrics};
pub use execution::stream::{
    BoxElementStream, CreateStreamContext, ElementStream, StreamElement,
};
pub use execution::streams::create_scan_stream;
pub use execution::watermark::{PeriodicWatermarkGenerator, PunctuatedWatermarkGenerator};
pub use row_converter::{
    ConverterRequest, InterpretedConverterGenerator, RowConverterFn, RowConverterGenerator,
};
pub use source_connector::{
    ExternalShape, GenericSourceBatch, GenericSourceConnector, SourceBatch, SourceConnector,
    SourceConnectorWrapper, SourceRecord,
};
pub use watermark::{
    BoundedOutOfOrdernessAssigner, PeriodicWatermarkAssigner, PunctuatedWatermarkAssigner,
    Watermark, WatermarkStrategy,
};
