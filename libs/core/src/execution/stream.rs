use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;
use futures_util::Stream;

use crate::config::ScanConfigRef;
use crate::dataset::Row;
use crate::execution::execution_context::ExecutionContext;
use crate::watermark::Watermark;

pub struct CreateStreamContext {
    pub ctx: Arc<ExecutionContext>,
    pub config: ScanConfigRef,
    pub prev_state: HashMap<usize, Vec<u8>>,
}

/// One element of the assembled stream: a row in the internal layout, or a
/// watermark interleaved with the rows.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamElement {
    Record(Row),
    Watermark(Watermark),
}

pub trait ElementStream: Stream<Item = Result<StreamElement>> {
    fn save_state(&self, state: &mut HashMap<usize, Vec<u8>>) -> Result<()>;
}

pub type BoxElementStream = Pin<Box<dyn ElementStream + Send + 'static>>;
