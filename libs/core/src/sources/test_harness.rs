use std::sync::Arc;

use anyhow::Result;
use futures_util::stream::BoxStream;

use crate::dataset::SchemaRef;
use crate::source_connector::{
    GenericSourceBatch, GenericSourceConnector, SourceConnector, SourceConnectorWrapper,
    SourceRecord,
};

pub struct Connector {
    schema: SchemaRef,
    batches: Vec<Vec<SourceRecord>>,
    hold_open: bool,
}

impl Connector {
    pub fn new(schema: SchemaRef, batches: Vec<Vec<SourceRecord>>) -> Self {
        Self {
            schema,
            batches,
            hold_open: false,
        }
    }

    /// Keeps the stream pending after the last batch instead of ending it.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }
}

impl GenericSourceConnector for Connector {
    type State = usize;

    fn connector_name(&self) -> &'static str {
        "test"
    }

    fn schema(&self) -> Result<SchemaRef> {
        Ok(self.schema.clone())
    }

    fn create_stream(
        &self,
        state: Option<Self::State>,
    ) -> Result<BoxStream<'static, Result<GenericSourceBatch<Self::State>>>> {
        let batches = self
            .batches
            .clone()
            .into_iter()
            .enumerate()
            .skip(state.unwrap_or_default());
        let hold_open = self.hold_open;
        Ok(Box::pin(async_stream::try_stream! {
            for (offset, records) in batches {
                yield GenericSourceBatch {
                    state: offset,
                    records,
                };
            }
            if hold_open {
                futures_util::future::pending::<()>().await;
            }
        }))
    }
}

pub fn connector(schema: SchemaRef, batches: Vec<Vec<SourceRecord>>) -> SourceConnector {
    Arc::new(SourceConnectorWrapper(Connector::new(schema, batches)))
}

pub fn connector_hold_open(
    schema: SchemaRef,
    batches: Vec<Vec<SourceRecord>>,
) -> SourceConnector {
    Arc::new(SourceConnectorWrapper(
        Connector::new(schema, batches).hold_open(),
    ))
}
