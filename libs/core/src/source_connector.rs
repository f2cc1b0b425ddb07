use std::sync::Arc;

use anyhow::{Context, Result};
use futures_util::stream::BoxStream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_stream::StreamExt;

use crate::dataset::{DataType, Row, SchemaRef};

/// A single record emitted by a connector: the native-layout row plus the
/// out-of-band timestamp the transport attached to it, if any.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub row: Row,
    pub timestamp: Option<i64>,
}

impl SourceRecord {
    pub fn new(row: Row) -> Self {
        Self {
            row,
            timestamp: None,
        }
    }

    pub fn with_timestamp(row: Row, timestamp: i64) -> Self {
        Self {
            row,
            timestamp: Some(timestamp),
        }
    }
}

pub struct GenericSourceBatch<T> {
    pub state: T,
    pub records: Vec<SourceRecord>,
}

pub type SourceBatch = GenericSourceBatch<Vec<u8>>;

/// The native shape of the records a connector produces. A connector
/// emitting bare scalars rather than composed rows declares `Scalar`, and
/// the punctuated watermark path normalizes it into a one-field row schema
/// at generator construction.
#[derive(Debug, Clone)]
pub enum ExternalShape {
    Record,
    Scalar(DataType),
}

pub trait GenericSourceConnector: Send + Sync + 'static {
    type State: Send + Sync + Serialize + DeserializeOwned + 'static;

    fn connector_name(&self) -> &'static str;

    /// The schema of the records this connector produces.
    fn schema(&self) -> Result<SchemaRef>;

    fn external_shape(&self) -> ExternalShape {
        ExternalShape::Record
    }

    fn create_stream(
        &self,
        state: Option<Self::State>,
    ) -> Result<BoxStream<'static, Result<GenericSourceBatch<Self::State>>>>;
}

pub type SourceConnector = Arc<dyn GenericSourceConnector<State = Vec<u8>>>;

pub struct SourceConnectorWrapper<T>(pub T);

impl<T: GenericSourceConnector> GenericSourceConnector for SourceConnectorWrapper<T> {
    type State = Vec<u8>;

    fn connector_name(&self) -> &'static str {
        self.0.connector_name()
    }

    fn schema(&self) -> Result<SchemaRef> {
        self.0.schema()
    }

    fn external_shape(&self) -> ExternalShape {
        self.0.external_shape()
    }

    fn create_stream(
        &self,
        state: Option<Self::State>,
    ) -> Result<BoxStream<'static, Result<SourceBatch>>> {
        let state = match state {
            Some(data) => Some(bincode::deserialize(&data).with_context(|| {
                format!(
                    "failed to deserialize state for source '{}'",
                    self.connector_name()
                )
            })?),
            None => None,
        };
        let inner_stream = self.0.create_stream(state)?;
        let connector_name = self.connector_name();

        Ok(Box::pin(async_stream::try_stream! {
            tokio::pin!(inner_stream);
            while let Some(GenericSourceBatch { state, records }) = inner_stream.next().await.transpose()? {
                let state = bincode::serialize(&state).with_context(|| {
                    format!("failed to serialize state for source '{}'", connector_name)
                })?;
                yield SourceBatch {
                    state,
                    records,
                };
            }
        }))
    }
}
