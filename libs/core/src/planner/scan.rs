use std::sync::Arc;

use anyhow::Result;

use crate::dataset::{DataType, Field, Schema, SchemaRef};
use crate::planner::rowtime::RowtimeDeclaration;
use crate::source_connector::SourceConnector;

/// A materialized scan of one external source. The schemas are fixed at
/// construction: the internal schema is the source schema plus the declared
/// rowtime attribute when that attribute has no physical source field.
pub struct ScanNode {
    pub id: usize,
    pub qualifier: Option<String>,
    pub connector: SourceConnector,
    pub source_schema: SchemaRef,
    pub schema: SchemaRef,
    pub rowtime: Option<RowtimeDeclaration>,
}

impl ScanNode {
    pub fn try_new(
        id: usize,
        qualifier: Option<String>,
        connector: SourceConnector,
        rowtime: Option<RowtimeDeclaration>,
    ) -> Result<Self> {
        let source_schema = connector.schema()?;

        let mut fields = source_schema.fields().to_vec();
        if let Some(declaration) = &rowtime {
            if source_schema
                .field(None, &declaration.attribute_name)
                .is_none()
            {
                fields.push(Field::new(
                    declaration.attribute_name.clone(),
                    DataType::Timestamp(None),
                ));
            }
        }
        let schema = Arc::new(Schema::try_new(
            fields
                .into_iter()
                .map(|mut field| {
                    field.qualifier = qualifier.clone();
                    field
                })
                .collect(),
        )?);

        Ok(Self {
            id,
            qualifier,
            connector,
            source_schema,
            schema,
            rowtime,
        })
    }

    fn display_name(&self) -> &str {
        match &self.qualifier {
            Some(qualifier) => qualifier,
            None => self.connector.connector_name(),
        }
    }

    /// Label for the scan operator itself.
    pub fn operator_name(&self) -> String {
        format!("Source: [{}]", self.display_name())
    }

    /// Label for the conversion stage inserted when the source layout does
    /// not match the internal row layout.
    pub fn conversion_name(&self) -> String {
        format!(
            "SourceConversion(source=[{}], fields=[{}])",
            self.display_name(),
            self.schema.field_names().join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_harness;
    use crate::watermark::WatermarkStrategy;

    fn connector_with_fields(fields: Vec<Field>) -> SourceConnector {
        test_harness::connector(Arc::new(Schema::try_new(fields).unwrap()), vec![])
    }

    fn connector() -> SourceConnector {
        connector_with_fields(vec![
            Field::new("a", DataType::Int32),
            Field::new("b", DataType::String),
        ])
    }

    #[test]
    fn test_materialized_rowtime_extends_schema() {
        let node = ScanNode::try_new(
            0,
            Some("events".to_string()),
            connector(),
            Some(RowtimeDeclaration::new("rowtime", WatermarkStrategy::None)),
        )
        .unwrap();

        assert_eq!(node.source_schema.fields().len(), 2);
        assert_eq!(node.schema.field_names(), vec!["a", "b", "rowtime"]);
        assert_eq!(
            node.schema.fields()[2].data_type,
            DataType::Timestamp(None)
        );
        assert_eq!(
            node.schema.fields()[0].qualifier.as_deref(),
            Some("events")
        );
    }

    #[test]
    fn test_physical_rowtime_keeps_schema() {
        let connector = connector_with_fields(vec![
            Field::new("a", DataType::Int32),
            Field::new("ts", DataType::Timestamp(None)),
        ]);
        let node = ScanNode::try_new(
            0,
            None,
            connector,
            Some(RowtimeDeclaration::new("ts", WatermarkStrategy::None)),
        )
        .unwrap();

        assert_eq!(node.schema.field_names(), vec!["a", "ts"]);
    }

    #[test]
    fn test_operator_names() {
        let node = ScanNode::try_new(
            0,
            Some("events".to_string()),
            connector(),
            Some(RowtimeDeclaration::new("rowtime", WatermarkStrategy::None)),
        )
        .unwrap();

        assert_eq!(node.operator_name(), "Source: [events]");
        assert_eq!(
            node.conversion_name(),
            "SourceConversion(source=[events], fields=[a, b, rowtime])"
        );
    }
}
