use crate::dataset::SchemaRef;
use crate::error::ScanError;
use crate::watermark::WatermarkStrategy;

/// The rowtime attribute as declared by the source definition: the name of
/// the event-time field and the strategy used to derive watermarks from it.
#[derive(Debug, Clone)]
pub struct RowtimeDeclaration {
    pub attribute_name: String,
    pub strategy: WatermarkStrategy,
}

impl RowtimeDeclaration {
    pub fn new(attribute_name: impl Into<String>, strategy: WatermarkStrategy) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            strategy,
        }
    }
}

/// A resolved rowtime attribute: the declaration plus the zero-based
/// position of the field in the internal row. Resolved once at pipeline
/// assembly, immutable afterwards.
#[derive(Debug, Clone)]
pub struct RowtimeDescriptor {
    pub attribute_name: String,
    pub field_index: usize,
    pub strategy: WatermarkStrategy,
}

/// Locates the declared rowtime attribute inside the internal schema.
///
/// A source that declares no rowtime attribute yields `Ok(None)`; the
/// incoming stream is then expected to already carry watermarks and the
/// scan attaches none.
pub fn resolve_rowtime(
    declaration: Option<RowtimeDeclaration>,
    schema: &SchemaRef,
) -> Result<Option<RowtimeDescriptor>, ScanError> {
    let declaration = match declaration {
        Some(declaration) => declaration,
        None => return Ok(None),
    };

    let (field_index, _) = schema
        .field(None, &declaration.attribute_name)
        .ok_or_else(|| {
            ScanError::schema_mismatch(format!(
                "rowtime attribute '{}' does not exist in the schema",
                declaration.attribute_name
            ))
        })?;

    Ok(Some(RowtimeDescriptor {
        attribute_name: declaration.attribute_name,
        field_index,
        strategy: declaration.strategy,
    }))
}
