use itertools::Itertools;

use crate::dataset::SchemaRef;
use crate::error::ScanError;

/// Marks an output field that is materialized by the scan itself rather
/// than read from a source field. Used only for the rowtime attribute.
pub const TIME_ATTRIBUTE_MARKER: i32 = -1;

/// For each output field, the index of the source field it is read from,
/// or [`TIME_ATTRIBUTE_MARKER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIndexMapping {
    indices: Vec<i32>,
}

impl FieldIndexMapping {
    /// Computes the mapping from `source_schema` to `output_schema` by field
    /// name. `time_attribute` names the output field allowed to have no
    /// physical source counterpart.
    pub fn compute(
        source_schema: &SchemaRef,
        output_schema: &SchemaRef,
        time_attribute: Option<&str>,
    ) -> Result<Self, ScanError> {
        let indices = output_schema
            .fields()
            .iter()
            .map(|field| match source_schema.field(None, &field.name) {
                Some((index, source_field)) => {
                    if !source_field.data_type.can_cast_to(field.data_type) {
                        return Err(ScanError::schema_mismatch(format!(
                            "source field '{}' of type {} cannot be converted to {}",
                            source_field.name, source_field.data_type, field.data_type,
                        )));
                    }
                    Ok(index as i32)
                }
                None => {
                    if time_attribute.map_or(false, |name| field.name.eq_ignore_ascii_case(name)) {
                        Ok(TIME_ATTRIBUTE_MARKER)
                    } else {
                        Err(ScanError::schema_mismatch(format!(
                            "field '{}' is not produced by the source",
                            field.name
                        )))
                    }
                }
            })
            .try_collect()?;
        Ok(Self { indices })
    }

    #[inline]
    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns `true` if some output field is a materialized time
    /// attribute.
    #[inline]
    pub fn has_time_attribute(&self) -> bool {
        self.indices.contains(&TIME_ATTRIBUTE_MARKER)
    }

    /// The output position of the materialized time attribute, if any.
    #[inline]
    pub fn time_attribute_index(&self) -> Option<usize> {
        self.indices
            .iter()
            .position(|index| *index == TIME_ATTRIBUTE_MARKER)
    }
}

/// Returns `false` only when `mapping` is the identity over type-identical
/// schemas, in which case the source records already match the internal row
/// layout and no conversion pass is inserted.
pub fn needs_conversion(
    mapping: &FieldIndexMapping,
    source_schema: &SchemaRef,
    output_schema: &SchemaRef,
) -> bool {
    if source_schema.fields().len() != output_schema.fields().len() {
        return true;
    }
    for (position, index) in mapping.indices().iter().enumerate() {
        if *index != position as i32 {
            return true;
        }
        let source_type = source_schema.fields()[position].data_type;
        let output_type = output_schema.fields()[position].data_type;
        if source_type != output_type {
            return true;
        }
    }
    false
}
