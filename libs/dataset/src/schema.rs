use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::DataType;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub qualifier: Option<String>,
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
            data_type,
        }
    }

    pub fn qualified_name(&self) -> String {
        match &self.qualifier {
            Some(qualifier) => format!("{}.{}", qualifier, self.name),
            None => self.name.clone(),
        }
    }
}

pub type SchemaRef = Arc<Schema>;

#[derive(Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn try_new(fields: Vec<Field>) -> Result<Self> {
        let mut names = HashSet::new();

        for field in &fields {
            if !names.insert((
                field.qualifier.as_deref().map(str::to_lowercase),
                field.name.to_lowercase(),
            )) {
                anyhow::bail!(
                    "schema contains duplicate field name: '{}'",
                    field.qualified_name()
                );
            }
        }

        Ok(Self { fields })
    }

    /// Finds a field by name, optionally restricted to a qualifier.
    /// Field names are matched case-insensitively.
    pub fn field(&self, qualifier: Option<&str>, name: &str) -> Option<(usize, &Field)> {
        match qualifier {
            Some(qualifier) => self
                .fields
                .iter()
                .enumerate()
                .find(|(_, f)| match &f.qualifier {
                    Some(field_qualifier) => {
                        field_qualifier.eq_ignore_ascii_case(qualifier)
                            && f.name.eq_ignore_ascii_case(name)
                    }
                    None => false,
                }),
            None => self
                .fields
                .iter()
                .enumerate()
                .find(|(_, f)| f.name.eq_ignore_ascii_case(name)),
        }
    }

    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_names_rejected() {
        assert!(Schema::try_new(vec![
            Field::new("a", DataType::Int32),
            Field::new("A", DataType::String),
        ])
        .is_err());
    }

    #[test]
    fn test_field_lookup_is_case_insensitive() {
        let schema = Schema::try_new(vec![
            Field::new("a", DataType::Int32),
            Field::new("b", DataType::String),
        ])
        .unwrap();

        let (index, field) = schema.field(None, "B").unwrap();
        assert_eq!(index, 1);
        assert_eq!(field.data_type, DataType::String);
        assert!(schema.field(None, "c").is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let schema = Schema::try_new(vec![
            Field::new("a", DataType::Int32),
            Field::new("rowtime", DataType::Timestamp(None)),
        ])
        .unwrap();

        let data = bincode::serialize(&schema).unwrap();
        let restored: Schema = bincode::deserialize(&data).unwrap();
        assert_eq!(schema, restored);
    }

    #[test]
    fn test_qualified_lookup() {
        let schema = Schema::try_new(vec![
            Field {
                qualifier: Some("t".to_string()),
                name: "a".to_string(),
                data_type: DataType::Int32,
            },
            Field {
                qualifier: Some("t".to_string()),
                name: "b".to_string(),
                data_type: DataType::String,
            },
        ])
        .unwrap();

        assert_eq!(schema.field(Some("t"), "b").unwrap().0, 1);
        assert!(schema.field(Some("u"), "b").is_none());
        assert_eq!(schema.field(None, "b").unwrap().0, 1);
    }
}
