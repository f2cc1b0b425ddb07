use serde::{Deserialize, Serialize};

use crate::Scalar;

/// The engine's internal tuple representation. A row is positional; field
/// names and types live in the accompanying schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    values: Vec<Scalar>,
}

impl Row {
    pub fn new(values: Vec<Scalar>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn value(&self, index: usize) -> Option<&Scalar> {
        self.values.get(index)
    }

    #[inline]
    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads the field at `index` as an event-time value in epoch
    /// milliseconds.
    #[inline]
    pub fn timestamp_millis(&self, index: usize) -> Option<i64> {
        self.values.get(index).and_then(Scalar::to_timestamp_millis)
    }

    /// Reads the field at `index` as a raw 64-bit integer.
    #[inline]
    pub fn raw_long(&self, index: usize) -> Option<i64> {
        self.values.get(index).and_then(Scalar::to_raw_long)
    }
}

impl From<Vec<Scalar>> for Row {
    fn from(values: Vec<Scalar>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let row = Row::new(vec![
            Scalar::Int32(1),
            Scalar::from("x"),
            Scalar::Timestamp(100),
        ]);

        assert_eq!(row.len(), 3);
        assert_eq!(row.value(0), Some(&Scalar::Int32(1)));
        assert_eq!(row.timestamp_millis(2), Some(100));
        assert_eq!(row.raw_long(2), Some(100));
        assert_eq!(row.timestamp_millis(1), None);
        assert_eq!(row.value(3), None);
    }
}
