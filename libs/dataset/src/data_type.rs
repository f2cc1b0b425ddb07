use chrono_tz::Tz;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The sets of data types.
#[derive(Debug, Copy, Clone, Display, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Null type
    #[display(fmt = "null")]
    Null,

    /// A signed 8-bit integer.
    #[display(fmt = "int8")]
    Int8,

    /// A signed 16-bit integer.
    #[display(fmt = "int16")]
    Int16,

    /// A signed 32-bit integer.
    #[display(fmt = "int32")]
    Int32,

    /// A signed 64-bit integer.
    #[display(fmt = "int64")]
    Int64,

    /// A 32-bit floating point number.
    #[display(fmt = "float32")]
    Float32,

    /// A 64-bit floating point number.
    #[display(fmt = "float64")]
    Float64,

    /// A boolean type representing the values `true` and `false`.
    #[display(fmt = "boolean")]
    Boolean,

    /// A timestamp type in milliseconds, it can attach a timezone.
    #[display(fmt = "timestamp")]
    Timestamp(Option<Tz>),

    /// A variable-length string in Unicode with UTF-8 encoding.
    #[display(fmt = "string")]
    String,
}

impl Eq for DataType {}

impl PartialEq for DataType {
    fn eq(&self, other: &Self) -> bool {
        use DataType::*;

        match (self, other) {
            (Null, Null) => true,
            (Int8, Int8) => true,
            (Int16, Int16) => true,
            (Int32, Int32) => true,
            (Int64, Int64) => true,
            (Float32, Float32) => true,
            (Float64, Float64) => true,
            (Boolean, Boolean) => true,
            (Timestamp(_), Timestamp(_)) => true,
            (String, String) => true,
            _ => false,
        }
    }
}

impl DataType {
    /// Returns `true` if this type is a numeric type (integer or float).
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::Float32
                | DataType::Float64
        )
    }

    /// Returns `true` if this type is a timestamp type.
    #[inline]
    pub fn is_timestamp(&self) -> bool {
        matches!(self, DataType::Timestamp(_))
    }

    /// Returns `true` if this type can be cast to `to` type without losing
    /// information.
    #[inline]
    pub fn can_cast_to(&self, to: Self) -> bool {
        use DataType::*;

        if self == &to {
            return true;
        }

        match to {
            Null => matches!(self, Null),
            Int8 => matches!(self, Int8),
            Int16 => matches!(self, Int8 | Int16),
            Int32 => matches!(self, Int8 | Int16 | Int32),
            Int64 => matches!(self, Int8 | Int16 | Int32 | Int64),
            Float32 => matches!(self, Int8 | Int16 | Int32 | Int64 | Float32),
            Float64 => matches!(self, Int8 | Int16 | Int32 | Int64 | Float32 | Float64),
            Boolean => matches!(self, Boolean),
            Timestamp(_) => matches!(self, Timestamp(_)),
            String => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DataType::*;

    #[test]
    fn test_integer_widening() {
        assert!(Int8.can_cast_to(Int64));
        assert!(Int16.can_cast_to(Int32));
        assert!(Int32.can_cast_to(Float64));
        assert!(!Int64.can_cast_to(Int32));
        assert!(!Int32.can_cast_to(Int16));
    }

    #[test]
    fn test_float_widening() {
        assert!(Float32.can_cast_to(Float64));
        assert!(!Float64.can_cast_to(Float32));
        assert!(!Float32.can_cast_to(Int64));
    }

    #[test]
    fn test_timestamp_ignores_timezone() {
        assert_eq!(Timestamp(None), Timestamp(Some(chrono_tz::Asia::Shanghai)));
        assert!(Timestamp(Some(chrono_tz::UTC)).can_cast_to(Timestamp(None)));
        assert!(!Int64.can_cast_to(Timestamp(None)));
    }

    #[test]
    fn test_everything_casts_to_string() {
        for data_type in [
            Null,
            Int8,
            Int16,
            Int32,
            Int64,
            Float32,
            Float64,
            Boolean,
            Timestamp(None),
        ]
        .iter()
        {
            assert!(data_type.can_cast_to(String));
        }
    }
}
