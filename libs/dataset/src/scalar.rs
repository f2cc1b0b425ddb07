use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use chrono::TimeZone;
use serde::{Deserialize, Serialize};

use crate::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Boolean(bool),
    Timestamp(i64),
    String(Arc<str>),
}

impl Default for Scalar {
    #[inline]
    fn default() -> Self {
        Scalar::Null
    }
}

macro_rules! impl_from_numerics {
    ($(($ty:ty, $item:ident)),*) => {
        $(
        impl From<$ty> for Scalar {
            fn from(value: $ty) -> Self {
                Scalar::$item(value)
            }
        }
        )*
    };
}

impl_from_numerics!(
    (i8, Int8),
    (i16, Int16),
    (i32, Int32),
    (i64, Int64),
    (f32, Float32),
    (f64, Float64)
);

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value.into())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.into())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl Scalar {
    #[inline]
    pub fn data_type(&self) -> DataType {
        match self {
            Scalar::Null => DataType::Null,
            Scalar::Int8(_) => DataType::Int8,
            Scalar::Int16(_) => DataType::Int16,
            Scalar::Int32(_) => DataType::Int32,
            Scalar::Int64(_) => DataType::Int64,
            Scalar::Float32(_) => DataType::Float32,
            Scalar::Float64(_) => DataType::Float64,
            Scalar::Boolean(_) => DataType::Boolean,
            Scalar::Timestamp(_) => DataType::Timestamp(None),
            Scalar::String(_) => DataType::String,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Returns the value as epoch milliseconds if this scalar carries a
    /// timestamp.
    #[inline]
    pub fn to_timestamp_millis(&self) -> Option<i64> {
        match self {
            Scalar::Timestamp(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the raw 64-bit integer representation of an integer or
    /// timestamp value.
    #[inline]
    pub fn to_raw_long(&self) -> Option<i64> {
        match self {
            Scalar::Int8(n) => Some(*n as i64),
            Scalar::Int16(n) => Some(*n as i64),
            Scalar::Int32(n) => Some(*n as i64),
            Scalar::Int64(n) => Some(*n),
            Scalar::Timestamp(n) => Some(*n),
            _ => None,
        }
    }

    /// Casts this value to `data_type`, following the widening rules of
    /// [`DataType::can_cast_to`]. Null passes through any target type.
    pub fn cast_to(&self, data_type: DataType) -> Option<Scalar> {
        if self.is_null() {
            return Some(Scalar::Null);
        }
        if self.data_type() == data_type {
            return Some(self.clone());
        }
        if !self.data_type().can_cast_to(data_type) {
            return None;
        }

        Some(match (self, data_type) {
            (Scalar::Int8(n), DataType::Int16) => Scalar::Int16(*n as i16),
            (Scalar::Int8(n), DataType::Int32) => Scalar::Int32(*n as i32),
            (Scalar::Int16(n), DataType::Int32) => Scalar::Int32(*n as i32),
            (Scalar::Int8(n), DataType::Int64) => Scalar::Int64(*n as i64),
            (Scalar::Int16(n), DataType::Int64) => Scalar::Int64(*n as i64),
            (Scalar::Int32(n), DataType::Int64) => Scalar::Int64(*n as i64),
            (Scalar::Int8(n), DataType::Float32) => Scalar::Float32(*n as f32),
            (Scalar::Int16(n), DataType::Float32) => Scalar::Float32(*n as f32),
            (Scalar::Int32(n), DataType::Float32) => Scalar::Float32(*n as f32),
            (Scalar::Int64(n), DataType::Float32) => Scalar::Float32(*n as f32),
            (Scalar::Int8(n), DataType::Float64) => Scalar::Float64(*n as f64),
            (Scalar::Int16(n), DataType::Float64) => Scalar::Float64(*n as f64),
            (Scalar::Int32(n), DataType::Float64) => Scalar::Float64(*n as f64),
            (Scalar::Int64(n), DataType::Float64) => Scalar::Float64(*n as f64),
            (Scalar::Float32(n), DataType::Float64) => Scalar::Float64(*n as f64),
            (value, DataType::String) => Scalar::String(value.to_string().into()),
            _ => return None,
        })
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Int8(n) => write!(f, "{}", n),
            Scalar::Int16(n) => write!(f, "{}", n),
            Scalar::Int32(n) => write!(f, "{}", n),
            Scalar::Int64(n) => write!(f, "{}", n),
            Scalar::Float32(n) => write!(f, "{}", n),
            Scalar::Float64(n) => write!(f, "{}", n),
            Scalar::Boolean(n) => write!(f, "{}", n),
            Scalar::Timestamp(n) => write!(f, "{}", chrono::Local.timestamp_millis(*n)),
            Scalar::String(n) => f.write_str(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_widening() {
        assert_eq!(
            Scalar::Int32(7).cast_to(DataType::Int64),
            Some(Scalar::Int64(7))
        );
        assert_eq!(
            Scalar::Int16(-3).cast_to(DataType::Float64),
            Some(Scalar::Float64(-3.0))
        );
        assert_eq!(Scalar::Int64(1).cast_to(DataType::Int32), None);
    }

    #[test]
    fn test_cast_null_passthrough() {
        assert_eq!(Scalar::Null.cast_to(DataType::Int64), Some(Scalar::Null));
        assert_eq!(
            Scalar::Null.cast_to(DataType::Timestamp(None)),
            Some(Scalar::Null)
        );
    }

    #[test]
    fn test_raw_long() {
        assert_eq!(Scalar::Int32(5).to_raw_long(), Some(5));
        assert_eq!(Scalar::Timestamp(100).to_raw_long(), Some(100));
        assert_eq!(Scalar::from("x").to_raw_long(), None);
    }

    #[test]
    fn test_timestamp_millis() {
        assert_eq!(Scalar::Timestamp(149).to_timestamp_millis(), Some(149));
        assert_eq!(Scalar::Int64(149).to_timestamp_millis(), None);
    }
}
