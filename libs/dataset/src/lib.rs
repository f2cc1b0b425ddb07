mod data_type;
mod row;
mod scalar;
mod schema;

pub use data_type::DataType;
pub use row::Row;
pub use scalar::Scalar;
pub use schema::{Field, Schema, SchemaRef};
