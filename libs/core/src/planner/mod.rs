mod field_map;
mod rowtime;
mod scan;

pub use field_map::{needs_conversion, FieldIndexMapping, TIME_ATTRIBUTE_MARKER};
pub use rowtime::{resolve_rowtime, RowtimeDeclaration, RowtimeDescriptor};
pub use scan::ScanNode;
