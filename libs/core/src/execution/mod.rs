pub mod execution_context;
pub mod stream;
pub mod streams;
pub mod watermark;
