mod scan;

pub use scan::create_scan_stream;
