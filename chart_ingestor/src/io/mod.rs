pub mod file;
pub mod sink;

pub use file::FileSink;
pub use sink::{ChartSink, SinkError};
