pub mod extractor;

pub use extractor::{combined_value, extract, ByteIndex, DisplayMode, InvalidByteIndex, Sample};
