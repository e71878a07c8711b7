mod filter;
mod record;
mod status;
mod stream;

pub use filter::FilterSet;
pub use record::PinRecord;
pub use status::{InvalidStatus, PinStatus};
pub use stream::{pin_stream, PinStream, PinStreamSender, DEFAULT_STREAM_CAPACITY};
