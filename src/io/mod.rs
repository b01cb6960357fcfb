//! Stream helpers.

mod seek_ext;
mod sub_stream;

pub use seek_ext::SeekExt;
pub use sub_stream::SubStream;
