//! Reader for the classic [Mac Resource File] format.
//!
//! [Mac Resource File]: https://developer.apple.com/library/archive/documentation/mac/pdf/MoreMacintoshToolbox.pdf#page=151

mod error;
mod file;
mod id;
mod resource;

pub use error::Error;
pub use file::File;
pub use id::ResourceId;
pub use resource::Resource;

pub type Result<T> = core::result::Result<T, Error>;
