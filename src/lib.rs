// https://github.com/rust-lang/cargo/issues/5034
#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
)]
#![warn(rust_2018_idioms)]

pub mod fork;
pub mod io;
mod os_type;
pub mod resources;
pub mod string;

pub use os_type::*;
pub use resources::{File as ResourceFile, Resource, ResourceId};

use std::fmt;

pub trait Reader: std::io::Read + std::io::Seek + fmt::Debug {}
impl<T: std::io::Read + std::io::Seek + ?Sized + fmt::Debug> Reader for T {}
