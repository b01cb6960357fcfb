//! Locating the resource fork of a file on disk.
//!
//! On macOS the fork is read through the `..namedfork/rsrc` pseudo-path. Other
//! systems store it next to the data file, either as `<name>.rsrc` or, with the
//! `apple_double` feature, as an AppleDouble `._<name>` sidecar.

use anyhow::{Context, Result as AResult};
#[cfg(feature = "apple_double")]
use anyhow::bail;
#[cfg(feature = "apple_double")]
use byteordered::ByteOrdered;
use crate::{io::SubStream, resources::File};
use std::{fs, io, path::{Path, PathBuf}};
#[cfg(feature = "apple_double")]
use std::io::{Seek, SeekFrom};
use tracing::debug;

/// A stream over the resource fork of a file.
pub type ForkStream = SubStream<fs::File>;

fn append_to_path(path: &Path, suffix: &str) -> PathBuf {
    let mut path = path.as_os_str().to_owned();
    path.push(suffix);
    path.into()
}

fn open_named_fork(path: &Path) -> io::Result<ForkStream> {
    let path = path.join("..namedfork").join("rsrc");
    let metadata = fs::metadata(&path)?;
    if metadata.len() > 0 {
        SubStream::new(fs::File::open(&path)?)
    } else {
        Err(io::Error::from(io::ErrorKind::NotFound))
    }
}

fn open_rsrc_file(path: &Path) -> io::Result<ForkStream> {
    SubStream::new(fs::File::open(append_to_path(path, ".rsrc"))?)
}

#[cfg(feature = "apple_double")]
fn apple_double_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let mut double_name = std::ffi::OsString::from("._");
    double_name.push(name);
    Some(path.with_file_name(double_name))
}

/// Finds the resource fork entry of an AppleSingle or AppleDouble file.
#[cfg(feature = "apple_double")]
pub fn open_apple_double(mut file: fs::File) -> AResult<ForkStream> {
    const DOUBLE_MAGIC: u32 = 0x51607;
    const SINGLE_MAGIC: u32 = 0x51600;
    const RESOURCE_FORK_ID: u32 = 2;

    let (start, end) = {
        let mut input = ByteOrdered::be(&mut file);

        let magic = input.read_u32().context("Not an AppleSingle/AppleDouble file; could not read magic")?;
        if magic != DOUBLE_MAGIC && magic != SINGLE_MAGIC {
            bail!("Not an AppleSingle/AppleDouble file; bad magic");
        }

        let version = input.read_u32().context("Not an AppleSingle/AppleDouble file; could not read version number")?;
        if version != 0x10000 && version != 0x20000 {
            bail!("Unknown AppleSingle/AppleDouble version {:x}", version);
        }

        // In V1 this is an ASCII string, in V2 it is zero-filled, in all cases
        // we do not care about it
        input.seek(SeekFrom::Current(16)).context("Could not seek past AppleSingle/AppleDouble home file system name")?;

        let num_entries = input.read_u16().context("Could not read number of AppleSingle/AppleDouble entries")?;

        let mut resource_fork = None;
        for index in 0..num_entries {
            let entry_id = input.read_u32().with_context(|| format!("Could not read ID of AppleSingle/AppleDouble entry {}", index))?;
            let offset = input.read_u32().with_context(|| format!("Could not read offset of AppleSingle/AppleDouble entry {}", index))?;
            let length = input.read_u32().with_context(|| format!("Could not read length of AppleSingle/AppleDouble entry {}", index))?;

            match entry_id {
                0 => bail!("Invalid ID 0 for AppleSingle/AppleDouble entry {}", index),
                RESOURCE_FORK_ID => {
                    resource_fork = Some((u64::from(offset), u64::from(offset) + u64::from(length)));
                },
                _ => {},
            }
        }

        resource_fork.context("AppleSingle/AppleDouble missing resource fork")?
    };

    Ok(SubStream::with_bounds(file, start, end))
}

/// Opens the resource fork of the file at `path`.
pub fn open_resource_fork(path: impl AsRef<Path>) -> AResult<ForkStream> {
    let path = path.as_ref();
    let fork = open_named_fork(path)
        .or_else(|_| open_rsrc_file(path));

    #[cfg(feature = "apple_double")]
    let fork = fork.map_err(anyhow::Error::from).or_else(|_| -> AResult<ForkStream> {
        let double_path = apple_double_path(path)
            .with_context(|| format!("{} has no file name", path.display()))?;
        let file = fs::File::open(&double_path)
            .or_else(|_| fs::File::open(path))?;
        open_apple_double(file)
    });

    let fork = fork.with_context(|| format!("Could not find a resource fork for {}", path.display()))?;
    debug!(path = %path.display(), size = fork.size(), "opened resource fork");
    Ok(fork)
}

impl File<ForkStream> {
    /// Opens and reads the resource fork of the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> AResult<Self> {
        let path = path.as_ref();
        let fork = open_resource_fork(path)?;
        Self::new(fork).with_context(|| format!("Could not read resource map of {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsrc_path() {
        assert_eq!(append_to_path(Path::new("dir/Game"), ".rsrc"), PathBuf::from("dir/Game.rsrc"));
    }

    #[cfg(feature = "apple_double")]
    #[test]
    fn double_path() {
        assert_eq!(apple_double_path(Path::new("dir/Game")).unwrap(), PathBuf::from("dir/._Game"));
        assert!(apple_double_path(Path::new("/")).is_none());
    }
}
