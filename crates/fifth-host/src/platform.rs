//! Platform services — console, filesystem, power control
//!
//! The bridge never touches ambient globals; every platform object it needs
//! is part of a [`Platform`] value passed in at construction, so tests swap
//! in doubles and embedded targets supply their own drivers.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use fifth_sdk::Cell;

/// Longest path copied out of the arena for a directory open.
pub const MAX_PATH: usize = 255;

/// Longest directory entry name handed back to the VM; longer names are
/// truncated.
pub const MAX_NAME: usize = 255;

/// Filesystem result codes, pushed to the VM as cells for branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FsStatus {
    /// Operation completed.
    Ok = 0,
    /// Any I/O failure without a more specific code.
    Io = 1,
    /// The path does not exist.
    NotFound = 2,
    /// No volume is mounted. Observable only from `mount` itself; a failed
    /// directory open triggers a mount-and-retry first.
    NotMounted = 3,
    /// The enumeration is exhausted. Repeats on every further read.
    EndOfDir = 4,
    /// The handle is stale, closed, or was never issued.
    BadHandle = 5,
}

impl FsStatus {
    /// The code as a stack cell.
    pub fn cell(self) -> Cell {
        self as u8 as Cell
    }

    /// Map a native I/O error to a status code.
    pub fn from_io(err: &io::Error) -> FsStatus {
        match err.kind() {
            io::ErrorKind::NotFound => FsStatus::NotFound,
            _ => FsStatus::Io,
        }
    }
}

/// One in-flight directory enumeration.
pub trait DirStream {
    /// The next entry name, `Ok(None)` once exhausted — and on every call
    /// after that.
    fn next_entry(&mut self) -> Result<Option<String>, FsStatus>;
}

/// The block-device filesystem, behind whatever driver the platform has.
pub trait Filesystem {
    /// Open a directory for enumeration.
    fn open_dir(&mut self, path: &str) -> Result<Box<dyn DirStream>, FsStatus>;

    /// Mount the default volume.
    fn mount(&mut self) -> FsStatus;
}

/// Everything the bridge needs from the platform.
pub trait Platform {
    /// The console output stream.
    fn console(&mut self) -> &mut dyn Write;

    /// The filesystem driver.
    fn filesystem(&mut self) -> &mut dyn Filesystem;

    /// Trigger a platform reset. Does not return.
    fn reboot(&mut self) -> !;

    /// End the process. Does not return.
    fn terminate(&mut self) -> !;
}

/// Hosted-OS filesystem over `std::fs`, rooted at a base directory.
///
/// Starts unmounted so the bridge's mount-on-demand path is exercised for
/// real: the first directory open fails with [`FsStatus::NotMounted`], the
/// bridge mounts, and the retry goes through.
pub struct StdFilesystem {
    root: PathBuf,
    mounted: bool,
}

impl StdFilesystem {
    /// A filesystem whose default volume is `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mounted: false,
        }
    }
}

impl Filesystem for StdFilesystem {
    fn open_dir(&mut self, path: &str) -> Result<Box<dyn DirStream>, FsStatus> {
        if !self.mounted {
            return Err(FsStatus::NotMounted);
        }
        let full = self.root.join(path.trim_start_matches('/'));
        match fs::read_dir(full) {
            Ok(inner) => Ok(Box::new(StdDirStream { inner, done: false })),
            Err(e) => Err(FsStatus::from_io(&e)),
        }
    }

    fn mount(&mut self) -> FsStatus {
        if self.root.is_dir() {
            self.mounted = true;
            FsStatus::Ok
        } else {
            FsStatus::NotFound
        }
    }
}

struct StdDirStream {
    inner: fs::ReadDir,
    done: bool,
}

impl DirStream for StdDirStream {
    fn next_entry(&mut self) -> Result<Option<String>, FsStatus> {
        if self.done {
            return Ok(None);
        }
        match self.inner.next() {
            None => {
                self.done = true;
                Ok(None)
            }
            Some(Ok(entry)) => Ok(Some(entry.file_name().to_string_lossy().into_owned())),
            Some(Err(e)) => Err(FsStatus::from_io(&e)),
        }
    }
}

/// Hosted-OS platform: stdout console, [`StdFilesystem`], process exit for
/// both power controls (a plain process has no firmware to reset into).
pub struct StdPlatform {
    out: io::Stdout,
    fs: StdFilesystem,
}

impl StdPlatform {
    /// A platform whose filesystem is rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            out: io::stdout(),
            fs: StdFilesystem::new(root),
        }
    }
}

impl Platform for StdPlatform {
    fn console(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn filesystem(&mut self) -> &mut dyn Filesystem {
        &mut self.fs
    }

    fn reboot(&mut self) -> ! {
        process::exit(0)
    }

    fn terminate(&mut self) -> ! {
        process::exit(0)
    }
}
