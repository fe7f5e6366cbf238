//! Fifth host bridge
//!
//! Everything the Fifth engine reaches through a syscall lives here: console
//! output, directory enumeration over the platform filesystem, script
//! loading, whole-arena snapshots, and the diagnostic reporter. The engine
//! itself is an external collaborator bound through the `fifth-sdk` traits;
//! embedders construct a [`Bridge`] over a [`Platform`] and hand it to the
//! engine as its [`fifth_sdk::Host`].
//!
//! The whole crate is single-threaded by construction: no locks, no shared
//! ownership. Syscall results travel back to VM code as plain numeric codes
//! on the data stack.

pub mod bridge;
pub mod dirs;
pub mod loader;
pub mod platform;
pub mod report;
pub mod snapshot;

mod error;

pub use bridge::{Bridge, BridgeOptions, SYS_BYE, SYS_INCLUDE, SYS_SAVE, SYS_SIN};
pub use error::HostError;
pub use platform::{
    DirStream, Filesystem, FsStatus, Platform, StdFilesystem, StdPlatform, MAX_NAME, MAX_PATH,
};
pub use report::{parse_number, Reporter};
