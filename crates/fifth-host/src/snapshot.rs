//! Whole-arena state persistence
//!
//! Coarse snapshots of the engine's memory arena: a raw byte image with no
//! header, version tag, or checksum. A snapshot is only binary-compatible
//! with an engine build using an identical arena size and layout.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use fifth_sdk::EngineContext;

use crate::error::HostError;

/// Write the arena's current contents verbatim, overwriting any existing
/// file.
pub fn save(engine: &dyn EngineContext, path: &Path) -> Result<(), HostError> {
    fs::write(path, engine.arena()).map_err(|source| HostError::File {
        path: path.to_path_buf(),
        source,
    })
}

/// Read up to the arena's current length back into the arena.
///
/// A file shorter than the arena leaves the unread tail with its prior
/// contents; nothing is truncated or zero-filled. Returns the number of
/// bytes restored.
pub fn load(engine: &mut dyn EngineContext, path: &Path) -> Result<usize, HostError> {
    let mut file = File::open(path).map_err(|source| HostError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let arena = engine.arena_mut();
    let mut filled = 0;
    while filled < arena.len() {
        match file.read(&mut arena[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(HostError::File {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }
    Ok(filled)
}
