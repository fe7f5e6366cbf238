//! Fifth interactive console
//!
//! Drives a line-edited session against a Fifth engine: startup (snapshot
//! restore or dictionary bootstrap plus boot script), then the read-eval
//! loop. Line editing — raw console bytes, cursor movement, history — is
//! owned by the external editor component; this crate only forwards finished
//! lines to the evaluator.

use std::path::PathBuf;

mod session;

pub use session::{run, run_session, startup, CONSOLE_LINE, CONSOLE_SOURCE};

/// Session configuration.
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    /// Script loaded right after initialization when no snapshot is
    /// restored.
    pub boot_script: PathBuf,
    /// Snapshot to restore instead of bootstrapping.
    pub snapshot: Option<PathBuf>,
    /// Where line-editor history persists across sessions. `None` disables
    /// persistence.
    pub history_file: Option<PathBuf>,
    /// Prompt shown by the line editor.
    pub prompt: String,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            boot_script: PathBuf::from("boot.5th"),
            snapshot: None,
            history_file: dirs::home_dir().map(|h| h.join(".fifth").join("history")),
            prompt: "> ".to_string(),
        }
    }
}
