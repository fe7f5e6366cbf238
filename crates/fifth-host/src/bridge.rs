//! Syscall bridge — the engine's only channel to the outside world
//!
//! The engine invokes [`Bridge::syscall`] with an id and, for the second
//! phase of a word-consuming call, the captured token. Dispatch covers the
//! core console and filesystem callbacks plus the application extensions in
//! the user id range.

use std::path::Path;

use fifth_sdk::{
    cell_to_addr, syscalls, Cell, EngineContext, Host, SyscallId, SyscallOutcome, VmStatus,
};

use crate::dirs::{self, DirTable};
use crate::loader;
use crate::platform::Platform;
use crate::report::{self, Reporter};
use crate::snapshot;

/// Emit a newline and end the process.
pub const SYS_BYE: SyscallId = syscalls::USER;
/// Pop one cell, push its sine.
pub const SYS_SIN: SyscallId = syscalls::USER + 1;
/// Two-phase: capture the next source token as a filename and load it.
pub const SYS_INCLUDE: SyscallId = syscalls::USER + 2;
/// Snapshot the arena to the configured path.
pub const SYS_SAVE: SyscallId = syscalls::USER + 3;

/// Bridge configuration.
pub struct BridgeOptions {
    /// Where the save extension writes its snapshot.
    pub snapshot_path: std::path::PathBuf,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            snapshot_path: "fifth.img".into(),
        }
    }
}

/// The two-phase token protocol as an explicit state machine.
///
/// `Idle` until a syscall asks for a token; `Awaiting` while the engine
/// captures the next whitespace-delimited token; armed — and immediately
/// back to `Idle` — when the engine re-invokes the same syscall with the
/// token supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordFetch {
    Idle,
    Awaiting(SyscallId),
}

impl WordFetch {
    /// Resolve one invocation: hand back the captured token if armed,
    /// otherwise record the request so the caller returns
    /// [`SyscallOutcome::PassWord`].
    fn poll<'a>(&mut self, id: SyscallId, input: Option<&'a str>) -> Option<&'a str> {
        match input {
            Some(word) => {
                *self = WordFetch::Idle;
                Some(word)
            }
            None => {
                *self = WordFetch::Awaiting(id);
                None
            }
        }
    }
}

/// Central syscall dispatcher.
///
/// Owns the platform services, the directory handle table, and the
/// diagnostic reporter; the engine owns everything else and lends itself in
/// through the [`EngineContext`] borrow on every call.
pub struct Bridge<P: Platform> {
    platform: P,
    reporter: Reporter,
    dirs: DirTable,
    words: WordFetch,
    options: BridgeOptions,
}

impl<P: Platform> Bridge<P> {
    /// Bridge with default options.
    pub fn new(platform: P, reporter: Reporter) -> Self {
        Self::with_options(platform, reporter, BridgeOptions::default())
    }

    /// Bridge with explicit options.
    pub fn with_options(platform: P, reporter: Reporter, options: BridgeOptions) -> Self {
        Self {
            platform,
            reporter,
            dirs: DirTable::new(),
            words: WordFetch::Idle,
            options,
        }
    }

    /// The platform services, for embedders that need them back.
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    fn dispatch(
        &mut self,
        engine: &mut dyn EngineContext,
        id: SyscallId,
        input: Option<&str>,
    ) -> SyscallOutcome {
        match id {
            syscalls::EMIT => {
                let byte = (engine.pop() as i64) as u8;
                let out = self.platform.console();
                let _ = out.write_all(&[byte]);
                let _ = out.flush();
            }

            syscalls::PRINT => {
                let value = engine.pop();
                let out = self.platform.console();
                let _ = write!(out, "{} ", format_cell(value));
            }

            syscalls::TELL => {
                let len = engine.pop();
                let addr = cell_to_addr(engine.pop()) as usize;
                let arena = engine.arena();
                let start = addr.min(arena.len());
                let end = start.saturating_add(cell_to_len(len)).min(arena.len());
                let out = self.platform.console();
                let _ = out.write_all(&arena[start..end]);
                let _ = out.flush();
            }

            syscalls::REBOOT => {
                {
                    let out = self.platform.console();
                    let _ = out.write_all(b"Rebooting...");
                    let _ = out.flush();
                }
                self.platform.reboot()
            }

            syscalls::OPEN_DIR => {
                dirs::open_dir(engine, self.platform.filesystem(), &mut self.dirs)
            }

            syscalls::READ_DIR => dirs::read_dir(engine, &mut self.dirs),

            syscalls::CLOSE_DIR => dirs::close_dir(engine, &mut self.dirs),

            SYS_BYE => {
                {
                    let out = self.platform.console();
                    let _ = out.write_all(b"\n");
                    let _ = out.flush();
                }
                self.platform.terminate()
            }

            SYS_SIN => {
                let value = engine.pop();
                engine.push(value.sin());
            }

            SYS_INCLUDE => match self.words.poll(id, input) {
                Some(word) => loader::include(engine, &mut self.reporter, Path::new(word)),
                None => return SyscallOutcome::PassWord,
            },

            SYS_SAVE => {
                if let Err(e) = snapshot::save(engine, &self.options.snapshot_path) {
                    self.reporter.error(None, &e.to_string());
                }
            }

            other => self
                .reporter
                .warning(&format!("unhandled syscall {}", other)),
        }

        SyscallOutcome::Interpret
    }
}

impl<P: Platform> Host for Bridge<P> {
    fn syscall(
        &mut self,
        engine: &mut dyn EngineContext,
        id: SyscallId,
        input: Option<&str>,
    ) -> SyscallOutcome {
        self.dispatch(engine, id, input)
    }

    fn trace(&mut self, message: std::fmt::Arguments<'_>) {
        self.reporter.trace(message);
    }

    fn parse_number(&mut self, token: &str) -> Result<Cell, VmStatus> {
        report::parse_number(token)
    }
}

/// Engine-native numeric form: integral cells print without a decimal point.
fn format_cell(value: Cell) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn cell_to_len(cell: Cell) -> usize {
    if cell.is_nan() || cell <= 0.0 {
        0
    } else {
        cell as usize
    }
}
