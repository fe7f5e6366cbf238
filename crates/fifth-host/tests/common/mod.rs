//! Shared doubles for bridge integration tests: a scripted engine, an
//! in-memory filesystem, and a capturing platform.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use termcolor::NoColor;

use fifth_host::{DirStream, Filesystem, FsStatus, Platform, Reporter};
use fifth_sdk::{Addr, Cell, EngineContext, VmStatus};

/// Engine double: owns a stack and an arena, records every evaluated line,
/// and can be told to fail lines containing a marker.
pub struct MockEngine {
    pub stack: Vec<Cell>,
    pub arena: Vec<u8>,
    pub evaled: Vec<String>,
    pub fail_contains: Option<(&'static str, VmStatus)>,
    pub bootstrapped: bool,
    pub trace: bool,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            arena: Vec::new(),
            evaled: Vec::new(),
            fail_contains: None,
            bootstrapped: false,
            trace: false,
        }
    }

    pub fn with_arena(bytes: &[u8]) -> Self {
        let mut engine = Self::new();
        engine.arena = bytes.to_vec();
        engine
    }
}

impl EngineContext for MockEngine {
    fn push(&mut self, value: Cell) {
        self.stack.push(value);
    }

    fn pop(&mut self) -> Cell {
        self.stack.pop().expect("data stack underrun in test")
    }

    fn arena(&self) -> &[u8] {
        &self.arena
    }

    fn arena_mut(&mut self) -> &mut [u8] {
        &mut self.arena
    }

    fn append(&mut self, bytes: &[u8]) -> Addr {
        let addr = self.arena.len() as Addr;
        self.arena.extend_from_slice(bytes);
        addr
    }

    fn eval(&mut self, source: &str) -> VmStatus {
        self.evaled.push(source.to_string());
        if let Some((marker, status)) = self.fail_contains {
            if source.contains(marker) {
                return status;
            }
        }
        VmStatus::Ok
    }

    fn bootstrap(&mut self) {
        self.bootstrapped = true;
    }

    fn trace_enabled(&self) -> bool {
        self.trace
    }
}

struct VecStream {
    entries: Vec<String>,
    pos: usize,
}

impl DirStream for VecStream {
    fn next_entry(&mut self) -> Result<Option<String>, FsStatus> {
        match self.entries.get(self.pos) {
            Some(name) => {
                self.pos += 1;
                Ok(Some(name.clone()))
            }
            None => Ok(None),
        }
    }
}

/// Filesystem double with scripted mount and open outcomes.
pub struct MemFilesystem {
    pub mounted: bool,
    pub mount_result: FsStatus,
    pub entries: Vec<String>,
    /// Forced open failure once mounted.
    pub open_failure: Option<FsStatus>,
    pub mount_calls: usize,
    pub open_calls: usize,
}

impl Default for MemFilesystem {
    fn default() -> Self {
        Self {
            mounted: false,
            mount_result: FsStatus::Ok,
            entries: Vec::new(),
            open_failure: None,
            mount_calls: 0,
            open_calls: 0,
        }
    }
}

impl Filesystem for MemFilesystem {
    fn open_dir(&mut self, _path: &str) -> Result<Box<dyn DirStream>, FsStatus> {
        self.open_calls += 1;
        if !self.mounted {
            return Err(FsStatus::NotMounted);
        }
        if let Some(status) = self.open_failure {
            return Err(status);
        }
        Ok(Box::new(VecStream {
            entries: self.entries.clone(),
            pos: 0,
        }))
    }

    fn mount(&mut self) -> FsStatus {
        self.mount_calls += 1;
        if self.mount_result == FsStatus::Ok {
            self.mounted = true;
        }
        self.mount_result
    }
}

/// Platform double: console output lands in a byte buffer; power controls
/// panic so tests can assert the divergence.
pub struct MockPlatform {
    pub out: Vec<u8>,
    pub fs: MemFilesystem,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            out: Vec::new(),
            fs: MemFilesystem::default(),
        }
    }

    pub fn out_str(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

impl Platform for MockPlatform {
    fn console(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn filesystem(&mut self) -> &mut dyn Filesystem {
        &mut self.fs
    }

    fn reboot(&mut self) -> ! {
        panic!("reboot requested")
    }

    fn terminate(&mut self) -> ! {
        panic!("terminate requested")
    }
}

/// Single-threaded shared capture buffer for reporter output.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reporter whose plain-text output can be read back through `buf`.
pub fn capture_reporter(buf: &SharedBuf) -> Reporter {
    Reporter::new(Box::new(NoColor::new(buf.clone())))
}

/// Reporter that discards everything.
pub fn quiet_reporter() -> Reporter {
    Reporter::new(Box::new(NoColor::new(io::sink())))
}
