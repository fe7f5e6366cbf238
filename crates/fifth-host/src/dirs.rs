//! Directory enumeration adapter
//!
//! Maps the stateful open/read/close filesystem iteration onto the VM's
//! stack-passing calling convention. Handles are generation-checked table
//! indices packed into a single cell, so a stale or fabricated handle value
//! is rejected with [`FsStatus::BadHandle`] instead of touching freed state.

use fifth_sdk::{addr_to_cell, cell_to_addr, EngineContext};

use crate::platform::{DirStream, Filesystem, FsStatus, MAX_NAME, MAX_PATH};

const SLOT_BITS: u32 = 16;
const SLOT_MASK: u32 = (1 << SLOT_BITS) - 1;
const MAX_SLOTS: usize = 1 << SLOT_BITS;

struct Slot {
    generation: u16,
    stream: Option<Box<dyn DirStream>>,
}

/// Table of live directory handles.
///
/// A handle packs `(generation << 16) | slot`. Generations start at 1 and
/// skip 0 on wrap, so the cell value 0 is never a valid handle.
#[derive(Default)]
pub struct DirTable {
    slots: Vec<Slot>,
}

impl DirTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stream, returning its packed handle. `None` when the
    /// table is full.
    pub fn insert(&mut self, stream: Box<dyn DirStream>) -> Option<u32> {
        if let Some(index) = self.slots.iter().position(|s| s.stream.is_none()) {
            self.slots[index].stream = Some(stream);
            return Some(pack(index, self.slots[index].generation));
        }
        if self.slots.len() >= MAX_SLOTS {
            return None;
        }
        self.slots.push(Slot {
            generation: 1,
            stream: Some(stream),
        });
        Some(pack(self.slots.len() - 1, 1))
    }

    /// The stream behind a handle, if the handle is current.
    pub fn get_mut(&mut self, handle: u32) -> Option<&mut (dyn DirStream + 'static)> {
        let (index, generation) = unpack(handle);
        let slot = self.slots.get_mut(index)?;
        if slot.generation != generation {
            return None;
        }
        slot.stream.as_deref_mut()
    }

    /// Release a handle. The slot's generation advances so the old handle
    /// value is dead from here on. Returns false for a stale handle.
    pub fn remove(&mut self, handle: u32) -> bool {
        let (index, generation) = unpack(handle);
        match self.slots.get_mut(index) {
            Some(slot) if slot.generation == generation && slot.stream.is_some() => {
                slot.stream = None;
                slot.generation = next_generation(slot.generation);
                true
            }
            _ => false,
        }
    }
}

fn pack(index: usize, generation: u16) -> u32 {
    ((generation as u32) << SLOT_BITS) | (index as u32 & SLOT_MASK)
}

fn unpack(handle: u32) -> (usize, u16) {
    ((handle & SLOT_MASK) as usize, (handle >> SLOT_BITS) as u16)
}

fn next_generation(generation: u16) -> u16 {
    match generation.checked_add(1) {
        Some(next) => next,
        None => 1,
    }
}

/// OpenDir: pop a character count then an address, read the path out of the
/// arena, open it, push the handle cell then the final result code.
///
/// An open that fails because no volume is mounted triggers exactly one
/// mount of the default volume and, only on mount success, one retry. The
/// pre-mount failure code is never observable once a mount attempt is made.
pub(crate) fn open_dir(
    engine: &mut dyn EngineContext,
    fs: &mut dyn Filesystem,
    table: &mut DirTable,
) {
    let count = engine.pop();
    let addr = cell_to_addr(engine.pop()) as usize;

    let mut buf = [0u8; MAX_PATH];
    let arena = engine.arena();
    let count = cell_to_count(count).min(MAX_PATH);
    let start = addr.min(arena.len());
    let end = start.saturating_add(count).min(arena.len());
    let copied = end - start;
    buf[..copied].copy_from_slice(&arena[start..end]);
    let path = String::from_utf8_lossy(&buf[..copied]).into_owned();

    let (handle, status) = match open_with_mount(fs, &path) {
        Ok(stream) => match table.insert(stream) {
            Some(handle) => (handle, FsStatus::Ok),
            None => (0, FsStatus::Io),
        },
        Err(status) => (0, status),
    };

    engine.push(addr_to_cell(handle));
    engine.push(status.cell());
}

fn open_with_mount(
    fs: &mut dyn Filesystem,
    path: &str,
) -> Result<Box<dyn DirStream>, FsStatus> {
    match fs.open_dir(path) {
        Err(FsStatus::NotMounted) => match fs.mount() {
            FsStatus::Ok => fs.open_dir(path),
            mount_failure => Err(mount_failure),
        },
        other => other,
    }
}

/// ReadDir: pop a handle, append the next entry name to the dictionary so the
/// VM can read it back by address, then push the name address, its length,
/// and the result code.
///
/// Once the enumeration is exhausted every further read pushes an empty name
/// and [`FsStatus::EndOfDir`] again.
pub(crate) fn read_dir(engine: &mut dyn EngineContext, table: &mut DirTable) {
    let handle = cell_to_addr(engine.pop());

    let (name, status) = match table.get_mut(handle) {
        None => (String::new(), FsStatus::BadHandle),
        Some(stream) => match stream.next_entry() {
            Ok(Some(mut name)) => {
                truncate_to_boundary(&mut name, MAX_NAME);
                (name, FsStatus::Ok)
            }
            Ok(None) => (String::new(), FsStatus::EndOfDir),
            Err(status) => (String::new(), status),
        },
    };

    let addr = engine.append(name.as_bytes());
    engine.push(addr_to_cell(addr));
    engine.push(name.len() as f64);
    engine.push(status.cell());
}

/// CloseDir: pop a handle, drop the native iteration state, push the result
/// code. The handle value must not be reused afterwards; if it is, the
/// generation check answers with [`FsStatus::BadHandle`].
pub(crate) fn close_dir(engine: &mut dyn EngineContext, table: &mut DirTable) {
    let handle = cell_to_addr(engine.pop());
    let status = if table.remove(handle) {
        FsStatus::Ok
    } else {
        FsStatus::BadHandle
    };
    engine.push(status.cell());
}

fn cell_to_count(cell: f64) -> usize {
    if cell.is_nan() || cell <= 0.0 {
        0
    } else {
        cell as usize
    }
}

fn truncate_to_boundary(name: &mut String, max: usize) {
    if name.len() <= max {
        return;
    }
    let mut end = max;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name.truncate(end);
}
