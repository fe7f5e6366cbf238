//! Fifth SDK - the contract between the Fifth engine and its host
//!
//! The engine (the stack-based interpreter) and the host (console, files,
//! platform control) meet at two traits: [`EngineContext`], implemented by the
//! engine and handed to the host for the duration of a syscall, and [`Host`],
//! implemented by the host bridge and invoked by the engine for every syscall,
//! trace message, and numeric-literal conversion.
//!
//! This crate carries no host policy: it compiles without the bridge so that
//! engine builds and host test doubles can depend on it alone.

#![warn(missing_docs)]

mod context;
mod host;
mod status;
mod types;

pub use context::EngineContext;
pub use host::{Host, NoopHost, SyscallOutcome};
pub use status::VmStatus;
pub use types::{addr_to_cell, cell_to_addr, syscalls, Addr, Cell, SyscallId};
