//! Host trait — the callback surface the engine invokes
//!
//! The engine reaches the outside world exclusively through an implementation
//! of [`Host`]: syscalls for I/O and platform actions, a trace channel for
//! interpreter diagnostics, and numeric-literal conversion.

use std::fmt;

use crate::context::EngineContext;
use crate::status::VmStatus;
use crate::types::{Cell, SyscallId};

/// Instruction returned to the evaluator after a syscall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyscallOutcome {
    /// Continue interpreting the current input.
    Interpret,
    /// Capture the next whitespace-delimited token from the source and
    /// re-invoke the same syscall with it supplied as `input`.
    ///
    /// This lets a syscall consume a textual operand — a filename, a word
    /// name — without any special support in the engine's compiler.
    PassWord,
}

/// The complete host-callback surface.
///
/// One value implements this for the lifetime of the engine; the engine calls
/// in with a borrowed [`EngineContext`] so the host can touch the stack and
/// arena while the call is in flight.
pub trait Host {
    /// Perform a syscall. `input` is the token captured after a prior
    /// [`SyscallOutcome::PassWord`] for the same id, absent otherwise.
    fn syscall(
        &mut self,
        engine: &mut dyn EngineContext,
        id: SyscallId,
        input: Option<&str>,
    ) -> SyscallOutcome;

    /// Low-level interpreter trace output. Only called when the engine's
    /// trace mode is enabled.
    fn trace(&mut self, message: fmt::Arguments<'_>);

    /// Convert a source token to a cell. The whole token must parse; any
    /// trailing characters make it [`VmStatus::NotAWord`], which the engine
    /// raises as an abort rather than continuing with a garbage value.
    fn parse_number(&mut self, token: &str) -> Result<Cell, VmStatus>;
}

/// A host that ignores every callback. Useful for engine tests.
pub struct NoopHost;

impl Host for NoopHost {
    fn syscall(
        &mut self,
        _engine: &mut dyn EngineContext,
        _id: SyscallId,
        _input: Option<&str>,
    ) -> SyscallOutcome {
        SyscallOutcome::Interpret
    }

    fn trace(&mut self, _message: fmt::Arguments<'_>) {}

    fn parse_number(&mut self, _token: &str) -> Result<Cell, VmStatus> {
        Err(VmStatus::NotAWord)
    }
}
