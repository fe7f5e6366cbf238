//! The read-eval loop and the startup sequence around it.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use fifth_host::{loader, snapshot, Reporter};
use fifth_sdk::EngineContext;

use crate::ConsoleOptions;

/// Synthetic source name for errors raised from console input.
pub const CONSOLE_SOURCE: &str = "console";

/// Console input has no multi-line counter; every line reports as line 1.
pub const CONSOLE_LINE: u32 = 1;

/// Bring the engine up: restore the requested snapshot, or bootstrap the
/// core dictionary and run the boot script.
///
/// A snapshot that fails to load is reported and the session falls back to
/// the bootstrap path, so a stale `--load` never leaves the engine empty.
pub fn startup(engine: &mut dyn EngineContext, reporter: &mut Reporter, options: &ConsoleOptions) {
    if let Some(path) = &options.snapshot {
        match snapshot::load(engine, path) {
            Ok(_) => return,
            Err(e) => reporter.error(None, &e.to_string()),
        }
    }
    engine.bootstrap();
    loader::include(engine, reporter, &options.boot_script);
}

/// The interactive loop: read a finished line from the editor, evaluate it,
/// report any error tagged `console:1`, repeat.
///
/// The editor owns the raw console bytes and all cursor/history state; a
/// completed line is the only thing that crosses back here. VM errors never
/// end the loop — from inside a session only the terminate extension or a
/// platform reset does. On a hosted OS, end-of-input (Ctrl-D) stands in for
/// terminate.
pub fn run(
    engine: &mut dyn EngineContext,
    reporter: &mut Reporter,
    options: &ConsoleOptions,
) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    if let Some(path) = &options.history_file {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline(&options.prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);
                loader::eval_line(engine, reporter, Some(CONSOLE_SOURCE), CONSOLE_LINE, &line);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = &options.history_file {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.save_history(path);
    }

    Ok(())
}

/// Startup followed by the interactive loop, with diagnostics on stderr.
pub fn run_session(engine: &mut dyn EngineContext, options: &ConsoleOptions) -> anyhow::Result<()> {
    let mut reporter = Reporter::stderr();
    startup(engine, &mut reporter, options);
    run(engine, &mut reporter, options)
}
