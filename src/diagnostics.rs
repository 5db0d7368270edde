// Diagnostic printer: single-shot error reporting policy.
//
// The parser and symbol table never call this directly -- they propagate
// `Result<_, CompileError>` so the core stays reentrant and testable. Only
// `main` calls `report`, once, on the first `Err`.

use crate::error::CompileError;

/// Formats and reports a `CompileError`, terminating the process with status 1.
pub fn report(err: &CompileError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}
