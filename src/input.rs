// Input stream: reads the whole source file into memory up front.
//
// Grounded in the teacher's `main.rs`, which wraps `fs::read_to_string` with
// a descriptive `map_err` rather than leaking the bare `io::Error`.

use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub struct InputError {
    pub path: String,
    pub source: std::io::Error,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to read '{}': {}", self.path, self.source)
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Reads the whole source file into memory; reports IO failure.
pub fn open_input_stream(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|e| InputError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = open_input_stream(Path::new("/nonexistent/path/xyz.pas")).unwrap_err();
        assert!(err.to_string().contains("xyz.pas"));
    }
}
