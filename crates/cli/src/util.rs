//! Small file helpers shared by the commands.

use std::path::Path;

use crate::CliError;

/// Read a file as UTF-8, falling back to Windows-1252 when the bytes are
/// not valid UTF-8. Excel-exported submissions commonly are not.
pub fn read_file_as_utf8(path: &Path) -> Result<String, CliError> {
    let bytes = std::fs::read(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {}", path.display(), e)))?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

pub fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    std::fs::write(path, content)
        .map_err(|e| CliError::io(format!("cannot write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_plain_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.tsv");
        std::fs::write(&path, "name\tmass\nProline\t115.063").unwrap();
        assert_eq!(read_file_as_utf8(&path).unwrap(), "name\tmass\nProline\t115.063");
    }

    #[test]
    fn test_falls_back_to_windows_1252() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.tsv");
        // 0xB5 is the micro sign in Windows-1252 and an invalid UTF-8 start byte
        std::fs::write(&path, b"unit\n\xB5M").unwrap();
        assert_eq!(read_file_as_utf8(&path).unwrap(), "unit\n\u{b5}M");
    }

    #[test]
    fn test_missing_file_reports_io() {
        let err = read_file_as_utf8(Path::new("/nonexistent/in.tsv")).unwrap_err();
        assert_eq!(err.code, crate::exit_codes::EXIT_IO);
    }
}
