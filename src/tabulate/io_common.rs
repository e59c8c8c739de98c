use std::path::{Path, PathBuf};

use crate::tabulate::*;

/// Resolves a path written in a configuration file. Relative paths are
/// relative to the directory of the configuration file.
pub fn resolve_path(root: Option<&Path>, file_path: &str) -> String {
    match root {
        Some(r) if Path::new(file_path).is_relative() => {
            let p: PathBuf = [r, Path::new(file_path)].iter().collect();
            p.as_path().display().to_string()
        }
        _ => file_path.to_string(),
    }
}

pub fn ensure_input_exists(path: &str) -> CliResult<()> {
    if !Path::new(path).is_file() {
        warn!("ensure_input_exists: {:?} not found", path);
        return Err(TopsisError::InputNotFound {
            path: path.to_string(),
        }
        .into());
    }
    Ok(())
}

pub fn unreadable(path: &str, reason: impl std::fmt::Display) -> TopsisCliError {
    TopsisError::UnreadableInput {
        path: path.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Line endings and the final newline are ignored when comparing outputs.
pub fn normalize_text(s: &str) -> String {
    s.replace("\r\n", "\n").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_follow_the_config() {
        let root = Path::new("/data/runs");
        assert_eq!(
            resolve_path(Some(root), "input.csv"),
            Path::new("/data/runs/input.csv").display().to_string()
        );
        assert_eq!(resolve_path(Some(root), "/tmp/x.csv"), "/tmp/x.csv");
        assert_eq!(resolve_path(None, "input.csv"), "input.csv");
    }

    #[test]
    fn missing_input() {
        assert!(matches!(
            ensure_input_exists("/definitely/not/here.csv"),
            Err(TopsisCliError::Core {
                source: TopsisError::InputNotFound { .. }
            })
        ));
    }

    #[test]
    fn text_normalization() {
        assert_eq!(normalize_text("a,b\r\n1,2\r\n"), "a,b\n1,2");
    }
}
