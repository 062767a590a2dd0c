use std::fs;
use std::path::Path;

use crate::errors::Result;
use crate::prompt::Prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    /// The file already existed and the user declined to replace it.
    Cancelled,
}

/// Writes `contents` to `path`, asking through `prompt` before replacing an
/// existing file. Parent directories are created as needed.
pub fn write_output<P: Prompt + ?Sized>(
    path: &Path,
    contents: &str,
    prompt: &mut P,
) -> Result<WriteOutcome> {
    let outcome = if path.exists() {
        let message = format!("Directory \"{}\" already exists. Continue?", path.display());
        if !prompt.confirm(&message)? {
            tracing::info!(path = %path.display(), "overwrite declined");
            return Ok(WriteOutcome::Cancelled);
        }
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    tracing::info!(path = %path.display(), bytes = contents.len(), ?outcome, "wrote output");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    struct Answer {
        yes: bool,
        asked: Vec<String>,
    }

    impl Prompt for Answer {
        fn confirm(&mut self, message: &str) -> io::Result<bool> {
            self.asked.push(message.to_string());
            Ok(self.yes)
        }
    }

    fn answer(yes: bool) -> Answer {
        Answer {
            yes,
            asked: Vec::new(),
        }
    }

    #[test]
    fn test_new_file_needs_no_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.txt");
        let mut prompt = answer(false);
        let outcome = write_output(&path, "國", &mut prompt).unwrap();
        assert_eq!(outcome, WriteOutcome::Created);
        assert!(prompt.asked.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "國");
    }

    #[test]
    fn test_declined_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();
        let mut prompt = answer(false);
        let outcome = write_output(&path, "new", &mut prompt).unwrap();
        assert_eq!(outcome, WriteOutcome::Cancelled);
        assert_eq!(prompt.asked.len(), 1);
        assert!(prompt.asked[0].contains("out.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn test_confirmed_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "old").unwrap();
        let mut prompt = answer(true);
        let outcome = write_output(&path, "new", &mut prompt).unwrap();
        assert_eq!(outcome, WriteOutcome::Overwritten);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // The target is a directory, so writing it fails after confirmation.
        let mut prompt = answer(true);
        assert!(write_output(dir.path(), "x", &mut prompt).is_err());
    }
}
