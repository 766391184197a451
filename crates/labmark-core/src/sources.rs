//! Best-effort loading of the submission files under grading.
//!
//! A file that cannot be read is scored as if it were empty; grading never
//! fails because a student deleted or misplaced a file.

use std::path::Path;

use tracing::debug;

/// Relative path of the server entry file within the lab root.
pub const SERVER_FILE: &str = "server/index.js";
/// Relative path of the Mongoose model file within the lab root.
pub const MODEL_FILE: &str = "server/models/song.model.js";

/// In-memory snapshot of the submission sources.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    /// Contents of `server/index.js`, empty if unreadable.
    pub server: String,
    /// Contents of `server/models/song.model.js`, empty if unreadable.
    pub model: String,
}

impl Sources {
    /// Read both submission files under `lab_root`, substituting empty text
    /// for anything missing or unreadable.
    pub fn load(lab_root: &Path) -> Self {
        Self {
            server: safe_read(&lab_root.join(SERVER_FILE)),
            model: safe_read(&lab_root.join(MODEL_FILE)),
        }
    }
}

fn safe_read(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            debug!(path = %path.display(), %err, "source file unreadable, scoring as empty");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_files_load_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sources = Sources::load(dir.path());
        assert!(sources.server.is_empty());
        assert!(sources.model.is_empty());
    }

    #[test]
    fn present_files_load_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("server/models")).unwrap();
        fs::write(dir.path().join(SERVER_FILE), "const app = express();").unwrap();
        fs::write(dir.path().join(MODEL_FILE), "const songSchema = {};").unwrap();

        let sources = Sources::load(dir.path());
        assert_eq!(sources.server, "const app = express();");
        assert_eq!(sources.model, "const songSchema = {};");
    }

    #[test]
    fn one_missing_file_does_not_affect_the_other() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("server")).unwrap();
        fs::write(dir.path().join(SERVER_FILE), "app.listen(3000);").unwrap();

        let sources = Sources::load(dir.path());
        assert_eq!(sources.server, "app.listen(3000);");
        assert!(sources.model.is_empty());
    }
}
