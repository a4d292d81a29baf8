//! Registry stored as a text file on the local file system.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use dockmaster_core::ChangeDescription;
use tracing::info;
use uuid::Uuid;

use super::{RegistryError, RegistrySource};

/// [`RegistrySource`] backed by a single text file.
///
/// Replacements are written to a sibling temporary file, flushed, and renamed
/// over the original, so readers never observe a partially written registry.
/// A registry file marked read-only is never replaced.
#[derive(Debug, Clone)]
pub struct FileRegistry {
    path: PathBuf,
}

impl FileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "registry".to_string());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
    }

    fn io_error(&self, source: std::io::Error) -> RegistryError {
        RegistryError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RegistrySource for FileRegistry {
    fn fetch(&self) -> Result<String, RegistryError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(RegistryError::NotFound {
                path: self.path.clone(),
            }),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn publish(&self, text: &str, change: &ChangeDescription) -> Result<(), RegistryError> {
        // The rename would succeed regardless of the file's own permissions.
        if let Ok(metadata) = std::fs::metadata(&self.path) {
            if metadata.permissions().readonly() {
                return Err(RegistryError::Rejected(format!(
                    "{} is read-only",
                    self.path.display()
                )));
            }
        }

        let temp = self.temp_path();
        let written = File::create(&temp).and_then(|mut file| {
            file.write_all(text.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| std::fs::rename(&temp, &self.path)) {
            let _ = std::fs::remove_file(&temp);
            return Err(self.io_error(e));
        }

        info!(
            path = %self.path.display(),
            branch = %change.branch_name,
            commit = %change.commit_message,
            "registry updated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_registry() -> FileRegistry {
        let path = std::env::temp_dir().join(format!("dockmaster-{}.txt", Uuid::new_v4()));
        FileRegistry::new(path)
    }

    fn description() -> ChangeDescription {
        ChangeDescription {
            branch_name: "suggestion-local-add-XD11".to_string(),
            commit_message: "Add DM XD11".to_string(),
            title: "Add Dockmaster XD11".to_string(),
            body: String::new(),
        }
    }

    #[test]
    fn test_fetch_missing_file_is_not_found() {
        let registry = temp_registry();
        assert!(matches!(registry.fetch(), Err(RegistryError::NotFound { .. })));
    }

    #[test]
    fn test_publish_then_fetch_returns_new_text() {
        // Arrange
        let registry = temp_registry();
        std::fs::write(registry.path(), "old\n").expect("seed");

        // Act
        registry
            .publish("XD11\t3000\t4000\t7\ttrue\n", &description())
            .expect("publish");
        let text = registry.fetch().expect("fetch");
        let _ = std::fs::remove_file(registry.path());

        // Assert
        assert_eq!(text, "XD11\t3000\t4000\t7\ttrue\n");
    }

    #[test]
    fn test_publish_leaves_no_temp_file_behind() {
        let registry = temp_registry();
        registry.publish("x\n", &description()).expect("publish");

        let dir = registry.path().parent().expect("temp dir").to_path_buf();
        let name = registry
            .path()
            .file_name()
            .expect("file name")
            .to_string_lossy()
            .into_owned();
        let stray = std::fs::read_dir(&dir)
            .expect("read temp dir")
            .filter_map(Result::ok)
            .any(|e| e.file_name().to_string_lossy().starts_with(&format!(".{name}.")));
        let _ = std::fs::remove_file(registry.path());

        assert!(!stray);
    }

    #[test]
    fn test_publish_into_missing_directory_fails_with_io_error() {
        let registry = FileRegistry::new(
            std::env::temp_dir()
                .join(format!("dockmaster-missing-{}", Uuid::new_v4()))
                .join("DOCKMASTERS.txt"),
        );
        assert!(matches!(
            registry.publish("x\n", &description()),
            Err(RegistryError::Io { .. })
        ));
    }

    #[test]
    fn test_publish_refuses_read_only_registry() {
        // Arrange
        let registry = temp_registry();
        std::fs::write(registry.path(), "old\n").expect("seed");
        let mut permissions = std::fs::metadata(registry.path()).expect("metadata").permissions();
        permissions.set_readonly(true);
        std::fs::set_permissions(registry.path(), permissions.clone()).expect("set read-only");

        // Act
        let result = registry.publish("new\n", &description());
        let text = registry.fetch().expect("fetch");
        permissions.set_readonly(false);
        let _ = std::fs::set_permissions(registry.path(), permissions);
        let _ = std::fs::remove_file(registry.path());

        // Assert
        assert!(matches!(result, Err(RegistryError::Rejected(_))));
        assert_eq!(text, "old\n");
    }
}
