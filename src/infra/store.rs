//! Resource store backed by a directory of `<id>.json` documents.

use std::{fs, io, path::PathBuf};

use tracing::debug;

use crate::application::repos::{RepoError, ResourceStore};
use crate::domain::resources::{RawResource, validate_resource_id};

#[derive(Debug, Clone)]
pub struct FileResourceStore {
    root: PathBuf,
}

impl FileResourceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, RepoError> {
        validate_resource_id(id).map_err(|err| RepoError::InvalidId {
            id: id.to_string(),
            reason: err.to_string(),
        })?;
        Ok(self.root.join(format!("{id}.json")))
    }
}

impl ResourceStore for FileResourceStore {
    fn resource_by_id(&self, id: &str) -> Result<Option<RawResource>, RepoError> {
        let path = self.path_for(id)?;

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    target = "infra::store",
                    resource_id = id,
                    path = %path.display(),
                    "resource file not found"
                );
                return Ok(None);
            }
            Err(source) => {
                return Err(RepoError::Io {
                    id: id.to_string(),
                    source,
                });
            }
        };

        RawResource::from_json(&json)
            .map(Some)
            .map_err(|err| RepoError::Decode {
                id: id.to_string(),
                message: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_resource_by_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("intro.json"),
            r#"{ "id": "intro", "title": "Intro" }"#,
        )
        .expect("write resource");

        let store = FileResourceStore::new(dir.path());
        let resource = store
            .resource_by_id("intro")
            .expect("read")
            .expect("present");
        assert_eq!(resource.title, "Intro");
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileResourceStore::new(dir.path());
        assert!(store.resource_by_id("absent").expect("read").is_none());
    }

    #[test]
    fn path_traversal_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileResourceStore::new(dir.path());
        let err = store.resource_by_id("../secret").expect_err("invalid id");
        assert!(matches!(err, RepoError::InvalidId { .. }));
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("broken.json"), "{ nope").expect("write");
        let store = FileResourceStore::new(dir.path());
        let err = store.resource_by_id("broken").expect_err("decode");
        assert!(matches!(err, RepoError::Decode { .. }));
    }
}
