//! Manifest JSON persistence (spec.md §6).
//!
//! Writes are atomic: serialize to `<path>.tmp`, then rename over `<path>`,
//! so a crash mid-write never leaves a torn manifest on disk. Grounded on
//! the teacher's convention for durable JSON state (write-then-rename before
//! any caller can observe the new file).

use std::path::Path;

use ctxcore_domain::error::{Error, Result};
use ctxcore_domain::value_objects::ContextManifest;

/// Load and validate a manifest from `path`.
pub async fn load(path: &Path) -> Result<ContextManifest> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Io {
            message: format!("reading manifest {}", path.display()),
            source: Some(Box::new(source)),
        })?;
    let manifest: ContextManifest = serde_json::from_str(&raw)?;
    manifest.validate()?;
    Ok(manifest)
}

/// Validate `manifest`, then write it atomically to `path`: serialize to
/// `<path>.tmp`, then rename over `path`.
pub async fn save(path: &Path, manifest: &ContextManifest) -> Result<()> {
    manifest.validate()?;
    let body = serde_json::to_string_pretty(manifest)?;
    let tmp_path = tmp_path_for(path);
    tokio::fs::write(&tmp_path, body)
        .await
        .map_err(|source| Error::Io {
            message: format!("writing manifest {}", tmp_path.display()),
            source: Some(Box::new(source)),
        })?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|source| Error::Io {
            message: format!("renaming manifest into place at {}", path.display()),
            source: Some(Box::new(source)),
        })?;
    tracing::debug!(path = %path.display(), "manifest saved");
    Ok(())
}

/// Load the manifest at `path` if it exists, append `incoming`'s refs, and
/// save the result back atomically. The existing `task` is preserved unless
/// `incoming.task` is empty (spec.md §6).
pub async fn append(path: &Path, incoming: &ContextManifest) -> Result<ContextManifest> {
    let merged = match tokio::fs::try_exists(path).await {
        Ok(true) => {
            let mut existing = load(path).await?;
            existing.append(incoming.clone());
            existing
        }
        _ => incoming.clone(),
    };
    merged.validate()?;
    save(path, &merged).await?;
    Ok(merged)
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    std::path::PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use ctxcore_domain::value_objects::ContextRef;
    use tempfile::tempdir;

    use super::*;

    fn sample(task: &str) -> ContextManifest {
        ContextManifest::new(
            task.to_string(),
            vec![ContextRef::new("a.go", Some("Foo".to_string()), None).unwrap()],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let manifest = sample("demo");

        save(&path, &manifest).await.unwrap();
        assert!(!tmp_path_for(&path).exists(), "tmp file must not survive a successful save");

        let loaded = load(&path).await.unwrap();
        assert_eq!(loaded, manifest);
    }

    #[tokio::test]
    async fn append_preserves_existing_refs_and_task() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        save(&path, &sample("original task")).await.unwrap();

        let incoming = ContextManifest::new(
            String::new(),
            vec![ContextRef::new("b.go", Some("Bar".to_string()), None).unwrap()],
        )
        .unwrap();
        let merged = append(&path, &incoming).await.unwrap();

        assert_eq!(merged.task, "original task");
        assert_eq!(merged.refs.len(), 2);

        let reloaded = load(&path).await.unwrap();
        assert_eq!(reloaded, merged);
    }

    #[tokio::test]
    async fn load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        tokio::fs::write(&path, "not json").await.unwrap();
        assert!(load(&path).await.is_err());
    }
}
