//! Filesystem helpers shared by the services.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::errors::{SyncError, SyncResult};

/// Write `content` to `path` through a temporary sibling file and a rename.
///
/// Readers of `path` see either the old or the new content, never a partial
/// write. The temporary file is removed when the rename fails.
pub async fn write_atomic(path: &Path, content: &[u8]) -> SyncResult<()> {
    let tmp_path = temp_path_for(path);

    let write_result = async {
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(content).await?;
        file.sync_all().await?;
        Ok::<_, std::io::Error>(())
    }
    .await;

    if let Err(e) = write_result {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(SyncError::io(&tmp_path, e));
    }

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(SyncError::io(path, e));
    }

    Ok(())
}

/// Top-level files in `dir` with an `.md` extension (any case), skipping
/// hidden files, sorted by file name.
pub async fn markdown_files(dir: &Path) -> SyncResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await.map_err(|e| SyncError::io(dir, e))?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(|e| SyncError::io(dir, e))? {
        let path = entry.path();
        let file_type = entry.file_type().await.map_err(|e| SyncError::io(&path, e))?;
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') {
            continue;
        }

        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if is_markdown {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Ensure `dir` exists, creating parents as needed.
pub async fn ensure_dir(dir: &Path) -> SyncResult<()> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| SyncError::io(dir, e))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{file_name}.tmp-{}", std::process::id()))
}
