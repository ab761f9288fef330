use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::domain::MediaInput;

const SOURCE_DIR: &str = "source";
const FRAMES_DIR: &str = "frames";

/// Request-scoped working directory, removed when dropped.
///
/// The upload lives under `source/` and decoded frames under `frames/`, so no
/// filename can collide with the frames directory.
pub struct ScratchSpace {
    dir: TempDir,
}

impl ScratchSpace {
    pub async fn create_in(root: &Path) -> io::Result<Self> {
        let root = root.to_path_buf();
        let dir = tokio::task::spawn_blocking(move || {
            std::fs::create_dir_all(&root)?;
            let dir = tempfile::Builder::new()
                .prefix("request-")
                .tempdir_in(&root)?;
            std::fs::create_dir(dir.path().join(SOURCE_DIR))?;
            Ok::<_, io::Error>(dir)
        })
        .await
        .map_err(io::Error::other)??;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn media_path(&self, media: &MediaInput) -> PathBuf {
        self.dir.path().join(SOURCE_DIR).join(&media.filename)
    }

    pub fn frames_dir(&self) -> PathBuf {
        self.dir.path().join(FRAMES_DIR)
    }

    pub async fn write_media(&self, media: &MediaInput) -> io::Result<PathBuf> {
        let path = self.media_path(media);
        tokio::fs::write(&path, &media.data).await?;
        Ok(path)
    }
}
