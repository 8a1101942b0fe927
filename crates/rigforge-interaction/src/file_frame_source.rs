//! Frame source that reads a still image from disk.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rigforge_core::scanner::{CameraError, FrameSource};

/// Treats an image file as the camera.
#[derive(Debug, Clone)]
pub struct FileFrameSource {
    path: PathBuf,
}

impl FileFrameSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FrameSource for FileFrameSource {
    async fn capture(&self) -> Result<Vec<u8>, CameraError> {
        tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => CameraError::PermissionDenied,
            _ => CameraError::Unavailable(format!("{}: {e}", self.path.display())),
        })
    }
}
