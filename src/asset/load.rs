//! Asset loading, inline or on a worker thread.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, warn};

use super::AssetBitmap;
use crate::error::{Error, Result};

/// Where an asset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl AssetSource {
    /// Reads and decodes the asset on the calling thread.
    pub fn load(&self) -> Result<AssetBitmap> {
        let result = match self {
            AssetSource::Path(path) => AssetBitmap::open(path),
            AssetSource::Bytes(bytes) => AssetBitmap::from_bytes(bytes),
        };
        match &result {
            Ok(bitmap) => debug!(source = %self, ?bitmap, "asset loaded"),
            Err(err) => warn!(source = %self, %err, "asset failed to load"),
        }
        result
    }
}

impl std::fmt::Display for AssetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetSource::Path(path) => write!(f, "{}", path.display()),
            AssetSource::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
        }
    }
}

impl From<PathBuf> for AssetSource {
    fn from(path: PathBuf) -> Self {
        AssetSource::Path(path)
    }
}

impl From<Vec<u8>> for AssetSource {
    fn from(bytes: Vec<u8>) -> Self {
        AssetSource::Bytes(bytes)
    }
}

/// Decodes one asset on a background thread.
///
/// The render loop keeps drawing with whatever it already has and picks the
/// result up with [`AssetLoader::poll`] once it is ready.
pub struct AssetLoader {
    rx: Receiver<Result<AssetBitmap>>,
    source: String,
}

impl AssetLoader {
    pub fn spawn(source: AssetSource) -> Self {
        let (tx, rx) = mpsc::channel();
        let label = source.to_string();
        debug!(source = %label, "spawning asset loader");

        thread::spawn(move || {
            // The receiver may already be gone if the session moved on.
            let _ = tx.send(source.load());
        });

        Self { rx, source: label }
    }

    /// Description of what is being loaded.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The load result, once available. Never blocks.
    pub fn poll(&self) -> Option<Result<AssetBitmap>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(Error::LoaderDisconnected)),
        }
    }

    /// Blocks until the worker finishes.
    pub fn wait(self) -> Result<AssetBitmap> {
        self.rx.recv().map_err(|_| Error::LoaderDisconnected)?
    }
}

impl std::fmt::Debug for AssetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetLoader")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
