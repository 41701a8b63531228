use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, trace};

/// Read-only mapping from a device identifier to its `.typ` text.
///
/// Implementations must tolerate concurrent lookups.
pub trait CalibrationStore: Send + Sync {
    fn lookup(&self, device: &str) -> Option<String>;
}

impl<S: CalibrationStore + ?Sized> CalibrationStore for &S {
    fn lookup(&self, device: &str) -> Option<String> {
        (**self).lookup(device)
    }
}

impl<S: CalibrationStore + ?Sized> CalibrationStore for Arc<S> {
    fn lookup(&self, device: &str) -> Option<String> {
        (**self).lookup(device)
    }
}

impl<S: CalibrationStore + ?Sized> CalibrationStore for Box<S> {
    fn lookup(&self, device: &str) -> Option<String> {
        (**self).lookup(device)
    }
}

/// Resolves each device to the file of the same name inside `root`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Device identifiers come straight from file headers, so anything that
    /// could leave `root` is refused.
    fn is_plain_name(device: &str) -> bool {
        !device.is_empty()
            && device != "."
            && device != ".."
            && !device.contains(['/', '\\', '\0'])
    }
}

impl CalibrationStore for DirectoryStore {
    fn lookup(&self, device: &str) -> Option<String> {
        if !Self::is_plain_name(device) {
            debug!("Refusing calibration lookup for device {device:?}");
            return None;
        }

        let path = self.root.join(device);
        match fs::read(&path) {
            Ok(bytes) => {
                trace!("Loaded {} bytes from {}", bytes.len(), path.display());
                Some(String::from_utf8_lossy(&bytes).into_owned())
            }
            Err(e) => {
                debug!("Calibration resource {} unavailable: {e}", path.display());
                None
            }
        }
    }
}

/// In-memory calibration texts keyed by device.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, device: impl Into<String>, text: impl Into<String>) -> Option<String> {
        self.entries.insert(device.into(), text.into())
    }

    pub fn with(mut self, device: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(device, text);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(device, text)| (device.into(), text.into()))
                .collect(),
        }
    }
}

impl CalibrationStore for MemoryStore {
    fn lookup(&self, device: &str) -> Option<String> {
        self.entries.get(device).cloned()
    }
}
