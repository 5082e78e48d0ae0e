use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Seam for the platform's file-pick-and-permission prompt. The concrete
/// prompt lives outside the pipeline; tests substitute a scripted gate.
pub trait FileGate {
    fn request_write(&mut self, path: &Path) -> Permission;
}

/// Gate over the local filesystem: permission is granted when the target can
/// be opened for writing, creating it if absent.
#[derive(Debug, Default)]
pub struct NativeFileGate;

impl FileGate for NativeFileGate {
    fn request_write(&mut self, path: &Path) -> Permission {
        match fs::OpenOptions::new().write(true).create(true).open(path) {
            Ok(_) => Permission::Granted,
            Err(_) => Permission::Denied,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum LinkState {
    Unlinked,
    Linked(PathBuf),
}

/// User-granted handle to exactly one local CSV file.
///
/// Two states only: unlinked (writes disabled) and linked (writes enabled).
/// The transition is one-way, via a successful user-initiated grant; nothing
/// transitions back. In particular, a failed write keeps the link.
#[derive(Debug)]
pub struct LinkedCsvFile {
    state: LinkState,
}

impl LinkedCsvFile {
    pub fn new() -> LinkedCsvFile {
        LinkedCsvFile {
            state: LinkState::Unlinked,
        }
    }

    pub fn is_linked(&self) -> bool {
        matches!(self.state, LinkState::Linked(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            LinkState::Linked(path) => Some(path),
            LinkState::Unlinked => None,
        }
    }

    /// Acquires write permission for `path` through the gate. Denied leaves
    /// the state unlinked and the write action disabled.
    pub fn link(&mut self, gate: &mut dyn FileGate, path: PathBuf) -> Result<()> {
        match gate.request_write(&path) {
            Permission::Granted => {
                info!("Linked file for direct saves: {}", path.display());
                self.state = LinkState::Linked(path);
                Ok(())
            }
            Permission::Denied => {
                warn!(
                    "Write permission denied for {}, falling back to export download",
                    path.display()
                );
                Err(anyhow!("write permission denied, use the export download"))
            }
        }
    }

    /// Replaces the linked file's entire contents with `contents`. Errors
    /// surface to the caller as a message; the link itself is kept.
    pub fn write_all(&self, contents: &str) -> Result<()> {
        match &self.state {
            LinkState::Unlinked => Err(anyhow!("no linked file, use the export download")),
            LinkState::Linked(path) => {
                fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
            }
        }
    }
}

impl Default for LinkedCsvFile {
    fn default() -> LinkedCsvFile {
        LinkedCsvFile::new()
    }
}
