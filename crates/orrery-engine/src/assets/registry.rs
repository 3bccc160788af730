use std::collections::HashMap;
use serde::Serialize;
use crate::assets::manifest::AssetManifest;

/// Opaque handle to a texture the renderer will fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextureHandle(pub u32);

/// A texture load the JavaScript side has not picked up yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingTexture {
    pub handle: TextureHandle,
    pub path: String,
}

/// Fire-and-forget texture loader.
///
/// `load` hands out a handle at once and queues the path; JavaScript drains
/// the queue and fetches the images. No completion signal flows back, so a
/// mesh simply renders untextured until its image arrives.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    manifest: AssetManifest,
    by_path: HashMap<String, TextureHandle>,
    pending: Vec<PendingTexture>,
    next: u32,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry that resolves relative paths against a manifest.
    pub fn from_manifest(manifest: AssetManifest) -> Self {
        Self {
            manifest,
            ..Self::default()
        }
    }

    /// Swap in a new manifest. Handles already issued stay valid.
    pub fn set_manifest(&mut self, manifest: AssetManifest) {
        self.manifest = manifest;
    }

    /// Request a texture by path. Repeated paths share one handle and one fetch.
    pub fn load(&mut self, path: &str) -> TextureHandle {
        let path = self.manifest.resolve(path);
        if let Some(&handle) = self.by_path.get(&path) {
            return handle;
        }
        let handle = TextureHandle(self.next);
        self.next += 1;
        self.by_path.insert(path.clone(), handle);
        self.pending.push(PendingTexture { handle, path });
        handle
    }

    /// Request a texture by its manifest name, if the manifest knows it.
    pub fn load_named(&mut self, name: &str) -> Option<TextureHandle> {
        let path = self.manifest.textures.get(name)?.clone();
        Some(self.load(&path))
    }

    /// Take the loads queued since the last drain.
    pub fn drain_pending(&mut self) -> Vec<PendingTexture> {
        std::mem::take(&mut self.pending)
    }

    /// Number of distinct textures requested so far.
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}
