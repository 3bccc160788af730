use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::error::{EngineError, EngineResult};

/// Asset manifest naming every texture a game may request.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Prefix joined to every relative texture path (e.g., "textures/").
    #[serde(default)]
    pub texture_root: String,
    /// Named texture lookup: name → path relative to `texture_root`.
    #[serde(default)]
    pub textures: HashMap<String, String>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let manifest: Self = serde_json::from_str(json)?;
        if let Some((name, _)) = manifest.textures.iter().find(|(_, path)| path.trim().is_empty()) {
            return Err(EngineError::InvalidManifest(format!("texture '{name}' has an empty path")));
        }
        Ok(manifest)
    }

    /// Full path for a named texture.
    pub fn texture_path(&self, name: &str) -> EngineResult<String> {
        self.textures
            .get(name)
            .map(|p| self.resolve(p))
            .ok_or_else(|| EngineError::UnknownTexture(name.to_string()))
    }

    /// Join a relative path onto `texture_root`.
    pub fn resolve(&self, path: &str) -> String {
        if self.texture_root.is_empty() || path.contains("://") || path.starts_with('/') {
            path.to_string()
        } else if self.texture_root.ends_with('/') {
            format!("{}{}", self.texture_root, path)
        } else {
            format!("{}/{}", self.texture_root, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r#"{
            "texture_root": "textures",
            "textures": {
                "Earth": "2k_earth_daymap.jpg",
                "Sun": "https://cdn.example.org/sun.jpg"
            }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures.len(), 2);
        assert_eq!(manifest.texture_path("Earth").unwrap(), "textures/2k_earth_daymap.jpg");
        assert_eq!(manifest.texture_path("Sun").unwrap(), "https://cdn.example.org/sun.jpg");
    }

    #[test]
    fn parse_minimal_manifest() {
        let manifest = AssetManifest::from_json("{}").unwrap();
        assert!(manifest.textures.is_empty());
        assert!(matches!(manifest.texture_path("Mars"), Err(EngineError::UnknownTexture(_))));
    }

    #[test]
    fn rejects_bad_json_and_empty_paths() {
        assert!(matches!(AssetManifest::from_json("{"), Err(EngineError::Json(_))));
        let json = r#"{ "textures": { "Mars": " " } }"#;
        assert!(matches!(AssetManifest::from_json(json), Err(EngineError::InvalidManifest(_))));
    }
}
