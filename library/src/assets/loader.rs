use crate::scene::node_tree::NodeTree;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const ASSET_EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read asset '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse asset '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("node '{node}' not found in asset '{asset}'")]
    NodeNotFound {
        asset: String,
        node: String,
    },
}

/// Packaged 3D content, looked up by name.
pub trait AssetLoader {
    fn load_scene(&self, name: &str) -> Result<NodeTree, AssetError>;
}

/// Reads `<directory>/<name>.json` node-tree descriptions.
pub struct DirectoryAssetLoader {
    directory: PathBuf,
}

impl DirectoryAssetLoader {
    #[must_use]
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self { directory: directory.as_ref().to_path_buf() }
    }

    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.{ASSET_EXTENSION}"))
    }
}

impl AssetLoader for DirectoryAssetLoader {
    fn load_scene(&self, name: &str) -> Result<NodeTree, AssetError> {
        let path = self.path_of(name);
        debug!("loading asset '{}' from {}", name, path.display());

        let text = fs::read_to_string(&path)
            .map_err(|source| AssetError::Io { name: name.to_string(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| AssetError::Parse { name: name.to_string(), source })
    }
}
