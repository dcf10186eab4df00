use std::path::PathBuf;

/// Which build the static server hosts.
#[derive(Debug, Clone)]
pub enum ServeVariant {
    /// Pre-built bundle: cached assets, `index.html` as the SPA entry.
    Dist { dir: PathBuf },
    /// Source directory served as-is, `index-lite.html` as the entry.
    Lite { root: PathBuf },
}

impl ServeVariant {
    pub fn name(&self) -> &'static str {
        match self {
            ServeVariant::Dist { .. } => "dist",
            ServeVariant::Lite { .. } => "lite",
        }
    }

    pub fn root(&self) -> &PathBuf {
        match self {
            ServeVariant::Dist { dir } => dir,
            ServeVariant::Lite { root } => root,
        }
    }
}

/// Shared state injected into the static server's handlers.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub variant: ServeVariant,
}
