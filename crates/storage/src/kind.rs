//! Storage backend kinds.
//!
//! The `source_type` column of `storage_sources` holds one of these names.

/// Supported storage backend kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Local,
    OneDrive,
    OneDriveChina,
}

impl SourceKind {
    /// Parse from the database `source_type` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "local" => Some(Self::Local),
            "onedrive" => Some(Self::OneDrive),
            "onedrive_china" => Some(Self::OneDriveChina),
            _ => None,
        }
    }

    /// Database `source_type` value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::OneDrive => "onedrive",
            Self::OneDriveChina => "onedrive_china",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Local => "Local Filesystem",
            Self::OneDrive => "OneDrive",
            Self::OneDriveChina => "OneDrive (21Vianet)",
        }
    }
}
