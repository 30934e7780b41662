//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [data] Section Defaults
// ============================================================================

pub mod data {
    pub fn config() -> String {
        "data/config.json".into()
    }

    pub fn projects() -> String {
        "data/projects.json".into()
    }

    pub fn timeout() -> u64 {
        30
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn skeleton() -> Option<PathBuf> {
        None
    }
}

// ============================================================================
// [theme] Section Defaults
// ============================================================================

pub mod theme {
    use std::path::PathBuf;

    pub fn store() -> PathBuf {
        ".folio/preferences.toml".into()
    }
}
