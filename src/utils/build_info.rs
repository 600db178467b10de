/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
}

/// CLI semantic version derived from the crate metadata.
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: CLI_VERSION,
        git_hash: option_env!("FOLIO_ADMIN_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("FOLIO_ADMIN_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("FOLIO_ADMIN_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("FOLIO_ADMIN_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("FOLIO_ADMIN_BUILD_PROFILE").unwrap_or("unknown"),
    }
}

impl BuildMetadata {
    /// One-line summary printed by `--version`.
    pub fn summary(&self) -> String {
        format!(
            "folio_admin_cli {} ({} {}, built {} for {} [{}])",
            self.version, self.git_hash, self.git_status, self.timestamp, self.target, self.profile
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_starts_with_version() {
        let meta = current();
        assert!(meta
            .summary()
            .starts_with(&format!("folio_admin_cli {}", CLI_VERSION)));
    }
}
