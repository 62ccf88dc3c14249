//! App-level OneDrive registration defaults, loaded from the environment.

/// Default OAuth scope requested from Microsoft identity platforms.
pub const DEFAULT_SCOPE: &str = "offline_access User.Read Files.ReadWrite.All";

/// Registered-application defaults for one OneDrive cloud.
///
/// Storage sources may carry their own client registration; these values
/// are the fallback when they do not.
#[derive(Debug, Clone, Default)]
pub struct OneDriveDefaults {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl OneDriveDefaults {
    /// Load defaults from `{prefix}_CLIENT_ID`, `{prefix}_CLIENT_SECRET`,
    /// `{prefix}_REDIRECT_URI`, and `{prefix}_SCOPE`.
    ///
    /// Unset credential variables stay empty (the deployment then requires
    /// per-source registrations); an unset scope falls back to
    /// [`DEFAULT_SCOPE`].
    pub fn from_env(prefix: &str) -> Self {
        let var = |name: &str| std::env::var(format!("{prefix}_{name}")).unwrap_or_default();

        let scope = {
            let value = var("SCOPE");
            if value.is_empty() {
                DEFAULT_SCOPE.to_string()
            } else {
                value
            }
        };

        Self {
            client_id: var("CLIENT_ID"),
            client_secret: var("CLIENT_SECRET"),
            redirect_uri: var("REDIRECT_URI"),
            scope,
        }
    }
}
