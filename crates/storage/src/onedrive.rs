//! OneDrive storage providers.
//!
//! [`OneDriveHost`] captures what varies between Microsoft clouds: the
//! Graph and OAuth authority hosts, and where default app credentials come
//! from. [`OneDrive`] targets the worldwide cloud; [`OneDriveChina`] the
//! 21Vianet-operated cloud, whose endpoints and app registration are
//! separate. Everything else (URL construction, the token exchange and
//! refresh flows) is shared default-method behaviour.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::OneDriveDefaults;
use crate::error::StorageError;

/// Per-storage-source client registration. Any unset field falls back to
/// the app-level [`OneDriveDefaults`].
#[derive(Debug, Clone, Default)]
pub struct OneDriveParams {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

/// A successful response from the OAuth token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    pub expires_in: u64,
}

/// One Microsoft cloud's OneDrive integration.
#[async_trait]
pub trait OneDriveHost: Send + Sync {
    /// Microsoft Graph API host.
    fn graph_endpoint(&self) -> &'static str;

    /// OAuth authority host.
    fn auth_endpoint(&self) -> &'static str;

    /// App-level registration defaults for this cloud.
    fn defaults(&self) -> &OneDriveDefaults;

    /// Per-source registration overrides, when the source carries any.
    fn params(&self) -> Option<&OneDriveParams>;

    fn client_id(&self) -> &str {
        self.params()
            .and_then(|p| p.client_id.as_deref())
            .unwrap_or(&self.defaults().client_id)
    }

    fn client_secret(&self) -> &str {
        self.params()
            .and_then(|p| p.client_secret.as_deref())
            .unwrap_or(&self.defaults().client_secret)
    }

    fn redirect_uri(&self) -> &str {
        self.params()
            .and_then(|p| p.redirect_uri.as_deref())
            .unwrap_or(&self.defaults().redirect_uri)
    }

    fn scope(&self) -> &str {
        &self.defaults().scope
    }

    /// The user-facing consent URL for this cloud.
    fn authorize_url(&self) -> String {
        let base = format!("https://{}/common/oauth2/v2.0/authorize", self.auth_endpoint());
        // The base is a well-formed static URL; parsing cannot fail.
        reqwest::Url::parse_with_params(
            &base,
            &[
                ("client_id", self.client_id()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri()),
                ("scope", self.scope()),
            ],
        )
        .expect("static authorize URL")
        .to_string()
    }

    /// The token endpoint URL for this cloud.
    fn token_url(&self) -> String {
        format!("https://{}/common/oauth2/v2.0/token", self.auth_endpoint())
    }

    /// Exchange an authorization code for tokens.
    async fn exchange_code(
        &self,
        http: &reqwest::Client,
        code: &str,
    ) -> Result<TokenResponse, StorageError> {
        self.request_token(
            http,
            &[
                ("client_id", self.client_id()),
                ("client_secret", self.client_secret()),
                ("redirect_uri", self.redirect_uri()),
                ("grant_type", "authorization_code"),
                ("code", code),
            ],
        )
        .await
    }

    /// Obtain a fresh access token from a refresh token.
    async fn refresh_token(
        &self,
        http: &reqwest::Client,
        refresh_token: &str,
    ) -> Result<TokenResponse, StorageError> {
        self.request_token(
            http,
            &[
                ("client_id", self.client_id()),
                ("client_secret", self.client_secret()),
                ("redirect_uri", self.redirect_uri()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ],
        )
        .await
    }

    #[doc(hidden)]
    async fn request_token(
        &self,
        http: &reqwest::Client,
        form: &[(&str, &str)],
    ) -> Result<TokenResponse, StorageError> {
        let response = http.post(self.token_url()).form(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                auth_endpoint = self.auth_endpoint(),
                status = status.as_u16(),
                "OneDrive token request rejected"
            );
            return Err(StorageError::Token {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<TokenResponse>().await?)
    }
}

/// OneDrive on the worldwide Microsoft cloud.
pub struct OneDrive {
    defaults: OneDriveDefaults,
    params: Option<OneDriveParams>,
}

impl OneDrive {
    pub fn new(defaults: OneDriveDefaults, params: Option<OneDriveParams>) -> Self {
        Self { defaults, params }
    }
}

#[async_trait]
impl OneDriveHost for OneDrive {
    fn graph_endpoint(&self) -> &'static str {
        "graph.microsoft.com"
    }

    fn auth_endpoint(&self) -> &'static str {
        "login.microsoftonline.com"
    }

    fn defaults(&self) -> &OneDriveDefaults {
        &self.defaults
    }

    fn params(&self) -> Option<&OneDriveParams> {
        self.params.as_ref()
    }
}

/// OneDrive on the 21Vianet-operated China cloud.
pub struct OneDriveChina {
    defaults: OneDriveDefaults,
    params: Option<OneDriveParams>,
}

impl OneDriveChina {
    pub fn new(defaults: OneDriveDefaults, params: Option<OneDriveParams>) -> Self {
        Self { defaults, params }
    }
}

#[async_trait]
impl OneDriveHost for OneDriveChina {
    fn graph_endpoint(&self) -> &'static str {
        "microsoftgraph.chinacloudapi.cn"
    }

    fn auth_endpoint(&self) -> &'static str {
        "login.partner.microsoftonline.cn"
    }

    fn defaults(&self) -> &OneDriveDefaults {
        &self.defaults
    }

    fn params(&self) -> Option<&OneDriveParams> {
        self.params.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SCOPE;

    fn defaults() -> OneDriveDefaults {
        OneDriveDefaults {
            client_id: "app-client".to_string(),
            client_secret: "app-secret".to_string(),
            redirect_uri: "https://files.example.com/callback".to_string(),
            scope: DEFAULT_SCOPE.to_string(),
        }
    }

    #[test]
    fn china_cloud_uses_regional_endpoints() {
        let drive = OneDriveChina::new(defaults(), None);
        assert_eq!(drive.graph_endpoint(), "microsoftgraph.chinacloudapi.cn");
        assert_eq!(drive.auth_endpoint(), "login.partner.microsoftonline.cn");
        assert_eq!(
            drive.token_url(),
            "https://login.partner.microsoftonline.cn/common/oauth2/v2.0/token"
        );
    }

    #[test]
    fn worldwide_cloud_uses_global_endpoints() {
        let drive = OneDrive::new(defaults(), None);
        assert_eq!(drive.graph_endpoint(), "graph.microsoft.com");
        assert_eq!(drive.auth_endpoint(), "login.microsoftonline.com");
    }

    #[test]
    fn credentials_fall_back_to_app_defaults() {
        let drive = OneDriveChina::new(defaults(), None);
        assert_eq!(drive.client_id(), "app-client");
        assert_eq!(drive.client_secret(), "app-secret");
        assert_eq!(drive.redirect_uri(), "https://files.example.com/callback");
    }

    #[test]
    fn per_source_params_take_precedence_field_by_field() {
        let params = OneDriveParams {
            client_id: Some("source-client".to_string()),
            client_secret: None,
            redirect_uri: None,
        };
        let drive = OneDriveChina::new(defaults(), Some(params));

        assert_eq!(drive.client_id(), "source-client");
        // Unset fields still fall back.
        assert_eq!(drive.client_secret(), "app-secret");
        assert_eq!(drive.redirect_uri(), "https://files.example.com/callback");
    }

    #[test]
    fn authorize_url_targets_the_variant_authority_and_encodes_params() {
        let drive = OneDriveChina::new(defaults(), None);
        let url = drive.authorize_url();

        assert!(url.starts_with(
            "https://login.partner.microsoftonline.cn/common/oauth2/v2.0/authorize?"
        ));
        assert!(url.contains("client_id=app-client"));
        assert!(url.contains("response_type=code"));
        // The redirect URI and scope must be query-encoded.
        assert!(url.contains("redirect_uri=https%3A%2F%2Ffiles.example.com%2Fcallback"));
        assert!(url.contains("offline_access"));
        assert!(!url.contains(' '));
    }
}
