use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_SCOPE: &str = "api_offresdemploiv2 o2dsoffre";
const FRANCE_TRAVAIL_TOKEN_URL: &str =
    "https://entreprise.francetravail.fr/connexion/oauth2/access_token";
const FRANCE_TRAVAIL_SEARCH_URL: &str =
    "https://api.francetravail.io/partenaire/offresdemploi/v2/offres/search";

/// Credentials and endpoints for the offers API. Built once in `main` and
/// handed to the token acquirer; nothing downstream reads the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    pub token_url: String,
    pub search_url: String,
}

impl ApiConfig {
    pub fn france_travail(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.trim().to_string(),
            client_secret: client_secret.trim().to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            token_url: FRANCE_TRAVAIL_TOKEN_URL.to_string(),
            search_url: FRANCE_TRAVAIL_SEARCH_URL.to_string(),
        }
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = scope.to_string();
        self
    }

    /// Loads `.env` from the working directory (if any), then reads
    /// `CLIENT_ID`, `CLIENT_SECRET` and the optional `SCOPE`.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("no .env file loaded: {}", e);
        }

        let client_id = env::var("CLIENT_ID")
            .context("CLIENT_ID not set. Add it to .env or export CLIENT_ID=your-client-id")?;
        let client_secret = env::var("CLIENT_SECRET")
            .context("CLIENT_SECRET not set. Add it to .env or export CLIENT_SECRET=your-secret")?;

        let config = Self::france_travail(&client_id, &client_secret);
        Ok(match env::var("SCOPE") {
            Ok(scope) if !scope.trim().is_empty() => config.with_scope(&scope),
            _ => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_france_travail_defaults() {
        let config = ApiConfig::france_travail(" id ", "secret\n");
        assert_eq!(config.client_id, "id");
        assert_eq!(config.client_secret, "secret");
        assert_eq!(config.scope, "api_offresdemploiv2 o2dsoffre");
        assert!(config.token_url.ends_with("/connexion/oauth2/access_token"));
        assert!(config.search_url.ends_with("/offresdemploi/v2/offres/search"));
    }

    #[test]
    fn test_with_scope_overrides_default() {
        let config = ApiConfig::france_travail("id", "secret").with_scope("api_offresdemploiv2");
        assert_eq!(config.scope, "api_offresdemploiv2");
    }
}
