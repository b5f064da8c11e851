// ============================
// ticklist-backend-lib/src/auth/token.rs
// ============================
//! Signed session tokens.
//!
//! Stateless HS256 tokens carry the full identity claim set; nothing is
//! persisted server-side and there is no revocation list — a token
//! expires passively when `exp` passes.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::error::AppError;
use crate::storage::User;

/// Secret size when no secret is configured (32 bytes = 256 bits)
const GENERATED_SECRET_BYTES: usize = 32;

/// Identity and validity facts embedded in every issued token.
/// Immutable once issued; fully reconstructable from the token bytes.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub user_id: String,
    pub username: String,
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
}

/// Issues and verifies signed session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    expires_secs: i64,
}

impl TokenService {
    /// Build the service from settings, resolving the process-wide
    /// secret. Without a configured secret a random one is generated
    /// for this process lifetime; every outstanding token then becomes
    /// unverifiable at the next restart.
    pub fn new(settings: &JwtSettings) -> Self {
        let secret = match &settings.secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::warn!(
                    "no jwt secret configured; generated an ephemeral one — \
                     issued tokens will not survive a restart"
                );
                generate_secret()
            }
        };

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            expires_secs: settings.expires_secs,
        }
    }

    /// Issue a signed token for a user.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: user.id.clone(),
            username: user.username.clone(),
            iss: self.issuer.clone(),
            sub: user.username.clone(),
            aud: self.audience.clone(),
            exp: now + self.expires_secs,
            nbf: now,
            iat: now,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|_| AppError::TokenCreation)
    }

    /// Verify a token's signature and validity window.
    ///
    /// Every failure mode — bad signature, malformed token, expired,
    /// not yet valid, wrong issuer or audience — collapses into the one
    /// uniform `TokenInvalid`. Callers must not learn which check
    /// failed.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::TokenInvalid)
    }
}

/// Generate a random URL-safe secret from OS entropy
fn generate_secret() -> String {
    let mut buffer = [0u8; GENERATED_SECRET_BYTES];
    OsRng.fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}
