use base64::Engine;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use ring::signature::RsaKeyPair;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SheetsError};

#[derive(Serialize)]
struct JwtHeader {
    alg: &'static str,
    typ: &'static str,
}

#[derive(Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: u64,
    iat: u64,
}

/// Service account credential used to authorize Sheets API calls.
///
/// The private key commonly arrives through an environment variable with
/// literal `\n` sequences standing in for newlines; those are converted to
/// real newlines at construction.
#[derive(Debug, Clone)]
pub struct ServiceAccountKey {
    pub client_id: String,
    pub client_email: String,
    private_key: String,
}

#[derive(Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: u64,
}

impl ServiceAccountKey {
    pub fn new(
        client_id: impl Into<String>,
        client_email: impl Into<String>,
        private_key: &str,
    ) -> Self {
        ServiceAccountKey {
            client_id: client_id.into(),
            client_email: client_email.into(),
            private_key: private_key.replace("\\n", "\n"),
        }
    }

    /// Fetch an access token for the given scope.
    ///
    /// Signs a JWT assertion with this key and exchanges it at `token_uri`.
    /// The credential is not validated locally beyond parsing the key;
    /// rejection is the token endpoint's call.
    pub async fn fetch_access_token(
        &self,
        http: &reqwest::Client,
        token_uri: &str,
        scope: &str,
    ) -> Result<AccessToken> {
        let now = Utc::now();
        let iat = now.timestamp() as u64;
        let exp = (now + Duration::hours(1)).timestamp() as u64;

        let claims = JwtClaims {
            iss: &self.client_email,
            scope,
            aud: token_uri,
            iat,
            exp,
        };
        let header = JwtHeader {
            alg: "RS256",
            typ: "JWT",
        };

        let header_b64 = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_string(&header)?);
        let claims_b64 = BASE64_URL_SAFE_NO_PAD.encode(serde_json::to_string(&claims)?);
        let signing_input = format!("{}.{}", header_b64, claims_b64);

        let signature = self.sign(signing_input.as_bytes())?;
        let sig_b64 = BASE64_URL_SAFE_NO_PAD.encode(&signature);
        let assertion = format!("{}.{}", signing_input, sig_b64);

        // Exchange the JWT for an access token.
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ];
        let resp = http.post(token_uri).form(&params).send().await?;
        if !resp.status().is_success() {
            return Err(SheetsError::TokenExchange(resp.status()));
        }

        let token: AccessToken = resp.json().await?;
        Ok(token)
    }

    /// Sign with PKCS#1 v1.5 SHA-256 (RS256).
    fn sign(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut reader = std::io::Cursor::new(self.private_key.as_bytes());
        let key = rustls_pemfile::read_one(&mut reader)
            .map_err(|e| SheetsError::InvalidKey(format!("invalid PEM private key: {e}")))?;
        let key_pair = match key {
            Some(rustls_pemfile::Item::Pkcs8Key(der)) => {
                RsaKeyPair::from_pkcs8(der.secret_pkcs8_der()).map_err(|_| {
                    SheetsError::InvalidKey("failed to create rsa key pair from pkcs8 key".into())
                })?
            }
            Some(rustls_pemfile::Item::Pkcs1Key(der)) => {
                RsaKeyPair::from_der(der.secret_pkcs1_der()).map_err(|_| {
                    SheetsError::InvalidKey("failed to create rsa key pair from pkcs1 key".into())
                })?
            }
            _ => return Err(SheetsError::InvalidKey("missing key".into())),
        };

        let mut signature = vec![0; key_pair.public().modulus_len()];
        key_pair
            .sign(
                &ring::signature::RSA_PKCS1_SHA256,
                &ring::rand::SystemRandom::new(),
                input,
                &mut signature,
            )
            .map_err(|_| SheetsError::InvalidKey("failed to sign jwt payload".into()))?;

        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::testutil::TEST_PRIVATE_KEY;

    #[test]
    fn sign_with_pem_key() {
        let key = ServiceAccountKey::new("id", "svc@example.com", TEST_PRIVATE_KEY);
        let sig = key.sign(b"payload").unwrap();
        // 2048-bit modulus.
        assert_eq!(sig.len(), 256);
    }

    #[test]
    fn sign_with_escaped_newlines() {
        let escaped = TEST_PRIVATE_KEY.replace('\n', "\\n");
        let key = ServiceAccountKey::new("id", "svc@example.com", &escaped);
        let sig = key.sign(b"payload").unwrap();
        assert_eq!(sig.len(), 256);
    }

    #[test]
    fn sign_rejects_garbage_key() {
        let key = ServiceAccountKey::new("id", "svc@example.com", "not a pem");
        let err = key.sign(b"payload").unwrap_err();
        assert!(matches!(err, SheetsError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn exchanges_jwt_for_token() {
        let server = MockServer::start_async().await;
        let token_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(200).json_body(json!({
                    "access_token": "ya29.test",
                    "expires_in": 3599,
                    "token_type": "Bearer"
                }));
            })
            .await;

        let key = ServiceAccountKey::new("id", "svc@example.com", TEST_PRIVATE_KEY);
        let http = reqwest::Client::new();
        let token = key
            .fetch_access_token(&http, &server.url("/token"), crate::SPREADSHEETS_SCOPE)
            .await
            .unwrap();

        assert_eq!(token.access_token, "ya29.test");
        assert_eq!(token.expires_in, 3599);
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn token_rejection_surfaces_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/token");
                then.status(401)
                    .json_body(json!({ "error": "invalid_grant" }));
            })
            .await;

        let key = ServiceAccountKey::new("id", "svc@example.com", TEST_PRIVATE_KEY);
        let http = reqwest::Client::new();
        let err = key
            .fetch_access_token(&http, &server.url("/token"), crate::SPREADSHEETS_SCOPE)
            .await
            .unwrap_err();

        assert!(matches!(err, SheetsError::TokenExchange(status) if status.as_u16() == 401));
    }
}
