//! `TokenIssuer` backed by HS256 JSON Web Tokens.

use std::sync::Arc;

use chrono::Duration;
use jwt_compact::alg::{Hs256, Hs256Key};
use jwt_compact::prelude::*;
use mockable::{Clock, DefaultClock};
use zeroize::Zeroizing;

use crate::domain::ports::{AccessClaims, TokenIssueError, TokenIssuer};

/// Signs access tokens with a shared HMAC secret.
pub struct JwtTokenIssuer {
    key: Hs256Key,
    lifetime: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Default token lifetime.
    pub const DEFAULT_LIFETIME_HOURS: i64 = 1;

    /// Issuer signing with `secret`; the caller's copy is wiped on drop.
    pub fn new(secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            key: Hs256Key::new(secret.as_slice()),
            lifetime: Duration::hours(Self::DEFAULT_LIFETIME_HOURS),
            clock: Arc::new(DefaultClock),
        }
    }

    /// Override the clock used for `iat` and `exp`.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, claims: &AccessClaims) -> Result<String, TokenIssueError> {
        let clock = Arc::clone(&self.clock);
        let time_options = TimeOptions::new(Duration::zero(), move || clock.utc());
        let claims = Claims::new(claims.clone())
            .set_duration_and_issuance(&time_options, self.lifetime);

        Hs256
            .token(&Header::empty(), &claims, &self.key)
            .map_err(|err| TokenIssueError::signing(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::rstest;
    use serde_json::Value;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn decode_segment(segment: &str) -> Value {
        let bytes = URL_SAFE_NO_PAD.decode(segment).expect("base64 segment");
        serde_json::from_slice(&bytes).expect("json segment")
    }

    #[rstest]
    fn token_carries_claims_and_expiry() {
        let issued_at = Utc
            .with_ymd_and_hms(2025, 11, 4, 7, 0, 0)
            .single()
            .expect("valid instant");
        let issuer = JwtTokenIssuer::new(Zeroizing::new(b"test-secret".to_vec()))
            .with_clock(Arc::new(FixedClock(issued_at)));

        let token = issuer
            .issue(&AccessClaims {
                id: "2b20a608-1df5-46aa-b79a-41eeb2c3a5e7".to_owned(),
                name: Some("Dev".to_owned()),
            })
            .expect("token issued");

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(decode_segment(segments[0])["alg"], "HS256");

        let payload = decode_segment(segments[1]);
        assert_eq!(payload["id"], "2b20a608-1df5-46aa-b79a-41eeb2c3a5e7");
        assert_eq!(payload["name"], "Dev");
        assert_eq!(payload["iat"], issued_at.timestamp());
        assert_eq!(payload["exp"], issued_at.timestamp() + 3600);
    }

    #[rstest]
    fn different_secrets_sign_differently() {
        let claims = AccessClaims {
            id: "1".to_owned(),
            name: None,
        };
        let clock: Arc<dyn Clock> = Arc::new(FixedClock(DateTime::UNIX_EPOCH));
        let first = JwtTokenIssuer::new(Zeroizing::new(b"one".to_vec()))
            .with_clock(Arc::clone(&clock))
            .issue(&claims)
            .expect("token issued");
        let second = JwtTokenIssuer::new(Zeroizing::new(b"two".to_vec()))
            .with_clock(clock)
            .issue(&claims)
            .expect("token issued");

        assert_ne!(first, second);
    }
}
