//! Token verification.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use tokengate_core::result::AppResult;

use super::claims::Claims;
use super::secret::SigningSecret;
use super::validity::{InvalidReason, TokenValidity};

/// Verifies token signatures and expiry.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    /// Signature + expiry, no clock leeway.
    full: Validation,
    /// Signature only; used to read the subject of possibly expired tokens.
    signature_only: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.full)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    /// Creates a decoder verifying with the given secret.
    pub fn new(secret: &SigningSecret) -> AppResult<Self> {
        let mut full = Validation::new(Algorithm::HS256);
        full.leeway = 0;
        full.set_required_spec_claims(&["sub", "exp"]);

        let mut signature_only = Validation::new(Algorithm::HS256);
        signature_only.validate_exp = false;
        signature_only.set_required_spec_claims(&["sub"]);

        Ok(Self {
            decoding_key: secret.decoding_key()?,
            full,
            signature_only,
        })
    }

    /// Full validity check. Never fails; every problem becomes a reason.
    pub fn validate(&self, token: &str) -> TokenValidity {
        match self.decode_with(token, &self.full) {
            Ok(claims) => TokenValidity::Valid(claims),
            Err(reason) => TokenValidity::Invalid(reason),
        }
    }

    /// Verifies the signature and returns the subject, ignoring expiry.
    pub fn decode_subject(&self, token: &str) -> Result<String, InvalidReason> {
        self.decode_with(token, &self.signature_only)
            .map(|claims| claims.sub)
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> Result<Claims, InvalidReason> {
        decode::<Claims>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => InvalidReason::SignatureMismatch,
                ErrorKind::ExpiredSignature => InvalidReason::Expired,
                _ => InvalidReason::Malformed,
            })
    }
}
