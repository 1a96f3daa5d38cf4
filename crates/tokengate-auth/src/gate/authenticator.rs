//! Per-request authentication and access decisions.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use tokengate_core::result::AppResult;

use super::rules::{AccessRules, Requirement};
use crate::identity::{IdentityResolver, Principal};
use crate::jwt::{InvalidReason, TokenCodec, TokenValidity};
use crate::session::{ResolvedToken, SingleSessionPolicy};

/// Why a presented token did not authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The token failed decoding or validation.
    Invalid(InvalidReason),
    /// A newer sign-in replaced this token.
    Superseded,
    /// The subject has no account.
    UnknownIdentity,
    /// The account is inactive or locked.
    Disabled,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(reason) => write!(f, "{reason}"),
            Self::Superseded => write!(f, "session superseded by a newer sign-in"),
            Self::UnknownIdentity => write!(f, "unknown identity"),
            Self::Disabled => write!(f, "account disabled"),
        }
    }
}

/// Terminal state of authenticating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// No token was supplied.
    Anonymous,
    /// The token is current and valid for a usable account.
    Authenticated(Principal),
    /// A token was supplied but does not authenticate.
    Rejected(RejectReason),
}

impl GateOutcome {
    /// The attached principal, if authenticated.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }

    /// Consumes the outcome, yielding the principal if authenticated.
    pub fn into_principal(self) -> Option<Principal> {
        match self {
            Self::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }
}

/// Whether a request may reach its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Let the request through.
    Allow,
    /// The path needs an authenticated caller and there is none.
    Unauthenticated,
    /// The caller is authenticated but lacks the required role.
    Forbidden,
}

/// Orchestrates session resolution, token validation, and identity loading.
#[derive(Debug, Clone)]
pub struct AuthenticationGate {
    policy: SingleSessionPolicy,
    codec: Arc<TokenCodec>,
    identities: Arc<dyn IdentityResolver>,
    rules: AccessRules,
}

impl AuthenticationGate {
    /// Creates a gate.
    pub fn new(
        policy: SingleSessionPolicy,
        codec: Arc<TokenCodec>,
        identities: Arc<dyn IdentityResolver>,
        rules: AccessRules,
    ) -> Self {
        Self {
            policy,
            codec,
            identities,
            rules,
        }
    }

    /// Authenticates the raw value of the token header.
    ///
    /// Token problems become [`GateOutcome::Rejected`]. Only storage and
    /// signing failures are returned as errors.
    pub async fn authenticate(&self, header: Option<&str>) -> AppResult<GateOutcome> {
        let Some(token) = header.filter(|value| !value.is_empty()) else {
            return Ok(GateOutcome::Anonymous);
        };

        let resolved = self.policy.resolve(token).await?;
        let effective = match &resolved {
            ResolvedToken::Undecodable(reason) => {
                return Ok(self.reject(RejectReason::Invalid(*reason)));
            }
            other => other.effective_token().unwrap_or_default(),
        };

        let claims = match self.codec.validate(effective) {
            TokenValidity::Valid(claims) => claims,
            TokenValidity::Invalid(reason) => {
                let reject = if resolved.is_superseded() {
                    RejectReason::Superseded
                } else {
                    RejectReason::Invalid(reason)
                };
                return Ok(self.reject(reject));
            }
        };

        let principal = match self.identities.resolve(claims.subject()).await {
            Ok(principal) => principal,
            Err(err) if err.is_authentication() => {
                return Ok(self.reject(RejectReason::UnknownIdentity));
            }
            Err(err) => return Err(err),
        };

        if !principal.is_usable() {
            return Ok(self.reject(RejectReason::Disabled));
        }

        debug!(user_id = %principal.user_id, role = %principal.role, "Request authenticated");
        Ok(GateOutcome::Authenticated(principal))
    }

    /// Decides whether `outcome` may access `path`.
    ///
    /// CORS preflight requests are always allowed.
    pub fn authorize(&self, method: &str, path: &str, outcome: &GateOutcome) -> AccessDecision {
        if method.eq_ignore_ascii_case("OPTIONS") {
            return AccessDecision::Allow;
        }

        match (self.rules.requirement_for(path), outcome.principal()) {
            (Requirement::Public, _) => AccessDecision::Allow,
            (_, None) => AccessDecision::Unauthenticated,
            (Requirement::Authenticated, Some(_)) => AccessDecision::Allow,
            (Requirement::Role(role), Some(principal)) if principal.has_role(role) => {
                AccessDecision::Allow
            }
            (Requirement::Role(role), Some(principal)) => {
                warn!(
                    user_id = %principal.user_id,
                    role = %principal.role,
                    required = %role,
                    path = %path,
                    "Access denied: role mismatch"
                );
                AccessDecision::Forbidden
            }
        }
    }

    fn reject(&self, reason: RejectReason) -> GateOutcome {
        warn!(%reason, "Token rejected");
        GateOutcome::Rejected(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tokengate_database::{MemoryUserStore, UserStore};
    use tokengate_entity::user::{NewUser, UserRole, UserStatus};

    use crate::identity::StoreIdentityResolver;
    use crate::jwt::SigningSecret;

    struct Fixture {
        gate: AuthenticationGate,
        codec: Arc<TokenCodec>,
        store: Arc<MemoryUserStore>,
    }

    async fn fixture() -> Fixture {
        let secret = SigningSecret::new("gate-secret").unwrap();
        let codec = Arc::new(TokenCodec::new(&secret, Duration::hours(24)).unwrap());
        let store = Arc::new(MemoryUserStore::new());
        for (user_id, role) in [("alice", UserRole::User), ("root", UserRole::Admin)] {
            store
                .create(&NewUser {
                    user_id: user_id.to_string(),
                    password_hash: "hash".to_string(),
                    display_name: None,
                    role,
                    created_by: None,
                })
                .await
                .unwrap();
        }

        let gate = AuthenticationGate::new(
            SingleSessionPolicy::new(codec.clone(), store.clone()),
            codec.clone(),
            Arc::new(StoreIdentityResolver::new(store.clone())),
            AccessRules::defaults().unwrap(),
        );
        Fixture { gate, codec, store }
    }

    /// Issues a token and records it as the account's live session.
    async fn sign_in(fx: &Fixture, user_id: &str, role: UserRole, lifetime: Duration) -> String {
        let token = fx.codec.issue(user_id, role, lifetime).unwrap();
        fx.store.update_token(user_id, &token).await.unwrap();
        token
    }

    #[tokio::test]
    async fn test_missing_or_empty_header_is_anonymous() {
        let fx = fixture().await;
        assert_eq!(fx.gate.authenticate(None).await.unwrap(), GateOutcome::Anonymous);
        assert_eq!(
            fx.gate.authenticate(Some("")).await.unwrap(),
            GateOutcome::Anonymous
        );
    }

    #[tokio::test]
    async fn test_whitespace_header_is_a_bad_token() {
        let fx = fixture().await;
        assert_eq!(
            fx.gate.authenticate(Some("   ")).await.unwrap(),
            GateOutcome::Rejected(RejectReason::Invalid(InvalidReason::Malformed))
        );
    }

    #[tokio::test]
    async fn test_current_token_authenticates() {
        let fx = fixture().await;
        let token = sign_in(&fx, "alice", UserRole::User, Duration::hours(1)).await;

        let outcome = fx.gate.authenticate(Some(&token)).await.unwrap();
        let principal = outcome.principal().unwrap();
        assert_eq!(principal.user_id, "alice");
        assert_eq!(principal.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_second_sign_in_supersedes_first() {
        let fx = fixture().await;
        let first = sign_in(&fx, "alice", UserRole::User, Duration::hours(1)).await;
        let second = sign_in(&fx, "alice", UserRole::User, Duration::hours(2)).await;
        assert_ne!(first, second);
        // The old token is still intact on its own.
        assert!(fx.codec.is_valid(&first));

        assert_eq!(
            fx.gate.authenticate(Some(&first)).await.unwrap(),
            GateOutcome::Rejected(RejectReason::Superseded)
        );
        assert!(matches!(
            fx.gate.authenticate(Some(&second)).await.unwrap(),
            GateOutcome::Authenticated(_)
        ));
    }

    #[tokio::test]
    async fn test_garbage_token_rejected_not_error() {
        let fx = fixture().await;
        assert_eq!(
            fx.gate.authenticate(Some("garbage")).await.unwrap(),
            GateOutcome::Rejected(RejectReason::Invalid(InvalidReason::Malformed))
        );
    }

    #[tokio::test]
    async fn test_expired_current_token_rejected() {
        let fx = fixture().await;
        let token = fx.codec.issue_expired("alice", UserRole::User).unwrap();
        fx.store.update_token("alice", &token).await.unwrap();

        assert_eq!(
            fx.gate.authenticate(Some(&token)).await.unwrap(),
            GateOutcome::Rejected(RejectReason::Invalid(InvalidReason::Expired))
        );
    }

    #[tokio::test]
    async fn test_unknown_subject_rejected() {
        let fx = fixture().await;
        let token = fx.codec.issue_session("ghost", UserRole::User).unwrap();
        assert_eq!(
            fx.gate.authenticate(Some(&token)).await.unwrap(),
            GateOutcome::Rejected(RejectReason::UnknownIdentity)
        );
    }

    #[tokio::test]
    async fn test_locked_account_rejected() {
        let fx = fixture().await;
        let token = sign_in(&fx, "alice", UserRole::User, Duration::hours(1)).await;
        fx.store
            .update_status("alice", UserStatus::Locked)
            .await
            .unwrap();
        assert_eq!(
            fx.gate.authenticate(Some(&token)).await.unwrap(),
            GateOutcome::Rejected(RejectReason::Disabled)
        );
    }

    #[tokio::test]
    async fn test_no_token_on_protected_path_is_unauthenticated() {
        let fx = fixture().await;
        let outcome = fx.gate.authenticate(None).await.unwrap();
        assert_eq!(
            fx.gate.authorize("GET", "/users/me", &outcome),
            AccessDecision::Unauthenticated
        );
        assert_eq!(
            fx.gate.authorize("GET", "/health", &outcome),
            AccessDecision::Allow
        );
        assert_eq!(
            fx.gate.authorize("OPTIONS", "/users/me", &outcome),
            AccessDecision::Allow
        );
    }

    #[tokio::test]
    async fn test_user_role_forbidden_on_admin_path() {
        let fx = fixture().await;
        let token = sign_in(&fx, "alice", UserRole::User, Duration::hours(1)).await;
        let outcome = fx.gate.authenticate(Some(&token)).await.unwrap();

        assert_eq!(
            fx.gate.authorize("GET", "/admin/users", &outcome),
            AccessDecision::Forbidden
        );
        assert_eq!(
            fx.gate.authorize("GET", "/users/me", &outcome),
            AccessDecision::Allow
        );
    }

    #[tokio::test]
    async fn test_admin_allowed_on_admin_path() {
        let fx = fixture().await;
        let token = sign_in(&fx, "root", UserRole::Admin, Duration::hours(1)).await;
        let outcome = fx.gate.authenticate(Some(&token)).await.unwrap();
        assert_eq!(
            fx.gate.authorize("GET", "/admin/users", &outcome),
            AccessDecision::Allow
        );
    }

    #[tokio::test]
    async fn test_rejected_token_on_admin_path_is_unauthenticated() {
        let fx = fixture().await;
        let outcome = GateOutcome::Rejected(RejectReason::Superseded);
        assert_eq!(
            fx.gate.authorize("GET", "/admin/users", &outcome),
            AccessDecision::Unauthenticated
        );
    }
}
