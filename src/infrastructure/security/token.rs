// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use crate::infrastructure::security::claims::PortalClaims;
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    fmt::Display,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// Tokens minted for other portal services are rejected here.
const AUDIENCE: &str = "onboarding-portal";

/// Policy applied on top of the checks carried by the token itself.
const VERIFIER_POLICY: &str = r#"
    check if audience("onboarding-portal");
    allow if user($id, $name);
"#;

/// A sealed token and its validity window.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Verifies Biscuit bearer tokens signed by the portal's root key.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

fn rejected(err: impl Display) -> ApplicationError {
    ApplicationError::unauthorized(err.to_string())
}

fn mint_failed(err: impl Display) -> ApplicationError {
    ApplicationError::infrastructure(format!("token minting failed: {err}"))
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519).map_err(
            |err| ApplicationError::infrastructure(format!("invalid root key: {err}")),
        )?;
        let root = KeyPair::from(&private);
        let public = root.public();

        Ok(Self {
            root: Arc::new(root),
            public,
            ttl,
        })
    }

    /// Mint a token for `subject`. The portal's login service owns issuance in
    /// production; this backs the `mint_token` binary and tests.
    pub fn issue(&self, subject: &TokenSubject) -> ApplicationResult<IssuedToken> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| mint_failed("expiry overflows the clock"))?;

        let (source, params) = authority_block(subject, issued_at, expires_at);
        let token = Biscuit::builder()
            .code_with_params(&source, params, HashMap::new())
            .map_err(mint_failed)?
            .build(self.root.as_ref())
            .map_err(mint_failed)?
            .seal()
            .map_err(mint_failed)?
            .to_base64()
            .map_err(mint_failed)?;

        Ok(IssuedToken {
            token,
            issued_at: issued_at.into(),
            expires_at: expires_at.into(),
        })
    }
}

/// Datalog for the authority block plus its bound parameters. Capability
/// strings are escaped before being inlined as `right` facts.
fn authority_block(
    subject: &TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> (String, HashMap<String, Term>) {
    let params = HashMap::from([
        ("uid".to_string(), Term::from(i64::from(subject.user_id))),
        ("uname".to_string(), Term::from(subject.username.clone())),
        ("urole".to_string(), Term::from(subject.role.as_str())),
        ("aud".to_string(), Term::from(AUDIENCE)),
        ("iat".to_string(), Term::from(issued_at)),
        ("exp".to_string(), Term::from(expires_at)),
    ]);

    let mut source = String::from(
        r#"
        user({uid}, {uname});
        role({urole});
        audience({aud});
        issued_at({iat});
        expires_at({exp});
        check if time($now), $now <= {exp};
        "#,
    );

    let escape = |raw: &str| raw.replace('\\', "\\\\").replace('"', "\\\"");
    let mut rights: Vec<_> = subject.capabilities.iter().collect();
    rights.sort_by(|a, b| (&a.resource, &a.action).cmp(&(&b.resource, &b.action)));
    for cap in rights {
        source.push_str(&format!(
            "right(\"{}\", \"{}\");\n",
            escape(&cap.resource),
            escape(&cap.action)
        ));
    }

    (source, params)
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public).map_err(rejected)?;

        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code(VERIFIER_POLICY)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(rejected)?;
        authorizer.authorize().map_err(rejected)?;

        let (facts, _, _, _) = authorizer.dump();
        PortalClaims::from_facts(facts).into_user()
    }
}
