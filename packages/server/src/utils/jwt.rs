use anyhow::Result;
use chrono::{Duration, Utc};
use common::UserRole;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Username
    pub uid: i32,    // User ID
    pub role: UserRole,
    /// Session id for client-side correlation. Not tracked server-side.
    pub sid: Uuid,
    pub iat: usize,
    pub exp: usize, // Expiration timestamp
}

/// A freshly signed token together with its session id.
pub struct SignedToken {
    pub token: String,
    pub session_id: Uuid,
}

/// Sign a new JWT token for a user.
pub fn sign(
    secret: &str,
    ttl_secs: u64,
    user_id: i32,
    username: &str,
    role: UserRole,
) -> Result<SignedToken> {
    let now = Utc::now();
    let ttl = i64::try_from(ttl_secs)?;
    let expiration = now
        .checked_add_signed(Duration::seconds(ttl))
        .ok_or_else(|| anyhow::anyhow!("token expiry out of range"))?;

    let session_id = Uuid::new_v4();
    let claims = Claims {
        sub: username.to_owned(),
        uid: user_id,
        role,
        sid: session_id,
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(SignedToken { token, session_id })
}

/// Verify and decode a JWT token.
pub fn verify(secret: &str, token: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
