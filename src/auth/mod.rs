// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Password hashing and JWT access tokens

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Argon2, Params, Version};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::{MyMoneyError, Result};

/// JWT payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the token holder
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Body returned by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

/// Issues and checks access tokens, hashes and verifies passwords
#[derive(Clone)]
pub struct Authenticator {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry: Duration,
    hash_params: Params,
}

impl Authenticator {
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let algorithm = Algorithm::from_str(&config.algorithm)
            .map_err(|e| MyMoneyError::Config(format!("Unknown JWT algorithm {}: {}", config.algorithm, e)))?;
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(MyMoneyError::Config(format!(
                "JWT algorithm {} needs a key pair; only HMAC algorithms are supported",
                config.algorithm
            )));
        }
        if config.access_token_expire_minutes <= 0 {
            return Err(MyMoneyError::Config(
                "access_token_expire_minutes must be positive".to_string(),
            ));
        }
        let hash_params = Params::new(config.hash_memory_kib, config.hash_iterations, 1, None)
            .map_err(|e| MyMoneyError::Config(format!("Invalid password hashing parameters: {}", e)))?;

        let secret = config.secret_key.as_bytes();
        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry: Duration::minutes(config.access_token_expire_minutes),
            hash_params,
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, self.hash_params.clone())
    }

    /// Hash a password into a PHC string
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| MyMoneyError::PasswordHash(e.to_string()))
    }

    /// Check a password against a stored PHC string. Cost parameters are read
    /// from the stored hash, so older hashes keep verifying after a config change.
    pub fn verify_password(&self, password: &str, stored: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| MyMoneyError::Corrupt(format!("password hash: {}", e)))?;
        match self.argon2().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(MyMoneyError::PasswordHash(e.to_string())),
        }
    }

    /// Issue a bearer token for `username`
    pub fn issue(&self, username: &str) -> Result<AccessToken> {
        self.issue_at(username, Utc::now())
    }

    pub fn issue_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<AccessToken> {
        let claims = Claims {
            sub: username.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.expiry).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?;
        Ok(AccessToken {
            access_token: token,
            token_type: "bearer".to_string(),
        })
    }

    /// Verify signature and expiry, returning the claims
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(self.algorithm);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() && !token.contains(' ') {
        Some(token)
    } else {
        None
    }
}
