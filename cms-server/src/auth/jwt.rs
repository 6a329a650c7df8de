//! JWT 令牌服务
//!
//! 处理 JWT 令牌的生成、验证和解析。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 令牌过期时间 (分钟)
    pub expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if secret.len() >= 32 => secret,
            #[cfg(debug_assertions)]
            Ok(short) => {
                tracing::warn!("JWT_SECRET is shorter than 32 bytes, using it anyway (dev)");
                short
            }
            #[cfg(not(debug_assertions))]
            Ok(_) => panic!("JWT_SECRET must be at least 32 bytes"),
            Err(_) => {
                #[cfg(debug_assertions)]
                {
                    tracing::warn!("JWT_SECRET not set, using development fallback key");
                    "development-only-jwt-secret-change-me".to_string()
                }
                #[cfg(not(debug_assertions))]
                {
                    panic!("JWT_SECRET must be configured");
                }
            }
        };

        Self {
            secret,
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440), // 默认 24 小时
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "cms-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "cms-dashboard".to_string()),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 管理员 ID (Subject)
    pub sub: String,
    /// 管理员邮箱
    pub email: String,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self { config, encoding_key, decoding_key }
    }

    /// 为管理员签发令牌
    pub fn generate_token(&self, admin_id: &str, email: &str) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            exp: (now + Duration::minutes(self.config.expiration_minutes)).timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 验证令牌并返回 Claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }

    /// 从 `Authorization: Bearer <token>` 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: "test-secret-key-that-is-long-enough".to_string(),
            expiration_minutes: 60,
            issuer: "cms-server".to_string(),
            audience: "cms-dashboard".to_string(),
        })
    }

    #[test]
    fn round_trip() {
        let svc = service();
        let token = svc.generate_token("admin:abc", "admin@example.org").unwrap();
        let claims = svc.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "admin:abc");
        assert_eq!(claims.email, "admin@example.org");
    }

    #[test]
    fn rejects_garbage() {
        let svc = service();
        assert!(matches!(
            svc.validate_token("not-a-token"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn rejects_wrong_secret() {
        let svc = service();
        let other = JwtService::new(JwtConfig {
            secret: "another-secret-key-that-is-long-enough".to_string(),
            expiration_minutes: 60,
            issuer: "cms-server".to_string(),
            audience: "cms-dashboard".to_string(),
        });
        let token = other.generate_token("admin:abc", "a@b.c").unwrap();
        assert!(svc.validate_token(&token).is_err());
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Bearer "), None);
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
