//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::db::models::AdminInfo;
use crate::db::repository::AdminRepository;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminInfo,
}

/// POST /api/auth/login - 管理员登录
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let repo = AdminRepository::new(state.db.clone());
    let admin = repo.find_by_email(&req.email).await?;

    // Fixed delay before checking the result, same path for hit and miss
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let admin = match admin {
        Some(admin) => {
            let password_valid = admin
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
            if !password_valid {
                tracing::warn!(target: "security", email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            admin
        }
        None => {
            tracing::warn!(target: "security", email = %req.email, "Login failed - unknown account");
            return Err(AppError::invalid_credentials());
        }
    };

    let admin_id = admin
        .id
        .as_ref()
        .map(|t| t.to_string())
        .ok_or_else(|| AppError::internal("Stored admin has no id"))?;
    let token = state
        .jwt_service
        .generate_token(&admin_id, &admin.email)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(email = %admin.email, "Admin logged in");
    Ok(Json(LoginResponse { token, admin: AdminInfo::from(&admin) }))
}

/// GET /api/auth/me - 当前管理员信息
pub async fn me(admin: CurrentAdmin) -> Json<AdminInfo> {
    Json(AdminInfo { id: admin.id, email: admin.email })
}
