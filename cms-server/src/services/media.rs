//! Media host client
//!
//! Image binaries live on an external Cloudinary-style host; records only
//! keep `{url, public_id}` references. Uploads and deletes are explicit
//! async operations with results — the ordering protocol never waits on
//! them, and entity deletes treat asset cleanup as best-effort.

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::db::models::MediaRef;
use crate::utils::{AppError, AppResult, now_millis};

/// Host credentials, from environment.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Root folder for this site's assets
    pub folder: String,
}

impl MediaConfig {
    /// `None` when the media host is not configured; upload endpoints then
    /// answer with a configuration error instead of failing mid-request.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            cloud_name: std::env::var("MEDIA_CLOUD_NAME").ok()?,
            api_key: std::env::var("MEDIA_API_KEY").ok()?,
            api_secret: std::env::var("MEDIA_API_SECRET").ok()?,
            folder: std::env::var("MEDIA_FOLDER").unwrap_or_else(|_| "cms".to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Clone, Debug)]
pub struct MediaService {
    config: Option<MediaConfig>,
    client: reqwest::Client,
}

impl MediaService {
    pub fn new(config: Option<MediaConfig>) -> Self {
        Self { config, client: reqwest::Client::new() }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    fn config(&self) -> AppResult<&MediaConfig> {
        self.config
            .as_ref()
            .ok_or_else(|| AppError::internal("Media host is not configured"))
    }

    /// Signature over the alphabetically ordered parameters plus the API
    /// secret, as the host expects.
    fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
        let mut sorted: Vec<&(&str, &str)> = params.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);
        let joined: Vec<String> = sorted.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let payload = format!("{}{}", joined.join("&"), api_secret);
        hex::encode(Sha256::digest(payload.as_bytes()))
    }

    /// Upload an image; returns the hosted URL and the handle needed to
    /// delete it later.
    pub async fn upload(&self, bytes: Vec<u8>, original_name: &str, subfolder: &str) -> AppResult<MediaRef> {
        let config = self.config()?;
        let folder = format!("{}/{}", config.folder, subfolder);
        let timestamp = (now_millis() / 1000).to_string();
        let base_name = original_name.split('.').next().unwrap_or("image");
        let public_id = format!("{subfolder}_{timestamp}_{base_name}");

        let signature = Self::sign(
            &[
                ("folder", folder.as_str()),
                ("public_id", public_id.as_str()),
                ("signature_algorithm", "sha256"),
                ("timestamp", timestamp.as_str()),
            ],
            &config.api_secret,
        );

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(original_name.to_string()),
            )
            .text("api_key", config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder)
            .text("public_id", public_id)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            config.cloud_name
        );
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Media upload failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::internal(format!(
                "Media upload returned {status}: {body}"
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("Malformed media host response: {e}")))?;

        Ok(MediaRef {
            url: Some(uploaded.secure_url),
            public_id: Some(uploaded.public_id),
        })
    }

    /// Delete an asset by its handle.
    pub async fn destroy(&self, public_id: &str) -> AppResult<()> {
        let config = self.config()?;
        let timestamp = (now_millis() / 1000).to_string();
        let signature = Self::sign(
            &[
                ("public_id", public_id),
                ("signature_algorithm", "sha256"),
                ("timestamp", timestamp.as_str()),
            ],
            &config.api_secret,
        );

        let url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/destroy",
            config.cloud_name
        );
        let response = self
            .client
            .post(&url)
            .form(&[
                ("public_id", public_id),
                ("api_key", config.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature_algorithm", "sha256"),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Media delete failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::internal(format!(
                "Media delete returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Best-effort cleanup when a record that owned an asset goes away: the
    /// record mutation has already committed, so a host failure only logs.
    pub async fn destroy_quietly(&self, media: &MediaRef) {
        let Some(public_id) = media.public_id.as_deref() else {
            return;
        };
        if let Err(e) = self.destroy(public_id).await {
            tracing::warn!(public_id = %public_id, error = %e, "Failed to delete hosted asset");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_order_independent() {
        let a = MediaService::sign(&[("b", "2"), ("a", "1")], "secret");
        let b = MediaService::sign(&[("a", "1"), ("b", "2")], "secret");
        assert_eq!(a, b);
        // sha256 hex
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn signature_depends_on_secret() {
        let a = MediaService::sign(&[("a", "1")], "secret");
        let b = MediaService::sign(&[("a", "1")], "other");
        assert_ne!(a, b);
    }
}
