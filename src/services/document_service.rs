use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use url::Url;
use uuid::Uuid;

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::utils::signing;

const ALLOWED_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "txt", "rtf"];

/// External document storage collaborator. `store` returns an opaque
/// reference; `retrieve` resolves it back to the document bytes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn store(&self, filename: &str, data: &Bytes) -> Result<String>;
    async fn retrieve(&self, reference: &str) -> Result<Bytes>;
}

/// Filesystem-backed store: documents land in one directory under a
/// server-generated name, so the reference never carries client input.
pub struct LocalDocumentStore {
    root: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn store(&self, filename: &str, data: &Bytes) -> Result<String> {
        let ext = validate_resume_file(filename, data)?;

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::Transient(format!("uploads directory unavailable: {}", e)))?;

        let reference = format!("{}.{}", Uuid::new_v4(), ext);
        let path = self.root.join(&reference);
        fs::write(&path, data).await.map_err(|e| {
            tracing::error!(error = %e, path = %path.display(), "failed to write resume");
            Error::Transient(format!("failed to save file: {}", e))
        })?;

        Ok(reference)
    }

    async fn retrieve(&self, reference: &str) -> Result<Bytes> {
        sanitize_reference(reference)?;
        let path = self.root.join(reference);
        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound("Document not found".to_string()))
            }
            Err(e) => Err(Error::Transient(e.to_string())),
        }
    }
}

/// Extension allow-list plus a magic-byte check for the formats that have
/// one. Returns the normalized extension.
pub fn validate_resume_file(filename: &str, data: &Bytes) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed for resume_file",
            ext
        )));
    }
    if data.is_empty() {
        return Err(Error::BadRequest("resume_file is empty".to_string()));
    }
    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".to_string()));
    }

    Ok(ext)
}

fn sanitize_reference(reference: &str) -> Result<()> {
    if reference.is_empty()
        || reference.contains('/')
        || reference.contains('\\')
        || reference.contains("..")
    {
        return Err(Error::BadRequest("Invalid document reference".to_string()));
    }
    Ok(())
}

/// Time-limited download URL for a stored resume: the reference plus an
/// expiry timestamp, signed so the pair cannot be forged or stretched.
pub fn resume_access_url(reference: &str) -> Result<Url> {
    let config = get_config();
    let expires = (crate::utils::time::now()
        + chrono::Duration::minutes(config.resume_link_ttl_minutes))
    .timestamp();
    let signature = signing::sign(
        &config.resume_link_secret,
        &format!("{}:{}", reference, expires),
    );

    let raw = format!(
        "{}/api/public/resumes/{}?expires={}&signature={}",
        config.public_base_url.trim_end_matches('/'),
        reference,
        expires,
        signature
    );
    Url::parse(&raw).map_err(|e| Error::Config(format!("Invalid public base URL: {}", e)))
}

pub fn verify_resume_access(reference: &str, expires: i64, signature: &str) -> Result<()> {
    sanitize_reference(reference)?;
    if expires < crate::utils::time::now().timestamp() {
        return Err(Error::Unauthorized("Resume link has expired".to_string()));
    }
    let config = get_config();
    let message = format!("{}:{}", reference, expires);
    if !signing::verify(&config.resume_link_secret, &message, signature) {
        return Err(Error::Unauthorized(
            "Resume link signature is invalid".to_string(),
        ));
    }
    Ok(())
}

pub fn content_type_for(reference: &str) -> &'static str {
    match Path::new(reference)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("txt") => "text/plain",
        Some("rtf") => "application/rtf",
        _ => "application/octet-stream",
    }
}
