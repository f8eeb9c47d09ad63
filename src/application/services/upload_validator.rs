use chrono::Duration;
use tracing::warn;

use crate::{
    application::{
        dto::upload_dto::{UploadForm, ValidatedUpload},
        error::ApplicationError,
    },
    domain::models::duration::parse_duration,
};

/// Last path component of a client-supplied filename. Both `/` and `\`
/// count as separators; trailing separators are ignored.
pub fn filename_leaf(name: &str) -> Option<&str> {
    let trimmed = name.trim_end_matches(['/', '\\']);
    let leaf = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    if leaf.is_empty() {
        None
    } else {
        Some(leaf)
    }
}

/// Comma-separated tags, kept verbatim: no trimming, no deduplication,
/// empty segments preserved.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Any well-formed duration is accepted, negative ones included: they yield
/// an expiration already in the past.
pub fn parse_ttl(ttl: &str) -> Result<Duration, ApplicationError> {
    parse_duration(ttl).map_err(|e| {
        warn!("Rejected TTL {:?}: {}", ttl, e);
        ApplicationError::BadRequest(format!("Invalid ttl: {}", e))
    })
}

/// Checks every field of the submission. Nothing here touches the store.
pub fn validate_upload(form: UploadForm) -> Result<ValidatedUpload, ApplicationError> {
    // An absent payload is a read failure, not a client validation error.
    let content = form.data.ok_or_else(|| {
        warn!("Missing required 'data' field in upload");
        ApplicationError::PayloadUnreadable("missing field 'data'".to_string())
    })?;

    let name = form.name.ok_or_else(|| {
        warn!("Missing required 'name' field in upload");
        ApplicationError::BadRequest("Missing required field".to_string())
    })?;
    let original_filename = filename_leaf(&name)
        .ok_or_else(|| {
            warn!("Filename {:?} has no leaf component", name);
            ApplicationError::BadRequest("Invalid filename".to_string())
        })?
        .to_string();

    let ttl = form.ttl.filter(|ttl| !ttl.is_empty());
    let lifetime = ttl.as_deref().map(parse_ttl).transpose()?;

    let tags = form.tags.as_deref().map(split_tags).unwrap_or_default();

    Ok(ValidatedUpload {
        content,
        original_filename,
        ttl,
        lifetime,
        tags,
    })
}
