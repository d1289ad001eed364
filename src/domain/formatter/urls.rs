//! External URLs for assets and content, used by `$ASSET_CONTENT_URL` and
//! `$CONTENT_URL`.

use uuid::Uuid;

use crate::event::NamedId;

/// Builds canonical public URLs
pub trait UrlGenerator: Send + Sync {
    /// Download URL of an asset's content
    fn asset_content(&self, asset_id: Uuid) -> String;

    /// Management UI page of a content item
    fn content_ui(&self, app_id: &NamedId, schema_id: &NamedId, content_id: Uuid) -> String;
}

/// URLs relative to one configured base URL
#[derive(Debug, Clone)]
pub struct BaseUrlGenerator {
    base_url: String,
}

impl BaseUrlGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl UrlGenerator for BaseUrlGenerator {
    fn asset_content(&self, asset_id: Uuid) -> String {
        format!("{}/api/assets/{}", self.base_url, asset_id)
    }

    fn content_ui(&self, app_id: &NamedId, schema_id: &NamedId, content_id: Uuid) -> String {
        format!(
            "{}/app/{}/content/{}/{}/history",
            self.base_url, app_id.name, schema_id.name, content_id
        )
    }
}
