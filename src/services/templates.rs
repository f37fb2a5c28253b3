//! Template management and merge tag inspection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collections::TemplateCollection;
use crate::errors::LettrResult;
use crate::transport::Transporter;
use crate::types::PagePagination;
use crate::value_objects::Timestamp;

const TEMPLATES_ENDPOINT: &str = "templates";

/// A template as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Template {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub project_id: u64,
    #[serde(default)]
    pub folder_id: Option<u64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full details for a single template.
///
/// The create endpoint returns this shape with some fields still unset,
/// hence the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateDetail {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub project_id: u64,
    #[serde(default)]
    pub folder_id: Option<u64>,
    #[serde(default)]
    pub active_version: u32,
    #[serde(default)]
    pub versions_count: u32,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub json: Option<Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request payload for creating a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateTemplateData {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
}

impl CreateTemplateData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn slug(self, slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            ..self
        }
    }

    pub fn project_id(self, project_id: u64) -> Self {
        Self {
            project_id: Some(project_id),
            ..self
        }
    }

    pub fn folder_id(self, folder_id: u64) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..self
        }
    }

    pub fn html(self, html: impl Into<String>) -> Self {
        Self {
            html: Some(html.into()),
            ..self
        }
    }

    pub fn json(self, json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
            ..self
        }
    }
}

/// A nested merge tag inside a list-typed parent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MergeTagChild {
    pub key: String,
    #[serde(rename = "type", default)]
    pub tag_type: Option<String>,
}

/// A variable a template expects in its substitution data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MergeTag {
    pub key: String,
    pub required: bool,
    #[serde(rename = "type", default)]
    pub tag_type: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<MergeTagChild>>,
}

/// Query filters for the template listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListTemplatesFilter {
    pub project_id: Option<u64>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl ListTemplatesFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_id(self, project_id: u64) -> Self {
        Self {
            project_id: Some(project_id),
            ..self
        }
    }

    pub fn per_page(self, per_page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            ..self
        }
    }

    pub fn page(self, page: u32) -> Self {
        Self {
            page: Some(page),
            ..self
        }
    }

    pub fn has_filters(&self) -> bool {
        self.project_id.is_some() || self.per_page.is_some() || self.page.is_some()
    }

    /// Query parameters in a stable order, set fields only.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();

        if let Some(project_id) = self.project_id {
            query.push(("project_id".into(), project_id.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page".into(), per_page.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page".into(), page.to_string()));
        }

        query
    }
}

/// A page of templates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListTemplatesResponse {
    pub templates: TemplateCollection,
    pub pagination: PagePagination,
}

impl ListTemplatesResponse {
    pub fn has_more(&self) -> bool {
        self.pagination.has_next_page()
    }
}

/// Merge tags declared by one template version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetMergeTagsResponse {
    pub project_id: u64,
    pub template_slug: String,
    pub version: u32,
    pub merge_tags: Vec<MergeTag>,
}

/// Service for managing templates.
pub struct TemplateService {
    transporter: Arc<dyn Transporter>,
}

impl TemplateService {
    pub(crate) fn new(transporter: Arc<dyn Transporter>) -> Self {
        Self { transporter }
    }

    /// Lists templates, optionally filtered.
    pub async fn list(
        &self,
        filter: Option<&ListTemplatesFilter>,
    ) -> LettrResult<ListTemplatesResponse> {
        let query = filter.map(ListTemplatesFilter::to_query).unwrap_or_default();
        let value = self
            .transporter
            .get_with_query(TEMPLATES_ENDPOINT, &query)
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Fetches a template by slug; the project disambiguates slugs reused
    /// across projects.
    pub async fn get(&self, slug: &str, project_id: Option<u64>) -> LettrResult<TemplateDetail> {
        let path = format!("{TEMPLATES_ENDPOINT}/{slug}");
        let query: Vec<(String, String)> = project_id
            .map(|id| vec![("project_id".into(), id.to_string())])
            .unwrap_or_default();
        let value = self.transporter.get_with_query(&path, &query).await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Creates a new template.
    pub async fn create(&self, data: CreateTemplateData) -> LettrResult<TemplateDetail> {
        let value = self
            .transporter
            .post(TEMPLATES_ENDPOINT, serde_json::to_value(&data)?)
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    /// Deletes a template by slug.
    pub async fn delete(&self, slug: &str, project_id: Option<u64>) -> LettrResult<()> {
        let path = match project_id {
            Some(id) => format!("{TEMPLATES_ENDPOINT}/{slug}?project_id={id}"),
            None => format!("{TEMPLATES_ENDPOINT}/{slug}"),
        };

        self.transporter.delete(&path).await
    }

    /// Fetches the merge tags a template version expects.
    pub async fn merge_tags(
        &self,
        slug: &str,
        project_id: Option<u64>,
        version: Option<u32>,
    ) -> LettrResult<GetMergeTagsResponse> {
        let path = format!("{TEMPLATES_ENDPOINT}/{slug}/merge-tags");
        let mut query: Vec<(String, String)> = Vec::new();
        if let Some(id) = project_id {
            query.push(("project_id".into(), id.to_string()));
        }
        if let Some(version) = version {
            query.push(("version".into(), version.to_string()));
        }

        let value = self.transporter.get_with_query(&path, &query).await?;

        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_payload_omits_unset_fields() {
        let data = CreateTemplateData::new("Welcome").project_id(7);
        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value, json!({"name": "Welcome", "project_id": 7}));
    }

    #[test]
    fn detail_tolerates_missing_version_fields() {
        let detail: TemplateDetail = serde_json::from_value(json!({
            "id": 3,
            "name": "Welcome",
            "slug": "welcome",
            "project_id": 7,
            "created_at": "2026-01-15T10:00:00Z",
            "updated_at": "2026-01-15T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(detail.active_version, 0);
        assert_eq!(detail.html, "");
        assert_eq!(detail.folder_id, None);
    }

    #[test]
    fn merge_tags_deserialize_with_children() {
        let response: GetMergeTagsResponse = serde_json::from_value(json!({
            "project_id": 7,
            "template_slug": "welcome",
            "version": 2,
            "merge_tags": [
                {"key": "name", "required": true},
                {"key": "items", "required": false, "type": "list", "children": [
                    {"key": "title"},
                    {"key": "price", "type": "number"}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(response.merge_tags.len(), 2);
        let items = &response.merge_tags[1];
        assert_eq!(items.tag_type.as_deref(), Some("list"));
        assert_eq!(items.children.as_ref().unwrap()[1].key, "price");
    }

    #[test]
    fn filter_query_keeps_set_fields_in_order() {
        let filter = ListTemplatesFilter::new().project_id(7).page(2);

        assert!(filter.has_filters());
        assert_eq!(
            filter.to_query(),
            vec![
                ("project_id".to_string(), "7".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn list_response_has_more_follows_pages() {
        let response: ListTemplatesResponse = serde_json::from_value(json!({
            "templates": [],
            "pagination": {"current_page": 1, "last_page": 3, "per_page": 25, "total": 70}
        }))
        .unwrap();

        assert!(response.has_more());
    }
}
