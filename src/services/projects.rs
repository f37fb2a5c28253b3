//! Project listing.

use std::sync::Arc;

use serde::Deserialize;

use crate::collections::ProjectCollection;
use crate::errors::LettrResult;
use crate::transport::Transporter;
use crate::types::PagePagination;
use crate::value_objects::Timestamp;

const PROJECTS_ENDPOINT: &str = "projects";

/// A project on the team.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub emoji: String,
    pub team_id: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Query filters for the project listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListProjectsFilter {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl ListProjectsFilter {
    pub fn new() -> Self {
        Self::default()
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
        self.per_page.is_some() || self.page.is_some()
    }

    /// Query parameters in a stable order, set fields only.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();

        if let Some(per_page) = self.per_page {
            query.push(("per_page".into(), per_page.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page".into(), page.to_string()));
        }

        query
    }
}

/// A page of projects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListProjectsResponse {
    pub projects: ProjectCollection,
    pub pagination: PagePagination,
}

impl ListProjectsResponse {
    pub fn has_more(&self) -> bool {
        self.pagination.has_next_page()
    }
}

/// Service for listing projects.
pub struct ProjectService {
    transporter: Arc<dyn Transporter>,
}

impl ProjectService {
    pub(crate) fn new(transporter: Arc<dyn Transporter>) -> Self {
        Self { transporter }
    }

    /// Lists projects, optionally filtered.
    pub async fn list(
        &self,
        filter: Option<&ListProjectsFilter>,
    ) -> LettrResult<ListProjectsResponse> {
        let query = filter.map(ListProjectsFilter::to_query).unwrap_or_default();
        let value = self
            .transporter
            .get_with_query(PROJECTS_ENDPOINT, &query)
            .await?;

        Ok(serde_json::from_value(value)?)
    }
}
