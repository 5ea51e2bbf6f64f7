use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::BookListResponse;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct SearchTitleCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl SearchTitleCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchTitleCommandRequest {
    pub(crate) title: Option<String>,
}

impl SearchTitleCommandRequest {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
        }
    }
}

#[async_trait]
impl Command<SearchTitleCommandRequest, BookListResponse> for SearchTitleCommand {
    async fn execute(&self, req: SearchTitleCommandRequest) -> Result<BookListResponse, CommandError> {
        // the words are matched as typed, surrounding spaces included
        let title_words = req.title.unwrap_or_default();
        tracing::info!("search by title: title = {}", title_words);
        if title_words.trim().is_empty() {
            return Ok(BookListResponse::empty());
        }
        self.catalog_service.find_books_by_title(&title_words)
            .await.map_err(CommandError::from).map(BookListResponse::new)
    }
}
