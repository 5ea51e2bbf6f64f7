use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::BookListResponse;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct SearchAuthorCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl SearchAuthorCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchAuthorCommandRequest {
    pub(crate) author: Option<String>,
}

impl SearchAuthorCommandRequest {
    pub fn new(author: &str) -> Self {
        Self {
            author: Some(author.to_string()),
        }
    }
}

#[async_trait]
impl Command<SearchAuthorCommandRequest, BookListResponse> for SearchAuthorCommand {
    async fn execute(&self, req: SearchAuthorCommandRequest) -> Result<BookListResponse, CommandError> {
        let author = req.author.as_deref().map(str::trim).unwrap_or_default();
        tracing::info!("search by author: author = {}", author);
        // a blank author is not an error, there is simply nothing to show
        if author.is_empty() {
            return Ok(BookListResponse::empty());
        }
        self.catalog_service.find_books_by_author(author)
            .await.map_err(CommandError::from).map(BookListResponse::new)
    }
}
