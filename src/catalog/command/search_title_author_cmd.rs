use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use crate::books::dto::BookListResponse;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) const TITLE_NOT_SPECIFIED: &str = "Title must be specified";
pub(crate) const AUTHOR_NOT_SPECIFIED: &str = "Author must be specified";

pub(crate) struct SearchTitleAuthorCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl SearchTitleAuthorCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SearchTitleAuthorCommandRequest {
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
}

impl SearchTitleAuthorCommandRequest {
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
        }
    }
}

#[async_trait]
impl Command<SearchTitleAuthorCommandRequest, BookListResponse> for SearchTitleAuthorCommand {
    async fn execute(&self, req: SearchTitleAuthorCommandRequest) -> Result<BookListResponse, CommandError> {
        let title = req.title.as_deref().map(str::trim).unwrap_or_default();
        let author = req.author.as_deref().map(str::trim).unwrap_or_default();
        tracing::info!("search by title and author: title = {}, author = {}", title, author);
        if title.is_empty() {
            return Err(CommandError::validation(TITLE_NOT_SPECIFIED));
        }
        if author.is_empty() {
            return Err(CommandError::validation(AUTHOR_NOT_SPECIFIED));
        }
        self.catalog_service.find_books_by_title_author(author, title)
            .await.map_err(CommandError::from).map(BookListResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookInfo;
    use crate::catalog::command::search_title_author_cmd::{AUTHOR_NOT_SPECIFIED, SearchTitleAuthorCommand, SearchTitleAuthorCommandRequest, TITLE_NOT_SPECIFIED};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    async fn search_cmd() -> SearchTitleAuthorCommand {
        let svc = factory::create_catalog_service(&Configuration::new("book_table", RepositoryStore::InMemory))
            .await.expect("should create catalog service");
        svc.save_book(&BookInfo::new("Neuromancer", "Gibson, William", "SF")).await.expect("should save book");
        SearchTitleAuthorCommand::new(svc)
    }

    #[tokio::test]
    async fn test_should_find_by_title_and_author() {
        let cmd = search_cmd().await;
        let res = cmd.execute(SearchTitleAuthorCommandRequest::new(" Neuromancer", "Gibson, William "))
            .await.expect("should search");
        assert_eq!(vec![BookInfo::new("Neuromancer", "Gibson, William", "SF")], res.books);

        let res = cmd.execute(SearchTitleAuthorCommandRequest::new("Count Zero", "Gibson, William"))
            .await.expect("should search");
        assert!(res.books.is_empty());
    }

    #[tokio::test]
    async fn test_should_require_title() {
        let cmd = search_cmd().await;
        let err = cmd.execute(SearchTitleAuthorCommandRequest::new("", "Gibson, William"))
            .await.expect_err("should fail");
        assert!(matches!(err, CommandError::Validation { ref message, .. } if message == TITLE_NOT_SPECIFIED));
    }

    #[tokio::test]
    async fn test_should_require_author() {
        let cmd = search_cmd().await;
        let err = cmd.execute(SearchTitleAuthorCommandRequest { title: Some("Neuromancer".to_string()), author: None })
            .await.expect_err("should fail");
        assert!(matches!(err, CommandError::Validation { ref message, .. } if message == AUTHOR_NOT_SPECIFIED));
    }
}
