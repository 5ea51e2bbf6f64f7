use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::{BookInfo, FieldError};
use crate::books::dto::BookForm;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    #[serde(flatten)]
    pub(crate) book: BookForm,
}

impl AddBookCommandRequest {
    pub fn new(book: BookForm) -> Self {
        Self {
            book,
        }
    }
}

// A form that fails validation is not an error: the response carries the field errors so they
// can be shown next to the form.
#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub saved: bool,
    pub message: Option<String>,
    pub errors: Vec<FieldError>,
}

impl AddBookCommandResponse {
    pub fn saved(book: &BookInfo) -> Self {
        Self {
            saved: true,
            message: Some(format!("Saved the information for {}", book.title())),
            errors: vec![],
        }
    }

    pub fn rejected(errors: Vec<FieldError>) -> Self {
        Self {
            saved: false,
            message: None,
            errors,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = BookInfo::from(&req.book);
        if let Err(errors) = book.validate() {
            tracing::info!("rejected book form with {} invalid fields", errors.len());
            return Ok(AddBookCommandResponse::rejected(errors));
        }
        self.catalog_service.save_book(&book).await.map_err(CommandError::from)?;
        Ok(AddBookCommandResponse::saved(&book))
    }
}
