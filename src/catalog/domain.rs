pub mod service;

use async_trait::async_trait;
use crate::books::domain::model::BookInfo;
use crate::core::library::CatalogResult;

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    // writes the book, replacing any book with the same title and author
    async fn save_book(&self, book: &BookInfo) -> CatalogResult<()>;

    // same as save_book against another table, used to keep test data apart
    async fn save_book_to(&self, book: &BookInfo, table_name: &str) -> CatalogResult<()>;

    async fn has_book(&self, book: &BookInfo) -> CatalogResult<bool>;

    async fn has_book_in(&self, book: &BookInfo, table_name: &str) -> CatalogResult<bool>;

    async fn find_books_by_author(&self, author: &str) -> CatalogResult<Vec<BookInfo>>;

    async fn find_books_by_author_in(&self, author: &str, table_name: &str) -> CatalogResult<Vec<BookInfo>>;

    async fn find_books_by_title_author(&self, author: &str, title: &str) -> CatalogResult<Vec<BookInfo>>;

    // every book whose title contains the given words, scans the whole table
    async fn find_books_by_title(&self, title_words: &str) -> CatalogResult<Vec<BookInfo>>;

    // the whole catalog sorted by title, then author and the remaining fields
    async fn all_books(&self) -> CatalogResult<Vec<BookInfo>>;
}
