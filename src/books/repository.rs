pub mod ddb_book_repository;
pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookInfo;
use crate::core::library::CatalogResult;

// BookRepository reads and writes rows of one book table, keyed by (title, author)
#[async_trait]
pub(crate) trait BookRepository: Sync + Send {
    fn table_name(&self) -> &str;

    // a handle on another table sharing the same connection
    fn for_table(&self, table_name: &str) -> Box<dyn BookRepository>;

    // upsert by (title, author), last write wins
    async fn put(&self, book: &BookInfo) -> CatalogResult<()>;

    async fn has_key(&self, title: &str, author: &str) -> CatalogResult<bool>;

    async fn find_by_key(&self, title: &str, author: &str) -> CatalogResult<Vec<BookInfo>>;

    // exact match on the author index
    async fn find_by_author(&self, author: &str) -> CatalogResult<Vec<BookInfo>>;

    // full scan, case-sensitive substring match on title
    async fn find_by_title_containing(&self, text: &str) -> CatalogResult<Vec<BookInfo>>;

    // full scan, store order
    async fn scan(&self) -> CatalogResult<Vec<BookInfo>>;
}
