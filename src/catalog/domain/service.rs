use async_trait::async_trait;
use crate::books::domain::model::BookInfo;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::library::CatalogResult;

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }

    fn repository_for(&self, table_name: &str) -> Box<dyn BookRepository> {
        self.book_repository.for_table(table_name)
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn save_book(&self, book: &BookInfo) -> CatalogResult<()> {
        self.book_repository.put(book).await
    }

    async fn save_book_to(&self, book: &BookInfo, table_name: &str) -> CatalogResult<()> {
        self.repository_for(table_name).put(book).await
    }

    async fn has_book(&self, book: &BookInfo) -> CatalogResult<bool> {
        self.book_repository.has_key(book.title(), book.author()).await
    }

    async fn has_book_in(&self, book: &BookInfo, table_name: &str) -> CatalogResult<bool> {
        self.repository_for(table_name).has_key(book.title(), book.author()).await
    }

    async fn find_books_by_author(&self, author: &str) -> CatalogResult<Vec<BookInfo>> {
        self.book_repository.find_by_author(author).await
    }

    async fn find_books_by_author_in(&self, author: &str, table_name: &str) -> CatalogResult<Vec<BookInfo>> {
        self.repository_for(table_name).find_by_author(author).await
    }

    async fn find_books_by_title_author(&self, author: &str, title: &str) -> CatalogResult<Vec<BookInfo>> {
        self.book_repository.find_by_key(title, author).await
    }

    async fn find_books_by_title(&self, title_words: &str) -> CatalogResult<Vec<BookInfo>> {
        self.book_repository.find_by_title_containing(title_words).await
    }

    async fn all_books(&self) -> CatalogResult<Vec<BookInfo>> {
        let mut books = self.book_repository.scan().await?;
        books.sort();
        Ok(books)
    }
}
