use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::books::domain::model::BookInfo;
use crate::books::repository::BookRepository;
use crate::core::library::CatalogResult;

type BookTable = BTreeMap<(String, String), BookInfo>;

/// In-memory book store for development and tests.
///
/// Tables are created on first write and shared by every handle returned from `for_table`.
/// Nothing is persisted.
#[derive(Debug, Clone)]
pub struct MemoryBookRepository {
    tables: Arc<RwLock<HashMap<String, BookTable>>>,
    table_name: String,
}

impl MemoryBookRepository {
    pub(crate) fn new(table_name: &str) -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            table_name: table_name.to_string(),
        }
    }

    async fn select<F>(&self, predicate: F) -> Vec<BookInfo>
        where F: Fn(&BookInfo) -> bool {
        let tables = self.tables.read().await;
        tables.get(&self.table_name)
            .map(|table| table.values().filter(|b| predicate(b)).cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    fn table_name(&self) -> &str {
        self.table_name.as_str()
    }

    fn for_table(&self, table_name: &str) -> Box<dyn BookRepository> {
        Box::new(MemoryBookRepository {
            tables: self.tables.clone(),
            table_name: table_name.to_string(),
        })
    }

    async fn put(&self, book: &BookInfo) -> CatalogResult<()> {
        let mut tables = self.tables.write().await;
        tables.entry(self.table_name.clone())
            .or_default()
            .insert((book.title().to_string(), book.author().to_string()), book.clone());
        Ok(())
    }

    async fn has_key(&self, title: &str, author: &str) -> CatalogResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables.get(&self.table_name)
            .map(|table| table.contains_key(&(title.to_string(), author.to_string())))
            .unwrap_or(false))
    }

    async fn find_by_key(&self, title: &str, author: &str) -> CatalogResult<Vec<BookInfo>> {
        Ok(self.select(|b| b.title() == title && b.author() == author).await)
    }

    async fn find_by_author(&self, author: &str) -> CatalogResult<Vec<BookInfo>> {
        Ok(self.select(|b| b.author() == author).await)
    }

    async fn find_by_title_containing(&self, text: &str) -> CatalogResult<Vec<BookInfo>> {
        Ok(self.select(|b| b.title().contains(text)).await)
    }

    async fn scan(&self) -> CatalogResult<Vec<BookInfo>> {
        Ok(self.select(|_| true).await)
    }
}
