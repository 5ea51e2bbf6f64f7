use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::domain::Configuration;
use crate::core::library::CatalogResult;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::build_db_client;

// Builds the repository for the configured store. For DynamoDB the table is checked, and created
// when missing, exactly once here; later calls on the repository never re-check it.
pub(crate) async fn create_book_repository(config: &Configuration) -> CatalogResult<Box<dyn BookRepository>> {
    match config.store {
        RepositoryStore::DynamoDB | RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config).await;
            Ok(Box::new(DDBBookRepository::connect(client, config).await?))
        }
        RepositoryStore::InMemory => {
            Ok(Box::new(MemoryBookRepository::new(config.table_name.as_str())))
        }
    }
}
