use std::sync::Arc;
use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::CatalogResult;

pub(crate) async fn create_catalog_service(config: &Configuration) -> CatalogResult<Arc<dyn CatalogService>> {
    let book_repo = factory::create_book_repository(config).await?;
    Ok(Arc::new(CatalogServiceImpl::new(book_repo)))
}
