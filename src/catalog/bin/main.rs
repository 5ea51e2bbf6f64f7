include!("../../lib.rs");
use axum::{
    routing::post,
    Router,
};
use lambda_http::{run, Error};
use crate::utils::ddb::setup_tracing;
use crate::core::controller::AppState;
use crate::core::domain::Configuration;
use crate::catalog::controller::{list_all_books, save_book, search_by_author, search_by_title, search_by_title_author};
use crate::catalog::factory;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/images-test.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let config = Configuration::from_env();
    if config.dev_mode {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
    }
    tracing::info!("starting book catalog with table {} on {} store", config.table_name, config.store);

    // provisions the book table on first start, a failure here stops the binary
    let catalog = factory::create_catalog_service(&config).await.map_err(|err| {
        tracing::error!("could not open book table {}: {} (retryable: {})", config.table_name, err, err.retryable());
        err
    })?;
    let state = AppState::new(catalog);

    let app = Router::new()
        .route("/save-book", post(save_book))
        .route("/title-author-search", post(search_by_title_author))
        .route("/author-search", post(search_by_author))
        .route("/title-search", post(search_by_title))
        .route("/list-all-books", post(list_all_books).get(list_all_books))
        .with_state(state);

    run(app).await
}
