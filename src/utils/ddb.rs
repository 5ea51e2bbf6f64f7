use std::collections::HashMap;
use std::time::{Duration, Instant};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_table::DeleteTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::types::{AttributeDefinition, AttributeValue, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection, ProjectionType, ProvisionedThroughput, ScalarAttributeType, TableStatus};
use crate::core::domain::{Configuration, TablePoll};
use crate::core::library::{CatalogError, CatalogResult};
use crate::core::repository::RepositoryStore;

// IndexSpec describes a global secondary index that projects every attribute
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IndexSpec {
    pub name: String,
    pub hash_key: String,
    pub range_key: Option<String>,
}

// TableSpec describes a table with string keys and provisioned throughput. The index, when
// present, is provisioned with the same throughput as the table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TableSpec {
    pub table_name: String,
    pub hash_key: String,
    pub range_key: Option<String>,
    pub index: Option<IndexSpec>,
    pub read_capacity: i64,
    pub write_capacity: i64,
}

impl TableSpec {
    pub(crate) fn key_schema(&self) -> Vec<KeySchemaElement> {
        key_elements(self.hash_key.as_str(), self.range_key.as_deref())
    }

    // every key attribute of the table and of its index, each defined once
    pub(crate) fn attribute_definitions(&self) -> Vec<AttributeDefinition> {
        let mut names: Vec<&str> = vec![self.hash_key.as_str()];
        names.extend(self.range_key.as_deref());
        if let Some(index) = &self.index {
            names.push(index.hash_key.as_str());
            names.extend(index.range_key.as_deref());
        }
        let mut definitions = vec![];
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                continue;
            }
            definitions.push(AttributeDefinition::builder()
                .attribute_name(*name)
                .attribute_type(ScalarAttributeType::S)
                .build());
        }
        definitions
    }

    pub(crate) fn throughput(&self) -> ProvisionedThroughput {
        ProvisionedThroughput::builder()
            .read_capacity_units(self.read_capacity)
            .write_capacity_units(self.write_capacity)
            .build()
    }

    pub(crate) fn global_secondary_index(&self) -> Option<GlobalSecondaryIndex> {
        self.index.as_ref().map(|index| {
            GlobalSecondaryIndex::builder()
                .index_name(index.name.as_str())
                .set_key_schema(Some(key_elements(index.hash_key.as_str(), index.range_key.as_deref())))
                .projection(Projection::builder().projection_type(ProjectionType::All).build())
                .provisioned_throughput(self.throughput())
                .build()
        })
    }
}

fn key_elements(hash_key: &str, range_key: Option<&str>) -> Vec<KeySchemaElement> {
    let mut elements = vec![KeySchemaElement::builder()
        .attribute_name(hash_key)
        .key_type(KeyType::Hash)
        .build()];
    if let Some(range_key) = range_key {
        elements.push(KeySchemaElement::builder()
            .attribute_name(range_key)
            .key_type(KeyType::Range)
            .build());
    }
    elements
}

/// Creates the table described by `spec` and blocks until it reports ACTIVE.
///
/// The table must not exist yet; callers check with [`table_exists`] first. A failed create
/// request is returned as an error, but a wait that never sees the table become active is only
/// logged and the function still returns `Ok(())`.
pub(crate) async fn create_table(client: &Client, spec: &TableSpec, poll: TablePoll) -> CatalogResult<()> {
    let table_name = spec.table_name.as_str();
    tracing::info!("creating {} table", table_name);
    let started = Instant::now();
    client
        .create_table()
        .table_name(table_name)
        .set_key_schema(Some(spec.key_schema()))
        .set_attribute_definitions(Some(spec.attribute_definitions()))
        .set_global_secondary_indexes(spec.global_secondary_index().map(|gsi| vec![gsi]))
        .provisioned_throughput(spec.throughput())
        .send()
        .await
        .map_err(|err| {
            tracing::error!("failed to create {} table due to {}", table_name, err);
            CatalogError::from(err)
        })?;

    tracing::info!("waiting for '{}' table to be created...", table_name);
    if wait_until_active(client, table_name, poll).await {
        tracing::info!("created '{}' table, elapsed time: {}", table_name, to_minute_sec_string(started.elapsed()));
    } else {
        tracing::warn!("creation of '{}' table was not confirmed within {:?}", table_name, poll.timeout);
    }
    Ok(())
}

/// Polls the store until `table_name` is ACTIVE. Returns false when the table is missing after
/// `poll.timeout` or when the store cannot be asked; neither case is an error.
pub(crate) async fn table_exists(client: &Client, table_name: &str, poll: TablePoll) -> bool {
    let started = Instant::now();
    let exists = wait_until_active(client, table_name, poll).await;
    if exists {
        tracing::info!("found table {} ({} msec)", table_name, started.elapsed().as_millis());
    } else {
        tracing::info!("did not find {} ({} msec)", table_name, started.elapsed().as_millis());
    }
    exists
}

pub(crate) async fn ensure_table(client: &Client, spec: &TableSpec, poll: TablePoll) -> CatalogResult<()> {
    if table_exists(client, spec.table_name.as_str(), poll).await {
        return Ok(());
    }
    create_table(client, spec, poll).await
}

#[cfg(test)]
pub(crate) async fn delete_table(client: &Client, table_name: &str) -> CatalogResult<()> {
    client.delete_table().table_name(table_name).send().await.map(|_| ()).map_err(CatalogError::from)
}

async fn wait_until_active(client: &Client, table_name: &str, poll: TablePoll) -> bool {
    let started = Instant::now();
    loop {
        match describe_table(client, table_name).await {
            Ok(Some(TableStatus::Active)) => return true,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!("stopped waiting for {} table: {}", table_name, err);
                return false;
            }
        }
        if started.elapsed() + poll.interval > poll.timeout {
            return false;
        }
        tokio::time::sleep(poll.interval).await;
    }
}

// None when the table does not exist
async fn describe_table(client: &Client, table_name: &str) -> CatalogResult<Option<TableStatus>> {
    match client
        .describe_table()
        .table_name(table_name)
        .send()
        .await
    {
        Ok(out) => {
            if let Some(table) = out.table() {
                if let Some(status) = table.table_status() {
                    return Ok(Some(status.clone()));
                }
            }
            Err(CatalogError::runtime(format!("failed to describe {} table",
                                              table_name).as_str(), None))
        }
        Err(SdkError::ServiceError(ctx)) if ctx.err().is_resource_not_found_exception() => Ok(None),
        Err(err) => Err(CatalogError::from(err)),
    }
}

// "M minutes, S seconds", minutes only past the first minute
pub(crate) fn to_minute_sec_string(elapsed: Duration) -> String {
    let mut seconds = elapsed.as_secs();
    let mut builder = String::new();
    if seconds > 60 {
        let minutes = seconds / 60;
        seconds %= 60;
        builder.push_str(format!("{} minutes, ", minutes).as_str());
    }
    builder.push_str(format!("{} seconds", seconds).as_str());
    builder
}

/// Reads a string attribute. `Ok(None)` when the attribute is missing, `Err` when it holds
/// something other than a string.
pub(crate) fn parse_string_attribute(name: &str, map: &HashMap<String, AttributeValue>) -> Result<Option<String>, String> {
    match map.get(name) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(str)) => Ok(Some(str.clone())),
        Some(other) => Err(format!("attribute {} is not a string: {:?}", name, other)),
    }
}

// helper method to build db-client with tracing enabled
pub(crate) async fn build_db_client(config: &Configuration) -> Client {
    match config.store {
        RepositoryStore::LocalDynamoDB => {
            // See https://docs.aws.amazon.com/sdk-for-rust/latest/dg/dynamodb-local.html
            let region = config.region.clone().unwrap_or_else(|| "local".to_string());
            let dynamodb_local_config = aws_sdk_dynamodb::Config::builder()
                .region(Region::new(region))
                .credentials_provider(
                    Credentials::new("AKIDLOCALSTACK", "localstacksecret", None, None, "faked"))
                .endpoint_url(config.endpoint_url.as_str())
                .build();
            Client::from_conf(dynamodb_local_config)
        }
        _ => {
            //Get config from environment, the region setting wins over the default chain.
            let loader = aws_config::from_env();
            let loader = match &config.region {
                Some(region) => loader.region(Region::new(region.clone())),
                None => loader,
            };
            Client::new(&loader.load().await)
        }
    }
}

// required to enable CloudWatch error logging by the runtime
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .json()
        .init();
}

impl From<SdkError<PutItemError>> for CatalogError {
    fn from(err: SdkError<PutItemError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        CatalogError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<QueryError>> for CatalogError {
    fn from(err: SdkError<QueryError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        CatalogError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<ScanError>> for CatalogError {
    fn from(err: SdkError<ScanError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        CatalogError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<CreateTableError>> for CatalogError {
    fn from(err: SdkError<CreateTableError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        CatalogError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<DescribeTableError>> for CatalogError {
    fn from(err: SdkError<DescribeTableError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        CatalogError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

impl From<SdkError<DeleteTableError>> for CatalogError {
    fn from(err: SdkError<DeleteTableError>) -> Self {
        let (retryable, reason) = retryable_sdk_error(&err);
        CatalogError::database_or_unavailable(format!("{:?}", err).as_str(), reason, retryable)
    }
}

fn retryable_sdk_error<T>(err: &SdkError<T>) -> (bool, Option<String>) {
    match err {
        SdkError::ConstructionFailure(_) => { (false, Some("ConstructionFailure".to_string())) }
        SdkError::TimeoutError(_) => { (true, Some("TimeoutError".to_string())) }
        SdkError::DispatchFailure(_) => { (true, Some("DispatchFailure".to_string())) }
        SdkError::ResponseError { .. } => { (true, Some("ResponseError".to_string())) }
        SdkError::ServiceError(ctx) => {
            (ctx.raw().http().status().is_server_error() || has_exceeded_limit(ctx.raw().http().body().bytes()), Some(ctx.raw().http().status().to_string()))
        }
        _ => { (true, Some("Unknown".to_string())) }
    }
}

// ProvisionedThroughputExceeded and LimitExceeded are throttles even though they come back as 400
fn has_exceeded_limit(opts: Option<&[u8]>) -> bool {
    opts.map(|b| b.windows(6).any(|w| w == b"ceeded")).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;
    use aws_sdk_dynamodb::types::{AttributeValue, KeyType, ProjectionType};
    use crate::utils::ddb::{has_exceeded_limit, IndexSpec, parse_string_attribute, TableSpec, to_minute_sec_string};

    fn book_like_spec() -> TableSpec {
        TableSpec {
            table_name: "books".to_string(),
            hash_key: "title".to_string(),
            range_key: Some("author".to_string()),
            index: Some(IndexSpec { name: "author_index".to_string(), hash_key: "author".to_string(), range_key: None }),
            read_capacity: 4,
            write_capacity: 2,
        }
    }

    #[tokio::test]
    async fn test_should_build_key_schema() {
        let schema = book_like_spec().key_schema();
        assert_eq!(2, schema.len());
        assert_eq!(Some("title"), schema[0].attribute_name());
        assert_eq!(Some(&KeyType::Hash), schema[0].key_type());
        assert_eq!(Some("author"), schema[1].attribute_name());
        assert_eq!(Some(&KeyType::Range), schema[1].key_type());
    }

    #[tokio::test]
    async fn test_should_define_each_key_attribute_once() {
        let definitions = book_like_spec().attribute_definitions();
        let names: Vec<&str> = definitions.iter().filter_map(|d| d.attribute_name()).collect();
        assert_eq!(vec!["title", "author"], names);
    }

    #[tokio::test]
    async fn test_should_build_author_index() {
        let gsi = book_like_spec().global_secondary_index().expect("should build index");
        assert_eq!(Some("author_index"), gsi.index_name());
        let keys = gsi.key_schema().expect("should have keys");
        assert_eq!(1, keys.len());
        assert_eq!(Some("author"), keys[0].attribute_name());
        assert_eq!(Some(&KeyType::Hash), keys[0].key_type());
        assert_eq!(Some(&ProjectionType::All), gsi.projection().and_then(|p| p.projection_type()));
        let throughput = gsi.provisioned_throughput().expect("should have throughput");
        assert_eq!(Some(4), throughput.read_capacity_units());
        assert_eq!(Some(2), throughput.write_capacity_units());

        let mut spec = book_like_spec();
        spec.index = None;
        assert!(spec.global_secondary_index().is_none());
    }

    #[tokio::test]
    async fn test_should_format_elapsed_time() {
        assert_eq!("0 seconds", to_minute_sec_string(Duration::from_millis(999)));
        assert_eq!("60 seconds", to_minute_sec_string(Duration::from_secs(60)));
        assert_eq!("2 minutes, 5 seconds", to_minute_sec_string(Duration::from_secs(125)));
    }

    #[tokio::test]
    async fn test_should_parse_string_attribute() {
        let map = HashMap::from([
            ("title".to_string(), AttributeValue::S("Tokyo".to_string())),
            ("year".to_string(), AttributeValue::N("2004".to_string())),
            ("price".to_string(), AttributeValue::Null(true)),
        ]);
        assert_eq!(Ok(Some("Tokyo".to_string())), parse_string_attribute("title", &map));
        assert_eq!(Ok(None), parse_string_attribute("publisher", &map));
        assert_eq!(Ok(None), parse_string_attribute("price", &map));
        assert!(parse_string_attribute("year", &map).is_err());
    }

    #[tokio::test]
    async fn test_should_detect_exceeded_limit() {
        assert!(has_exceeded_limit(Some(&b"ProvisionedThroughputExceededException"[..])));
        assert!(!has_exceeded_limit(Some(&b"abc"[..])));
        assert!(!has_exceeded_limit(None));
    }
}
