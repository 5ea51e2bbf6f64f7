use std::env;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::core::repository::RepositoryStore;

pub const DEFAULT_TABLE_NAME: &str = "book_table";
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:8000";
pub const DEFAULT_READ_CAPACITY: i64 = 4;
pub const DEFAULT_WRITE_CAPACITY: i64 = 2;

// TablePoll bounds how long provisioning waits for a table to become active
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub struct TablePoll {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for TablePoll {
    fn default() -> Self {
        TablePoll {
            timeout: Duration::from_secs(60),
            interval: Duration::from_millis(250),
        }
    }
}

// Configuration abstracts config options for the book catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub table_name: String,
    pub store: RepositoryStore,
    pub endpoint_url: String,
    pub region: Option<String>,
    pub read_capacity: i64,
    pub write_capacity: i64,
    pub dev_mode: bool,
    pub poll: TablePoll,
}

impl Configuration {
    pub fn new(table_name: &str, store: RepositoryStore) -> Self {
        Configuration {
            table_name: table_name.to_string(),
            store,
            endpoint_url: DEFAULT_LOCAL_ENDPOINT.to_string(),
            region: None,
            read_capacity: DEFAULT_READ_CAPACITY,
            write_capacity: DEFAULT_WRITE_CAPACITY,
            dev_mode: true,
            poll: TablePoll::default(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String> {
        let store = lookup("BOOK_STORE")
            .map(|s| RepositoryStore::from(s.as_str()))
            .unwrap_or(RepositoryStore::LocalDynamoDB);
        let mut config = Configuration::new(
            lookup("BOOK_TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()).as_str(), store);
        if let Some(endpoint) = lookup("DYNAMODB_ENDPOINT") {
            config.endpoint_url = endpoint;
        }
        config.region = lookup("AWS_REGION").filter(|r| !r.trim().is_empty());
        config.read_capacity = parse_capacity("BOOK_TABLE_READ_CAPACITY", lookup("BOOK_TABLE_READ_CAPACITY"), DEFAULT_READ_CAPACITY);
        config.write_capacity = parse_capacity("BOOK_TABLE_WRITE_CAPACITY", lookup("BOOK_TABLE_WRITE_CAPACITY"), DEFAULT_WRITE_CAPACITY);
        if let Some(dev_mode) = lookup("BOOK_CATALOG_DEV_MODE") {
            config.dev_mode = !matches!(dev_mode.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no");
        }
        config
    }
}

fn parse_capacity(name: &str, value: Option<String>, default: i64) -> i64 {
    match value {
        None => default,
        Some(value) => match value.trim().parse::<i64>() {
            Ok(n) if n > 0 => n,
            _ => {
                tracing::warn!("ignoring invalid {}={}, using {}", name, value, default);
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;
    use crate::core::domain::{Configuration, TablePoll};
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test", RepositoryStore::InMemory);
        assert_eq!("test", config.table_name.as_str());
        assert_eq!(4, config.read_capacity);
        assert_eq!(2, config.write_capacity);
        assert_eq!(Duration::from_secs(60), config.poll.timeout);
        assert_eq!(Duration::from_millis(250), config.poll.interval);
    }

    #[tokio::test]
    async fn test_should_use_defaults_without_env() {
        let config = Configuration::from_lookup(|_| None);
        assert_eq!("book_table", config.table_name.as_str());
        assert_eq!(RepositoryStore::LocalDynamoDB, config.store);
        assert_eq!("http://localhost:8000", config.endpoint_url.as_str());
        assert_eq!(None, config.region);
        assert!(config.dev_mode);
        assert_eq!(TablePoll::default(), config.poll);
    }

    #[tokio::test]
    async fn test_should_read_env_overrides() {
        let env = HashMap::from([
            ("BOOK_TABLE_NAME", "books_test"),
            ("BOOK_STORE", "dynamodb"),
            ("DYNAMODB_ENDPOINT", "http://dynamo:8000"),
            ("AWS_REGION", "eu-central-1"),
            ("BOOK_TABLE_READ_CAPACITY", "10"),
            ("BOOK_TABLE_WRITE_CAPACITY", "-3"),
            ("BOOK_CATALOG_DEV_MODE", "false"),
        ]);
        let config = Configuration::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!("books_test", config.table_name.as_str());
        assert_eq!(RepositoryStore::DynamoDB, config.store);
        assert_eq!("http://dynamo:8000", config.endpoint_url.as_str());
        assert_eq!(Some("eu-central-1".to_string()), config.region);
        assert_eq!(10, config.read_capacity);
        assert_eq!(2, config.write_capacity);
        assert!(!config.dev_mode);
    }
}
