use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, Select};

use crate::books::domain::model::BookInfo;
use crate::books::domain::schema::{AttributeKind, AUTHOR_ATTRIBUTE, AUTHOR_INDEX_NAME, BOOK_ATTRIBUTES, TITLE_ATTRIBUTE};
use crate::books::repository::BookRepository;
use crate::core::domain::Configuration;
use crate::core::library::{CatalogError, CatalogResult};
use crate::utils::ddb::{ensure_table, IndexSpec, parse_string_attribute, TableSpec};

// Attribute names always go through placeholders, several of them (e.g. year) are reserved
// words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
const TITLE_NAME: &str = "#title";
const AUTHOR_NAME: &str = "#author";

#[derive(Debug, Clone)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    // makes sure the book table and its author index exist before handing out the repository
    pub(crate) async fn connect(client: Client, config: &Configuration) -> CatalogResult<Self> {
        ensure_table(&client, &book_table_spec(config), config.poll).await?;
        Ok(Self::new(client, config.table_name.as_str(), AUTHOR_INDEX_NAME))
    }

    async fn query_key(&self, title: &str, author: &str, select: Select, limit: Option<i32>) -> CatalogResult<(i32, Vec<BookInfo>)> {
        let mut count = 0;
        let mut books = vec![];
        let mut exclusive_start_key = None;
        loop {
            let out = self.client
                .query()
                .table_name(self.table_name.as_str())
                .consistent_read(true)
                .select(select.clone())
                .set_limit(limit)
                .key_condition_expression(format!("{} = :title AND {} = :author", TITLE_NAME, AUTHOR_NAME))
                .expression_attribute_names(TITLE_NAME, TITLE_ATTRIBUTE)
                .expression_attribute_names(AUTHOR_NAME, AUTHOR_ATTRIBUTE)
                .expression_attribute_values(":title", AttributeValue::S(title.to_string()))
                .expression_attribute_values(":author", AttributeValue::S(author.to_string()))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await.map_err(CatalogError::from)?;
            count += out.count();
            books.extend(map_to_books(out.items().unwrap_or_default()));
            exclusive_start_key = next_page(out.last_evaluated_key());
            if exclusive_start_key.is_none() || limit.is_some() {
                return Ok((count, books));
            }
        }
    }

    async fn scan_with_filter(&self, filter: Option<(&str, &str)>) -> CatalogResult<Vec<BookInfo>> {
        let mut books = vec![];
        let mut exclusive_start_key = None;
        loop {
            let mut request = self.client
                .scan()
                .table_name(self.table_name.as_str())
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key);
            if let Some((expr, text)) = filter {
                request = request
                    .filter_expression(expr)
                    .expression_attribute_names(TITLE_NAME, TITLE_ATTRIBUTE)
                    .expression_attribute_values(":text", AttributeValue::S(text.to_string()));
            }
            let out = request.send().await.map_err(CatalogError::from)?;
            books.extend(map_to_books(out.items().unwrap_or_default()));
            exclusive_start_key = next_page(out.last_evaluated_key());
            if exclusive_start_key.is_none() {
                return Ok(books);
            }
        }
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    fn table_name(&self) -> &str {
        self.table_name.as_str()
    }

    fn for_table(&self, table_name: &str) -> Box<dyn BookRepository> {
        Box::new(DDBBookRepository::new(self.client.clone(), table_name, self.index_name.as_str()))
    }

    async fn put(&self, book: &BookInfo) -> CatalogResult<()> {
        self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .set_item(Some(book_to_item(book)))
            .send()
            .await.map(|_| ()).map_err(CatalogError::from)
    }

    async fn has_key(&self, title: &str, author: &str) -> CatalogResult<bool> {
        let (count, _) = self.query_key(title, author, Select::Count, Some(1)).await?;
        Ok(count > 0)
    }

    async fn find_by_key(&self, title: &str, author: &str) -> CatalogResult<Vec<BookInfo>> {
        let (_, books) = self.query_key(title, author, Select::AllAttributes, None).await?;
        Ok(books)
    }

    async fn find_by_author(&self, author: &str) -> CatalogResult<Vec<BookInfo>> {
        let mut books = vec![];
        let mut exclusive_start_key = None;
        loop {
            // index reads are eventually consistent, consistent_read is not allowed here
            let out = self.client
                .query()
                .table_name(self.table_name.as_str())
                .index_name(self.index_name.as_str())
                .key_condition_expression(format!("{} = :author", AUTHOR_NAME))
                .expression_attribute_names(AUTHOR_NAME, AUTHOR_ATTRIBUTE)
                .expression_attribute_values(":author", AttributeValue::S(author.to_string()))
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await.map_err(CatalogError::from)?;
            books.extend(map_to_books(out.items().unwrap_or_default()));
            exclusive_start_key = next_page(out.last_evaluated_key());
            if exclusive_start_key.is_none() {
                return Ok(books);
            }
        }
    }

    async fn find_by_title_containing(&self, text: &str) -> CatalogResult<Vec<BookInfo>> {
        let expr = format!("contains({}, :text)", TITLE_NAME);
        self.scan_with_filter(Some((expr.as_str(), text))).await
    }

    async fn scan(&self) -> CatalogResult<Vec<BookInfo>> {
        self.scan_with_filter(None).await
    }
}

pub(crate) fn book_table_spec(config: &Configuration) -> TableSpec {
    TableSpec {
        table_name: config.table_name.to_string(),
        hash_key: TITLE_ATTRIBUTE.to_string(),
        range_key: Some(AUTHOR_ATTRIBUTE.to_string()),
        index: Some(IndexSpec {
            name: AUTHOR_INDEX_NAME.to_string(),
            hash_key: AUTHOR_ATTRIBUTE.to_string(),
            range_key: None,
        }),
        read_capacity: config.read_capacity,
        write_capacity: config.write_capacity,
    }
}

fn next_page(last_evaluated_key: Option<&HashMap<String, AttributeValue>>) -> Option<HashMap<String, AttributeValue>> {
    last_evaluated_key.filter(|key| !key.is_empty()).cloned()
}

fn book_to_item(book: &BookInfo) -> HashMap<String, AttributeValue> {
    BOOK_ATTRIBUTES.iter()
        .map(|attr| {
            let value = match attr.kind {
                AttributeKind::S => AttributeValue::S(attr.field.get(book).to_string()),
            };
            (attr.name.to_string(), value)
        })
        .collect()
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> Result<BookInfo, String> {
    let mut book = BookInfo::default();
    for attr in BOOK_ATTRIBUTES.iter() {
        let value = match attr.kind {
            AttributeKind::S => parse_string_attribute(attr.name, map)?,
        };
        if attr.required && value.as_deref().map_or(true, str::is_empty) {
            return Err(format!("book row without {}: {:?}", attr.name, map));
        }
        attr.field.set(&mut book, value.as_deref());
    }
    Ok(book)
}

// A row that cannot be read back is logged and skipped, the remaining rows are still returned.
fn map_to_books(items: &[HashMap<String, AttributeValue>]) -> Vec<BookInfo> {
    items.iter().fold(vec![], |mut books, item| {
        match map_to_book(item) {
            Ok(book) => books.push(book),
            Err(err) => tracing::error!("dropping unreadable book row: {}", err),
        }
        books
    })
}
