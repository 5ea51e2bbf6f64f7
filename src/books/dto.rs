use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookInfo;

// BookForm is the raw book form as submitted; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<String>,
    pub price: Option<String>,
}

impl From<&BookForm> for BookInfo {
    fn from(form: &BookForm) -> Self {
        let mut book = BookInfo::default();
        book.set_title(form.title.as_deref());
        book.set_author(form.author.as_deref());
        book.set_genre(form.genre.as_deref());
        book.set_publisher(form.publisher.as_deref());
        book.set_year(form.year.as_deref());
        book.set_price(form.price.as_deref());
        book
    }
}

// BookListResponse carries search results back to the caller; no match is an empty list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct BookListResponse {
    pub books: Vec<BookInfo>,
}

impl BookListResponse {
    pub fn new(books: Vec<BookInfo>) -> Self {
        Self {
            books,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookInfo;
    use crate::books::dto::{BookForm, BookListResponse};

    #[tokio::test]
    async fn test_should_build_book_from_form() {
        let form: BookForm = serde_json::from_str(r#"{"title": " Neuromancer ", "author": "Gibson, William", "genre": "SF", "price": " 7.99 "}"#)
            .expect("should parse form");
        let book = BookInfo::from(&form);
        assert_eq!(BookInfo::new("Neuromancer", "Gibson, William", "SF").with_price("7.99"), book);
        assert_eq!("", book.publisher());
        assert_eq!("", book.year());
    }

    #[tokio::test]
    async fn test_should_parse_empty_form() {
        let form: BookForm = serde_json::from_str("{}").expect("should parse form");
        assert_eq!(BookForm::default(), form);
        assert_eq!(BookInfo::default(), BookInfo::from(&form));
    }

    #[tokio::test]
    async fn test_should_serialize_books() {
        let res = BookListResponse::new(vec![BookInfo::new("Tokyo", "Hayder, Mo", "Thriller")]);
        let json = serde_json::to_value(&res).expect("should serialize");
        assert_eq!("Tokyo", json["books"][0]["title"]);
        assert_eq!("", json["books"][0]["price"]);
        assert_eq!(0, BookListResponse::empty().books.len());
    }
}
