use crate::books::domain::model::BookInfo;

pub const TITLE_ATTRIBUTE: &str = "title";
pub const AUTHOR_ATTRIBUTE: &str = "author";
pub const AUTHOR_INDEX_NAME: &str = "author_index";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    // DynamoDB string scalar
    S,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Genre,
    Publisher,
    Year,
    Price,
}

impl BookField {
    pub fn get<'a>(&self, book: &'a BookInfo) -> &'a str {
        match self {
            BookField::Title => book.title(),
            BookField::Author => book.author(),
            BookField::Genre => book.genre(),
            BookField::Publisher => book.publisher(),
            BookField::Year => book.year(),
            BookField::Price => book.price(),
        }
    }

    pub fn set(&self, book: &mut BookInfo, value: Option<&str>) {
        match self {
            BookField::Title => book.set_title(value),
            BookField::Author => book.set_author(value),
            BookField::Genre => book.set_genre(value),
            BookField::Publisher => book.set_publisher(value),
            BookField::Year => book.set_year(value),
            BookField::Price => book.set_price(value),
        }
    }
}

// BookAttribute ties a record field to the attribute that stores it. A required attribute must be
// present in every stored row; an optional one reads back as an empty string when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookAttribute {
    pub field: BookField,
    pub name: &'static str,
    pub kind: AttributeKind,
    pub required: bool,
}

pub const BOOK_ATTRIBUTES: [BookAttribute; 6] = [
    BookAttribute { field: BookField::Title, name: TITLE_ATTRIBUTE, kind: AttributeKind::S, required: true },
    BookAttribute { field: BookField::Author, name: AUTHOR_ATTRIBUTE, kind: AttributeKind::S, required: true },
    BookAttribute { field: BookField::Genre, name: "genre", kind: AttributeKind::S, required: false },
    BookAttribute { field: BookField::Publisher, name: "publisher", kind: AttributeKind::S, required: false },
    BookAttribute { field: BookField::Year, name: "year", kind: AttributeKind::S, required: false },
    BookAttribute { field: BookField::Price, name: "price", kind: AttributeKind::S, required: false },
];
