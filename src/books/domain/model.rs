use serde::Serialize;

pub const TITLE_REQUIRED: &str = "A book title is required";
pub const AUTHOR_REQUIRED: &str = "An author name is required";
pub const GENRE_REQUIRED: &str = "Please include a genre for the book";
pub const YEAR_INVALID: &str = "Please enter a year";
pub const PRICE_INVALID: &str = "Please enter a price i.e., 16, 16.00, 15.95";

// BookInfo is one row of the book table. Title and author together identify the row; every
// field is stored trimmed and an absent value is kept as an empty string.
//
// Field order matters: the derived Ord compares title, then author, genre, publisher, year and
// price, which is the order used when the whole catalog is listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BookInfo {
    title: String,
    author: String,
    genre: String,
    publisher: String,
    year: String,
    price: String,
}

// FieldError names a field of the book form that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl BookInfo {
    pub fn new(title: &str, author: &str, genre: &str) -> Self {
        let mut book = BookInfo::default();
        book.set_title(Some(title));
        book.set_author(Some(author));
        book.set_genre(Some(genre));
        book
    }

    pub fn with_publisher(mut self, publisher: &str) -> Self {
        self.set_publisher(Some(publisher));
        self
    }

    pub fn with_year(mut self, year: &str) -> Self {
        self.set_year(Some(year));
        self
    }

    pub fn with_price(mut self, price: &str) -> Self {
        self.set_price(Some(price));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn set_title(&mut self, title: Option<&str>) {
        self.title = trim_string(title);
    }

    pub fn set_author(&mut self, author: Option<&str>) {
        self.author = trim_string(author);
    }

    pub fn set_genre(&mut self, genre: Option<&str>) {
        self.genre = trim_string(genre);
    }

    pub fn set_publisher(&mut self, publisher: Option<&str>) {
        self.publisher = trim_string(publisher);
    }

    pub fn set_year(&mut self, year: Option<&str>) {
        self.year = trim_string(year);
    }

    pub fn set_price(&mut self, price: Option<&str>) {
        self.price = trim_string(price);
    }

    /// Checks the form rules for a book and reports every field that fails, in form order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = vec![];
        if self.title.is_empty() {
            errors.push(FieldError::new("title", TITLE_REQUIRED));
        }
        if self.author.is_empty() {
            errors.push(FieldError::new("author", AUTHOR_REQUIRED));
        }
        if self.genre.is_empty() {
            errors.push(FieldError::new("genre", GENRE_REQUIRED));
        }
        if !self.year.is_empty() && !is_year(&self.year) {
            errors.push(FieldError::new("year", YEAR_INVALID));
        }
        if !is_price(&self.price) {
            errors.push(FieldError::new("price", PRICE_INVALID));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn trim_string(input: Option<&str>) -> String {
    input.map(str::trim).unwrap_or_default().to_string()
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

// at most four integer digits, no fraction
fn is_year(year: &str) -> bool {
    !year.is_empty() && year.len() <= 4 && is_digits(year)
}

// ^\d{0,8}(\.\d{1,4})?$
fn is_price(price: &str) -> bool {
    let (whole, fraction) = match price.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (price, None),
    };
    if whole.len() > 8 || !is_digits(whole) {
        return false;
    }
    match fraction {
        None => true,
        Some(fraction) => (1..=4).contains(&fraction.len()) && is_digits(fraction),
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::{AUTHOR_REQUIRED, BookInfo, FieldError, GENRE_REQUIRED, PRICE_INVALID, TITLE_REQUIRED, YEAR_INVALID};

    #[tokio::test]
    async fn test_should_build_books() {
        let book = BookInfo::new("  Neuromancer ", "Gibson, William\t", " SF")
            .with_publisher(" Ace ")
            .with_year("1984 ")
            .with_price(" 7.99");
        assert_eq!("Neuromancer", book.title());
        assert_eq!("Gibson, William", book.author());
        assert_eq!("SF", book.genre());
        assert_eq!("Ace", book.publisher());
        assert_eq!("1984", book.year());
        assert_eq!("7.99", book.price());
    }

    #[tokio::test]
    async fn test_should_normalize_absent_values() {
        let mut book = BookInfo::new("Bangkok 8", "Burdett, John", "Mystery").with_publisher("Knopf");
        book.set_publisher(None);
        book.set_year(None);
        assert_eq!("", book.publisher());
        assert_eq!("", book.year());
        assert_eq!("", book.price());
    }

    #[tokio::test]
    async fn test_should_compare_all_fields() {
        let book = BookInfo::new("Tokyo", "Mo Hayder", "Thriller");
        assert_eq!(book, book.clone());
        assert_ne!(book, book.clone().with_price("12.50"));
        assert_ne!(book, BookInfo::new("Tokyo", "Hayder, Mo", "Thriller"));
    }

    #[tokio::test]
    async fn test_should_order_by_title_then_author() {
        let mut books = vec![
            BookInfo::new("Tokyo", "Hayder, Mo", "Thriller"),
            BookInfo::new("Bangkok Haunts", "Burdett, John", "Mystery"),
            BookInfo::new("Bangkok 8", "Burdett, John", "Mystery"),
            BookInfo::new("Bangkok 8", "Anonymous", "Mystery"),
        ];
        books.sort();
        let keys: Vec<(&str, &str)> = books.iter().map(|b| (b.title(), b.author())).collect();
        assert_eq!(vec![
            ("Bangkok 8", "Anonymous"),
            ("Bangkok 8", "Burdett, John"),
            ("Bangkok Haunts", "Burdett, John"),
            ("Tokyo", "Hayder, Mo"),
        ], keys);
    }

    #[tokio::test]
    async fn test_should_validate_required_fields() {
        let errors = BookInfo::new(" ", "", "").validate().expect_err("should fail");
        assert_eq!(vec![
            FieldError { field: "title", message: TITLE_REQUIRED },
            FieldError { field: "author", message: AUTHOR_REQUIRED },
            FieldError { field: "genre", message: GENRE_REQUIRED },
        ], errors);
        assert!(BookInfo::new("Neuromancer", "Gibson, William", "SF").validate().is_ok());
    }

    #[tokio::test]
    async fn test_should_validate_year() {
        let book = BookInfo::new("Neuromancer", "Gibson, William", "SF");
        for year in ["", "1", "1984", "0042"] {
            assert!(book.clone().with_year(year).validate().is_ok(), "{}", year);
        }
        for year in ["19845", "84a", "19.8", "-12"] {
            let errors = book.clone().with_year(year).validate().expect_err(year);
            assert_eq!(vec![FieldError { field: "year", message: YEAR_INVALID }], errors);
        }
    }

    #[tokio::test]
    async fn test_should_validate_price() {
        let book = BookInfo::new("Neuromancer", "Gibson, William", "SF");
        for price in ["", "16", "16.00", "15.95", ".5", "12345678.1234"] {
            assert!(book.clone().with_price(price).validate().is_ok(), "{}", price);
        }
        for price in ["$16", "16.", "123456789", "1.23456", "1.2.3", "abc"] {
            let errors = book.clone().with_price(price).validate().expect_err(price);
            assert_eq!(vec![FieldError { field: "price", message: PRICE_INVALID }], errors);
        }
    }
}
