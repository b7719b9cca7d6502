//! Catalog entities as seen by handlers and repositories

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statuses offered by the book-instance form. Storage accepts any string.
pub const BOOK_INSTANCE_STATUSES: [&str; 4] = ["Available", "Maintenance", "Loaned", "Reserved"];

/// Author data for views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Field values for creating or replacing an author
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author_id: String,
    pub summary: String,
    pub isbn: String,
}

/// Id + title projection used to fill selection lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
}

/// A book joined with its author, if the reference resolves
#[derive(Debug, Clone)]
pub struct BookWithAuthor {
    pub book: Book,
    pub author: Option<Author>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookInput {
    pub title: String,
    pub author_id: String,
    pub summary: String,
    pub isbn: String,
}

/// A physical copy of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: String,
    pub book_id: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

/// A copy joined with its book, if the reference resolves
#[derive(Debug, Clone)]
pub struct BookInstanceWithBook {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

/// Field values for creating or replacing a copy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookInstanceInput {
    pub book_id: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}
