//! View models: entities plus their derived display fields, shaped for templates

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    Author, Book, BookInstance, BookInstanceWithBook, BookWithAuthor, author_life_span,
    author_name, author_url, book_instance_url, book_url, date_input_value, due_back_formatted,
};

#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub name: String,
    pub url: String,
    pub life_span: String,
    pub date_of_birth_yyyy_mm_dd: String,
    pub date_of_death_yyyy_mm_dd: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.clone(),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
            name: author_name(author),
            url: author_url(author),
            life_span: author_life_span(author),
            date_of_birth_yyyy_mm_dd: date_input_value(author.date_of_birth),
            date_of_death_yyyy_mm_dd: date_input_value(author.date_of_death),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: String,
    pub title: String,
    pub author_id: String,
    /// Resolved author, `None` when the reference is dangling or not joined
    pub author: Option<AuthorView>,
    pub summary: String,
    pub isbn: String,
    pub url: String,
}

impl BookView {
    pub fn new(book: &Book, author: Option<&Author>) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author_id: book.author_id.clone(),
            author: author.map(AuthorView::from),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            url: book_url(book),
        }
    }
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self::new(book, None)
    }
}

impl From<&BookWithAuthor> for BookView {
    fn from(joined: &BookWithAuthor) -> Self {
        Self::new(&joined.book, joined.author.as_ref())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceView {
    pub id: String,
    pub book_id: String,
    /// Resolved book, `None` when the reference is dangling or not joined
    pub book: Option<BookView>,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
    pub due_back_formatted: String,
    pub due_back_yyyy_mm_dd: String,
    pub url: String,
}

impl BookInstanceView {
    pub fn new(instance: &BookInstance, book: Option<&Book>) -> Self {
        Self {
            id: instance.id.clone(),
            book_id: instance.book_id.clone(),
            book: book.map(BookView::from),
            imprint: instance.imprint.clone(),
            status: instance.status.clone(),
            due_back: instance.due_back,
            due_back_formatted: due_back_formatted(instance),
            due_back_yyyy_mm_dd: date_input_value(instance.due_back),
            url: book_instance_url(instance),
        }
    }
}

impl From<&BookInstance> for BookInstanceView {
    fn from(instance: &BookInstance) -> Self {
        Self::new(instance, None)
    }
}

impl From<&BookInstanceWithBook> for BookInstanceView {
    fn from(joined: &BookInstanceWithBook) -> Self {
        Self::new(&joined.instance, joined.book.as_ref())
    }
}

/// Values shown in the book-instance form.
///
/// `id` is unset for a copy that has not been saved yet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BookInstanceFormValues {
    pub id: Option<String>,
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

impl From<&BookInstance> for BookInstanceFormValues {
    fn from(instance: &BookInstance) -> Self {
        Self {
            id: Some(instance.id.clone()),
            book: instance.book_id.clone(),
            imprint: instance.imprint.clone(),
            status: instance.status.clone(),
            due_back: date_input_value(instance.due_back),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorFormValues {
    pub id: Option<String>,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&Author> for AuthorFormValues {
    fn from(author: &Author) -> Self {
        Self {
            id: Some(author.id.clone()),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: date_input_value(author.date_of_birth),
            date_of_death: date_input_value(author.date_of_death),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BookFormValues {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
}
