//! Book handlers

use axum::{
    Form,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::api::error::{AppError, AppResult};
use crate::domain::{BookInput, book_url};
use crate::infrastructure::AppState;
use crate::validation::{FormInput, Validated, validate_form};
use crate::views::Outcome;
use crate::views::models::{AuthorView, BookFormValues, BookInstanceView, BookView};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    /// Author identifier
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
}

impl FormInput for BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn"];
    const TRIMMED: &'static [&'static str] = Self::FIELDS;
    const ESCAPED: &'static [&'static str] = Self::FIELDS;

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "title" => Some(&mut self.title),
            "author" => Some(&mut self.author),
            "summary" => Some(&mut self.summary),
            "isbn" => Some(&mut self.isbn),
            _ => None,
        }
    }
}

fn form_values(validated: &Validated<BookForm>) -> BookFormValues {
    let form = validated.form();
    BookFormValues {
        title: form.title.clone(),
        author: form.author.clone(),
        summary: form.summary.clone(),
        isbn: form.isbn.clone(),
    }
}

async fn author_options(state: &AppState) -> AppResult<Vec<AuthorView>> {
    let authors = state.author_repo.find_all().await?;
    Ok(authors.iter().map(AuthorView::from).collect())
}

/// Display list of all books with their authors, by title
pub async fn list_books(State(state): State<AppState>) -> AppResult<Outcome> {
    let books = state.book_repo.find_all().await?;
    let books: Vec<BookView> = books.iter().map(BookView::from).collect();

    Ok(Outcome::render(
        "book_list",
        json!({
            "title": "Book List",
            "book_list": books,
        }),
    ))
}

/// Display a book and its copies
pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Outcome> {
    let (book, copies) = tokio::try_join!(
        state.book_repo.find_by_id(&id),
        state.book_instance_repo.find_by_book(&id)
    )?;

    let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
    let copies: Vec<BookInstanceView> = copies.iter().map(BookInstanceView::from).collect();

    Ok(Outcome::render(
        "book_detail",
        json!({
            "title": book.book.title,
            "book": BookView::from(&book),
            "book_instances": copies,
        }),
    ))
}

pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Outcome> {
    let authors = author_options(&state).await?;

    Ok(Outcome::render(
        "book_form",
        json!({
            "title": "Create Book",
            "authors": authors,
        }),
    ))
}

pub async fn create_book(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Outcome> {
    let validated = validate_form(form);

    if !validated.is_valid() {
        let authors = author_options(&state).await?;
        return Ok(Outcome::render(
            "book_form",
            json!({
                "title": "Create Book",
                "authors": authors,
                "book": form_values(&validated),
                "errors": validated.errors(),
            }),
        ));
    }

    let form = validated.into_form();
    let book = state
        .book_repo
        .create(BookInput {
            title: form.title,
            author_id: form.author,
            summary: form.summary,
            isbn: form.isbn,
        })
        .await?;
    tracing::info!("Book {} created", book.id);

    Ok(Outcome::redirect(book_url(&book)))
}
