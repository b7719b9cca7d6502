//! Author handlers

use axum::{
    Form,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::api::error::{AppError, AppResult};
use crate::domain::{AuthorInput, DomainError, author_url};
use crate::infrastructure::AppState;
use crate::validation::{
    FormInput, Validated, alphanumeric, name_length, optional_date, optional_iso8601_date,
    validate_form,
};
use crate::views::Outcome;
use crate::views::models::{AuthorFormValues, AuthorView, BookView};

const LIST_URL: &str = "/catalog/authors";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AuthorForm {
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(function = "name_length", message = "First name must not exceed 100 characters."),
        custom(function = "alphanumeric", message = "First name has non-alphanumeric characters.")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(function = "name_length", message = "Family name must not exceed 100 characters."),
        custom(function = "alphanumeric", message = "Family name has non-alphanumeric characters.")
    )]
    pub family_name: String,
    #[validate(custom(function = "optional_iso8601_date", message = "Invalid date of birth"))]
    pub date_of_birth: String,
    #[validate(custom(function = "optional_iso8601_date", message = "Invalid date of death"))]
    pub date_of_death: String,
}

impl FormInput for AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];
    const TRIMMED: &'static [&'static str] = &["first_name", "family_name"];
    const ESCAPED: &'static [&'static str] = &["first_name", "family_name"];

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "first_name" => Some(&mut self.first_name),
            "family_name" => Some(&mut self.family_name),
            "date_of_birth" => Some(&mut self.date_of_birth),
            "date_of_death" => Some(&mut self.date_of_death),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeleteAuthorForm {
    pub authorid: String,
}

fn input_from(form: AuthorForm) -> AuthorInput {
    AuthorInput {
        date_of_birth: optional_date(&form.date_of_birth),
        date_of_death: optional_date(&form.date_of_death),
        first_name: form.first_name,
        family_name: form.family_name,
    }
}

fn form_values(id: Option<String>, validated: &Validated<AuthorForm>) -> AuthorFormValues {
    let form = validated.form();
    AuthorFormValues {
        id,
        first_name: form.first_name.clone(),
        family_name: form.family_name.clone(),
        date_of_birth: form.date_of_birth.clone(),
        date_of_death: form.date_of_death.clone(),
    }
}

/// Display list of all authors, by family name
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Outcome> {
    let authors = state.author_repo.find_all().await?;
    let authors: Vec<AuthorView> = authors.iter().map(AuthorView::from).collect();

    Ok(Outcome::render(
        "author_list",
        json!({
            "title": "Author List",
            "author_list": authors,
        }),
    ))
}

/// Display an author and their books
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let (author, books) = tokio::try_join!(
        state.author_repo.find_by_id(&id),
        state.book_repo.find_by_author(&id)
    )?;

    let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
    let books: Vec<BookView> = books.iter().map(BookView::from).collect();

    Ok(Outcome::render(
        "author_detail",
        json!({
            "title": "Author Detail",
            "author": AuthorView::from(&author),
            "author_books": books,
        }),
    ))
}

pub async fn create_author_form() -> Outcome {
    Outcome::render("author_form", json!({ "title": "Create Author" }))
}

pub async fn create_author(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Outcome> {
    let validated = validate_form(form);

    if !validated.is_valid() {
        return Ok(Outcome::render(
            "author_form",
            json!({
                "title": "Create Author",
                "author": form_values(None, &validated),
                "errors": validated.errors(),
            }),
        ));
    }

    let author = state
        .author_repo
        .create(input_from(validated.into_form()))
        .await?;
    tracing::info!("Author {} created", author.id);

    Ok(Outcome::redirect(author_url(&author)))
}

/// Display author delete confirmation; unknown authors go back to the list
pub async fn delete_author_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let (author, books) = tokio::try_join!(
        state.author_repo.find_by_id(&id),
        state.book_repo.find_by_author(&id)
    )?;

    let Some(author) = author else {
        return Ok(Outcome::redirect(LIST_URL));
    };
    let books: Vec<BookView> = books.iter().map(BookView::from).collect();

    Ok(Outcome::render(
        "author_delete",
        json!({
            "title": "Delete Author",
            "author": AuthorView::from(&author),
            "author_books": books,
        }),
    ))
}

/// Handle author delete.
///
/// An author still referenced by books is kept and the confirmation page is
/// shown again with those books.
pub async fn delete_author(
    State(state): State<AppState>,
    Form(form): Form<DeleteAuthorForm>,
) -> AppResult<Outcome> {
    let id = form.authorid;
    let (author, books) = tokio::try_join!(
        state.author_repo.find_by_id(&id),
        state.book_repo.find_by_author(&id)
    )?;

    if !books.is_empty() {
        tracing::debug!("Author {} still has {} book(s)", id, books.len());
        let books: Vec<BookView> = books.iter().map(BookView::from).collect();
        return Ok(Outcome::render(
            "author_delete",
            json!({
                "title": "Delete Author",
                "author": author.as_ref().map(AuthorView::from),
                "author_books": books,
            }),
        ));
    }

    match state.author_repo.delete(&id).await {
        Ok(()) => tracing::info!("Author {} deleted", id),
        Err(DomainError::NotFound) => tracing::debug!("Author {} already gone", id),
        Err(e) => return Err(e.into()),
    }

    Ok(Outcome::redirect(LIST_URL))
}

pub async fn update_author_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let author = state
        .author_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

    Ok(Outcome::render(
        "author_form",
        json!({
            "title": "Update Author",
            "author": AuthorFormValues::from(&author),
        }),
    ))
}

/// Handle author update, keeping the route id
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Outcome> {
    let validated = validate_form(form);

    if !validated.is_valid() {
        return Ok(Outcome::render(
            "author_form",
            json!({
                "title": "Update Author",
                "author": form_values(Some(id), &validated),
                "errors": validated.errors(),
            }),
        ));
    }

    let author = state
        .author_repo
        .update(&id, input_from(validated.into_form()))
        .await?
        .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
    tracing::info!("Author {} updated", author.id);

    Ok(Outcome::redirect(author_url(&author)))
}
