//! Book instance (physical copy) handlers using repository pattern

use axum::{
    Form,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::error::{AppError, AppResult};
use crate::domain::{BOOK_INSTANCE_STATUSES, BookInstanceInput, DomainError, book_instance_url};
use crate::infrastructure::AppState;
use crate::validation::{
    FormInput, Validated, optional_date, optional_iso8601_date, validate_form,
};
use crate::views::Outcome;
use crate::views::models::{BookInstanceFormValues, BookInstanceView};

const LIST_URL: &str = "/catalog/bookinstances";

/// Submitted book instance form
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct BookInstanceForm {
    /// Book identifier
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    pub status: String,
    /// ISO-8601 date, may be empty
    #[validate(custom(function = "optional_iso8601_date", message = "Invalid date"))]
    pub due_back: String,
}

impl FormInput for BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];
    const TRIMMED: &'static [&'static str] = &["book", "imprint"];
    const ESCAPED: &'static [&'static str] = &["book", "imprint", "status"];

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        match name {
            "book" => Some(&mut self.book),
            "imprint" => Some(&mut self.imprint),
            "status" => Some(&mut self.status),
            "due_back" => Some(&mut self.due_back),
            _ => None,
        }
    }
}

/// Submitted delete confirmation. The id comes from the body, not the route.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct DeleteBookInstanceForm {
    pub bookinstanceid: String,
}

fn input_from(form: BookInstanceForm) -> BookInstanceInput {
    BookInstanceInput {
        due_back: optional_date(&form.due_back),
        book_id: form.book,
        imprint: form.imprint,
        status: form.status,
    }
}

fn form_values(
    id: Option<String>,
    validated: &Validated<BookInstanceForm>,
) -> BookInstanceFormValues {
    let form = validated.form();
    BookInstanceFormValues {
        id,
        book: form.book.clone(),
        imprint: form.imprint.clone(),
        status: form.status.clone(),
        due_back: form.due_back.clone(),
    }
}

/// Display list of all book instances
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    responses(
        (status = 200, description = "bookinstance_list view")
    )
)]
pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Outcome> {
    let copies = state.book_instance_repo.find_all().await?;
    let copies: Vec<BookInstanceView> = copies.iter().map(BookInstanceView::from).collect();

    Ok(Outcome::render(
        "bookinstance_list",
        json!({
            "title": "Book Instance List",
            "bookinstance_list": copies,
        }),
    ))
}

/// Display detail page for a specific book instance
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    params(("id" = String, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "bookinstance_detail view"),
        (status = 404, description = "Book copy not found")
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let copy = state
        .book_instance_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;

    let book_title = match &copy.book {
        Some(book) => book.title.clone(),
        None => {
            tracing::warn!(
                "Book instance {} references missing book {}",
                id,
                copy.instance.book_id
            );
            String::new()
        }
    };

    Ok(Outcome::render(
        "bookinstance_detail",
        json!({
            "title": format!("Copy: {}", book_title),
            "bookinstance": BookInstanceView::from(&copy),
        }),
    ))
}

/// Display book instance create form
pub async fn create_book_instance_form(State(state): State<AppState>) -> AppResult<Outcome> {
    let books = state.book_repo.find_summaries().await?;

    Ok(Outcome::render(
        "bookinstance_form",
        json!({
            "title": "Create BookInstance",
            "book_list": books,
            "status_list": BOOK_INSTANCE_STATUSES,
        }),
    ))
}

/// Handle book instance create
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Created, redirects to the new copy"),
        (status = 200, description = "bookinstance_form view with validation errors")
    )
)]
pub async fn create_book_instance(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Outcome> {
    let validated = validate_form(form);

    if !validated.is_valid() {
        tracing::debug!(
            errors = validated.errors().len(),
            "Book instance create rejected"
        );
        let books = state.book_repo.find_summaries().await?;
        let values = form_values(None, &validated);

        return Ok(Outcome::render(
            "bookinstance_form",
            json!({
                "title": "Create BookInstance",
                "book_list": books,
                "status_list": BOOK_INSTANCE_STATUSES,
                "selected_book": values.book,
                "errors": validated.errors(),
                "bookinstance": values,
            }),
        ));
    }

    let copy = state
        .book_instance_repo
        .create(input_from(validated.into_form()))
        .await?;
    tracing::info!("Book instance {} created", copy.id);

    Ok(Outcome::redirect(book_instance_url(&copy)))
}

/// Display book instance delete confirmation.
///
/// A missing copy is passed to the view as `null`.
pub async fn delete_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let copy = state.book_instance_repo.find_by_id(&id).await?;
    if copy.is_none() {
        tracing::warn!("Delete requested for unknown book instance {}", id);
    }

    Ok(Outcome::render(
        "bookinstance_delete",
        json!({
            "title": "Delete BookInstance",
            "bookinstance": copy.as_ref().map(BookInstanceView::from),
        }),
    ))
}

/// Handle book instance delete. Deleting an unknown id is not an error.
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    params(("id" = String, Path, description = "Ignored, the body carries the id")),
    request_body(content = DeleteBookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirects to the copy list")
    )
)]
pub async fn delete_book_instance(
    State(state): State<AppState>,
    Form(form): Form<DeleteBookInstanceForm>,
) -> AppResult<Outcome> {
    match state.book_instance_repo.delete(&form.bookinstanceid).await {
        Ok(()) => tracing::info!("Book instance {} deleted", form.bookinstanceid),
        Err(DomainError::NotFound) => {
            tracing::debug!("Book instance {} already gone", form.bookinstanceid)
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Outcome::redirect(LIST_URL))
}

/// Display book instance update form
pub async fn update_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Outcome> {
    let (copy, books) = tokio::try_join!(
        state.book_instance_repo.find_plain_by_id(&id),
        state.book_repo.find_summaries()
    )?;

    let copy = copy.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

    Ok(Outcome::render(
        "bookinstance_form",
        json!({
            "title": "Update Book",
            "book_list": books,
            "status_list": BOOK_INSTANCE_STATUSES,
            "bookinstance": BookInstanceFormValues::from(&copy),
        }),
    ))
}

/// Handle book instance update. The route id is kept as the copy's identity.
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    params(("id" = String, Path, description = "Book instance ID")),
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Updated, redirects to the copy"),
        (status = 200, description = "bookinstance_form view with validation errors"),
        (status = 404, description = "Book copy not found")
    )
)]
pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Outcome> {
    let validated = validate_form(form);

    if !validated.is_valid() {
        tracing::debug!(
            errors = validated.errors().len(),
            "Book instance {} update rejected",
            id
        );
        let books = state.book_repo.find_summaries().await?;

        return Ok(Outcome::render(
            "bookinstance_form",
            json!({
                "title": "Update BookInstance",
                "book_list": books,
                "status_list": BOOK_INSTANCE_STATUSES,
                "bookinstance": form_values(Some(id), &validated),
                "errors": validated.errors(),
            }),
        ));
    }

    let copy = state
        .book_instance_repo
        .update(&id, input_from(validated.into_form()))
        .await?
        .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
    tracing::info!("Book instance {} updated", copy.id);

    Ok(Outcome::redirect(book_instance_url(&copy)))
}
