//! Catalog home page

use axum::extract::State;
use serde_json::json;

use crate::api::error::AppResult;
use crate::infrastructure::AppState;
use crate::views::Outcome;

/// Record counts for the home page
pub async fn index(State(state): State<AppState>) -> AppResult<Outcome> {
    let (books, copies, available, authors) = tokio::try_join!(
        state.book_repo.count(),
        state.book_instance_repo.count(),
        state.book_instance_repo.count_by_status("Available"),
        state.author_repo.count()
    )?;

    Ok(Outcome::render(
        "index",
        json!({
            "title": "Local Library Home",
            "book_count": books,
            "book_instance_count": copies,
            "book_instance_available_count": available,
            "author_count": authors,
        }),
    ))
}
