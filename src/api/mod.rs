pub mod author;
pub mod book_instance;
pub mod books;
pub mod catalog;
pub mod error;
pub mod health;

use axum::{Router, routing::get};

use crate::infrastructure::AppState;

/// Catalog routes, mounted under `/catalog`
pub fn catalog_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        // Books
        .route("/books", get(books::list_books))
        .route(
            "/book/create",
            get(books::create_book_form).post(books::create_book),
        )
        .route("/book/:id", get(books::get_book))
        // Authors
        .route("/authors", get(author::list_authors))
        .route(
            "/author/create",
            get(author::create_author_form).post(author::create_author),
        )
        .route("/author/:id", get(author::get_author))
        .route(
            "/author/:id/delete",
            get(author::delete_author_form).post(author::delete_author),
        )
        .route(
            "/author/:id/update",
            get(author::update_author_form).post(author::update_author),
        )
        // Copies
        .route("/bookinstances", get(book_instance::list_book_instances))
        .route(
            "/bookinstance/create",
            get(book_instance::create_book_instance_form).post(book_instance::create_book_instance),
        )
        .route("/bookinstance/:id", get(book_instance::get_book_instance))
        .route(
            "/bookinstance/:id/delete",
            get(book_instance::delete_book_instance_form).post(book_instance::delete_book_instance),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instance::update_book_instance_form).post(book_instance::update_book_instance),
        )
}
