use std::sync::Arc;

use axum::{
    Form, Router,
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use locallibrary::api::author::{self, AuthorForm, DeleteAuthorForm};
use locallibrary::api::books::{self, BookForm};
use locallibrary::api::error::AppError;
use locallibrary::config::Config;
use locallibrary::domain::{AuthorInput, BookInput, BookInstanceInput};
use locallibrary::infrastructure::AppState;
use locallibrary::server::build_router;
use locallibrary::views::{Outcome, View, ViewRenderer};
use locallibrary::{db, seed};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

fn test_app(state: AppState) -> Router {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_allowed_origins: vec!["http://localhost:8080".to_string()],
        seed_demo: false,
    };
    build_router(state, &config)
}

async fn create_test_author(state: &AppState, first: &str, family: &str) -> String {
    state
        .author_repo
        .create(AuthorInput {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1920, 1, 2),
            date_of_death: None,
        })
        .await
        .expect("Failed to create author")
        .id
}

async fn create_test_book(state: &AppState, title: &str, author_id: &str) -> String {
    state
        .book_repo
        .create(BookInput {
            title: title.to_string(),
            author_id: author_id.to_string(),
            summary: "Summary".to_string(),
            isbn: "9780000000000".to_string(),
        })
        .await
        .expect("Failed to create book")
        .id
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn author_form(first: &str, family: &str, birth: &str, death: &str) -> AuthorForm {
    AuthorForm {
        first_name: first.to_string(),
        family_name: family.to_string(),
        date_of_birth: birth.to_string(),
        date_of_death: death.to_string(),
    }
}

fn render(outcome: Outcome) -> View {
    match outcome {
        Outcome::Render(view) => view,
        Outcome::Redirect(to) => panic!("expected a view, got redirect to {}", to),
    }
}

#[tokio::test]
async fn test_index_counts() {
    let state = setup_test_state().await;
    let author_id = create_test_author(&state, "Isaac", "Asimov").await;
    let book_id = create_test_book(&state, "Foundation", &author_id).await;
    for status in ["Available", "Available", "Loaned"] {
        state
            .book_instance_repo
            .create(BookInstanceInput {
                book_id: book_id.clone(),
                imprint: "Gnome Press".to_string(),
                status: status.to_string(),
                due_back: None,
            })
            .await
            .unwrap();
    }
    let app = test_app(state);

    let response = app.oneshot(get("/catalog")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["template"], "index");
    let context = &json["context"];
    assert_eq!(context["title"], "Local Library Home");
    assert_eq!(context["book_count"], 1);
    assert_eq!(context["book_instance_count"], 3);
    assert_eq!(context["book_instance_available_count"], 2);
    assert_eq!(context["author_count"], 1);
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = test_app(setup_test_state().await);

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/catalog");
}

#[tokio::test]
async fn test_unknown_route_renders_error_view() {
    let app = test_app(setup_test_state().await);

    let response = app.oneshot(get("/nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["template"], "error");
    assert_eq!(json["context"]["message"], "Not Found");
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = test_app(setup_test_state().await);

    let response = app.clone().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "locallibrary");

    let response = app.oneshot(get("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/catalog/bookinstance/create"].is_object());
}

struct TemplateNameRenderer;

impl ViewRenderer for TemplateNameRenderer {
    fn render(&self, view: View) -> Response {
        format!("<h1>{}</h1>", view.template).into_response()
    }
}

#[tokio::test]
async fn test_custom_renderer_keeps_status() {
    let state = setup_test_state()
        .await
        .with_renderer(Arc::new(TemplateNameRenderer));
    let app = test_app(state);

    let response = app.oneshot(get("/catalog/book/missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>error</h1>");
}

#[tokio::test]
async fn test_author_list_sorted_by_family_name() {
    let state = setup_test_state().await;
    create_test_author(&state, "Ben", "Bova").await;
    create_test_author(&state, "Isaac", "Asimov").await;
    create_test_author(&state, "Patrick", "Rothfuss").await;

    let view = render(author::list_authors(State(state)).await.unwrap());
    assert_eq!(view.template, "author_list");
    let names: Vec<&str> = view.context["author_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Asimov, Isaac", "Bova, Ben", "Rothfuss, Patrick"]);
}

#[tokio::test]
async fn test_author_detail_includes_books() {
    let state = setup_test_state().await;
    let author_id = create_test_author(&state, "Isaac", "Asimov").await;
    create_test_book(&state, "I, Robot", &author_id).await;
    let app = test_app(state);

    let response = app
        .oneshot(get(&format!("/catalog/author/{}", author_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["template"], "author_detail");
    assert_eq!(json["context"]["author"]["life_span"], "Jan 2, 1920 - No death data");
    assert_eq!(json["context"]["author_books"][0]["title"], "I, Robot");
}

#[tokio::test]
async fn test_author_detail_not_found() {
    let state = setup_test_state().await;

    match author::get_author(State(state), Path("missing".to_string())).await {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Author not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_author() {
    let state = setup_test_state().await;

    let form = author_form(" Ursula ", "LeGuin", "1929-10-21", "2018-01-22");
    let outcome = author::create_author(State(state.clone()), Form(form))
        .await
        .unwrap();

    let Outcome::Redirect(location) = outcome else {
        panic!("expected redirect");
    };
    let id = location.strip_prefix("/catalog/author/").unwrap();
    let author = state.author_repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(author.first_name, "Ursula");
    assert_eq!(author.date_of_birth, NaiveDate::from_ymd_opt(1929, 10, 21));
    assert_eq!(author.date_of_death, NaiveDate::from_ymd_opt(2018, 1, 22));
}

#[tokio::test]
async fn test_create_author_validation_errors() {
    let state = setup_test_state().await;

    let form = author_form("Jean-Luc", "", "not a date", "");
    let view = render(
        author::create_author(State(state.clone()), Form(form))
            .await
            .unwrap(),
    );

    assert_eq!(view.template, "author_form");
    let errors: Vec<(&str, &str)> = view.context["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| (e["param"].as_str().unwrap(), e["msg"].as_str().unwrap()))
        .collect();
    let params: Vec<&str> = errors.iter().map(|(param, _)| *param).collect();
    assert_eq!(
        params,
        vec!["first_name", "family_name", "family_name", "date_of_birth"]
    );
    for expected in [
        ("first_name", "First name has non-alphanumeric characters."),
        ("family_name", "Family name must be specified."),
        ("family_name", "Family name has non-alphanumeric characters."),
        ("date_of_birth", "Invalid date of birth"),
    ] {
        assert!(errors.contains(&expected), "missing {:?}", expected);
    }
    assert_eq!(view.context["author"]["first_name"], "Jean-Luc");
    assert_eq!(state.author_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_author_name_too_long() {
    let state = setup_test_state().await;

    let form = author_form(&"a".repeat(101), "Smith", "", "");
    let view = render(author::create_author(State(state), Form(form)).await.unwrap());
    assert_eq!(
        view.context["errors"][0]["msg"],
        "First name must not exceed 100 characters."
    );
}

#[tokio::test]
async fn test_delete_author_blocked_by_books() {
    let state = setup_test_state().await;
    let author_id = create_test_author(&state, "Ben", "Bova").await;
    create_test_book(&state, "Death Wave", &author_id).await;

    let view = render(
        author::delete_author(
            State(state.clone()),
            Form(DeleteAuthorForm {
                authorid: author_id.clone(),
            }),
        )
        .await
        .unwrap(),
    );
    assert_eq!(view.template, "author_delete");
    assert_eq!(view.context["author_books"][0]["title"], "Death Wave");
    assert!(state.author_repo.find_by_id(&author_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_author_without_books() {
    let state = setup_test_state().await;
    let author_id = create_test_author(&state, "Bob", "Billings").await;
    let app = test_app(state.clone());

    let req = Request::builder()
        .uri(format!("/catalog/author/{}/delete", author_id))
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("authorid={}", author_id)))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/catalog/authors");
    assert!(state.author_repo.find_by_id(&author_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_form_for_missing_author_redirects() {
    let state = setup_test_state().await;

    let outcome = author::delete_author_form(State(state), Path("missing".to_string()))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::redirect("/catalog/authors"));
}

#[tokio::test]
async fn test_update_author_keeps_id() {
    let state = setup_test_state().await;
    let author_id = create_test_author(&state, "Jim", "Jones").await;

    let view = render(
        author::update_author_form(State(state.clone()), Path(author_id.clone()))
            .await
            .unwrap(),
    );
    assert_eq!(view.context["title"], "Update Author");
    assert_eq!(view.context["author"]["date_of_birth"], "1920-01-02");

    let form = author_form("James", "Jones", "1971-12-16", "");
    let outcome = author::update_author(State(state.clone()), Path(author_id.clone()), Form(form))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::redirect(format!("/catalog/author/{}", author_id))
    );

    let author = state.author_repo.find_by_id(&author_id).await.unwrap().unwrap();
    assert_eq!(author.first_name, "James");
    assert_eq!(author.date_of_birth, NaiveDate::from_ymd_opt(1971, 12, 16));
    assert_eq!(state.author_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_book_list_sorted_with_authors() {
    let state = setup_test_state().await;
    let author_id = create_test_author(&state, "Patrick", "Rothfuss").await;
    create_test_book(&state, "The Wise Man's Fear", &author_id).await;
    create_test_book(&state, "The Name of the Wind", &author_id).await;

    let view = render(books::list_books(State(state)).await.unwrap());
    assert_eq!(view.template, "book_list");
    let list = view.context["book_list"].as_array().unwrap();
    assert_eq!(list[0]["title"], "The Name of the Wind");
    assert_eq!(list[1]["title"], "The Wise Man's Fear");
    assert_eq!(list[0]["author"]["name"], "Rothfuss, Patrick");
}

#[tokio::test]
async fn test_book_detail_with_copies() {
    let state = setup_test_state().await;
    let author_id = create_test_author(&state, "Ben", "Bova").await;
    let book_id = create_test_book(&state, "Apes and Angels", &author_id).await;
    state
        .book_instance_repo
        .create(BookInstanceInput {
            book_id: book_id.clone(),
            imprint: "Tor, 2016".to_string(),
            status: "Loaned".to_string(),
            due_back: NaiveDate::from_ymd_opt(2024, 6, 1),
        })
        .await
        .unwrap();

    let view = render(
        books::get_book(State(state), Path(book_id))
            .await
            .unwrap(),
    );
    assert_eq!(view.context["title"], "Apes and Angels");
    assert_eq!(view.context["book"]["author"]["name"], "Bova, Ben");
    assert_eq!(
        view.context["book_instances"][0]["due_back_formatted"],
        "Jun 1, 2024"
    );
}

#[tokio::test]
async fn test_book_detail_not_found() {
    let state = setup_test_state().await;

    match books::get_book(State(state), Path("missing".to_string())).await {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Book not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_book() {
    let state = setup_test_state().await;
    let author_id = create_test_author(&state, "Frank", "Herbert").await;

    let invalid = BookForm {
        title: "Dune".to_string(),
        author: author_id.clone(),
        summary: String::new(),
        isbn: String::new(),
    };
    let view = render(
        books::create_book(State(state.clone()), Form(invalid))
            .await
            .unwrap(),
    );
    assert_eq!(view.context["errors"][0]["msg"], "Summary must not be empty.");
    assert_eq!(view.context["errors"][1]["msg"], "ISBN must not be empty");
    assert_eq!(view.context["authors"][0]["family_name"], "Herbert");
    assert_eq!(view.context["book"]["title"], "Dune");

    let valid = BookForm {
        title: "Dune".to_string(),
        author: author_id.clone(),
        summary: "Spice".to_string(),
        isbn: "9780441172719".to_string(),
    };
    let outcome = books::create_book(State(state.clone()), Form(valid))
        .await
        .unwrap();
    let Outcome::Redirect(location) = outcome else {
        panic!("expected redirect");
    };
    assert!(location.starts_with("/catalog/book/"));
    let books = state.book_repo.find_by_author(&author_id).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
}

#[tokio::test]
async fn test_seed_demo_data_is_idempotent() {
    let state = setup_test_state().await;

    seed::seed_demo_data(&state).await.unwrap();
    let authors = state.author_repo.count().await.unwrap();
    let copies = state.book_instance_repo.count().await.unwrap();
    assert!(authors > 0);
    assert!(copies > 0);

    seed::seed_demo_data(&state).await.unwrap();
    assert_eq!(state.author_repo.count().await.unwrap(), authors);
    assert_eq!(state.book_instance_repo.count().await.unwrap(), copies);
}
