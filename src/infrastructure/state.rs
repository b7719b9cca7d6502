//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{AuthorRepository, BookInstanceRepository, BookRepository};
use crate::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookInstanceRepository, SeaOrmBookRepository,
};
use crate::views::{JsonViewRenderer, ViewRenderer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub author_repo: Arc<dyn AuthorRepository>,
    pub book_repo: Arc<dyn BookRepository>,
    /// Physical copies
    pub book_instance_repo: Arc<dyn BookInstanceRepository>,
    /// Turns handler views into response bodies
    pub renderer: Arc<dyn ViewRenderer>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized and JSON rendering
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            author_repo: Arc::new(SeaOrmAuthorRepository::new(db.clone())),
            book_repo: Arc::new(SeaOrmBookRepository::new(db.clone())),
            book_instance_repo: Arc::new(SeaOrmBookInstanceRepository::new(db)),
            renderer: Arc::new(JsonViewRenderer),
        }
    }

    /// Swap the view renderer, e.g. for an HTML template engine
    pub fn with_renderer(mut self, renderer: Arc<dyn ViewRenderer>) -> Self {
        self.renderer = renderer;
        self
    }
}
