//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::{
    Author, AuthorInput, Book, BookInput, BookInstance, BookInstanceInput, BookInstanceWithBook,
    BookSummary, BookWithAuthor, DomainError,
};

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find all authors ordered by family name
    async fn find_all(&self) -> Result<Vec<Author>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Author>, DomainError>;

    /// Create a new author with a freshly generated ID
    async fn create(&self, input: AuthorInput) -> Result<Author, DomainError>;

    /// Replace the fields of an existing author, keeping its ID.
    /// Returns `None` when no author has this ID.
    async fn update(&self, id: &str, input: AuthorInput) -> Result<Option<Author>, DomainError>;

    /// Delete an author by ID
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books with their authors, ordered by title
    async fn find_all(&self) -> Result<Vec<BookWithAuthor>, DomainError>;

    /// ID + title of every book, for selection lists
    async fn find_summaries(&self) -> Result<Vec<BookSummary>, DomainError>;

    /// Find a book by ID, joined with its author
    async fn find_by_id(&self, id: &str) -> Result<Option<BookWithAuthor>, DomainError>;

    /// Books referencing the given author
    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Book>, DomainError>;

    /// Create a new book with a freshly generated ID
    async fn create(&self, input: BookInput) -> Result<Book, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository trait for BookInstance entity
#[async_trait]
pub trait BookInstanceRepository: Send + Sync {
    /// Find all copies joined with their book, in store order
    async fn find_all(&self) -> Result<Vec<BookInstanceWithBook>, DomainError>;

    /// Find a copy by ID, joined with its book
    async fn find_by_id(&self, id: &str) -> Result<Option<BookInstanceWithBook>, DomainError>;

    /// Find a copy by ID without resolving its book
    async fn find_plain_by_id(&self, id: &str) -> Result<Option<BookInstance>, DomainError>;

    /// Copies of a specific book
    async fn find_by_book(&self, book_id: &str) -> Result<Vec<BookInstance>, DomainError>;

    /// Create a new copy with a freshly generated ID
    async fn create(&self, input: BookInstanceInput) -> Result<BookInstance, DomainError>;

    /// Replace every field of the copy with this ID, keeping the ID.
    /// Returns `None` when no copy has this ID.
    async fn update(
        &self,
        id: &str,
        input: BookInstanceInput,
    ) -> Result<Option<BookInstance>, DomainError>;

    /// Delete a copy by ID
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;

    async fn count_by_status(&self, status: &str) -> Result<u64, DomainError>;
}
