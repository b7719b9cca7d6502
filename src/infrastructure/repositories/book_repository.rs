//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::{
    Author, Book, BookInput, BookRepository, BookSummary, BookWithAuthor, DomainError,
};
use crate::models::author::Entity as AuthorEntity;
use crate::models::book::{self, ActiveModel, Column, Entity as BookEntity};

impl From<book::Model> for Book {
    fn from(model: book::Model) -> Self {
        Book {
            id: model.id,
            title: model.title,
            author_id: model.author_id,
            summary: model.summary,
            isbn: model.isbn,
        }
    }
}

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<BookWithAuthor>, DomainError> {
        let books_with_authors = BookEntity::find()
            .find_also_related(AuthorEntity)
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        Ok(books_with_authors
            .into_iter()
            .map(|(book, author)| BookWithAuthor {
                book: Book::from(book),
                author: author.map(Author::from),
            })
            .collect())
    }

    async fn find_summaries(&self) -> Result<Vec<BookSummary>, DomainError> {
        let rows: Vec<(String, String)> = BookEntity::find()
            .select_only()
            .column(Column::Id)
            .column(Column::Title)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, title)| BookSummary { id, title })
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BookWithAuthor>, DomainError> {
        let result = BookEntity::find_by_id(id.to_owned())
            .find_also_related(AuthorEntity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(book, author)| BookWithAuthor {
            book: Book::from(book),
            author: author.map(Author::from),
        }))
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .filter(Column::AuthorId.eq(author_id))
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        Ok(books.into_iter().map(Book::from).collect())
    }

    async fn create(&self, input: BookInput) -> Result<Book, DomainError> {
        let new_book = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            title: Set(input.title),
            author_id: Set(input.author_id),
            summary: Set(input.summary),
            isbn: Set(input.isbn),
        };

        let result = new_book.insert(&self.db).await?;
        tracing::debug!("Created book {}", result.id);
        Ok(Book::from(result))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(BookEntity::find().count(&self.db).await?)
    }
}
