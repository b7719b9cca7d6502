//! SeaORM implementation of BookInstanceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::domain::{
    Book, BookInstance, BookInstanceInput, BookInstanceRepository, BookInstanceWithBook,
    DomainError,
};
use crate::models::book::Entity as BookEntity;
use crate::models::book_instance::{self, ActiveModel, Column, Entity as BookInstanceEntity};

impl From<book_instance::Model> for BookInstance {
    fn from(model: book_instance::Model) -> Self {
        BookInstance {
            id: model.id,
            book_id: model.book_id,
            imprint: model.imprint,
            status: model.status,
            due_back: model.due_back,
        }
    }
}

/// SeaORM-based implementation of BookInstanceRepository
pub struct SeaOrmBookInstanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookInstanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookInstanceRepository for SeaOrmBookInstanceRepository {
    async fn find_all(&self) -> Result<Vec<BookInstanceWithBook>, DomainError> {
        let copies_with_books = BookInstanceEntity::find()
            .find_also_related(BookEntity)
            .all(&self.db)
            .await?;

        Ok(copies_with_books
            .into_iter()
            .map(|(copy, book)| BookInstanceWithBook {
                instance: BookInstance::from(copy),
                book: book.map(Book::from),
            })
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<BookInstanceWithBook>, DomainError> {
        let result = BookInstanceEntity::find_by_id(id.to_owned())
            .find_also_related(BookEntity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(copy, book)| BookInstanceWithBook {
            instance: BookInstance::from(copy),
            book: book.map(Book::from),
        }))
    }

    async fn find_plain_by_id(&self, id: &str) -> Result<Option<BookInstance>, DomainError> {
        let copy = BookInstanceEntity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?;
        Ok(copy.map(BookInstance::from))
    }

    async fn find_by_book(&self, book_id: &str) -> Result<Vec<BookInstance>, DomainError> {
        let copies = BookInstanceEntity::find()
            .filter(Column::BookId.eq(book_id))
            .all(&self.db)
            .await?;

        Ok(copies.into_iter().map(BookInstance::from).collect())
    }

    async fn create(&self, input: BookInstanceInput) -> Result<BookInstance, DomainError> {
        let new_copy = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            book_id: Set(input.book_id),
            imprint: Set(input.imprint),
            status: Set(input.status),
            due_back: Set(input.due_back),
        };

        let result = new_copy.insert(&self.db).await?;
        tracing::debug!("Created book instance {}", result.id);
        Ok(BookInstance::from(result))
    }

    async fn update(
        &self,
        id: &str,
        input: BookInstanceInput,
    ) -> Result<Option<BookInstance>, DomainError> {
        let Some(existing) = BookInstanceEntity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.book_id = Set(input.book_id);
        active.imprint = Set(input.imprint);
        active.status = Set(input.status);
        active.due_back = Set(input.due_back);

        let result = active.update(&self.db).await?;
        Ok(Some(BookInstance::from(result)))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = BookInstanceEntity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(BookInstanceEntity::find().count(&self.db).await?)
    }

    async fn count_by_status(&self, status: &str) -> Result<u64, DomainError> {
        Ok(BookInstanceEntity::find()
            .filter(Column::Status.eq(status))
            .count(&self.db)
            .await?)
    }
}
