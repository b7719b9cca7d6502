//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::domain::{Author, AuthorInput, AuthorRepository, DomainError};
use crate::models::author::{self, ActiveModel, Column, Entity as AuthorEntity};

impl From<author::Model> for Author {
    fn from(model: author::Model) -> Self {
        Author {
            id: model.id,
            first_name: model.first_name,
            family_name: model.family_name,
            date_of_birth: model.date_of_birth,
            date_of_death: model.date_of_death,
        }
    }
}

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self) -> Result<Vec<Author>, DomainError> {
        let authors = AuthorEntity::find()
            .order_by_asc(Column::FamilyName)
            .all(&self.db)
            .await?;

        Ok(authors.into_iter().map(Author::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Author>, DomainError> {
        let author = AuthorEntity::find_by_id(id.to_owned()).one(&self.db).await?;
        Ok(author.map(Author::from))
    }

    async fn create(&self, input: AuthorInput) -> Result<Author, DomainError> {
        let author = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            first_name: Set(input.first_name),
            family_name: Set(input.family_name),
            date_of_birth: Set(input.date_of_birth),
            date_of_death: Set(input.date_of_death),
        };

        let result = author.insert(&self.db).await?;
        tracing::debug!("Created author {}", result.id);
        Ok(Author::from(result))
    }

    async fn update(&self, id: &str, input: AuthorInput) -> Result<Option<Author>, DomainError> {
        let Some(existing) = AuthorEntity::find_by_id(id.to_owned()).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.family_name = Set(input.family_name);
        active.date_of_birth = Set(input.date_of_birth);
        active.date_of_death = Set(input.date_of_death);

        let result = active.update(&self.db).await?;
        Ok(Some(Author::from(result)))
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = AuthorEntity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(AuthorEntity::find().count(&self.db).await?)
    }
}
