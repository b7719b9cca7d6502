use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_instances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Book identifier. Writes do not check that the book exists.
    pub book_id: String,
    pub imprint: String,
    /// Free-form availability status.
    /// The form offers:
    /// - `Available`: On shelf, can be loaned
    /// - `Maintenance`: Being repaired or processed
    /// - `Loaned`: Currently lent out
    /// - `Reserved`: Held for a patron
    pub status: String,
    pub due_back: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
