pub mod author;
pub mod book;
pub mod book_instance;
