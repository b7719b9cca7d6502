//! Display fields computed from stored attributes.

use chrono::NaiveDate;

use super::{Author, Book, BookInstance};

/// "Family, First" when both names are present, otherwise empty.
pub fn author_name(author: &Author) -> String {
    if author.first_name.is_empty() || author.family_name.is_empty() {
        return String::new();
    }
    format!("{}, {}", author.family_name, author.first_name)
}

pub fn author_url(author: &Author) -> String {
    format!("/catalog/author/{}", author.id)
}

pub fn author_life_span(author: &Author) -> String {
    match (author.date_of_birth, author.date_of_death) {
        (None, None) => "No birth/death data".to_string(),
        (None, Some(death)) => format!("No birth data - {}", format_date_med(death)),
        (Some(birth), None) => format!("{} - No death data", format_date_med(birth)),
        (Some(birth), Some(death)) => {
            format!("{} - {}", format_date_med(birth), format_date_med(death))
        }
    }
}

pub fn book_url(book: &Book) -> String {
    format!("/catalog/book/{}", book.id)
}

pub fn book_instance_url(instance: &BookInstance) -> String {
    format!("/catalog/bookinstance/{}", instance.id)
}

/// Empty when the copy has no due date.
pub fn due_back_formatted(instance: &BookInstance) -> String {
    instance.due_back.map(format_date_med).unwrap_or_default()
}

/// Medium date style, e.g. `Jan 5, 1950`.
pub fn format_date_med(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `YYYY-MM-DD` for date inputs, empty when unset.
pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
