//! Demo catalog inserted at startup when `SEED_DEMO` is set

use chrono::NaiveDate;

use crate::domain::{AuthorInput, BookInput, BookInstanceInput, DomainError};
use crate::infrastructure::AppState;

struct DemoAuthor {
    first_name: &'static str,
    family_name: &'static str,
    born: Option<(i32, u32, u32)>,
    died: Option<(i32, u32, u32)>,
}

const AUTHORS: [DemoAuthor; 5] = [
    DemoAuthor {
        first_name: "Patrick",
        family_name: "Rothfuss",
        born: Some((1973, 6, 6)),
        died: None,
    },
    DemoAuthor {
        first_name: "Ben",
        family_name: "Bova",
        born: Some((1932, 11, 8)),
        died: None,
    },
    DemoAuthor {
        first_name: "Isaac",
        family_name: "Asimov",
        born: Some((1920, 1, 2)),
        died: Some((1992, 4, 6)),
    },
    DemoAuthor {
        first_name: "Bob",
        family_name: "Billings",
        born: None,
        died: None,
    },
    DemoAuthor {
        first_name: "Jim",
        family_name: "Jones",
        born: Some((1971, 12, 16)),
        died: None,
    },
];

/// (title, author index, isbn)
const BOOKS: [(&str, usize, &str); 5] = [
    ("The Name of the Wind (The Kingkiller Chronicle, #1)", 0, "9781473211896"),
    ("The Wise Man's Fear (The Kingkiller Chronicle, #2)", 0, "9788401352836"),
    ("The Slow Regard of Silent Things (Kingkiller Chronicle)", 0, "9780756411336"),
    ("Apes and Angels", 1, "9780765379528"),
    ("Death Wave", 1, "9780765379504"),
];

/// (book index, imprint, status)
const COPIES: [(usize, &str, &str); 6] = [
    (0, "London Gollancz, 2014.", "Available"),
    (1, "Gollancz, 2011.", "Loaned"),
    (2, "Gollancz, 2015.", "Available"),
    (3, "New York Tom Doherty Associates, 2016.", "Available"),
    (4, "New York Tom Doherty Associates, 2015.", "Maintenance"),
    (4, "Imprint XXX3", "Reserved"),
];

fn date(ymd: Option<(i32, u32, u32)>) -> Option<NaiveDate> {
    ymd.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

/// Insert the demo catalog. Does nothing when authors already exist.
pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    if state.author_repo.count().await? > 0 {
        tracing::info!("Catalog not empty, skipping demo data");
        return Ok(());
    }

    let mut author_ids = Vec::with_capacity(AUTHORS.len());
    for demo in &AUTHORS {
        let author = state
            .author_repo
            .create(AuthorInput {
                first_name: demo.first_name.to_string(),
                family_name: demo.family_name.to_string(),
                date_of_birth: date(demo.born),
                date_of_death: date(demo.died),
            })
            .await?;
        author_ids.push(author.id);
    }

    let mut book_ids = Vec::with_capacity(BOOKS.len());
    for (title, author, isbn) in BOOKS {
        let book = state
            .book_repo
            .create(BookInput {
                title: title.to_string(),
                author_id: author_ids[author].clone(),
                summary: format!("Summary of {}", title),
                isbn: isbn.to_string(),
            })
            .await?;
        book_ids.push(book.id);
    }

    for (book, imprint, status) in COPIES {
        state
            .book_instance_repo
            .create(BookInstanceInput {
                book_id: book_ids[book].clone(),
                imprint: imprint.to_string(),
                status: status.to_string(),
                due_back: None,
            })
            .await?;
    }

    tracing::info!(
        authors = AUTHORS.len(),
        books = BOOKS.len(),
        copies = COPIES.len(),
        "Demo catalog seeded"
    );
    Ok(())
}
