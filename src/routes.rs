//! The folio route table.
//!
//! | Name | Path | View |
//! |---|---|---|
//! | `home` | `/` | [`View::Home`] |
//! | `book-details` | `/books/:id` | [`View::BookDetails`] (reads param `id`) |

use crate::router::Router;

/// Route name of the landing page.
pub const HOME: &str = "home";
/// Route name of a single book; carries the [`BOOK_ID`] parameter.
pub const BOOK_DETAILS: &str = "book-details";
/// Parameter the details view reads its book id from.
pub const BOOK_ID: &str = "id";

/// The views the table points at. Rendering them is someone else's job.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum View {
    Home,
    BookDetails,
}

/// Build the application route table, mounted at `base` (`/` for none).
pub fn app_routes(base: &str) -> Router<View> {
    Router::new()
        .with_base(base)
        .route("/",          HOME,         View::Home)
        .route("/books/:id", BOOK_DETAILS, View::BookDetails)
}
