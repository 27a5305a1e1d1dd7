//! # folio
//!
//! The non-visual core of the folio book catalogue front end. Three leaf
//! utilities, no coupling between them:
//!
//! - **Routes**: a static table mapping URL paths to views, via [`matchit`].
//! - **Dates**: one fixed, human-readable timestamp layout.
//! - **Fetch**: HTTP requests against the backend with the stored bearer
//!   token attached.
//!
//! Everything a browser app would read from globals (base URL, token
//! storage) is passed in explicitly.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use folio::{app_routes, format_date, Config, FetchClient, FileStorage, RequestOptions, View};
//!
//! #[tokio::main]
//! async fn main() -> folio::Result<()> {
//!     let routes = app_routes("/");
//!     let Some(m) = routes.resolve("/books/42") else { return Ok(()) };
//!
//!     if *m.view() == View::BookDetails {
//!         let client = FetchClient::new(Config::from_env(), Arc::new(FileStorage::new("storage.json")));
//!         let id = m.param("id").unwrap_or_default();
//!         // folio hands back the response as received; status and body are yours.
//!         let resp = client.fetch(&format!("/books/{id}"), RequestOptions::new()).await?;
//!         println!("{} at {}", resp.status(), format_date(1_704_445_387_000_i64));
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod date;
mod error;
mod fetch;
mod method;
mod options;
mod router;
mod routes;
mod storage;
mod transport;

pub use config::{Config, FETCH_URL_ENV};
pub use date::{DATE_FORMAT, DateInput, INVALID_DATE, format_date, format_date_in};
pub use error::{Error, Result};
pub use fetch::FetchClient;
pub use method::{Method, UnknownMethod};
pub use options::RequestOptions;
pub use router::{Route, RouteMatch, Router};
pub use routes::{BOOK_DETAILS, BOOK_ID, HOME, View, app_routes};
pub use storage::{FileStorage, MemoryStorage, Storage, TOKEN_KEY};
pub use transport::{HyperTransport, OutgoingRequest, Transport};
