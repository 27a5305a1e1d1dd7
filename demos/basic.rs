//! Minimal folio walkthrough: resolve a location, format a date, fetch a book.
//!
//! Run with:
//!   FOLIO_FETCH_URL=http://localhost:3000 RUST_LOG=debug cargo run --example basic -- /books/42
//!
//! A token in `storage.json` (`{"token":"abc123"}`) is sent as a bearer token.

use std::sync::Arc;

use folio::{BOOK_ID, Config, FetchClient, FileStorage, RequestOptions, View, app_routes, format_date};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let location = std::env::args().nth(1).unwrap_or_else(|| "/".to_owned());
    let routes = app_routes("/");

    let Some(matched) = routes.resolve(&location) else {
        println!("{location}: no route");
        return;
    };
    println!("{location} → {} ({:?})", matched.name(), matched.view());

    match matched.view() {
        View::Home => println!("now: {}", format_date(chrono::Utc::now())),
        View::BookDetails => {
            let id = matched.param(BOOK_ID).unwrap_or("unknown");
            let client = FetchClient::new(Config::from_env(), Arc::new(FileStorage::new("storage.json")));

            // folio returns the response as received; a 404 is still Ok here.
            match client.fetch(&format!("/books/{id}"), RequestOptions::new()).await {
                Ok(resp) => println!("GET /books/{id} → {}", resp.status()),
                Err(e) => eprintln!("GET /books/{id} failed: {e}"),
            }
        }
    }
}
