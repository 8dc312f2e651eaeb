//! Search works by title or category

use anyhow::Result;

use super::list::print_works;
use crate::Folio;

pub async fn run(folio: &Folio, query: &str) -> Result<()> {
    let works = folio.scanner().search_works(query).await;
    tracing::debug!("Search {:?} matched {} works", query, works.len());
    print_works(&format!("Results for {:?}", query), &works);
    Ok(())
}
