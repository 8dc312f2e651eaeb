//! List site content

use anyhow::Result;

use crate::content::Work;
use crate::Folio;

/// List site content by type
pub async fn run(folio: &Folio, content_type: &str, category: Option<&str>) -> Result<()> {
    let scanner = folio.scanner();

    match content_type {
        "category" | "categories" => {
            let categories = scanner.list_categories().await;
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {} ({})", category.name, category.work_count);
            }
        }
        "work" | "works" => {
            let works = match category {
                Some(category) => scanner.list_works(category).await,
                None => scanner.list_all_works().await,
            };
            print_works("Works", &works);
        }
        "recommended" => {
            let works = scanner.list_recommended().await;
            print_works("Recommended", &works);
        }
        "nav" | "page" | "pages" => {
            let pages = scanner.list_nav_pages().await;
            println!("Pages ({}):", pages.len());
            for page in pages {
                let marker = if page.has_markdown { "" } else { " (no markdown)" };
                println!("  {} [{}]{}", page.title, page.path, marker);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: categories, works, recommended, nav",
                content_type
            );
        }
    }

    Ok(())
}

/// Print works as `title [path]`, one per line
pub fn print_works(heading: &str, works: &[Work]) {
    println!("{} ({}):", heading, works.len());
    for work in works {
        let marker = if work.is_recommended { " *" } else { "" };
        println!(
            "  {} [{}] {} media{}",
            work.title,
            work.path,
            work.media_files.len(),
            marker
        );
    }
}
