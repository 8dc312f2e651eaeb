//! Show one work with what its description references

use anyhow::Result;

use crate::content::metadata::{extract_images, extract_videos};
use crate::Folio;

pub async fn run(folio: &Folio, category: &str, work: &str) -> Result<()> {
    let detail = folio.scanner().get_work_detail(category, work).await?;
    let work = &detail.work;
    let metadata = &detail.parsed_content.metadata;

    println!("{} [{}]", work.title, work.path);
    if work.is_recommended {
        println!("  recommended");
    }
    if let Some(cover) = &work.cover_image {
        println!("  cover: {}", cover);
    }
    if !metadata.description.is_empty() {
        println!("  {}", metadata.description);
    }
    if !metadata.tags.is_empty() {
        println!("  tags: {}", metadata.tags.join(", "));
    }

    println!("Media files ({}):", work.media_files.len());
    for file in &work.media_files {
        println!("  {} ({:?})", file.name, file.kind);
    }

    if !work.has_markdown {
        return Ok(());
    }

    let images = extract_images(&work.content);
    println!("Referenced images ({}):", images.len());
    for image in images {
        println!("  {} {}", image.src, image.alt);
    }

    let videos = extract_videos(&work.content);
    println!("Referenced videos ({}):", videos.len());
    for video in videos {
        println!("  {}", video);
    }

    println!("Links ({}):", metadata.links.len());
    for link in &metadata.links {
        println!("  {} -> {}", link.text, link.url);
    }

    Ok(())
}
