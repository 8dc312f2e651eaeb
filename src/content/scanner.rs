//! Content scanner - presents the content root as categories and works
//!
//! The directory tree is the database:
//!
//! ```text
//! content/
//! ├── home/                     # reserved: site home and navigation
//! │   ├── home.md
//! │   └── About/
//! │       └── about.md
//! ├── Photography/              # category
//! │   └── Sunset/               # work
//! │       ├── 作品介绍.md        # description file
//! │       ├── cover[推荐].jpg    # marker in a file name features the work
//! │       └── clip.mp4
//! └── @eaDir/                   # NAS artifact, never listed
//! ```
//!
//! Nothing is cached. Every call lists and reads the tree again, so results
//! always reflect the current state of the disk. Failures are isolated per
//! item: a category or work that cannot be read is logged and left out.

use std::path::{Path, PathBuf};

use super::filter::{is_single_segment, is_valid_category_name, is_valid_work_name, HOME_FOLDER};
use super::fs::{ContentFs, DirEntry, LocalFs};
use super::metadata::{has_recommend_marker, resolve_title, RECOMMEND_MARKER};
use super::model::{
    Category, HomeConfig, MediaFile, MediaType, NavPage, ParsedDocument, Work, WorkDetail,
    IMAGE_EXTENSIONS,
};
use super::{ContentError, MarkdownRenderer};
use crate::helpers::{locale_cmp, media_url};

/// Preferred description file of a work
pub const DESCRIPTION_FILE: &str = "作品介绍.md";

/// Home document inside [`HOME_FOLDER`]
pub const HOME_FILE: &str = "home.md";

/// Scans the content root on demand
pub struct ContentScanner<F = LocalFs> {
    fs: F,
    root: PathBuf,
    renderer: MarkdownRenderer,
    /// Home title when `home.md` has no heading
    home_title: String,
}

impl ContentScanner<LocalFs> {
    /// Create a scanner over a local directory
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self::with_fs(LocalFs, root, MarkdownRenderer::new())
    }
}

impl<F: ContentFs> ContentScanner<F> {
    /// Create a scanner over any [`ContentFs`]
    pub fn with_fs<P: Into<PathBuf>>(fs: F, root: P, renderer: MarkdownRenderer) -> Self {
        Self {
            fs,
            root: root.into(),
            renderer,
            home_title: HOME_FOLDER.to_string(),
        }
    }

    /// Use `title` for the home document when it has no heading
    pub fn with_home_title<S: Into<String>>(mut self, title: S) -> Self {
        self.home_title = title.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// Create the content root if it does not exist yet
    pub async fn ensure_root(&self) -> Result<(), ContentError> {
        self.fs.create_dir_all(&self.root).await
    }

    /// All categories, sorted by name
    pub async fn list_categories(&self) -> Vec<Category> {
        self.scan_catalog()
            .await
            .into_iter()
            .map(|(category, _)| category)
            .collect()
    }

    /// Works of one category, sorted by title
    pub async fn list_works(&self, category: &str) -> Vec<Work> {
        if !is_valid_category_name(category) || !is_single_segment(category) {
            tracing::debug!("Ignoring request for reserved category {:?}", category);
            return Vec::new();
        }

        let dir = self.root.join(category);
        let entries = match self.fs.read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to scan category {}: {}", category, e);
                return Vec::new();
            }
        };

        let mut works = Vec::new();
        for entry in entries.iter().filter(|e| e.is_dir()) {
            if !is_valid_work_name(&entry.name) {
                tracing::debug!("Skipping system folder {}/{}", category, entry.name);
                continue;
            }

            match self.scan_work(category, &entry.name).await {
                Ok(work) => works.push(work),
                Err(e) => tracing::warn!("Failed to scan work {}/{}: {}", category, entry.name, e),
            }
        }

        works.sort_by(|a, b| locale_cmp(&a.title, &b.title));
        works
    }

    /// Every work of every category, in category then title order
    pub async fn list_all_works(&self) -> Vec<Work> {
        self.scan_catalog()
            .await
            .into_iter()
            .flat_map(|(_, works)| works)
            .collect()
    }

    /// Works whose title or category contains `query`, ignoring case
    ///
    /// An empty query matches everything.
    pub async fn search_works(&self, query: &str) -> Vec<Work> {
        let query = query.trim().to_lowercase();
        let works = self.list_all_works().await;
        if query.is_empty() {
            return works;
        }

        works
            .into_iter()
            .filter(|work| {
                work.title.to_lowercase().contains(&query)
                    || work.category.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Featured works, sorted by title
    pub async fn list_recommended(&self) -> Vec<Work> {
        let mut works: Vec<Work> = self
            .list_all_works()
            .await
            .into_iter()
            .filter(|work| work.is_recommended)
            .collect();
        works.sort_by(|a, b| locale_cmp(&a.title, &b.title));
        works
    }

    /// One work with its rendered description
    ///
    /// A work folder that is missing or unreadable is `NotFound`. A folder
    /// without a description file still yields a placeholder page.
    pub async fn get_work_detail(
        &self,
        category: &str,
        name: &str,
    ) -> Result<WorkDetail, ContentError> {
        if !is_valid_category_name(category)
            || !is_valid_work_name(name)
            || !is_single_segment(category)
            || !is_single_segment(name)
        {
            return Err(ContentError::InvalidName(format!("{}/{}", category, name)));
        }

        let work = self.scan_work(category, name).await.map_err(|e| {
            tracing::warn!("Failed to load work {}/{}: {}", category, name, e);
            ContentError::NotFound(self.root.join(category).join(name))
        })?;

        let parsed_content = if work.has_markdown {
            self.renderer
                .parse_page(&work.content, &Path::new(category).join(name))
        } else {
            ParsedDocument::placeholder(name)
        };

        Ok(WorkDetail {
            work,
            parsed_content,
        })
    }

    /// The home document, if `home/home.md` exists
    ///
    /// The leading heading is kept: the home page has no separate title slot.
    pub async fn get_home_config(&self) -> Option<HomeConfig> {
        let path = self.root.join(HOME_FOLDER).join(HOME_FILE);
        let content = match self.fs.read_to_string(&path).await {
            Ok(content) => content,
            Err(ContentError::NotFound(_)) => return None,
            Err(e) => {
                tracing::warn!("Failed to read home document: {}", e);
                return None;
            }
        };

        let parsed_content = self.renderer.parse(&content, Path::new(HOME_FOLDER));
        Some(HomeConfig {
            title: resolve_title(Some(&content), &self.home_title),
            content,
            parsed_content,
        })
    }

    /// Sub-pages of the home folder, in directory-listing order
    pub async fn list_nav_pages(&self) -> Vec<NavPage> {
        let dir = self.root.join(HOME_FOLDER);
        let entries = match self.fs.read_dir(&dir).await {
            Ok(entries) => entries,
            Err(ContentError::NotFound(_)) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to scan navigation pages: {}", e);
                return Vec::new();
            }
        };

        let mut pages = Vec::new();
        for entry in entries.iter().filter(|e| e.is_dir()) {
            if !is_valid_work_name(&entry.name) {
                tracing::debug!("Skipping system folder {}/{}", HOME_FOLDER, entry.name);
                continue;
            }

            match self.scan_nav_page(&entry.name).await {
                Ok(page) => pages.push(page),
                Err(e) => tracing::warn!("Failed to scan page {}: {}", entry.name, e),
            }
        }

        pages
    }

    /// One sub-page of the home folder
    pub async fn get_nav_page(&self, name: &str) -> Result<NavPage, ContentError> {
        if !is_valid_work_name(name) || !is_single_segment(name) {
            return Err(ContentError::InvalidName(name.to_string()));
        }

        self.scan_nav_page(name).await.map_err(|e| {
            tracing::warn!("Failed to load page {}: {}", name, e);
            ContentError::NotFound(self.root.join(HOME_FOLDER).join(name))
        })
    }

    /// Categories paired with their works, sorted by category name
    async fn scan_catalog(&self) -> Vec<(Category, Vec<Work>)> {
        let entries = match self.fs.read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Failed to scan content root {:?}: {}", self.root, e);
                return Vec::new();
            }
        };

        let mut catalog = Vec::new();
        for entry in entries.iter().filter(|e| e.is_dir()) {
            if !is_valid_category_name(&entry.name) {
                tracing::debug!("Skipping reserved folder {}", entry.name);
                continue;
            }

            let works = self.list_works(&entry.name).await;
            let category = Category {
                name: entry.name.clone(),
                path: entry.name.clone(),
                work_count: works.len(),
                // First cover in title order, skipping works without one
                cover_image: works.iter().find_map(|w| w.cover_image.clone()),
            };
            catalog.push((category, works));
        }

        catalog.sort_by(|(a, _), (b, _)| locale_cmp(&a.name, &b.name));
        catalog
    }

    /// Build a work from one listing of its folder
    async fn scan_work(&self, category: &str, name: &str) -> Result<Work, ContentError> {
        let dir = self.root.join(category).join(name);
        let entries = self.fs.read_dir(&dir).await?;
        let markdown = self
            .read_description(&dir, &entries, Some(DESCRIPTION_FILE))
            .await;

        let is_recommended = entries.iter().any(|e| e.name.contains(RECOMMEND_MARKER))
            || markdown.as_deref().is_some_and(has_recommend_marker);

        Ok(Work {
            category: category.to_string(),
            name: name.to_string(),
            title: resolve_title(markdown.as_deref(), name),
            path: format!("{}/{}", category, name),
            cover_image: self.cover_image(&[category, name], &entries),
            media_files: self.media_files(&[category, name], &entries),
            has_markdown: markdown.is_some(),
            content: markdown.unwrap_or_default(),
            is_recommended,
        })
    }

    async fn scan_nav_page(&self, name: &str) -> Result<NavPage, ContentError> {
        let dir = self.root.join(HOME_FOLDER).join(name);
        let entries = self.fs.read_dir(&dir).await?;
        let markdown = self.read_description(&dir, &entries, None).await;

        let parsed_content = match &markdown {
            Some(content) => self
                .renderer
                .parse_page(content, &Path::new(HOME_FOLDER).join(name)),
            None => ParsedDocument::placeholder(name),
        };

        Ok(NavPage {
            category: HOME_FOLDER.to_string(),
            name: name.to_string(),
            title: name.to_string(),
            path: format!("{}/{}", HOME_FOLDER, name),
            media_files: self.media_files(&[HOME_FOLDER, name], &entries),
            has_markdown: markdown.is_some(),
            content: markdown.unwrap_or_default(),
            parsed_content,
        })
    }

    /// Locate and read the description file of a folder
    ///
    /// `preferred` wins when present; otherwise the first `.md` file in
    /// listing order is used. An unreadable file counts as absent.
    async fn read_description(
        &self,
        dir: &Path,
        entries: &[DirEntry],
        preferred: Option<&str>,
    ) -> Option<String> {
        let is_markdown = |e: &&DirEntry| e.is_file() && e.extension().as_deref() == Some("md");

        let entry = preferred
            .and_then(|name| entries.iter().find(|e| e.is_file() && e.name == name))
            .or_else(|| entries.iter().find(is_markdown))?;

        let path = dir.join(&entry.name);
        match self.fs.read_to_string(&path).await {
            Ok(content) => {
                tracing::debug!("Using description file {:?}", path);
                Some(content)
            }
            Err(e) => {
                tracing::warn!("Failed to read description file: {}", e);
                None
            }
        }
    }

    fn public_path(&self, folder: &[&str], file: &str) -> String {
        let mut segments = folder.to_vec();
        segments.push(file);
        media_url(self.renderer.media_prefix(), &segments)
    }

    /// First image in listing order
    fn cover_image(&self, folder: &[&str], entries: &[DirEntry]) -> Option<String> {
        entries
            .iter()
            .find(|e| {
                e.is_file()
                    && e.extension()
                        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
            })
            .map(|e| self.public_path(folder, &e.name))
    }

    /// Images and videos, sorted by file name
    fn media_files(&self, folder: &[&str], entries: &[DirEntry]) -> Vec<MediaFile> {
        let mut files: Vec<MediaFile> = entries
            .iter()
            .filter(|e| e.is_file())
            .filter_map(|e| {
                let kind = MediaType::from_extension(&e.extension()?);
                (kind != MediaType::Unknown).then(|| MediaFile {
                    name: e.name.clone(),
                    path: self.public_path(folder, &e.name),
                    kind,
                })
            })
            .collect();

        files.sort_by(|a, b| locale_cmp(&a.name, &b.name));
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::PARSE_FAILED_HTML;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn mkdir(root: &Path, relative: &str) {
        fs::create_dir_all(root.join(relative)).unwrap();
    }

    fn setup() -> (TempDir, ContentScanner) {
        let tmp = TempDir::new().unwrap();
        let scanner = ContentScanner::new(tmp.path());
        (tmp, scanner)
    }

    #[tokio::test]
    async fn test_list_categories_filters_system_folders() {
        let (tmp, scanner) = setup();
        let root = tmp.path();
        mkdir(root, "Art");
        write(root, ".DS_Store", "");
        mkdir(root, "@eaDir");
        mkdir(root, "home");
        mkdir(root, "#recycle");

        let names: Vec<String> = scanner
            .list_categories()
            .await
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Art"]);
    }

    #[tokio::test]
    async fn test_list_categories_sorted_with_counts() {
        let (tmp, scanner) = setup();
        let root = tmp.path();
        write(root, "beta/one/a.png", "");
        write(root, "beta/two/作品介绍.md", "# Two");
        mkdir(root, "Alpha");
        write(root, "loose.txt", "");

        let categories = scanner.list_categories().await;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Alpha");
        assert_eq!(categories[0].work_count, 0);
        assert_eq!(categories[0].cover_image, None);
        assert_eq!(categories[1].name, "beta");
        assert_eq!(categories[1].work_count, 2);
        assert_eq!(
            categories[1].cover_image.as_deref(),
            Some("/content/beta/one/a.png")
        );
    }

    #[tokio::test]
    async fn test_list_works_titles_and_order() {
        let (tmp, scanner) = setup();
        let root = tmp.path();
        write(root, "Art/b-folder/作品介绍.md", "intro\n# Alpha Piece\n");
        write(root, "Art/zeta/notes.md", "no heading here");
        mkdir(root, "Art/Gamma");
        mkdir(root, "Art/@eaDir");
        write(root, "Art/stray.jpg", "");

        let works = scanner.list_works("Art").await;
        let titles: Vec<&str> = works.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha Piece", "Gamma", "zeta"]);

        let zeta = &works[2];
        assert!(zeta.has_markdown);
        assert_eq!(zeta.content, "no heading here");
        assert_eq!(zeta.path, "Art/zeta");

        let gamma = &works[1];
        assert!(!gamma.has_markdown);
        assert_eq!(gamma.content, "");
    }

    #[tokio::test]
    async fn test_description_file_is_preferred() {
        let (tmp, scanner) = setup();
        let root = tmp.path();
        write(root, "Art/w/aaa.md", "# Other");
        write(root, "Art/w/作品介绍.md", "# Preferred");

        let works = scanner.list_works("Art").await;
        assert_eq!(works[0].title, "Preferred");
    }

    #[tokio::test]
    async fn test_list_works_of_missing_or_reserved_category() {
        let (tmp, scanner) = setup();
        mkdir(tmp.path(), "home/About");
        assert!(scanner.list_works("Missing").await.is_empty());
        assert!(scanner.list_works("home").await.is_empty());
        assert!(scanner.list_works("..").await.is_empty());
    }

    #[tokio::test]
    async fn test_cover_and_media_paths_are_encoded() {
        let (tmp, scanner) = setup();
        let root = tmp.path();
        write(root, "摄影/日 落/a b.JPG", "");
        write(root, "摄影/日 落/clip.mp4", "");
        write(root, "摄影/日 落/notes.txt", "");

        let works = scanner.list_works("摄影").await;
        let work = &works[0];
        assert_eq!(
            work.cover_image.as_deref(),
            Some("/content/%E6%91%84%E5%BD%B1/%E6%97%A5%20%E8%90%BD/a%20b.JPG")
        );

        let names: Vec<&str> = work.media_files.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a b.JPG", "clip.mp4"]);
        assert_eq!(work.media_files[0].kind, MediaType::Image);
        assert_eq!(work.media_files[1].kind, MediaType::Video);
        assert_eq!(
            work.media_files[1].path,
            "/content/%E6%91%84%E5%BD%B1/%E6%97%A5%20%E8%90%BD/clip.mp4"
        );
    }

    #[tokio::test]
    async fn test_recommendation_detection() {
        let (tmp, scanner) = setup();
        let root = tmp.path();
        write(root, "Art/by-file/cover[推荐].png", "");
        write(root, "Art/by-file/作品介绍.md", "# By File\nplain");
        write(root, "Art/legacy/作品介绍.md", "# Legacy\n> #风景 #推荐\n");
        write(root, "Art/marker/作品介绍.md", "# Marker\n[推荐]\n");
        write(root, "Art/plain/作品介绍.md", "# Plain\n推荐一下\n");

        let works = scanner.list_works("Art").await;
        let flags: Vec<(&str, bool)> = works
            .iter()
            .map(|w| (w.title.as_str(), w.is_recommended))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("By File", true),
                ("Legacy", true),
                ("Marker", true),
                ("Plain", false)
            ]
        );

        let recommended: Vec<String> = scanner
            .list_recommended()
            .await
            .into_iter()
            .map(|w| w.title)
            .collect();
        assert_eq!(recommended, vec!["By File", "Legacy", "Marker"]);
    }

    #[tokio::test]
    async fn test_list_all_works_and_search() {
        let (tmp, scanner) = setup();
        let root = tmp.path();
        write(root, "Photo/w1/作品介绍.md", "# Golden Hour");
        write(root, "Design/w2/作品介绍.md", "# Poster");
        write(root, "Design/w3/作品介绍.md", "# Logo");

        let all: Vec<String> = scanner
            .list_all_works()
            .await
            .into_iter()
            .map(|w| w.title)
            .collect();
        assert_eq!(all, vec!["Logo", "Poster", "Golden Hour"]);

        let hits = scanner.search_works("gOLDEN").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Golden Hour");

        let by_category = scanner.search_works("design").await;
        assert_eq!(by_category.len(), 2);

        assert_eq!(scanner.search_works("").await.len(), 3);
        assert!(scanner.search_works("nothing").await.is_empty());
    }

    #[tokio::test]
    async fn test_get_work_detail_renders() {
        let (tmp, scanner) = setup();
        let root = tmp.path();
        write(
            root,
            "Art/Sunset/作品介绍.md",
            "# Sunset\n\n![shot](./shot.jpg)\n\nSee https://example.com\n",
        );
        write(root, "Art/Sunset/shot.jpg", "");

        let detail = scanner.get_work_detail("Art", "Sunset").await.unwrap();
        assert_eq!(detail.work.title, "Sunset");
        assert_eq!(detail.work.media_files.len(), 1);

        let html = &detail.parsed_content.html;
        assert!(!html.contains("<h1>"));
        assert!(html.contains(r#"src="/content/Art/Sunset/shot.jpg""#));
        assert!(html.contains(r#"<div class="link-card-title">example.com</div>"#));
        assert_eq!(detail.parsed_content.metadata.title, "Sunset");
        assert_ne!(html, PARSE_FAILED_HTML);
    }

    #[tokio::test]
    async fn test_get_work_detail_without_description() {
        let (tmp, scanner) = setup();
        mkdir(tmp.path(), "Art/Empty");

        let detail = scanner.get_work_detail("Art", "Empty").await.unwrap();
        assert!(!detail.work.has_markdown);
        assert!(detail.work.media_files.is_empty());
        assert_eq!(detail.work.title, "Empty");
        assert!(detail.parsed_content.html.contains("<h1>Empty</h1>"));
    }

    #[tokio::test]
    async fn test_get_work_detail_not_found() {
        let (tmp, scanner) = setup();
        mkdir(tmp.path(), "Art");
        write(tmp.path(), "Art/file.md", "# not a folder");
        mkdir(tmp.path(), "home/About");

        for (category, name) in [
            ("Art", "Missing"),
            ("Art", "file.md"),
            ("Nope", "x"),
            ("home", "About"),
            ("Art", ".."),
            ("Art", "a/b"),
        ] {
            let err = scanner.get_work_detail(category, name).await.unwrap_err();
            assert!(err.is_not_found(), "{category}/{name}: {err}");
        }
    }

    #[tokio::test]
    async fn test_home_config() {
        let (tmp, scanner) = setup();
        assert!(scanner.get_home_config().await.is_none());

        mkdir(tmp.path(), "home");
        write(tmp.path(), "home/index.md", "# Not home.md");
        assert!(scanner.get_home_config().await.is_none());

        write(tmp.path(), "home/home.md", "Hello without heading");
        assert_eq!(scanner.get_home_config().await.unwrap().title, "home");
        let titled = ContentScanner::new(tmp.path()).with_home_title("作品集");
        assert_eq!(titled.get_home_config().await.unwrap().title, "作品集");

        write(tmp.path(), "home/home.md", "# 欢迎\n\n![me](me.png)\n");
        let home = scanner.get_home_config().await.unwrap();
        assert_eq!(home.title, "欢迎");
        assert!(home.parsed_content.html.contains("<h1>欢迎</h1>"));
        assert!(home
            .parsed_content
            .html
            .contains(r#"src="/content/home/me.png""#));
    }

    #[tokio::test]
    async fn test_list_nav_pages() {
        let (tmp, scanner) = setup();
        let root = tmp.path();
        write(root, "home/home.md", "# Home");
        write(root, "home/About/whatever.md", "# About Me\nHello there\n");
        mkdir(root, "home/Contact");
        mkdir(root, "home/@eaDir");

        let pages = scanner.list_nav_pages().await;
        let mut names: Vec<&str> = pages.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["About", "Contact"]);

        let page = |name: &str| pages.iter().find(|p| p.name == name).unwrap();

        let about = page("About");
        assert_eq!(about.title, "About");
        assert!(about.has_markdown);
        assert!(!about.parsed_content.html.contains("<h1>"));
        assert!(about.parsed_content.html.contains("Hello there"));

        let contact = page("Contact");
        assert!(!contact.has_markdown);
        assert!(contact.parsed_content.html.contains("<h1>Contact</h1>"));
    }

    #[tokio::test]
    async fn test_nav_pages_without_home_folder() {
        let (_tmp, scanner) = setup();
        assert!(scanner.list_nav_pages().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_nav_page() {
        let (tmp, scanner) = setup();
        write(tmp.path(), "home/About/about.md", "Just text");

        let page = scanner.get_nav_page("About").await.unwrap();
        assert_eq!(page.content, "Just text");
        assert_eq!(page.path, "home/About");

        assert!(scanner.get_nav_page("Missing").await.unwrap_err().is_not_found());
        assert!(scanner.get_nav_page("../x").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_ensure_root_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("content");
        let scanner = ContentScanner::new(&root);

        scanner.ensure_root().await.unwrap();
        assert!(root.is_dir());
        assert!(scanner.list_categories().await.is_empty());
    }

    /// Local filesystem that fails chosen paths with an I/O error
    struct FailingFs {
        failing: Vec<PathBuf>,
    }

    impl FailingFs {
        fn check(&self, path: &Path) -> Result<(), ContentError> {
            if self.failing.iter().any(|p| p == path) {
                let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
                return Err(ContentError::io(path, err));
            }
            Ok(())
        }
    }

    impl ContentFs for FailingFs {
        async fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>, ContentError> {
            self.check(path)?;
            LocalFs.read_dir(path).await
        }

        async fn read_to_string(&self, path: &Path) -> Result<String, ContentError> {
            self.check(path)?;
            LocalFs.read_to_string(path).await
        }

        async fn create_dir_all(&self, path: &Path) -> Result<(), ContentError> {
            LocalFs.create_dir_all(path).await
        }
    }

    fn failing_scanner(root: &Path, failing: &[&str]) -> ContentScanner<FailingFs> {
        let fs = FailingFs {
            failing: failing.iter().map(|p| root.join(p)).collect(),
        };
        ContentScanner::with_fs(fs, root, MarkdownRenderer::new())
    }

    #[tokio::test]
    async fn test_unreadable_description_degrades_to_placeholder() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "Art/Locked/作品介绍.md", "# Locked [推荐]");
        write(tmp.path(), "Art/Locked/a.png", "");
        let scanner = failing_scanner(tmp.path(), &["Art/Locked/作品介绍.md"]);

        let works = scanner.list_works("Art").await;
        assert_eq!(works.len(), 1);
        assert!(!works[0].has_markdown);
        assert_eq!(works[0].title, "Locked");
        assert_eq!(works[0].content, "");
        assert!(!works[0].is_recommended);
        assert_eq!(works[0].media_files.len(), 1);

        let detail = scanner.get_work_detail("Art", "Locked").await.unwrap();
        assert!(detail.parsed_content.html.contains("<h1>Locked</h1>"));
    }

    #[tokio::test]
    async fn test_unreadable_work_is_dropped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "Art/Good/作品介绍.md", "# Good");
        write(tmp.path(), "Art/Bad/作品介绍.md", "# Bad");
        let scanner = failing_scanner(tmp.path(), &["Art/Bad"]);

        let titles: Vec<String> = scanner
            .list_works("Art")
            .await
            .into_iter()
            .map(|w| w.title)
            .collect();
        assert_eq!(titles, vec!["Good"]);

        let categories = scanner.list_categories().await;
        assert_eq!(categories[0].work_count, 1);

        let err = scanner.get_work_detail("Art", "Bad").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_unreadable_category_has_no_works() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "Art/One/作品介绍.md", "# One");
        write(tmp.path(), "Broken/Two/作品介绍.md", "# Two");
        let scanner = failing_scanner(tmp.path(), &["Broken"]);

        let categories = scanner.list_categories().await;
        let counts: Vec<(&str, usize)> = categories
            .iter()
            .map(|c| (c.name.as_str(), c.work_count))
            .collect();
        assert_eq!(counts, vec![("Art", 1), ("Broken", 0)]);

        let all: Vec<String> = scanner
            .list_all_works()
            .await
            .into_iter()
            .map(|w| w.title)
            .collect();
        assert_eq!(all, vec!["One"]);
    }

    #[tokio::test]
    async fn test_unreadable_home_document_is_absent() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "home/home.md", "# Home");
        let scanner = failing_scanner(tmp.path(), &["home/home.md"]);
        assert!(scanner.get_home_config().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_root_yields_empty_listings() {
        let tmp = TempDir::new().unwrap();
        let scanner = ContentScanner::new(tmp.path().join("absent"));
        assert!(scanner.list_categories().await.is_empty());
        assert!(scanner.list_all_works().await.is_empty());
        assert!(scanner.get_home_config().await.is_none());
    }
}
