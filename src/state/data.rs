//! Shared data structures for the application state
//!
//! These structs represent the validated data model that flows between
//! the catalog loader, the filter and the UI layer.

use std::path::{Path, PathBuf};

/// Represents a single project in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    /// Unique catalog ID
    pub id: u32,
    /// Display title (e.g., "Reddit Clone")
    pub name: String,
    /// Free-text summary shown on the card
    pub description: String,
    /// Technology tags, in display order
    pub techs: Vec<String>,
    /// Absolute URL of the source repository
    pub repo_url: String,
    /// Path or absolute URL of the preview asset
    pub image: String,
    /// Whether a deployed demo exists
    pub is_live: bool,
    /// Demo URL, always present when `is_live` is set
    pub live_url: Option<String>,
    /// Whether the project appears in the featured strip
    pub featured: bool,
}

impl ProjectRecord {
    /// Where the preview image comes from
    pub fn image_source(&self) -> ImageSource {
        ImageSource::parse(&self.image)
    }

    /// The demo link, only when the project is live
    pub fn demo_url(&self) -> Option<&str> {
        if self.is_live {
            self.live_url.as_deref()
        } else {
            None
        }
    }

    /// Exact tag membership
    pub fn has_tech(&self, tag: &str) -> bool {
        self.techs.iter().any(|t| t == tag)
    }
}

/// Location of a card preview image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Absolute http(s) URL
    Remote(String),
    /// Path relative to the asset directory
    Local(PathBuf),
}

impl ImageSource {
    pub fn parse(image: &str) -> Self {
        if image.starts_with("http://") || image.starts_with("https://") {
            return ImageSource::Remote(image.to_string());
        }

        // The site served `public/` at its root, so catalog paths carry
        // a `/public` prefix that is not part of the asset layout.
        let path = Path::new(image);
        let relative = path
            .strip_prefix("/public")
            .or_else(|_| path.strip_prefix("/"))
            .unwrap_or(path);
        ImageSource::Local(relative.to_path_buf())
    }

    /// Resolve a local image against the asset directory.
    /// Remote images have no local file.
    pub fn resolve(&self, asset_dir: &Path) -> Option<PathBuf> {
        match self {
            ImageSource::Remote(_) => None,
            ImageSource::Local(relative) => Some(asset_dir.join(relative)),
        }
    }
}

/// A certificate or award listed on the certifications page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    /// Free-form date label (e.g., "Winter 2025")
    pub date: String,
    /// Link to the certificate document
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ProjectRecord {
        ProjectRecord {
            id: 1,
            name: "Shop-App".to_string(),
            description: "Flutter shop".to_string(),
            techs: vec!["Flutter".to_string(), "Dart".to_string()],
            repo_url: "https://github.com/example/shop".to_string(),
            image: "/public/assets/images/shoes.gif".to_string(),
            is_live: false,
            live_url: Some("https://shop.example.com".to_string()),
            featured: false,
        }
    }

    #[test]
    fn test_public_prefix_is_stripped() {
        assert_eq!(
            record().image_source(),
            ImageSource::Local(PathBuf::from("assets/images/shoes.gif"))
        );
    }

    #[test]
    fn test_public_prefix_matches_whole_segment() {
        assert_eq!(
            ImageSource::parse("/publicity/banner.png"),
            ImageSource::Local(PathBuf::from("publicity/banner.png"))
        );
        assert_eq!(
            ImageSource::parse("/public/publicity/banner.png"),
            ImageSource::Local(PathBuf::from("publicity/banner.png"))
        );
    }

    #[test]
    fn test_remote_image_has_no_local_path() {
        let source = ImageSource::parse("https://cdn.example.com/a.png");
        assert_eq!(source, ImageSource::Remote("https://cdn.example.com/a.png".to_string()));
        assert!(source.resolve(Path::new("/srv/assets")).is_none());
    }

    #[test]
    fn test_local_image_resolves_under_asset_dir() {
        let source = ImageSource::parse("images/tree.gif");
        assert_eq!(
            source.resolve(Path::new("/srv/assets")),
            Some(PathBuf::from("/srv/assets/images/tree.gif"))
        );
    }

    #[test]
    fn test_demo_url_requires_live_flag() {
        let mut project = record();
        assert_eq!(project.demo_url(), None);

        project.is_live = true;
        assert_eq!(project.demo_url(), Some("https://shop.example.com"));
    }

    #[test]
    fn test_has_tech_is_exact() {
        let project = record();
        assert!(project.has_tech("Dart"));
        assert!(!project.has_tech("dart"));
        assert!(!project.has_tech("Dar"));
    }
}
