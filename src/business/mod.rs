//! Read-only store of generated business demo sites
//!
//! Layout on disk, one directory per slug:
//!
//! ```text
//! <root>/<slug>/data.json    business record
//! <root>/<slug>/index.html   generated demo site
//! <root>/<slug>/photos/...   images referenced by the demo
//! ```

pub mod record;

pub use record::{AddressComponent, BusinessLocation, BusinessRecord};

use crate::error::{LocwebError, Result};
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};

const DATA_FILE: &str = "data.json";
const INDEX_FILE: &str = "index.html";

/// Script injected into demo pages so navigation stays inside the preview frame
const PREVIEW_SCRIPT: &str = r##"
<script>
  document.addEventListener('DOMContentLoaded', () => {
    const base = document.createElement('base');
    base.target = '_self';
    document.head.appendChild(base);

    document.querySelectorAll('a[href^="#"]').forEach(anchor => {
      anchor.addEventListener('click', function (e) {
        e.preventDefault();
        const target = document.getElementById(this.getAttribute('href').substring(1));
        if (target) {
          target.scrollIntoView({ behavior: 'smooth' });
        }
      });
    });
  });
</script>
"##;

/// Business store rooted at a directory
#[derive(Debug, Clone)]
pub struct BusinessStore {
    root: PathBuf,
}

impl BusinessStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the record for a slug.
    ///
    /// A missing or unreadable document is `None`; only an unsafe slug is an error.
    pub fn load(&self, slug: &str) -> Result<Option<BusinessRecord>> {
        let path = self.slug_dir(slug)?.join(DATA_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "Failed to read business record");
                return Ok(None);
            }
        };

        match serde_json::from_str(&content) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "Business record is not valid JSON");
                Ok(None)
            }
        }
    }

    /// Slugs that have a business record, sorted
    pub fn list_slugs(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(root = %self.root.display(), error = %e, "Business directory unavailable");
                return Vec::new();
            }
        };

        let mut slugs: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().join(DATA_FILE).is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        slugs.sort();
        slugs.dedup();
        slugs
    }

    /// Demo page HTML prepared for embedding in the preview frame
    pub fn preview_html(&self, slug: &str) -> Result<Option<String>> {
        let path = self.slug_dir(slug)?.join(INDEX_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let html = std::fs::read_to_string(&path)
            .map_err(|e| LocwebError::io(e.to_string(), Some(path.display().to_string())))?;

        Ok(Some(rewrite_preview_html(&html, slug)?))
    }

    fn slug_dir(&self, slug: &str) -> Result<PathBuf> {
        validate_slug(slug)?;
        Ok(self.root.join(slug))
    }
}

/// Reject slugs that could escape the store root
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.trim().is_empty() {
        return Err(LocwebError::validation("Business slug cannot be empty"));
    }
    if slug.starts_with('.') || slug.contains("..") {
        return Err(LocwebError::validation("Business slug cannot contain dot segments"));
    }
    if slug.contains(['/', '\\', '\0']) {
        return Err(LocwebError::validation("Business slug cannot contain path separators"));
    }
    Ok(())
}

/// Human name for a slug: `joes-pizza` → `joes pizza`
pub fn display_name(slug: &str) -> String {
    slug.replace(['-', '+'], " ")
}

/// Point relative photo references at the store's static route and inject the
/// navigation script right after `<body>`.
pub fn rewrite_preview_html(html: &str, slug: &str) -> Result<String> {
    let attr_re = Regex::new(r#"(src|href)=['"](photos/[^'"]+)['"]"#)
        .map_err(|e| LocwebError::internal(e.to_string()))?;
    let url_re = Regex::new(r#"url\(['"]?(photos/[^'")\s]+)['"]?\)"#)
        .map_err(|e| LocwebError::internal(e.to_string()))?;
    let body_re = Regex::new(r"(?i)<body[^>]*>")
        .map_err(|e| LocwebError::internal(e.to_string()))?;

    let html = attr_re.replace_all(html, |caps: &Captures| {
        format!(r#"{}="/businesses/{}/{}""#, &caps[1], slug, &caps[2])
    });
    let html = url_re.replace_all(&html, |caps: &Captures| {
        format!("url('/businesses/{}/{}')", slug, &caps[1])
    });
    let html = body_re.replace(&html, |caps: &Captures| format!("{}{}", &caps[0], PREVIEW_SCRIPT));

    Ok(html.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(entries: &[(&str, Option<&str>, Option<&str>)]) -> (TempDir, BusinessStore) {
        let dir = TempDir::new().expect("temp dir");
        for (slug, data, index) in entries {
            let slug_dir = dir.path().join(slug);
            fs::create_dir_all(&slug_dir).unwrap();
            if let Some(data) = data {
                fs::write(slug_dir.join(DATA_FILE), data).unwrap();
            }
            if let Some(index) = index {
                fs::write(slug_dir.join(INDEX_FILE), index).unwrap();
            }
        }
        let store = BusinessStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_load_record() {
        let (_dir, store) = store_with(&[(
            "joes-pizza",
            Some(r#"{"name": "Joe's Pizza", "rating": 4.5, "types": ["restaurant"]}"#),
            None,
        )]);

        let record = store.load("joes-pizza").unwrap().expect("record present");
        assert_eq!(record.name.as_deref(), Some("Joe's Pizza"));
        assert_eq!(record.category(), "restaurant");
        assert!(store.load("missing").unwrap().is_none());
    }

    #[test]
    fn test_malformed_record_is_absent() {
        let (_dir, store) = store_with(&[("broken", Some("{not json"), None)]);
        assert!(store.load("broken").unwrap().is_none());
    }

    #[test]
    fn test_unsafe_slugs_rejected() {
        let (_dir, store) = store_with(&[]);
        assert!(store.load("../etc").is_err());
        assert!(store.load("a/b").is_err());
        assert!(store.load(".hidden").is_err());
        assert!(store.load("").is_err());
        assert!(store.preview_html("..").is_err());
    }

    #[test]
    fn test_list_slugs_requires_data_file() {
        let (_dir, store) = store_with(&[
            ("zeta-deli", Some("{}"), None),
            ("alpha-cafe", Some("{}"), Some("<html></html>")),
            ("no-data", None, Some("<html></html>")),
        ]);
        assert_eq!(store.list_slugs(), vec!["alpha-cafe", "zeta-deli"]);

        let empty = BusinessStore::new("/definitely/not/here");
        assert!(empty.list_slugs().is_empty());
    }

    #[test]
    fn test_preview_rewrites_photo_paths() {
        let html = r#"<html><head></head><BODY class="x"><img src="photos/a.jpg"><a href='photos/b.png'>b</a><div style="background-image: url('photos/c.jpg')"></div><div style="background: url(photos/d.jpg)"></div></BODY></html>"#;
        let (_dir, store) = store_with(&[("joes", Some("{}"), Some(html))]);

        let rewritten = store.preview_html("joes").unwrap().expect("index present");
        assert!(rewritten.contains(r#"src="/businesses/joes/photos/a.jpg""#));
        assert!(rewritten.contains(r#"href="/businesses/joes/photos/b.png""#));
        assert!(rewritten.contains("url('/businesses/joes/photos/c.jpg')"));
        assert!(rewritten.contains("url('/businesses/joes/photos/d.jpg')"));
        assert!(rewritten.contains(r#"<BODY class="x">"#));
        let body_at = rewritten.find("<BODY").unwrap();
        let script_at = rewritten.find("<script>").unwrap();
        assert!(script_at > body_at);
        assert!(store.preview_html("missing").unwrap().is_none());
    }

    #[test]
    fn test_preview_script_keeps_anchor_selector() {
        let rewritten = rewrite_preview_html("<body></body>", "joes").unwrap();
        assert!(rewritten.contains(r##"document.querySelectorAll('a[href^="#"]')"##));
        assert!(rewritten.starts_with("<body>\n<script>"));
        assert!(rewritten.ends_with("</script>\n</body>"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("joes-pizza"), "joes pizza");
        assert_eq!(display_name("Joe's+Pizza"), "Joe's Pizza");
    }
}
