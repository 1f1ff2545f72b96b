//! Data models shared across the pipeline.
//!
//! There is intentionally little here: the pipeline passes plain `String`
//! links around (identity is exact string equality, no normalization) and
//! only new articles get promoted to an [`ArticleInfo`] record before the
//! digest is composed.

/// Summary metadata extracted from a single article page.
///
/// Created for each newly discovered link and consumed immediately by the
/// digest composer; never persisted. `title` is the only field that must be
/// present on the page; `time` and `first_paragraph` fall back to
/// placeholder strings when the page omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleInfo {
    /// The article headline, taken from the first `h1` on the page.
    pub title: String,
    /// The publication time label, taken from the first `time` element.
    pub time: String,
    /// The text of the first paragraph inside an `article` container.
    pub first_paragraph: String,
    /// The absolute URL the metadata was extracted from.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_info_creation() {
        let info = ArticleInfo {
            title: "Test headline".to_string(),
            time: "2026-08-07".to_string(),
            first_paragraph: "First paragraph.".to_string(),
            url: "https://news.example/articles/1".to_string(),
        };
        assert_eq!(info.title, "Test headline");
        assert_eq!(info.url, "https://news.example/articles/1");
    }
}
