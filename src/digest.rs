//! Digest composition.
//!
//! Turns the run's extracted articles into one message body in two renderings:
//! a plain-text body (the canonical format, a straight concatenation of
//! per-article blocks) and an HTML alternative for mail clients that prefer
//! it. Zero articles compose to an empty text body, never an error, since
//! metadata extraction may have failed for every new link.
//!
//! Article fields are interpolated into the HTML verbatim unless
//! `escape_html` is set; scraped content can therefore inject markup into
//! the message.

use std::fmt::Write;

use chrono::Local;

use crate::models::ArticleInfo;

/// A composed digest body in both renderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    /// Plain-text body; empty when no article survived extraction.
    pub text: String,
    /// HTML alternative with a dateline wrapper.
    pub html: String,
}

/// Compose the digest for this run's successfully extracted articles.
pub fn compose(infos: &[ArticleInfo], escape_html: bool) -> Digest {
    Digest {
        text: compose_text(infos),
        html: compose_html(infos, escape_html),
    }
}

fn compose_text(infos: &[ArticleInfo]) -> String {
    let mut body = String::new();
    for info in infos {
        writeln!(body, "{}", info.title).unwrap();
        writeln!(body, "Published: {}", info.time).unwrap();
        writeln!(body, "Intro: {}", info.first_paragraph).unwrap();
        writeln!(body, "Read more: {}", info.url).unwrap();
        body.push('\n');
    }
    body
}

fn compose_html(infos: &[ArticleInfo], escape_html: bool) -> String {
    let field = |s: &str| {
        if escape_html {
            escape(s)
        } else {
            s.to_string()
        }
    };

    let mut blocks = String::new();
    for info in infos {
        write!(
            blocks,
            "<h2>{}</h2>\n<p class=\"time\">{}</p>\n<p>{}</p>\n<p><a href=\"{}\">Read more</a></p>\n<hr>\n",
            field(&info.title),
            field(&info.time),
            field(&info.first_paragraph),
            field(&info.url),
        )
        .unwrap();
    }
    if blocks.is_empty() {
        blocks.push_str("<p>No article details were available.</p>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 20px; }}
.container {{ max-width: 600px; margin: 0 auto; }}
.time {{ color: #6b7280; font-size: 13px; }}
</style>
</head>
<body>
<div class="container">
<p class="time">{date}</p>
{blocks}</div>
</body>
</html>
"#,
        date = Local::now().date_naive(),
        blocks = blocks,
    )
}

/// Minimal entity escaping for text interpolated into the HTML rendering.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
