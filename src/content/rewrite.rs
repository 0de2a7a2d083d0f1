// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::content::pointer::is_absolute_target;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;
use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg"];

// Leading `../` segments are dropped; the remainder is joined onto the base.
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\((?:\.\./)*([^)]+)\)").expect("valid markdown link regex"));

static IMG_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img src="(?:\.\./)*([^"]+)""#).expect("valid img regex"));

/// The directory of a fetched document: its URL without query, fragment and
/// last path segment, with no trailing slash.
pub fn base_url(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    if let Ok(mut segments) = base.path_segments_mut() {
        segments.pop();
    }
    base.as_str().trim_end_matches('/').to_string()
}

pub fn is_image(target: &str) -> bool {
    Path::new(target)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|image| ext.eq_ignore_ascii_case(image))
        })
        .unwrap_or(false)
}

/// Rewrite relative Markdown link targets and `<img src>` values so they
/// point at `base`.
///
/// Fragment-only targets and targets that are already absolute are left
/// alone. For image targets `inline_image` is offered the absolute URL first;
/// when it returns a replacement (a data URI) that is used instead.
pub fn rewrite_relative_links<F>(data: &str, base: &str, mut inline_image: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let rewritten = MARKDOWN_LINK.replace_all(data, |caps: &Captures| {
        match rewrite_target(&caps[1], base, &mut inline_image) {
            Some(target) => format!("]({target})"),
            None => caps[0].to_string(),
        }
    });

    IMG_SRC
        .replace_all(&rewritten, |caps: &Captures| {
            match rewrite_target(&caps[1], base, &mut inline_image) {
                Some(target) => format!("<img src=\"{target}\""),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn rewrite_target<F>(target: &str, base: &str, inline_image: &mut F) -> Option<String>
where
    F: FnMut(&str) -> Option<String>,
{
    if target.starts_with('#') || is_absolute_target(target) {
        return None;
    }

    let absolute = format!("{base}/{target}");
    if is_image(target)
        && let Some(inlined) = inline_image(&absolute)
    {
        return Some(inlined);
    }
    Some(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/org/docs/raw/main/app";

    fn no_inline(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_base_url_drops_last_segment() {
        let url = Url::parse("https://example.com/org/docs/README.md").unwrap();
        assert_eq!(base_url(&url), "https://example.com/org/docs");

        let url = Url::parse("https://example.com/x.md").unwrap();
        assert_eq!(base_url(&url), "https://example.com");

        let url = Url::parse("https://example.com/a/b.md?ref=main#top").unwrap();
        assert_eq!(base_url(&url), "https://example.com/a");
    }

    #[test]
    fn test_is_image() {
        assert!(is_image("diagram.png"));
        assert!(is_image("img/photo.JPG"));
        assert!(is_image("logo.svg"));
        assert!(!is_image("notes.md"));
        assert!(!is_image("png"));
    }

    #[test]
    fn test_rewrites_relative_markdown_links() {
        let input = "See [guide](guide.md) and ![arch](img/arch.png).";
        let output = rewrite_relative_links(input, BASE, no_inline);
        assert_eq!(
            output,
            format!("See [guide]({BASE}/guide.md) and ![arch]({BASE}/img/arch.png).")
        );
    }

    #[test]
    fn test_strips_parent_segments() {
        let output = rewrite_relative_links("[up](../../other.md)", BASE, no_inline);
        assert_eq!(output, format!("[up]({BASE}/other.md)"));
    }

    #[test]
    fn test_leaves_fragments_and_absolute_links() {
        let input = "[top](#usage) [site](https://other.example.com/a.md) [root](/abs.md) [mail](mailto:a@b.c)";
        assert_eq!(rewrite_relative_links(input, BASE, no_inline), input);
    }

    #[test]
    fn test_rewrites_img_tags() {
        let input = r#"<p><img src="shot.gif" width="200"></p>"#;
        let output = rewrite_relative_links(input, BASE, no_inline);
        assert_eq!(output, format!(r#"<p><img src="{BASE}/shot.gif" width="200"></p>"#));
    }

    #[test]
    fn test_rewriting_is_idempotent() {
        let input = "[guide](guide.md)\n<img src=\"a.png\">";
        let once = rewrite_relative_links(input, BASE, no_inline);
        let twice = rewrite_relative_links(&once, BASE, no_inline);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inline_images_only() {
        let mut offered = Vec::new();
        let output = rewrite_relative_links("[doc](doc.md) ![pic](pic.png)", BASE, |url| {
            offered.push(url.to_string());
            Some("data:image/png;base64,AAAA".to_string())
        });

        assert_eq!(offered, vec![format!("{BASE}/pic.png")]);
        assert_eq!(
            output,
            format!("[doc]({BASE}/doc.md) ![pic](data:image/png;base64,AAAA)")
        );
    }

    #[test]
    fn test_failed_inline_falls_back_to_absolute_link() {
        let output = rewrite_relative_links("![pic](pic.png)", BASE, no_inline);
        assert_eq!(output, format!("![pic]({BASE}/pic.png)"));
    }
}
