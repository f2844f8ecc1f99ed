//! Pattern extraction for markdown images and links.

use once_cell::sync::Lazy;
use regex::Regex;

/// `![alt](url)`, neither part containing brackets or parentheses
static IMAGE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// `[text](url)` with an optional leading `!` so that image syntax is
/// consumed here and can be filtered out (the regex crate has no lookbehind).
static LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!?\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Extract every `![alt](url)` in `text`, in source order, as `(alt, url)`.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    IMAGE_REGEX
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Extract every `[text](url)` in `text` that is not an image, in source
/// order, as `(text, url)`.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    LINK_REGEX
        .captures_iter(text)
        .filter(|caps| !caps[0].starts_with('!'))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn single_image() {
        assert_eq!(
            extract_images("This is text with an ![image](https://i.imgur.com/zjjcJKZ.png)"),
            pairs(&[("image", "https://i.imgur.com/zjjcJKZ.png")])
        );
    }

    #[test]
    fn multiple_images() {
        assert_eq!(
            extract_images("![one](url1) text ![two](url2)"),
            pairs(&[("one", "url1"), ("two", "url2")])
        );
    }

    #[test]
    fn multiple_links() {
        assert_eq!(
            extract_links("Some links: [Google](https://google.com) and [GitHub](https://github.com)"),
            pairs(&[
                ("Google", "https://google.com"),
                ("GitHub", "https://github.com"),
            ])
        );
    }

    #[test]
    fn images_are_not_links() {
        let text = "This is a link: [hello](http://example.com) and image ![pic](img.png)";
        assert_eq!(extract_links(text), pairs(&[("hello", "http://example.com")]));
        assert_eq!(extract_links("!![pic](img.png)"), vec![]);
    }

    #[test]
    fn adjacent_links() {
        assert_eq!(
            extract_links("[a](1)[b](2)"),
            pairs(&[("a", "1"), ("b", "2")])
        );
    }

    #[test]
    fn nested_brackets_do_not_match() {
        assert!(extract_links("[a [b]](url)").is_empty());
        assert!(extract_images("![alt](url (x))").is_empty());
    }

    #[test]
    fn empty_alt_and_url() {
        assert_eq!(extract_images("![]()"), pairs(&[("", "")]));
    }

    #[test]
    fn no_matches() {
        assert!(extract_images("Just text").is_empty());
        assert!(extract_links("Just text").is_empty());
    }
}
