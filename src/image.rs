use select::document::Document;
use url::Url;

use crate::extract::{first_accepted, Matcher, SelectorRule, ValueSource};

/// Attributes that may hold the image address, lazy loaded `data-src` and
/// the `content` of meta tags included.
const IMAGE_ATTRS: &[&str] = &["src", "data-src", "content"];

/// Candidates for the article's main image.
pub const IMAGE_RULES: [SelectorRule; 5] = [
    SelectorRule::new(
        Matcher::TagAttr("meta", "property", "og:image"),
        ValueSource::Attrs(IMAGE_ATTRS),
    ),
    SelectorRule::new(
        Matcher::TagClass("img", "article-image"),
        ValueSource::Attrs(IMAGE_ATTRS),
    ),
    SelectorRule::new(Matcher::Within("figure", "img"), ValueSource::Attrs(IMAGE_ATTRS)),
    SelectorRule::new(
        Matcher::TagClass("img", "featured-image"),
        ValueSource::Attrs(IMAGE_ATTRS),
    ),
    SelectorRule::new(Matcher::Tag("img"), ValueSource::Attrs(IMAGE_ATTRS)),
];

pub struct ImageExtractor;

impl ImageExtractor {
    /// The first image candidate with an address that resolves against the
    /// `base_url`.
    pub fn extract_from_doc(base_url: &Url, doc: &Document) -> Option<Url> {
        first_accepted(doc, &IMAGE_RULES, |src| {
            ImageExtractor::absolutize(base_url, &src)
        })
    }

    /// Resolve a possibly relative image address against the page's url.
    ///
    /// Addresses that already carry a `http(s)` scheme are taken as they are.
    pub fn absolutize(base_url: &Url, src: &str) -> Option<Url> {
        let src = src.trim();
        if src.starts_with("http://") || src.starts_with("https://") {
            Url::parse(src).ok()
        } else {
            base_url.join(src).ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tests::assert_priority;

    #[test]
    fn every_image_rule() {
        let image = |n: usize| {
            let src = format!("/img/{}.jpg", n);
            let url = base().join(&src).unwrap();
            (src, url)
        };
        assert_priority(&IMAGE_RULES, image, |doc| {
            ImageExtractor::extract_from_doc(&base(), doc)
        });
    }

    fn base() -> Url {
        Url::parse("https://x.test/news/1").unwrap()
    }

    #[test]
    fn relative_source() {
        assert_eq!(
            ImageExtractor::absolutize(&base(), "/img/a.jpg").unwrap().as_str(),
            "https://x.test/img/a.jpg"
        );
        assert_eq!(
            ImageExtractor::absolutize(&base(), "thumb.png").unwrap().as_str(),
            "https://x.test/news/thumb.png"
        );
        assert_eq!(
            ImageExtractor::absolutize(&base(), "//cdn.test/a.jpg").unwrap().as_str(),
            "https://cdn.test/a.jpg"
        );
        assert_eq!(
            ImageExtractor::absolutize(&base(), "http://other.test/a.jpg").unwrap().as_str(),
            "http://other.test/a.jpg"
        );
    }

    #[test]
    fn og_image_first() {
        let doc = Document::from(
            r#"<html><head><meta property="og:image" content="https://cdn.test/og.jpg"></head>
            <body><img class="article-image" src="/article.jpg"></body></html>"#,
        );
        assert_eq!(
            ImageExtractor::extract_from_doc(&base(), &doc).unwrap().as_str(),
            "https://cdn.test/og.jpg"
        );
    }

    #[test]
    fn lazy_loaded_figure_image() {
        let doc = Document::from(
            r#"<html><body><figure><img data-src="/img/lazy.jpg"></figure>
            <img class="featured-image" src="/featured.jpg"><img src="/any.jpg"></body></html>"#,
        );
        assert_eq!(
            ImageExtractor::extract_from_doc(&base(), &doc).unwrap().as_str(),
            "https://x.test/img/lazy.jpg"
        );
    }

    #[test]
    fn featured_before_any() {
        let doc = Document::from(
            r#"<html><body><img src="/any.jpg"><img class="featured-image" src="/featured.jpg"></body></html>"#,
        );
        // `img.featured-image` outranks the generic `img` although it comes later
        assert_eq!(
            ImageExtractor::extract_from_doc(&base(), &doc).unwrap().as_str(),
            "https://x.test/featured.jpg"
        );
    }

    #[test]
    fn no_image() {
        let doc = Document::from("<html><body><p>text</p></body></html>");
        assert_eq!(ImageExtractor::extract_from_doc(&base(), &doc), None);
    }
}
