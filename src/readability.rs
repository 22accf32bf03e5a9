use lazy_static::lazy_static;
use regex::Regex;
use select::document::Document;
use select::node::Node;
use select::predicate::Name;

use crate::clean::{DefaultDocumentCleaner, DocumentCleaner};
use crate::extract::Extractor;
use crate::text::{words, TextExtractor};

lazy_static! {
    /// Separates the headline from the site name in `<title>` elements.
    static ref RE_TITLE_SEPARATOR: Regex = Regex::new(r"\s+[|\-—»]\s+").unwrap();
}

/// Finds title and text by scoring the document structure instead of
/// looking for known class names.
///
/// Has no opinion on images and dates, combine it with a
/// [`crate::DefaultExtractor`] through [`Extractor::or`].
#[derive(Debug, Clone, Default)]
pub struct ReadabilityExtractor;

impl ReadabilityExtractor {
    /// The first heading inside the best node, or right above it.
    fn heading_near(node: &Node) -> Option<String> {
        let scopes = std::iter::once(*node).chain(node.parent());
        for scope in scopes {
            if let Some(heading) = scope
                .find(Name("h1"))
                .map(|h| h.text().trim().to_string())
                .find(|t| !t.is_empty())
            {
                return Some(heading);
            }
        }
        None
    }

    /// The document `<title>` without the trailing site name.
    pub fn page_title(doc: &Document) -> Option<String> {
        let title = doc.find(Name("title")).next()?.text();
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(ReadabilityExtractor::strip_site_name(title).to_string())
    }

    /// `Bridge closed for the winter | Daily News` becomes `Bridge closed for
    /// the winter`, unless that leaves fewer than three words.
    pub fn strip_site_name(title: &str) -> &str {
        match RE_TITLE_SEPARATOR.find_iter(title).last() {
            Some(sep) => {
                let headline = title[..sep.start()].trim();
                if words(headline).count() >= 3 {
                    headline
                } else {
                    title
                }
            }
            None => title,
        }
    }
}

impl Extractor for ReadabilityExtractor {
    fn title(&self, doc: &Document) -> Option<String> {
        self.title_and_text(doc).0
    }

    fn text(&self, doc: &Document) -> Option<String> {
        self.title_and_text(doc).1
    }

    fn title_and_text(&self, doc: &Document) -> (Option<String>, Option<String>) {
        let best = match TextExtractor::calculate_best_node(doc) {
            Some(best) => best,
            None => return (None, None),
        };
        let title = ReadabilityExtractor::heading_near(&best)
            .or_else(|| ReadabilityExtractor::page_title(doc));
        let text = Some(DefaultDocumentCleaner::clean_node_text(&best)).filter(|s| !s.is_empty());
        (title, text)
    }
}
