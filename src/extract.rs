use log::debug;
use select::document::Document;
use select::node::Node;
use select::predicate::Predicate;
use url::Url;

use crate::clean::{DefaultDocumentCleaner, DocumentCleaner};
use crate::date::{ArticleDate, DateExtractor};
use crate::image::ImageExtractor;

/// Matches a single element, like a tiny subset of css selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// `name`
    Tag(&'static str),
    /// `name.class`
    TagClass(&'static str, &'static str),
    /// `name#id`
    TagId(&'static str, &'static str),
    /// `name[attr="value"]`
    TagAttr(&'static str, &'static str, &'static str),
    /// `ancestor name`
    Within(&'static str, &'static str),
}

impl Predicate for Matcher {
    fn matches(&self, node: &Node) -> bool {
        match *self {
            Matcher::Tag(name) => node.name() == Some(name),
            Matcher::TagClass(name, class) => {
                node.name() == Some(name)
                    && node
                        .attr("class")
                        .map_or(false, |c| c.split_whitespace().any(|c| c == class))
            }
            Matcher::TagId(name, id) => node.name() == Some(name) && node.attr("id") == Some(id),
            Matcher::TagAttr(name, attr, value) => {
                node.name() == Some(name) && node.attr(attr) == Some(value)
            }
            Matcher::Within(ancestor, name) => {
                if node.name() != Some(name) {
                    return false;
                }
                let mut parent = node.parent();
                while let Some(p) = parent {
                    if p.name() == Some(ancestor) {
                        return true;
                    }
                    parent = p.parent();
                }
                false
            }
        }
    }
}

/// Where the value of a matched element is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// The trimmed text of the element.
    Text,
    /// The text with `script` and `style` subtrees pruned.
    CleanText,
    /// The first non empty of these attributes.
    Attrs(&'static [&'static str]),
    /// The first non empty of these attributes, then the trimmed text.
    AttrsThenText(&'static [&'static str]),
}

impl ValueSource {
    pub fn read(&self, node: &Node) -> Option<String> {
        let attrs = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| node.attr(name))
                .map(str::trim)
                .find(|v| !v.is_empty())
                .map(str::to_string)
        };
        let text = || Some(node.text().trim().to_string()).filter(|s| !s.is_empty());
        match *self {
            ValueSource::Text => text(),
            ValueSource::CleanText => {
                Some(DefaultDocumentCleaner::clean_node_text(node)).filter(|s| !s.is_empty())
            }
            ValueSource::Attrs(names) => attrs(names),
            ValueSource::AttrsThenText(names) => attrs(names).or_else(text),
        }
    }
}

/// A prioritized lookup: the element to look for and how to read its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorRule {
    pub matcher: Matcher,
    pub value: ValueSource,
}

impl SelectorRule {
    pub const fn new(matcher: Matcher, value: ValueSource) -> Self {
        Self { matcher, value }
    }

    /// The value of the first matching element in the document.
    pub fn first_value(&self, doc: &Document) -> Option<String> {
        doc.find(self.matcher)
            .next()
            .and_then(|node| self.value.read(&node))
    }
}

/// Tries the `rules` in order and returns the first value the `accept`
/// function maps to `Some`.
///
/// Only the first element matched by a rule is considered, just like
/// `querySelector`.
pub fn first_accepted<T, F>(doc: &Document, rules: &[SelectorRule], mut accept: F) -> Option<T>
where
    F: FnMut(String) -> Option<T>,
{
    rules.iter().find_map(|rule| {
        let value = rule.first_value(doc)?;
        let accepted = accept(value);
        if accepted.is_some() {
            debug!("Matched {:?}", rule.matcher);
        }
        accepted
    })
}

/// Returns the first non empty value of the `rules`.
pub fn first_match(doc: &Document, rules: &[SelectorRule]) -> Option<String> {
    first_accepted(doc, rules, Some)
}

/// Title rules, the site specific headings first.
pub const TITLE_RULES: [SelectorRule; 5] = [
    SelectorRule::new(Matcher::TagClass("h1", "article-title"), ValueSource::Text),
    SelectorRule::new(Matcher::TagClass("h1", "post-title"), ValueSource::Text),
    SelectorRule::new(Matcher::TagId("h1", "main-title"), ValueSource::Text),
    SelectorRule::new(Matcher::Tag("title"), ValueSource::Text),
    SelectorRule::new(Matcher::Tag("h1"), ValueSource::Text),
];

/// Title rules when the readability scoring is preferred.
pub const HEADING_FIRST_TITLE_RULES: [SelectorRule; 2] = [
    SelectorRule::new(Matcher::Tag("h1"), ValueSource::Text),
    SelectorRule::new(Matcher::Tag("title"), ValueSource::Text),
];

/// Containers that usually hold the article body.
pub const CONTENT_RULES: [SelectorRule; 5] = [
    SelectorRule::new(Matcher::TagClass("div", "article-body"), ValueSource::CleanText),
    SelectorRule::new(Matcher::TagClass("div", "entry-content"), ValueSource::CleanText),
    SelectorRule::new(Matcher::Tag("article"), ValueSource::CleanText),
    SelectorRule::new(Matcher::TagClass("div", "post-content"), ValueSource::CleanText),
    SelectorRule::new(Matcher::TagId("div", "main-content"), ValueSource::CleanText),
];

pub trait Extractor {
    /// Extract the article title.
    fn title(&self, doc: &Document) -> Option<String>;

    /// Extract the main text of the article.
    fn text(&self, doc: &Document) -> Option<String>;

    /// Extract the main image of the article, as absolute url.
    fn top_image(&self, _base_url: &Url, _doc: &Document) -> Option<Url> {
        None
    }

    /// When the article was published.
    fn publishing_date(&self, _doc: &Document) -> Option<ArticleDate> {
        None
    }

    /// Title and text in one go, for extractors that derive both from the
    /// same analysis of the document.
    fn title_and_text(&self, doc: &Document) -> (Option<String>, Option<String>) {
        (self.title(doc), self.text(doc))
    }

    /// Use `fallback` for everything this extractor finds nothing for.
    fn or<T: Extractor>(self, fallback: T) -> Preferred<Self, T>
    where
        Self: Sized,
    {
        Preferred {
            primary: self,
            fallback,
        }
    }
}

/// Extracts everything with the ordered [`SelectorRule`] tables.
#[derive(Debug, Clone)]
pub struct DefaultExtractor {
    title_rules: &'static [SelectorRule],
    lenient_dates: bool,
}

impl DefaultExtractor {
    /// Prefers the `h1` heading over the document `<title>`.
    pub fn heading_first() -> Self {
        Self {
            title_rules: &HEADING_FIRST_TITLE_RULES,
            ..Default::default()
        }
    }

    /// Retry dates that are not ISO 8601 with a fuzzy parser.
    pub fn lenient_dates(mut self, lenient_dates: bool) -> Self {
        self.lenient_dates = lenient_dates;
        self
    }
}

impl Default for DefaultExtractor {
    fn default() -> Self {
        Self {
            title_rules: &TITLE_RULES,
            lenient_dates: false,
        }
    }
}

impl Extractor for DefaultExtractor {
    fn title(&self, doc: &Document) -> Option<String> {
        first_match(doc, self.title_rules)
    }

    fn text(&self, doc: &Document) -> Option<String> {
        first_match(doc, &CONTENT_RULES)
    }

    fn top_image(&self, base_url: &Url, doc: &Document) -> Option<Url> {
        ImageExtractor::extract_from_doc(base_url, doc)
    }

    fn publishing_date(&self, doc: &Document) -> Option<ArticleDate> {
        DateExtractor::extract_from_doc(doc, self.lenient_dates)
    }
}

/// Two extractors composed by preference: every field comes from `primary`
/// unless it finds nothing.
#[derive(Debug, Clone)]
pub struct Preferred<P, F> {
    pub primary: P,
    pub fallback: F,
}

impl<P: Extractor, F: Extractor> Extractor for Preferred<P, F> {
    fn title(&self, doc: &Document) -> Option<String> {
        self.primary
            .title(doc)
            .or_else(|| self.fallback.title(doc))
    }

    fn text(&self, doc: &Document) -> Option<String> {
        self.primary.text(doc).or_else(|| self.fallback.text(doc))
    }

    fn title_and_text(&self, doc: &Document) -> (Option<String>, Option<String>) {
        match self.primary.title_and_text(doc) {
            (Some(title), Some(text)) => (Some(title), Some(text)),
            (title, text) => {
                let (fallback_title, fallback_text) = self.fallback.title_and_text(doc);
                (title.or(fallback_title), text.or(fallback_text))
            }
        }
    }

    fn top_image(&self, base_url: &Url, doc: &Document) -> Option<Url> {
        self.primary
            .top_image(base_url, doc)
            .or_else(|| self.fallback.top_image(base_url, doc))
    }

    fn publishing_date(&self, doc: &Document) -> Option<ArticleDate> {
        self.primary
            .publishing_date(doc)
            .or_else(|| self.fallback.publishing_date(doc))
    }
}
