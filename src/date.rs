use std::collections::HashMap;
use std::fmt;

use chrono::prelude::*;
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use select::document::Document;

use crate::extract::{first_accepted, Matcher, SelectorRule, ValueSource};

/// Date values live in the `content` of meta tags and the `datetime` of
/// `<time>` elements, otherwise in the element's text.
const DATE_ATTRS: &[&str] = &["content", "datetime"];

/// Common nodes that hold the article's publishing date.
pub const PUBLISH_DATE_RULES: [SelectorRule; 8] = [
    SelectorRule::new(
        Matcher::TagAttr("meta", "property", "article:published_time"),
        ValueSource::AttrsThenText(DATE_ATTRS),
    ),
    SelectorRule::new(
        Matcher::TagClass("time", "published-date"),
        ValueSource::AttrsThenText(DATE_ATTRS),
    ),
    SelectorRule::new(
        Matcher::TagClass("span", "post-date"),
        ValueSource::AttrsThenText(DATE_ATTRS),
    ),
    SelectorRule::new(
        Matcher::TagAttr("meta", "name", "date"),
        ValueSource::AttrsThenText(DATE_ATTRS),
    ),
    SelectorRule::new(
        Matcher::TagAttr("meta", "itemprop", "datePublished"),
        ValueSource::AttrsThenText(DATE_ATTRS),
    ),
    SelectorRule::new(
        Matcher::TagAttr("meta", "property", "og:published_time"),
        ValueSource::AttrsThenText(DATE_ATTRS),
    ),
    SelectorRule::new(
        Matcher::TagAttr("meta", "name", "pubdate"),
        ValueSource::AttrsThenText(DATE_ATTRS),
    ),
    SelectorRule::new(
        Matcher::TagAttr("meta", "name", "publish_date"),
        ValueSource::AttrsThenText(DATE_ATTRS),
    ),
];

const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A publishing date as found in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleDate {
    /// ISO 8601 combined date and time with an utc offset.
    Zoned(DateTime<FixedOffset>),
    /// ISO 8601 combined date and time without timezone.
    Naive(NaiveDateTime),
}

impl ArticleDate {
    /// The current local wall clock time.
    pub fn now() -> Self {
        ArticleDate::Naive(Local::now().naive_local())
    }

    /// Parse an ISO 8601 date, date time or date time with offset.
    ///
    /// A trailing `Z` is read as `+00:00`. Date only values are taken as
    /// midnight.
    pub fn parse_iso(s: &str) -> Option<Self> {
        let s = s.trim();
        let zulu;
        let s = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
            Some(rest) => {
                zulu = format!("{}+00:00", rest);
                zulu.as_str()
            }
            None => s,
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(ArticleDate::Zoned(dt));
        }
        for fmt in ZONED_FORMATS.iter() {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Some(ArticleDate::Zoned(dt));
            }
        }
        for fmt in NAIVE_FORMATS.iter() {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(ArticleDate::Naive(dt));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(ArticleDate::Naive)
    }

    /// Parse free form dates like `Dec 5, 2019 3:34 PM ET` with `dtparse`.
    pub fn parse_fuzzy(s: &str) -> Option<Self> {
        let mut tzinfod = HashMap::new();
        tzinfod.insert("ET".to_string(), -14400);
        let parser = dtparse::Parser::default();
        let (naive, offset, _) = parser
            .parse(
                s, None, None, true, /* turns on fuzzy mode */
                true, /* gives us the tokens that weren't recognized */
                None, false, &tzinfod,
            )
            .ok()?;
        match offset.and_then(|o| o.from_local_datetime(&naive).single()) {
            Some(dt) => Some(ArticleDate::Zoned(dt)),
            None => Some(ArticleDate::Naive(naive)),
        }
    }

    /// The ISO 8601 representation, fractional seconds only when present.
    pub fn to_iso(&self) -> String {
        match self {
            ArticleDate::Zoned(dt) if dt.nanosecond() == 0 => {
                dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
            }
            ArticleDate::Zoned(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.6f%:z").to_string(),
            ArticleDate::Naive(dt) if dt.nanosecond() == 0 => {
                dt.format("%Y-%m-%dT%H:%M:%S").to_string()
            }
            ArticleDate::Naive(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        }
    }
}

impl fmt::Display for ArticleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

pub struct DateExtractor;

impl DateExtractor {
    /// Extract the date from the first of the [`PUBLISH_DATE_RULES`] whose
    /// value parses.
    ///
    /// Values that fail to parse are skipped. With `lenient` set a value that
    /// is not ISO 8601 is retried with fuzzy parsing before moving on.
    pub fn extract_from_doc(doc: &Document, lenient: bool) -> Option<ArticleDate> {
        first_accepted(doc, &PUBLISH_DATE_RULES, |value| {
            let date = ArticleDate::parse_iso(&value).or_else(|| {
                if lenient {
                    ArticleDate::parse_fuzzy(&value)
                } else {
                    None
                }
            });
            if date.is_none() {
                debug!("Skipping unparseable date {:?}", value);
            }
            date
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tests::assert_priority;

    #[test]
    fn every_date_rule() {
        let date = |n: usize| {
            (
                format!("2021-01-{:02}T08:30:00Z", n + 1),
                format!("2021-01-{:02}T08:30:00+00:00", n + 1),
            )
        };
        assert_priority(&PUBLISH_DATE_RULES, date, |doc| {
            DateExtractor::extract_from_doc(doc, false).map(|d| d.to_iso())
        });
    }

    fn iso(s: &str) -> Option<String> {
        ArticleDate::parse_iso(s).map(|d| d.to_iso())
    }

    #[test]
    fn zulu_to_offset() {
        assert_eq!(
            iso("2023-05-01T12:00:00Z").as_deref(),
            Some("2023-05-01T12:00:00+00:00")
        );
    }

    #[test]
    fn iso_variants() {
        assert_eq!(
            iso("2019-12-05T15:34:34+01:00").as_deref(),
            Some("2019-12-05T15:34:34+01:00")
        );
        assert_eq!(
            iso("2019-12-05T15:34:34+0100").as_deref(),
            Some("2019-12-05T15:34:34+01:00")
        );
        assert_eq!(
            iso("2019-12-05 15:34:34").as_deref(),
            Some("2019-12-05T15:34:34")
        );
        assert_eq!(
            iso("2019-12-05T15:34:34.250Z").as_deref(),
            Some("2019-12-05T15:34:34.250000+00:00")
        );
        assert_eq!(iso(" 2019-12-05 ").as_deref(), Some("2019-12-05T00:00:00"));
    }

    #[test]
    fn not_iso() {
        assert_eq!(iso("yesterday"), None);
        assert_eq!(iso("Dec 5, 2019"), None);
        assert_eq!(iso(""), None);
    }

    #[test]
    fn fuzzy() {
        let date = ArticleDate::parse_fuzzy("Published December 5, 2019").unwrap();
        assert_eq!(date.to_iso(), "2019-12-05T00:00:00");
    }

    #[test]
    fn skips_unparseable_candidate() {
        let doc = Document::from(
            r#"<html><head><meta property="article:published_time" content="last week"></head>
            <body><time class="published-date" datetime="2021-03-04T05:06:07Z">March 4</time></body></html>"#,
        );
        assert_eq!(
            DateExtractor::extract_from_doc(&doc, false).map(|d| d.to_iso()).as_deref(),
            Some("2021-03-04T05:06:07+00:00")
        );
    }

    #[test]
    fn span_text_value() {
        let doc = Document::from(
            r#"<html><body><span class="post-date"> 2020-01-02 </span></body></html>"#,
        );
        assert_eq!(
            DateExtractor::extract_from_doc(&doc, false).map(|d| d.to_iso()).as_deref(),
            Some("2020-01-02T00:00:00")
        );
    }

    #[test]
    fn lenient_retry() {
        let doc = Document::from(
            r#"<html><body><span class="post-date">January 2, 2020</span></body></html>"#,
        );
        assert_eq!(DateExtractor::extract_from_doc(&doc, false), None);
        assert_eq!(
            DateExtractor::extract_from_doc(&doc, true).map(|d| d.to_iso()).as_deref(),
            Some("2020-01-02T00:00:00")
        );
    }
}
