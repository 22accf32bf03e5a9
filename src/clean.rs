use regex::Regex;

use select::node::Node;
use select::predicate::Name;

use lazy_static::lazy_static;

lazy_static! {

    pub static ref RE_BAD_NODES : Regex = Regex::new(r###"(?mi)^side$|combx|retweet|mediaarticlerelated|menucontainer|navbar|storytopbar-bucket|utility-bar|inline-share-tools|comment|PopularQuestions|contact|foot(er|note)?|cnn_strycaptiontxt|cnn_html_slideshow|cnn_strylftcntnt|links|meta$|shoutbox|sponsor|tags|socialnetworking|socialNetworking|cnnStryHghLght|cnn_stryspcvbx|^inset$|pagetools|post-attributes|welcome_form|contentTools2|the_answers|communitypromo|runaroundLeft|subscribe|vcard|articleheadings|date|^print$|popup|author-dropdown|tools|socialtools|byline|konafilter|breadcrumbs|^fn$|wp-caption-text|legende|ajoutVideo|timestamp|js_replies|[^-]facebook(-broadcasting)?|google|[^-]twitter"###).unwrap();

}

const ATTR_TO_CHECK: [&str; 3] = ["id", "class", "name"];

/// Elements whose text is never part of an article.
pub const PRUNED_TAGS: [&str; 2] = ["script", "style"];

/// Elements that hold navigation and page chrome rather than content.
pub const BOILERPLATE_TAGS: [&str; 5] = ["nav", "header", "footer", "aside", "form"];

/// How many ancestors above a node are checked for page chrome.
pub const MAX_BOILERPLATE_DEPTH: usize = 3;

pub trait DocumentCleaner {
    /// Ignore nodes that usually do not contain content for the article.
    ///
    /// Every class name is checked on its own, so the anchored patterns
    /// match single names out of a list.
    fn has_bad_attr(node: &Node) -> bool {
        ATTR_TO_CHECK
            .iter()
            .filter_map(|attr| node.attr(attr))
            .flat_map(str::split_whitespace)
            .any(|token| RE_BAD_NODES.is_match(token))
    }

    /// Whether the node, or one of its closest ancestors, is page chrome.
    ///
    /// The walk stops at `body`, page wide classes say nothing about a single
    /// paragraph.
    fn is_boilerplate(node: &Node) -> bool {
        let mut current = Some(*node);
        for _ in 0..=MAX_BOILERPLATE_DEPTH {
            let n = match current {
                Some(n) if !n.is(Name("body")) && !n.is(Name("html")) => n,
                _ => return false,
            };
            if n.name().map_or(false, |name| BOILERPLATE_TAGS.contains(&name))
                || Self::has_bad_attr(&n)
            {
                return true;
            }
            current = n.parent();
        }
        false
    }

    /// Whether the node and everything below it is cut from extracted text.
    fn is_pruned(node: &Node) -> bool {
        node.name().map_or(false, |name| PRUNED_TAGS.contains(&name))
    }

    /// Collect all text below the node with `script` and `style` subtrees
    /// pruned. Every text node is trimmed, empty ones are dropped and the rest
    /// joined by a single space.
    fn clean_node_text(node: &Node) -> String {
        fn recur_text<T: DocumentCleaner + ?Sized>(node: &Node, parts: &mut Vec<String>) {
            if T::is_pruned(node) {
                return;
            }
            if let Some(text) = node.as_text() {
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(text.to_string());
                }
            }
            for child in node.children() {
                recur_text::<T>(&child, parts)
            }
        }

        let mut parts = Vec::new();
        recur_text::<Self>(node, &mut parts);
        parts.join(" ")
    }
}

/// A standard implementation of a cleaner that prunes `script` and `style`
/// and flags the common boilerplate class names.
pub struct DefaultDocumentCleaner;

impl DocumentCleaner for DefaultDocumentCleaner {}
