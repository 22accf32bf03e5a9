use std::collections::BTreeMap;

use select::document::Document;
use select::node::Node;
use select::predicate::{Name, Predicate};

use crate::clean::{DefaultDocumentCleaner, DocumentCleaner};
use crate::stopwords::stopword_count;

pub const PUNCTUATION: &str = r###",."'!?&-/:;()#$%*+<=>@[\]^_`{|}~"###;

pub struct TextExtractor;

impl TextExtractor {
    pub const MINIMUM_STOPWORD_COUNT: usize = 5;

    pub const MAX_STEPSAWAY_FROM_NODE: usize = 3;

    /// Finds the node that most likely holds the article text.
    ///
    /// Every paragraph like node outside of page chrome and without a high
    /// link density is scored by its stopword count. The score is added to
    /// its parent and half of it to the grandparent, the highest scoring
    /// ancestor wins. Ties go to the node that comes first in the document.
    pub fn calculate_best_node(doc: &Document) -> Option<Node> {
        let mut starting_boost = 1.0;

        let txt_nodes: Vec<_> = TextExtractor::nodes_to_check(doc)
            .filter(|node| !DefaultDocumentCleaner::is_boilerplate(node))
            .filter(|node| !TextExtractor::is_high_link_density(node))
            .filter_map(|node| {
                let stats = stopword_count(&node.text());
                if stats.stopword_count > 2 {
                    Some((node, stats))
                } else {
                    None
                }
            })
            .collect();

        let mut nodes_scores: BTreeMap<usize, f64> = BTreeMap::new();

        let nodes_number = txt_nodes.len();
        let bottom_negativescore_nodes = nodes_number as f64 * 0.25;

        for (i, (node, stats)) in txt_nodes.iter().enumerate() {
            let mut boost_score = 0.0;

            if TextExtractor::is_boostable(node) {
                boost_score = (1.0 / starting_boost) * 50.0;
                starting_boost += 1.0;
            }

            // trailing nodes are often comments or teasers
            if nodes_number > 15 {
                let score = (nodes_number - i) as f64;
                if score <= bottom_negativescore_nodes {
                    let booster = bottom_negativescore_nodes - score;
                    boost_score = -booster.powf(2.0);
                    if boost_score.abs() > 40.0 {
                        boost_score = 5.0;
                    }
                }
            }

            let upscore = stats.stopword_count as f64 + boost_score;

            if let Some(parent) = node.parent() {
                *nodes_scores.entry(parent.index()).or_insert(0.0) += upscore;

                if let Some(parent_parent) = parent.parent() {
                    *nodes_scores.entry(parent_parent.index()).or_insert(0.0) += upscore / 2.0;
                }
            }
        }

        let mut best = None;
        let mut top_score = 0.0;
        for (idx, score) in nodes_scores {
            if score > top_score {
                top_score = score;
                best = Some(idx);
            }
        }

        best.and_then(|i| doc.nth(i))
    }

    /// Returns all nodes we want to search on like paragraphs and tables
    fn nodes_to_check(doc: &Document) -> impl Iterator<Item = Node> {
        doc.find(Name("p").or(Name("pre")).or(Name("td")))
    }

    /// A lot of times the first paragraph might be the caption under an image
    /// so we'll want to make sure if we're going to boost a parent node that it
    /// should be connected to other paragraphs, at least for the first n
    /// paragraphs so we'll want to make sure that a previous sibling is a
    /// paragraph and has at least some substantial weight to it.
    fn is_boostable(node: &Node) -> bool {
        let mut steps_away = 0;
        let mut current = node.prev();
        while let Some(sibling) = current {
            if sibling.is(Name("p")) {
                if steps_away >= TextExtractor::MAX_STEPSAWAY_FROM_NODE {
                    return false;
                }
                if stopword_count(&sibling.text()).stopword_count
                    > TextExtractor::MINIMUM_STOPWORD_COUNT
                {
                    return true;
                }
                steps_away += 1;
            }
            current = sibling.prev();
        }
        false
    }

    /// Checks the density of links within a node, if there is a high link to
    /// text ratio, then the text is less likely to be relevant
    fn is_high_link_density(node: &Node) -> bool {
        let words_number = words(&node.text()).count();
        let (num_links, num_link_words) = node
            .find(Name("a"))
            .fold((0usize, 0usize), |(links, sum), n| {
                (links + 1, sum + words(&n.text()).count())
            });

        if words_number == 0 {
            return num_links != 0;
        }
        if num_links == 0 {
            return false;
        }

        let link_divisor = num_link_words as f64 / words_number as f64;
        let score = link_divisor * num_links as f64;

        score >= 1.0
    }
}

/// Returns an iterator over all words of the text.
pub fn words(txt: &str) -> impl Iterator<Item = &str> {
    txt.split(|c: char| c.is_whitespace() || is_punctuation(c))
        .filter(|s| !s.is_empty())
}

/// Whether the char is a punctuation.
pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(c)
}
