use obl_protocol::{Deprel, Relabel, TokenId};
use std::collections::HashMap;

use crate::config::{RelabelConfig, RelationMatch};
use crate::graph::DependencyTree;

/// SNACS supersenses whose obliques behave like adverbial modifiers.
pub const ADVMOD_TAGS: [&str; 11] = [
    "Locus",
    "Time",
    "EndTime",
    "Goal",
    "Source",
    "Purpose",
    "Duration",
    "Circumstance",
    "ComparisonRef",
    "Manner",
    "Extent",
];

/// Reduced tag of an oblique with no `case` dependent.
pub const CASELESS: &str = "caseless";

/// `p.Time|p.Manner` -> `Time`: last dot segment of the first pipe segment.
pub fn reduce_tag(tag: &str) -> &str {
    let first = tag.split('|').next().unwrap_or(tag);
    first.rsplit('.').next().unwrap_or(first)
}

pub fn is_advmod_tag(reduced: &str) -> bool {
    ADVMOD_TAGS.contains(&reduced)
}

/// Maps a reduced tag to the relation its oblique takes.
pub fn decide(reduced: &str, config: &RelabelConfig) -> Relabel {
    if reduced == CASELESS {
        config.caseless.relabel()
    } else if is_advmod_tag(reduced) {
        Relabel::Advmod
    } else {
        Relabel::Iobj
    }
}

/// Word id -> supersense tag, zipped from an aligned annotation record.
#[derive(Debug, Clone)]
pub struct TagLookup<'a> {
    tags: HashMap<TokenId, &'a str>,
}

impl<'a> TagLookup<'a> {
    pub fn new(keys: &[TokenId], tags: &'a [String]) -> Self {
        Self {
            tags: keys
                .iter()
                .copied()
                .zip(tags.iter().map(String::as_str))
                .collect(),
        }
    }

    pub fn get(&self, id: TokenId) -> Option<&'a str> {
        self.tags.get(&id).copied()
    }
}

/// Outcome of classifying one oblique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub case_child: Option<TokenId>,
    /// The case dependent's full tag, or `caseless`.
    pub raw_tag: &'a str,
    pub reduced: &'a str,
    pub decision: Relabel,
}

impl Resolution<'_> {
    pub fn is_caseless(&self) -> bool {
        self.case_child.is_none()
    }
}

/// First direct dependent of `node` whose relation is `case`.
pub fn find_case_child(
    tree: &DependencyTree,
    node: TokenId,
    matching: RelationMatch,
) -> Option<TokenId> {
    tree.children(node).into_iter().find(|&child| {
        tree.deprel(child)
            .map_or(false, |d| matching.matches(d, Deprel::CASE))
    })
}

pub fn classify<'a>(
    node: TokenId,
    tree: &DependencyTree,
    tags: &TagLookup<'a>,
    config: &RelabelConfig,
) -> Resolution<'a> {
    let case_child = find_case_child(tree, node, config.matching);
    let raw_tag = match case_child {
        Some(child) => tags.get(child).unwrap_or(""),
        None => CASELESS,
    };
    let reduced = reduce_tag(raw_tag);

    Resolution {
        case_child,
        raw_tag,
        reduced,
        decision: decide(reduced, config),
    }
}
