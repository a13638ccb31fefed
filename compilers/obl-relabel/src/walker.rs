use obl_protocol::{AnnotationRecord, Deprel, Relabel, TokenId};
use std::collections::HashMap;

use crate::config::{DescentPolicy, RelabelConfig};
use crate::error::AlignmentError;
use crate::graph::DependencyTree;
use crate::resolver::{classify, Resolution, TagLookup};

/// One oblique found by [`ObliqueRelabeler::survey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObliqueEntry {
    pub node: TokenId,
    /// `"<case form> <oblique form>"`, or the oblique form alone when caseless.
    pub phrase: String,
    pub raw_tag: String,
    pub reduced: String,
    pub decision: Relabel,
}

/// Rewrites `obl` dependents according to the supersense of their case marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObliqueRelabeler {
    config: RelabelConfig,
}

impl ObliqueRelabeler {
    pub fn new(config: RelabelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RelabelConfig {
        &self.config
    }

    /// Returns a copy of `tree` in which every oblique carries its new label.
    /// Fails before touching anything if `annotation` is not aligned with
    /// the tree's words.
    pub fn relabel(
        &self,
        tree: &DependencyTree,
        annotation: &AnnotationRecord,
    ) -> Result<DependencyTree, AlignmentError> {
        let tags = self.aligned_tags(tree, annotation)?;

        let mut overlay = HashMap::new();
        self.walk(tree, &tags, |node, resolution| {
            tracing::debug!(
                node = node.0,
                tag = resolution.raw_tag,
                relabel = resolution.decision.as_str(),
                "Relabeling oblique"
            );
            overlay.insert(node, Deprel::from(resolution.decision));
        });

        Ok(tree.with_deprels(&overlay))
    }

    /// Lists the obliques of `tree` with their tags and decisions, without
    /// rewriting anything.
    pub fn survey(
        &self,
        tree: &DependencyTree,
        annotation: &AnnotationRecord,
    ) -> Result<Vec<ObliqueEntry>, AlignmentError> {
        let tags = self.aligned_tags(tree, annotation)?;

        let mut entries = Vec::new();
        self.walk(tree, &tags, |node, resolution| {
            let form = tree.token(node).map_or("", |t| t.form.as_str());
            let phrase = match resolution.case_child.and_then(|c| tree.token(c)) {
                Some(case) => format!("{} {}", case.form, form),
                None => form.to_string(),
            };
            entries.push(ObliqueEntry {
                node,
                phrase,
                raw_tag: resolution.raw_tag.to_string(),
                reduced: resolution.reduced.to_string(),
                decision: resolution.decision,
            });
        });

        entries.sort_by_key(|e| e.node);
        Ok(entries)
    }

    fn aligned_tags<'a>(
        &self,
        tree: &DependencyTree,
        annotation: &'a AnnotationRecord,
    ) -> Result<TagLookup<'a>, AlignmentError> {
        let words = tree.word_count();
        if annotation.tokens.len() != words || annotation.tags.len() != words {
            return Err(AlignmentError {
                tree_tokens: words,
                annotation_tokens: annotation.tokens.len(),
                tags: annotation.tags.len(),
            });
        }
        Ok(TagLookup::new(tree.keys(), &annotation.tags))
    }

    /// Depth-first walk from the real root over `down` edges with an explicit
    /// stack. Sibling order is unspecified. Each node is visited at most once,
    /// so a malformed HEAD cycle cannot hang the walk.
    fn walk<'a, F>(&self, tree: &DependencyTree, tags: &TagLookup<'a>, mut on_oblique: F)
    where
        F: FnMut(TokenId, &Resolution<'a>),
    {
        let mut visited = vec![false; tree.node_count()];
        let mut stack = vec![tree.root()];

        while let Some(current) = stack.pop() {
            let Some(idx) = tree.node_index(current) else { continue };
            if visited[idx.index()] {
                continue;
            }
            visited[idx.index()] = true;

            let is_oblique = tree
                .deprel(current)
                .map_or(false, |d| self.config.matching.matches(d, Deprel::OBLIQUE));

            if is_oblique {
                let resolution = classify(current, tree, tags, &self.config);
                on_oblique(current, &resolution);

                if resolution.is_caseless() && self.config.descent == DescentPolicy::SkipCaseless {
                    continue;
                }
            }

            stack.extend(tree.children(current));
        }
    }
}
