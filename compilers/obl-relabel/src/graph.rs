use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use obl_protocol::{Deprel, Sentence, Token, TokenId};
use std::collections::HashMap;

use crate::error::TreeError;

/// A sentence together with its head→dependent adjacency.
///
/// Every syntactic word is a node, plus one node for the synthetic root `0`.
/// Outgoing edges point from a head to its dependents (the `down`
/// direction); an edge's label is the dependent's DEPREL, stored on the
/// token rather than duplicated on the edge.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    sentence: Sentence,
    graph: Graph<TokenId, (), Directed>,
    index_map: HashMap<TokenId, NodeIndex>,
    /// Word id -> position in `sentence.rows`
    row_map: HashMap<TokenId, usize>,
    /// Word ids in file order; the order annotation tags are aligned to.
    keys: Vec<TokenId>,
    root: TokenId,
}

impl DependencyTree {
    pub fn from_sentence(sentence: Sentence) -> Result<Self, TreeError> {
        let mut graph = Graph::new();
        let mut index_map = HashMap::new();
        let mut row_map = HashMap::new();
        let mut keys = Vec::new();

        index_map.insert(TokenId::ROOT, graph.add_node(TokenId::ROOT));

        for (pos, token) in sentence.rows.iter().enumerate() {
            if let Some(id) = token.id.word() {
                if id.is_root() || index_map.contains_key(&id) {
                    return Err(TreeError::DuplicateId(id));
                }
                index_map.insert(id, graph.add_node(id));
                row_map.insert(id, pos);
                keys.push(id);
            }
        }

        let mut roots = Vec::new();
        for &id in &keys {
            let token = &sentence.rows[row_map[&id]];
            let head = token.head.ok_or(TreeError::MissingHead(id))?;
            let head_idx = *index_map
                .get(&head)
                .ok_or(TreeError::DanglingHead { token: id, head })?;
            graph.add_edge(head_idx, index_map[&id], ());
            if head.is_root() {
                roots.push(id);
            }
        }

        let root = match roots.as_slice() {
            [] => return Err(TreeError::NoRoot),
            [root] => *root,
            _ => return Err(TreeError::MultipleRoots(roots)),
        };

        Ok(Self {
            sentence,
            graph,
            index_map,
            row_map,
            keys,
            root,
        })
    }

    /// The real syntactic root, i.e. the word attached to `0`.
    pub fn root(&self) -> TokenId {
        self.root
    }

    pub fn keys(&self) -> &[TokenId] {
        &self.keys
    }

    /// Number of syntactic words.
    pub fn word_count(&self) -> usize {
        self.keys.len()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.row_map.get(&id).map(|&pos| &self.sentence.rows[pos])
    }

    pub fn deprel(&self, id: TokenId) -> Option<&Deprel> {
        self.token(id).map(|t| &t.deprel)
    }

    pub(crate) fn node_index(&self, id: TokenId) -> Option<NodeIndex> {
        self.index_map.get(&id).copied()
    }

    /// Direct dependents of `id`, in sentence order.
    pub fn children(&self, id: TokenId) -> Vec<TokenId> {
        let mut children: Vec<TokenId> = match self.index_map.get(&id) {
            Some(&idx) => self.graph.neighbors(idx).map(|n| self.graph[n]).collect(),
            None => Vec::new(),
        };
        children.sort_unstable();
        children
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn into_sentence(self) -> Sentence {
        self.sentence
    }

    /// A copy of this tree with the given DEPRELs replaced. The structure is
    /// unchanged since only labels move; `self` is left as it was.
    pub fn with_deprels(&self, overlay: &HashMap<TokenId, Deprel>) -> DependencyTree {
        let mut tree = self.clone();
        for (id, deprel) in overlay {
            if let Some(&pos) = tree.row_map.get(id) {
                tree.sentence.rows[pos].deprel = deprel.clone();
            }
        }
        tree
    }
}
