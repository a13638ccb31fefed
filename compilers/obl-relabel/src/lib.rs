pub mod config;
pub mod error;
pub mod graph;
pub mod resolver;
pub mod walker;

pub use config::{CaselessPolicy, DescentPolicy, RelabelConfig, RelationMatch};
pub use error::{AlignmentError, TreeError};
pub use graph::DependencyTree;
pub use resolver::{classify, decide, reduce_tag, Resolution, TagLookup, ADVMOD_TAGS, CASELESS};
pub use walker::{ObliqueEntry, ObliqueRelabeler};

#[cfg(test)]
mod tests {
    use super::*;
    use obl_protocol::{AnnotationRecord, Relabel, Sentence, Token, TokenId};
    use proptest::prelude::*;

    fn tree(rows: &[(u32, &str, u32, &str)]) -> DependencyTree {
        let rows = rows
            .iter()
            .map(|&(id, form, head, deprel)| Token::word(id, form, head, deprel))
            .collect();
        DependencyTree::from_sentence(Sentence::new(rows)).unwrap()
    }

    fn annotation(tags: &[&str]) -> AnnotationRecord {
        AnnotationRecord {
            tokens: tags.iter().map(|_| "w".to_string()).collect(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn deprel_of(tree: &DependencyTree, id: u32) -> &str {
        tree.deprel(TokenId(id)).unwrap().as_str()
    }

    // "I like eating at lunch"
    fn lunch() -> DependencyTree {
        tree(&[
            (1, "I", 2, "nsubj"),
            (2, "like", 0, "root"),
            (3, "eating", 2, "xcomp"),
            (4, "at", 5, "case"),
            (5, "lunch", 3, "obl"),
        ])
    }

    #[test]
    fn test_lunch_becomes_advmod() {
        let input = lunch();
        let relabeler = ObliqueRelabeler::default();

        let output = relabeler
            .relabel(&input, &annotation(&["", "", "", "p.Time", ""]))
            .unwrap();

        assert_eq!(deprel_of(&output, 5), "advmod");
        assert_eq!(deprel_of(&output, 4), "case");
        assert_eq!(deprel_of(&output, 2), "root");
        assert_eq!(deprel_of(&output, 1), "nsubj");
        // Input is left as it was
        assert_eq!(deprel_of(&input, 5), "obl");
    }

    #[test]
    fn test_stacked_tag_uses_first_segment() {
        let output = ObliqueRelabeler::default()
            .relabel(&lunch(), &annotation(&["", "", "", "p.Time|p.Manner", ""]))
            .unwrap();
        assert_eq!(deprel_of(&output, 5), "advmod");
    }

    #[test]
    fn test_unknown_tag_becomes_iobj() {
        let output = ObliqueRelabeler::default()
            .relabel(&lunch(), &annotation(&["", "", "", "p.Agent", ""]))
            .unwrap();
        assert_eq!(deprel_of(&output, 5), "iobj");
    }

    #[test]
    fn test_caseless_policies() {
        // "I left yesterday"
        let input = tree(&[(1, "I", 2, "nsubj"), (2, "left", 0, "root"), (3, "yesterday", 2, "obl:tmod")]);
        let tags = annotation(&["", "", ""]);

        let output = ObliqueRelabeler::default().relabel(&input, &tags).unwrap();
        assert_eq!(deprel_of(&output, 3), "orphan");

        let relabeler = ObliqueRelabeler::new(RelabelConfig {
            caseless: CaselessPolicy::Iobj,
            ..RelabelConfig::default()
        });
        let output = relabeler.relabel(&input, &tags).unwrap();
        assert_eq!(deprel_of(&output, 3), "iobj");
    }

    #[test]
    fn test_exact_matching_ignores_subtypes() {
        let input = tree(&[
            (1, "left", 0, "root"),
            (2, "yesterday", 1, "obl:tmod"),
            (3, "in", 4, "case"),
            (4, "Paris", 1, "obl"),
        ]);
        let relabeler = ObliqueRelabeler::new(RelabelConfig {
            matching: RelationMatch::Exact,
            ..RelabelConfig::default()
        });

        let output = relabeler
            .relabel(&input, &annotation(&["", "", "p.Locus", ""]))
            .unwrap();
        assert_eq!(deprel_of(&output, 2), "obl:tmod");
        assert_eq!(deprel_of(&output, 4), "advmod");
    }

    #[test]
    fn test_subtyped_case_marker_counts() {
        let input = tree(&[
            (1, "went", 0, "root"),
            (2, "out", 4, "case:prt"),
            (3, "of", 4, "case"),
            (4, "town", 1, "obl"),
        ]);
        // The first case dependent in sentence order wins
        let output = ObliqueRelabeler::default()
            .relabel(&input, &annotation(&["", "p.Source", "p.Agent", ""]))
            .unwrap();
        assert_eq!(deprel_of(&output, 4), "advmod");
    }

    // "sat on the mat in the morning": the second oblique hangs below a caseless one
    fn nested() -> DependencyTree {
        tree(&[
            (1, "sat", 0, "root"),
            (2, "there", 1, "obl"),
            (3, "in", 5, "case"),
            (4, "the", 5, "det"),
            (5, "morning", 2, "obl"),
        ])
    }

    #[test]
    fn test_descent_always_reaches_nested_obliques() {
        let output = ObliqueRelabeler::default()
            .relabel(&nested(), &annotation(&["", "", "p.Time", "", ""]))
            .unwrap();
        assert_eq!(deprel_of(&output, 2), "orphan");
        assert_eq!(deprel_of(&output, 5), "advmod");
    }

    #[test]
    fn test_skip_caseless_stops_descent() {
        let relabeler = ObliqueRelabeler::new(RelabelConfig {
            descent: DescentPolicy::SkipCaseless,
            ..RelabelConfig::default()
        });
        let output = relabeler
            .relabel(&nested(), &annotation(&["", "", "p.Time", "", ""]))
            .unwrap();
        assert_eq!(deprel_of(&output, 2), "orphan");
        assert_eq!(deprel_of(&output, 5), "obl");
    }

    #[test]
    fn test_case_marker_tagged_caseless_keeps_descending() {
        // "sat by there in the morning": 2 has a case dependent whose tag is "caseless"
        let input = tree(&[
            (1, "sat", 0, "root"),
            (2, "by", 3, "case"),
            (3, "there", 1, "obl"),
            (4, "in", 6, "case"),
            (5, "the", 6, "det"),
            (6, "morning", 3, "obl"),
        ]);
        let tags = annotation(&["", CASELESS, "", "p.Time", "", ""]);
        let relabeler = ObliqueRelabeler::new(RelabelConfig {
            caseless: CaselessPolicy::Iobj,
            descent: DescentPolicy::SkipCaseless,
            ..RelabelConfig::default()
        });

        let output = relabeler.relabel(&input, &tags).unwrap();
        assert_eq!(deprel_of(&output, 3), "iobj");
        assert_eq!(deprel_of(&output, 6), "advmod");

        let entries = relabeler.survey(&input, &tags).unwrap();
        assert_eq!(entries[0].phrase, "by there");
        assert_eq!(entries[0].reduced, CASELESS);
        assert_eq!(entries[0].decision, Relabel::Iobj);
    }

    #[test]
    fn test_misaligned_annotation_is_rejected() {
        let input = lunch();
        let short = AnnotationRecord {
            tokens: vec!["w".to_string(); 5],
            tags: vec!["p.Time".to_string(); 4],
        };

        assert_eq!(input.word_count(), 5);
        let err = ObliqueRelabeler::default().relabel(&input, &short).unwrap_err();
        assert_eq!(
            err,
            AlignmentError {
                tree_tokens: 5,
                annotation_tokens: 5,
                tags: 4
            }
        );
        assert!(ObliqueRelabeler::default().survey(&input, &annotation(&["", ""])).is_err());
    }

    #[test]
    fn test_survey_lists_obliques() {
        let entries = ObliqueRelabeler::default()
            .survey(&nested(), &annotation(&["", "", "p.Time|p.Time", "", ""]))
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].phrase, "there");
        assert_eq!(entries[0].raw_tag, CASELESS);
        assert_eq!(entries[0].decision, Relabel::Orphan);
        assert_eq!(entries[1].phrase, "in morning");
        assert_eq!(entries[1].raw_tag, "p.Time|p.Time");
        assert_eq!(entries[1].reduced, "Time");
        assert_eq!(entries[1].decision, Relabel::Advmod);
    }

    #[test]
    fn test_tree_errors() {
        let rows = vec![Token::word(1, "a", 0, "root"), Token::word(2, "b", 7, "dep")];
        assert_eq!(
            DependencyTree::from_sentence(Sentence::new(rows)).unwrap_err(),
            TreeError::DanglingHead { token: TokenId(2), head: TokenId(7) }
        );

        let rows = vec![Token::word(1, "a", 2, "dep"), Token::word(2, "b", 1, "dep")];
        assert_eq!(
            DependencyTree::from_sentence(Sentence::new(rows)).unwrap_err(),
            TreeError::NoRoot
        );

        let rows = vec![Token::word(1, "a", 0, "root"), Token::word(2, "b", 0, "root")];
        assert!(matches!(
            DependencyTree::from_sentence(Sentence::new(rows)),
            Err(TreeError::MultipleRoots(_))
        ));

        let rows = vec![Token::word(1, "a", 0, "root"), Token::word(1, "b", 1, "dep")];
        assert_eq!(
            DependencyTree::from_sentence(Sentence::new(rows)).unwrap_err(),
            TreeError::DuplicateId(TokenId(1))
        );
    }

    #[test]
    fn test_cycle_below_root_terminates() {
        // 2 and 3 head each other; only 1 is reachable from the root
        let input = tree(&[(1, "a", 0, "root"), (2, "b", 3, "obl"), (3, "c", 2, "obl")]);
        let output = ObliqueRelabeler::default()
            .relabel(&input, &annotation(&["", "", ""]))
            .unwrap();
        assert_eq!(deprel_of(&output, 2), "obl");
        assert_eq!(output.children(TokenId(2)), vec![TokenId(3)]);
    }

    #[test]
    fn test_parsed_sentence_round_trip() {
        let text = "# text = We met on Monday\n\
1\tWe\twe\tPRON\tPRP\t_\t2\tnsubj\t_\t_\n\
2\tmet\tmeet\tVERB\tVBD\t_\t0\troot\t_\t_\n\
3\ton\ton\tADP\tIN\t_\t4\tcase\t_\t_\n\
4\tMonday\tMonday\tPROPN\tNNP\t_\t2\tobl:tmod\t_\tSpaceAfter=No\n";
        let sentence = obl_conllu::parse_sentence(text).unwrap();
        let input = DependencyTree::from_sentence(sentence).unwrap();

        let output = ObliqueRelabeler::default()
            .relabel(&input, &annotation(&["", "", "p.Time", ""]))
            .unwrap();

        assert_eq!(
            output.sentence().to_string(),
            text.replace("obl:tmod", "advmod")
        );
    }

    const DEPRELS: [&str; 7] = ["obl", "obl:tmod", "case", "nsubj", "obj", "advmod", "nmod"];
    const TAGS: [&str; 5] = ["", "p.Time", "p.Agent|p.Agent", "p.Locus.Goal", "Theme"];

    fn random_case() -> impl Strategy<Value = (DependencyTree, AnnotationRecord)> {
        prop::collection::vec(
            (any::<prop::sample::Index>(), 0..DEPRELS.len(), 0..TAGS.len()),
            1..16,
        )
        .prop_map(|words| {
            let mut rows = Vec::new();
            let mut tags = Vec::new();
            for (i, (head, deprel, tag)) in words.into_iter().enumerate() {
                let id = i as u32 + 1;
                // Heads always precede their dependents, so the result is a tree
                let (head, deprel) = if i == 0 {
                    (0, "root")
                } else {
                    (head.index(i) as u32 + 1, DEPRELS[deprel])
                };
                rows.push(Token::word(id, "w", head, deprel));
                tags.push(TAGS[tag]);
            }
            (
                DependencyTree::from_sentence(Sentence::new(rows)).unwrap(),
                annotation(&tags),
            )
        })
    }

    proptest! {
        #[test]
        fn test_relabel_invariants((input, tags) in random_case()) {
            let snapshot = input.sentence().clone();
            let relabeler = ObliqueRelabeler::default();

            let first = relabeler.relabel(&input, &tags).unwrap();
            let second = relabeler.relabel(&input, &tags).unwrap();

            prop_assert_eq!(input.sentence(), &snapshot);
            prop_assert_eq!(first.sentence(), second.sentence());

            for (before, after) in snapshot.rows.iter().zip(&first.sentence().rows) {
                prop_assert_eq!(&before.form, &after.form);
                prop_assert_eq!(before.head, after.head);
                if before.deprel.family() == "obl" {
                    let label = after.deprel.as_str();
                    prop_assert!(label == "advmod" || label == "iobj" || label == "orphan");
                } else {
                    prop_assert_eq!(&before.deprel, &after.deprel);
                }
            }
        }
    }
}
