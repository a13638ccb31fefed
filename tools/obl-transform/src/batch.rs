use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use obl_conllu::{read_annotations, write_sentence, ConlluReader};
use obl_protocol::{AnnotationRecord, Relabel, Sentence, SentenceId};
use obl_relabel::{DependencyTree, ObliqueRelabeler};
use tracing::{info, warn};

/// Where the files of each corpus partition live.
#[derive(Debug, Clone)]
pub struct CorpusLayout {
    pub conllu_dir: PathBuf,
    pub annotations_dir: PathBuf,
    pub output_dir: PathBuf,
    /// File stem shared by the treebank files, e.g. `en_ewt-ud`.
    pub prefix: String,
}

impl CorpusLayout {
    pub fn treebank(&self, partition: &str) -> PathBuf {
        self.conllu_dir
            .join(format!("{}-{}.conllu", self.prefix, partition))
    }

    pub fn annotations(&self, partition: &str) -> PathBuf {
        self.annotations_dir.join(partition)
    }

    pub fn output(&self, partition: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}-{}.conllu", self.prefix, partition))
    }
}

#[derive(Debug, Default)]
pub struct TransformReport {
    pub sentences: usize,
    pub relabeled: BTreeMap<Relabel, usize>,
    /// Sentences written unchanged because their annotation did not align.
    pub skipped: Vec<SentenceId>,
}

#[derive(Debug, Default)]
pub struct SurveyReport {
    pub sentences: usize,
    /// (reduced tag, decision) -> number of obliques
    pub counts: BTreeMap<(String, Relabel), usize>,
}

/// Reads a partition's treebank and annotations and pairs them by order.
pub fn load_partition(
    layout: &CorpusLayout,
    partition: &str,
) -> anyhow::Result<Vec<(Sentence, AnnotationRecord)>> {
    let treebank = layout.treebank(partition);
    let file = File::open(&treebank)
        .with_context(|| format!("Failed to open treebank {:?}", treebank))?;
    let sentences = ConlluReader::new(BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse {:?}", treebank))?;

    let annotations_path = layout.annotations(partition);
    let file = File::open(&annotations_path)
        .with_context(|| format!("Failed to open annotations {:?}", annotations_path))?;
    let annotations = read_annotations(BufReader::new(file))
        .with_context(|| format!("Failed to read {:?}", annotations_path))?;

    if sentences.len() != annotations.len() {
        bail!(
            "{:?} has {} sentences but {:?} has {} annotation records",
            treebank,
            sentences.len(),
            annotations_path,
            annotations.len()
        );
    }

    Ok(sentences.into_iter().zip(annotations).collect())
}

fn build_tree(sentence: Sentence, id: SentenceId) -> anyhow::Result<DependencyTree> {
    let sent_id = sentence.comment_value("sent_id").map(str::to_string);
    DependencyTree::from_sentence(sentence).with_context(|| match sent_id {
        Some(sent_id) => format!("Sentence {} ({}) is not a tree", id, sent_id),
        None => format!("Sentence {} is not a tree", id),
    })
}

/// Relabels every sentence of `partition` and writes the output treebank.
///
/// A misaligned annotation aborts the partition unless `skip_misaligned`
/// is set, in which case the sentence is written unchanged.
pub fn transform_partition(
    layout: &CorpusLayout,
    partition: &str,
    relabeler: &ObliqueRelabeler,
    skip_misaligned: bool,
) -> anyhow::Result<TransformReport> {
    let pairs = load_partition(layout, partition)?;

    fs::create_dir_all(&layout.output_dir)
        .with_context(|| format!("Failed to create {:?}", layout.output_dir))?;
    let output = layout.output(partition);
    let mut out = BufWriter::new(
        File::create(&output).with_context(|| format!("Failed to create {:?}", output))?,
    );

    let mut report = TransformReport::default();
    for (idx, (sentence, annotation)) in pairs.into_iter().enumerate() {
        let id = SentenceId(idx as u32);
        let tree = build_tree(sentence, id)?;

        let relabeled = match relabeler.relabel(&tree, &annotation) {
            Ok(relabeled) => {
                count_changes(&mut report, &tree, &relabeled);
                relabeled
            }
            Err(err) if skip_misaligned => {
                warn!(
                    sentence = id.0,
                    tree_tokens = err.tree_tokens,
                    annotation_tokens = err.annotation_tokens,
                    tags = err.tags,
                    "Skipping misaligned sentence"
                );
                report.skipped.push(id);
                tree
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Sentence {} of {:?}", id, layout.treebank(partition)));
            }
        };

        report.sentences += 1;
        write_sentence(&mut out, relabeled.sentence())?;
    }
    out.flush()?;

    info!(
        partition,
        sentences = report.sentences,
        skipped = report.skipped.len(),
        "Wrote {:?}",
        output
    );
    Ok(report)
}

fn count_changes(report: &mut TransformReport, before: &DependencyTree, after: &DependencyTree) {
    let rows = before.sentence().rows.iter().zip(&after.sentence().rows);
    for (old, new) in rows {
        if old.deprel == new.deprel {
            continue;
        }
        if let Some(relabel) = Relabel::ALL.into_iter().find(|r| r.as_str() == new.deprel.as_str()) {
            *report.relabeled.entry(relabel).or_default() += 1;
        }
    }
}

/// Tallies reduced tags and decisions over `partition` without writing.
pub fn survey_partition(
    layout: &CorpusLayout,
    partition: &str,
    relabeler: &ObliqueRelabeler,
) -> anyhow::Result<SurveyReport> {
    let mut report = SurveyReport::default();
    for (idx, (sentence, annotation)) in load_partition(layout, partition)?.into_iter().enumerate() {
        let id = SentenceId(idx as u32);
        let tree = build_tree(sentence, id)?;
        let entries = relabeler
            .survey(&tree, &annotation)
            .with_context(|| format!("Sentence {} of {:?}", id, layout.treebank(partition)))?;
        for entry in entries {
            *report.counts.entry((entry.reduced, entry.decision)).or_default() += 1;
        }
        report.sentences += 1;
    }
    Ok(report)
}
