use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::debug;

use crate::codes::{AnnoStatus, InstantiationType};
use crate::error::IntegrityError;
use crate::fetch::Fetcher;
use crate::model::{
    AnnoSetDocument, AnnoSetRow, LabelDocument, LabelRow, LayerDocument, LexUnitDocument,
    SentenceDocument, SubcorpusDocument,
};

struct PendingSentence {
    subcorpus: String,
    document: SentenceDocument,
}

/// Builds the export document for one lexical unit.
///
/// Sentences are discovered through the unit's manual annotation sets; their
/// unannotated sets are fetched in a second pass, once per sentence.
pub fn assemble_lex_unit(fetcher: &Fetcher<'_>, lu_id: i64) -> Result<LexUnitDocument> {
    let manual_sets = fetcher.manual_anno_sets(lu_id)?;
    let subcorpus_names: HashMap<i64, String> = fetcher
        .subcorpora(lu_id)?
        .into_iter()
        .map(|subcorpus| (subcorpus.id, subcorpus.name))
        .collect();

    let mut sentences: Vec<PendingSentence> = Vec::new();
    let mut sentence_index: HashMap<i64, usize> = HashMap::new();
    // Each annotation set paired with the index of its sentence.
    let mut work: Vec<(usize, AnnoSetRow)> = Vec::with_capacity(manual_sets.len());

    for anno_set in manual_sets {
        let idx = match sentence_index.get(&anno_set.sentence_id) {
            Some(&idx) => idx,
            None => {
                let subcorpus = resolve_subcorpus(&subcorpus_names, &anno_set, lu_id)?;
                let text = fetcher.sentence_text(anno_set.sentence_id)?;

                sentence_index.insert(anno_set.sentence_id, sentences.len());
                sentences.push(PendingSentence {
                    subcorpus,
                    document: SentenceDocument {
                        id: anno_set.sentence_id,
                        text,
                        anno_sets: Vec::new(),
                    },
                });
                sentences.len() - 1
            }
        };
        work.push((idx, anno_set));
    }

    let manual_count = work.len();
    for (idx, pending) in sentences.iter().enumerate() {
        for anno_set in fetcher.unannotated_anno_sets(pending.document.id)? {
            work.push((idx, anno_set));
        }
    }

    let lex_unit = fetcher.lex_unit(lu_id)?;
    debug!(
        lu_id,
        lemma_id = ?lex_unit.lemma_id,
        manual_sets = manual_count,
        unannotated_sets = work.len() - manual_count,
        sentences = sentences.len(),
        "collected annotation sets"
    );

    for (idx, anno_set) in &work {
        let document = build_anno_set(fetcher, anno_set).with_context(|| {
            format!(
                "failed to assemble {} annotation set {} of sentence {}",
                anno_set.status.as_str(),
                anno_set.id,
                anno_set.sentence_id
            )
        })?;
        sentences[*idx].document.anno_sets.push(document);
    }

    Ok(LexUnitDocument {
        definition: lex_unit.definition.unwrap_or_default(),
        frame_id: lex_unit.frame_id,
        name: lex_unit.name,
        subcorpora: group_by_subcorpus(sentences),
    })
}

fn resolve_subcorpus(
    subcorpus_names: &HashMap<i64, String>,
    anno_set: &AnnoSetRow,
    lu_id: i64,
) -> Result<String, IntegrityError> {
    let subcorpus_id = anno_set
        .subcorpus_id
        .ok_or(IntegrityError::MissingSubcorpus {
            anno_set_id: anno_set.id,
        })?;

    subcorpus_names
        .get(&subcorpus_id)
        .cloned()
        .ok_or(IntegrityError::UnknownSubcorpus {
            subcorpus_id,
            lu_id,
        })
}

fn build_anno_set(fetcher: &Fetcher<'_>, anno_set: &AnnoSetRow) -> Result<AnnoSetDocument> {
    let mut layers = Vec::new();

    for layer in fetcher.layers(anno_set.id, anno_set.status)? {
        let mut labels = Vec::new();
        for label in fetcher.labels(layer.id)? {
            labels.push(build_label(fetcher, &label, anno_set.status)?);
        }

        layers.push(LayerDocument {
            id: layer.id,
            name: layer.layer_type.as_str().to_string(),
            labels,
        });
    }

    Ok(AnnoSetDocument {
        status: anno_set.status,
        id: anno_set.id,
        layers,
    })
}

fn build_label(fetcher: &Fetcher<'_>, label: &LabelRow, status: AnnoStatus) -> Result<LabelDocument> {
    let itype = match status {
        AnnoStatus::Manual => {
            let code = label
                .itype_code
                .ok_or(IntegrityError::MissingInstantiationType { label_id: label.id })?;
            Some(InstantiationType::try_from(code)?.as_str().to_string())
        }
        AnnoStatus::Unannotated => None,
    };

    let name = fetcher
        .label_type_name(label.label_type_id)
        .with_context(|| format!("failed to resolve name of label {}", label.id))?;

    Ok(LabelDocument {
        start: label.start,
        end: label.end,
        itype,
        name,
    })
}

fn group_by_subcorpus(sentences: Vec<PendingSentence>) -> Vec<SubcorpusDocument> {
    let mut subcorpora: Vec<SubcorpusDocument> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for pending in sentences {
        let idx = match by_name.get(&pending.subcorpus) {
            Some(&idx) => idx,
            None => {
                by_name.insert(pending.subcorpus.clone(), subcorpora.len());
                subcorpora.push(SubcorpusDocument {
                    name: pending.subcorpus,
                    sents: Vec::new(),
                });
                subcorpora.len() - 1
            }
        };
        subcorpora[idx].sents.push(pending.document);
    }

    subcorpora
}
