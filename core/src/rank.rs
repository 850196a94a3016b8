use serde::Serialize;
use std::collections::BTreeMap;

use crate::{DocId, Index, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub doc_id: DocId,
    pub score: u32,
}

/// Score every document against `query` and rank them.
///
/// A group scores a document by the smallest count of any of its terms in
/// that document; the total is the sum over groups. Zero-score documents are
/// dropped, the rest sorted by descending score, then ascending id.
pub fn evaluate(query: &Query, index: &Index) -> Vec<RankedResult> {
    let mut totals: BTreeMap<DocId, u32> = BTreeMap::new();
    for group in query.groups() {
        for (doc_id, score) in group_scores(group, index) {
            let total = totals.entry(doc_id).or_insert(0);
            *total = total.saturating_add(score);
        }
    }

    let mut ranked: Vec<RankedResult> = totals
        .into_iter()
        .filter(|&(_, score)| score > 0)
        .map(|(doc_id, score)| RankedResult { doc_id, score })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));
    ranked
}

/// Per-document minimum count across the group's terms; documents missing any term are absent.
fn group_scores(group: &[String], index: &Index) -> BTreeMap<DocId, u32> {
    let mut terms = group.iter();
    let mut scores: BTreeMap<DocId, u32> = match terms.next().and_then(|t| index.counters(t)) {
        Some(counters) => counters.iter().collect(),
        None => return BTreeMap::new(),
    };
    for term in terms {
        let Some(counters) = index.counters(term) else {
            return BTreeMap::new();
        };
        scores.retain(|&doc_id, score| {
            *score = (*score).min(counters.get(doc_id));
            *score > 0
        });
        if scores.is_empty() {
            break;
        }
    }
    scores
}
