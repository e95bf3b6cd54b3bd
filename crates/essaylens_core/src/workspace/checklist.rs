//! Knowledge-checklist matrices derived from mapping results.
//!
//! # Responsibility
//! - Number checklist criteria as `C1..Cn`.
//! - Count how many works satisfy each criterion.
//! - Build per-feedback and per-essay satisfaction rows.
//!
//! # Invariants
//! - A criterion is counted at most once per work.
//! - Paragraph ids inside one cell are unique and keep first-seen order.
//! - Rows follow the order of their inputs; cells follow checklist order.

use crate::mapping::{ChecklistId, FeedbackMapping};
use crate::model::feedback::FeedbackId;
use crate::model::segment::SegmentId;
use crate::workspace::cache::{FeedbackEntry, WorkIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Number of works satisfying each checklist id.
pub type ChecklistCounts = BTreeMap<ChecklistId, usize>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistId,
    /// Display label, `C{id}`.
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecklistOrder {
    /// Keep `C1..Cn` order.
    #[default]
    Ascending,
    /// Most-satisfied first; ties keep id order.
    CountDesc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedChecklistItem {
    #[serde(flatten)]
    pub item: ChecklistItem,
    pub count: usize,
}

/// Satisfaction of one checklist item by one feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistCell {
    pub id: ChecklistId,
    pub satisfied: bool,
    pub paragraph_ids: Vec<SegmentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackChecklistRow {
    pub work_index: WorkIndex,
    pub feedback_id: FeedbackId,
    pub feedback_title: String,
    pub feedback_text: String,
    pub is_negative: bool,
    pub is_positive: bool,
    pub checklist_status: Vec<ChecklistCell>,
}

impl FeedbackChecklistRow {
    pub fn satisfies(&self, checklist_id: ChecklistId) -> bool {
        self.checklist_status
            .iter()
            .any(|cell| cell.id == checklist_id && cell.satisfied)
    }
}

/// Satisfaction of one checklist item by one essay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayChecklistCell {
    pub id: ChecklistId,
    pub satisfied: bool,
    pub paragraph_ids: Vec<SegmentId>,
    /// First feedback whose mapping names this item.
    pub feedback_id: Option<FeedbackId>,
    pub is_positive: bool,
    pub is_negative: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayChecklistRow {
    pub work_index: WorkIndex,
    pub checklist_status: Vec<EssayChecklistCell>,
}

/// Numbers knowledge-list entries as checklist items `C1..Cn`.
pub fn checklist_items(knowledge_list: &[String]) -> Vec<ChecklistItem> {
    knowledge_list
        .iter()
        .zip(1..)
        .map(|(description, id): (&String, ChecklistId)| ChecklistItem {
            id,
            name: format!("C{id}"),
            description: description.clone(),
        })
        .collect()
}

/// Counts, per checklist id, the works whose mappings reference it.
pub fn checklist_satisfaction_counts(
    mappings_by_work: &BTreeMap<WorkIndex, Vec<FeedbackMapping>>,
) -> ChecklistCounts {
    let mut counts = ChecklistCounts::new();
    for mappings in mappings_by_work.values() {
        let satisfied = mappings
            .iter()
            .flat_map(|mapping| mapping.checklist_items.iter().copied())
            .collect::<BTreeSet<_>>();
        for id in satisfied {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    counts
}

pub fn sort_checklist(
    items: &[ChecklistItem],
    counts: &ChecklistCounts,
    order: ChecklistOrder,
) -> Vec<RankedChecklistItem> {
    let mut ranked = items
        .iter()
        .map(|item| RankedChecklistItem {
            item: item.clone(),
            count: counts.get(&item.id).copied().unwrap_or(0),
        })
        .collect::<Vec<_>>();

    if order == ChecklistOrder::CountDesc {
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.item.id.cmp(&b.item.id)));
    }
    ranked
}

/// One row per feedback entry: which checklist items its mapping satisfies.
pub fn feedback_checklist_rows(
    entries: &[FeedbackEntry],
    mappings_by_work: &BTreeMap<WorkIndex, Vec<FeedbackMapping>>,
    checklist: &[ChecklistItem],
) -> Vec<FeedbackChecklistRow> {
    entries
        .iter()
        .map(|entry| {
            let mapping = mappings_by_work.get(&entry.work_index).and_then(|mappings| {
                mappings
                    .iter()
                    .find(|mapping| mapping.feedback_id == entry.feedback_id)
            });

            let checklist_status = checklist
                .iter()
                .map(|item| match mapping {
                    Some(mapping) if mapping.checklist_items.contains(&item.id) => ChecklistCell {
                        id: item.id,
                        satisfied: true,
                        paragraph_ids: unique_in_order(
                            mapping.related_paragraph_ids.iter().copied(),
                        ),
                    },
                    _ => ChecklistCell {
                        id: item.id,
                        satisfied: false,
                        paragraph_ids: Vec::new(),
                    },
                })
                .collect();

            FeedbackChecklistRow {
                work_index: entry.work_index,
                feedback_id: entry.feedback_id,
                feedback_title: entry.title.clone(),
                feedback_text: entry.text.clone(),
                is_negative: entry.is_negative,
                is_positive: entry.is_positive,
                checklist_status,
            }
        })
        .collect()
}

/// One row per work: paragraphs linked to each checklist item through any
/// of the work's feedback mappings.
pub fn essay_checklist_rows(
    work_count: usize,
    entries: &[FeedbackEntry],
    mappings_by_work: &BTreeMap<WorkIndex, Vec<FeedbackMapping>>,
    checklist: &[ChecklistItem],
) -> Vec<EssayChecklistRow> {
    (0..work_count)
        .map(|work_index| {
            let mappings = mappings_by_work
                .get(&work_index)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let checklist_status = checklist
                .iter()
                .map(|item| {
                    let naming = mappings
                        .iter()
                        .filter(|mapping| mapping.checklist_items.contains(&item.id))
                        .collect::<Vec<_>>();
                    let paragraph_ids = unique_in_order(
                        naming
                            .iter()
                            .flat_map(|mapping| mapping.related_paragraph_ids.iter().copied()),
                    );
                    let feedback_id = naming.first().map(|mapping| mapping.feedback_id);
                    let representative = feedback_id.and_then(|id| {
                        entries
                            .iter()
                            .find(|entry| entry.work_index == work_index && entry.feedback_id == id)
                    });

                    EssayChecklistCell {
                        id: item.id,
                        satisfied: !paragraph_ids.is_empty(),
                        paragraph_ids,
                        feedback_id,
                        is_positive: representative.is_some_and(|entry| entry.is_positive),
                        is_negative: representative.is_some_and(|entry| entry.is_negative),
                    }
                })
                .collect();

            EssayChecklistRow {
                work_index,
                checklist_status,
            }
        })
        .collect()
}

fn unique_in_order(ids: impl Iterator<Item = SegmentId>) -> Vec<SegmentId> {
    let mut seen = BTreeSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::{
        checklist_items, checklist_satisfaction_counts, sort_checklist, unique_in_order,
        ChecklistOrder,
    };
    use crate::mapping::FeedbackMapping;
    use std::collections::BTreeMap;

    fn mapping(feedback_id: u32, checklist: &[u32], paragraphs: &[u32]) -> FeedbackMapping {
        FeedbackMapping {
            feedback_id,
            related_paragraph_ids: paragraphs.to_vec(),
            checklist_items: checklist.to_vec(),
            ..FeedbackMapping::default()
        }
    }

    #[test]
    fn checklist_items_are_numbered_from_one() {
        let items = checklist_items(&["Defines terms".to_string(), "Cites data".to_string()]);
        assert_eq!(items[0].name, "C1");
        assert_eq!(items[1].id, 2);
        assert_eq!(items[1].description, "Cites data");
    }

    #[test]
    fn counts_each_item_once_per_work() {
        let mut by_work = BTreeMap::new();
        by_work.insert(0, vec![mapping(1, &[1, 2], &[]), mapping(2, &[1], &[])]);
        by_work.insert(1, vec![mapping(1, &[2], &[])]);

        let counts = checklist_satisfaction_counts(&by_work);
        assert_eq!(counts.get(&1), Some(&1));
        assert_eq!(counts.get(&2), Some(&2));
    }

    #[test]
    fn count_desc_breaks_ties_by_id() {
        let items = checklist_items(&["a".to_string(), "b".to_string(), "c".to_string()]);
        let counts = BTreeMap::from([(2, 1), (3, 1), (1, 0)]);
        let ranked = sort_checklist(&items, &counts, ChecklistOrder::CountDesc);
        let ids = ranked.iter().map(|entry| entry.item.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 3, 1]);

        let ascending = sort_checklist(&items, &counts, ChecklistOrder::Ascending);
        assert_eq!(ascending[0].item.id, 1);
    }

    #[test]
    fn unique_in_order_keeps_first_occurrence() {
        assert_eq!(unique_in_order([3, 1, 3, 2, 1].into_iter()), vec![3, 1, 2]);
    }
}
