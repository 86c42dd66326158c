use crate::commands::{CmdMessage, CmdResult, ListedItem};
use crate::era;
use crate::filters::FilterCriteria;
use crate::model::Dataset;
use crate::projector::project;

pub fn run(dataset: &Dataset, criteria: &FilterCriteria) -> CmdResult {
    let result = project(dataset, criteria);
    let listed = result
        .iter()
        .enumerate()
        .map(|(i, item)| ListedItem {
            position: i + 1,
            eras: era::classify(item.creation_time.as_deref()),
            item: item.clone(),
        })
        .collect::<Vec<_>>();

    let mut cmd = CmdResult::default();
    if dataset.is_empty() {
        cmd.add_message(CmdMessage::warning("The catalog is empty or could not be loaded."));
    } else if listed.is_empty() {
        cmd.add_message(CmdMessage::info(
            "Nothing matches your request. Change the filters or the search.",
        ));
    } else if !criteria.is_unconstrained() {
        cmd.add_message(CmdMessage::info(format!(
            "Showing {} of {} items.",
            listed.len(),
            dataset.len()
        )));
    }
    cmd.with_listed_items(listed)
}
