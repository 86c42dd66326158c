use crate::commands::{CmdMessage, CmdResult, ItemDetail};
use crate::era;
use crate::error::{Result, VitrineError};
use crate::filters::FilterCriteria;
use crate::model::{Dataset, ItemId};
use crate::navigation::compute_adjacent;
use crate::position::resolve;
use crate::projector::project;

pub fn run(dataset: &Dataset, criteria: &FilterCriteria, id: ItemId) -> Result<CmdResult> {
    let item = dataset.find(id).ok_or(VitrineError::ItemNotFound(id))?;
    let result = project(dataset, criteria);
    let adjacent = compute_adjacent(&result, Some(id));
    let position = resolve(&result, Some(id));

    let detail = ItemDetail {
        item: item.clone(),
        eras: era::classify(item.creation_time.as_deref()),
        position,
        shown: result.len(),
        previous: adjacent.previous_id(),
        next: adjacent.next_id(),
    };

    let mut cmd = CmdResult::default().with_detail(detail);
    if !position.is_found() {
        cmd.add_message(CmdMessage::info(
            "This item is hidden by the current filters; previous/next are unavailable.",
        ));
    }
    Ok(cmd)
}
