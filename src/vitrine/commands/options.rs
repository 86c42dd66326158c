use crate::commands::{CmdMessage, CmdResult};
use crate::model::Dataset;
use crate::options::filter_options;

pub fn run(dataset: &Dataset, materials: &[String]) -> CmdResult {
    let options = filter_options(dataset, materials);
    let mut cmd = CmdResult::default();
    if options.sculptors.is_empty() {
        cmd.add_message(CmdMessage::warning(
            "No sculptors available: the catalog is empty or could not be loaded.",
        ));
    }
    cmd.with_options(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures;

    #[test]
    fn test_collects_sculptors_from_catalog() {
        let dataset = Dataset::new(fixtures::museum_items());
        let result = run(&dataset, &["Bronze".to_string()]);
        let options = result.options.unwrap();
        assert_eq!(options.sculptors, vec!["Shubin", "Martos", "Andreyev"]);
        assert_eq!(options.materials, vec!["Bronze"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_warns_on_empty_catalog() {
        let result = run(&Dataset::empty(), &[]);
        assert_eq!(result.messages.len(), 1);
    }
}
