use crate::era;
use crate::filters::FilterCriteria;
use crate::model::{CatalogItem, Dataset, ItemId};
use crate::search;

/// The ordered subsequence of a dataset that satisfies a set of criteria.
///
/// Holds the dataset snapshot it was derived from plus the indices of the
/// retained items, so it never copies item data.
#[derive(Debug, Clone)]
pub struct FilteredResult {
    dataset: Dataset,
    indices: Vec<usize>,
}

impl FilteredResult {
    pub fn empty() -> Self {
        Self {
            dataset: Dataset::empty(),
            indices: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&CatalogItem> {
        self.indices.get(position).map(|&i| &self.dataset[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> + '_ {
        self.indices.iter().map(move |&i| &self.dataset[i])
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.iter().map(|item| item.id).collect()
    }

    /// Position of `id` within the result.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.iter().position(|item| item.id == id)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

/// Whether a single item passes every active dimension of `criteria`.
pub fn is_eligible(item: &CatalogItem, criteria: &FilterCriteria) -> bool {
    let sculptor_ok = criteria.sculptors.is_empty()
        || item
            .sculptor
            .as_ref()
            .is_some_and(|s| criteria.sculptors.contains(s));

    let era_ok = criteria.eras.is_empty()
        || era::classify(item.creation_time.as_deref())
            .iter()
            .any(|e| criteria.eras.contains(e));

    let material_ok =
        criteria.materials.is_empty() || criteria.materials.contains(item.material_or_empty());

    sculptor_ok && era_ok && material_ok && search::matches(item, criteria.query())
}

/// Derives the filtered view of `dataset`. Pure: a full O(n) scan every call.
pub fn project(dataset: &Dataset, criteria: &FilterCriteria) -> FilteredResult {
    let indices = dataset
        .iter()
        .enumerate()
        .filter(|(_, item)| is_eligible(item, criteria))
        .map(|(i, _)| i)
        .collect();

    FilteredResult {
        dataset: dataset.clone(),
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::Era;

    fn sculptors_dataset() -> Dataset {
        Dataset::new(vec![
            CatalogItem::new(1).with_sculptor("A"),
            CatalogItem::new(2).with_sculptor("A"),
            CatalogItem::new(3).with_sculptor("B"),
            CatalogItem::new(4).with_sculptor("C"),
        ])
    }

    fn museum() -> Dataset {
        Dataset::new(vec![
            CatalogItem::new(1)
                .with_name("Garibaldi")
                .with_sculptor("Ivanov")
                .with_creation_time("1789")
                .with_material("Bronze"),
            CatalogItem::new(2)
                .with_name("Lassalle")
                .with_sculptor("Sinaisky")
                .with_creation_time("unveiled 1850")
                .with_material("Granite"),
            CatalogItem::new(3)
                .with_name("Volodarsky")
                .with_sculptor("Ivanov")
                .with_creation_time("1925"),
            CatalogItem::new(4).with_name("Fragment"),
            CatalogItem::new(5)
                .with_name("Lenin")
                .with_sculptor("Sinaisky")
                .with_creation_time("1835")
                .with_material("Marble")
                .with_texts(["A granite pedestal"]),
        ])
    }

    fn is_ordered_subsequence(result: &FilteredResult, dataset: &Dataset) -> bool {
        let mut source = dataset.iter();
        result
            .iter()
            .all(|item| source.any(|candidate| candidate.id == item.id))
    }

    fn criteria_grid() -> Vec<FilterCriteria> {
        let mut grid = vec![FilterCriteria::default()];
        let mut c = FilterCriteria::default();
        c.sculptors.insert("Ivanov".into());
        grid.push(c.clone());
        c.eras.insert(Era::Eighteenth);
        grid.push(c.clone());
        let mut m = FilterCriteria::default();
        m.materials.insert("".into());
        grid.push(m);
        let mut q = FilterCriteria::default();
        q.query = "GRANITE".into();
        grid.push(q);
        grid
    }

    #[test]
    fn test_selecting_a_sculptor_keeps_their_items_in_order() {
        let dataset = sculptors_dataset();
        let mut criteria = FilterCriteria::default();
        criteria.sculptors.insert("A".into());

        let result = project(&dataset, &criteria);
        assert_eq!(result.ids(), vec![ItemId(1), ItemId(2)]);
        assert_eq!(result.index_of(ItemId(3)), None);
    }

    #[test]
    fn test_unconstrained_criteria_is_identity() {
        let dataset = museum();
        let result = project(&dataset, &FilterCriteria::default());
        let all: Vec<_> = dataset.iter().map(|i| i.id).collect();
        assert_eq!(result.ids(), all);
    }

    #[test]
    fn test_results_are_ordered_subsequences() {
        let dataset = museum();
        for criteria in criteria_grid() {
            let result = project(&dataset, &criteria);
            assert!(is_ordered_subsequence(&result, &dataset), "{:?}", criteria);
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let dataset = museum();
        for criteria in criteria_grid() {
            assert_eq!(
                project(&dataset, &criteria).ids(),
                project(&dataset, &criteria).ids()
            );
        }
    }

    #[test]
    fn test_activating_dimensions_never_widens() {
        let dataset = museum();
        let mut criteria = FilterCriteria::default();
        let mut previous = project(&dataset, &criteria).len();

        criteria.sculptors.insert("Sinaisky".into());
        let next = project(&dataset, &criteria).len();
        assert!(next <= previous);
        previous = next;

        criteria.eras.insert(Era::Classicism);
        let next = project(&dataset, &criteria).len();
        assert!(next <= previous);
        previous = next;

        criteria.query = "lenin".into();
        let next = project(&dataset, &criteria).len();
        assert!(next <= previous);
        assert_eq!(project(&dataset, &criteria).ids(), vec![ItemId(5)]);
    }

    #[test]
    fn test_era_filter_matches_any_selected_tag() {
        let dataset = museum();
        let mut criteria = FilterCriteria::default();
        criteria.eras.insert(Era::Classicism);
        assert_eq!(project(&dataset, &criteria).ids(), vec![ItemId(1), ItemId(5)]);

        criteria.eras.insert(Era::Nineteenth);
        assert_eq!(
            project(&dataset, &criteria).ids(),
            vec![ItemId(1), ItemId(2), ItemId(5)]
        );
    }

    #[test]
    fn test_items_without_year_fail_an_active_era_filter() {
        let dataset = museum();
        let mut criteria = FilterCriteria::default();
        criteria.eras.extend(Era::ALL);
        assert!(project(&dataset, &criteria).index_of(ItemId(4)).is_none());
    }

    #[test]
    fn test_absent_material_matches_empty_string() {
        let dataset = museum();
        let mut criteria = FilterCriteria::default();
        criteria.materials.insert(String::new());
        assert_eq!(project(&dataset, &criteria).ids(), vec![ItemId(3), ItemId(4)]);
    }

    #[test]
    fn test_absent_sculptor_never_matches_a_selection() {
        let dataset = museum();
        let mut criteria = FilterCriteria::default();
        criteria.sculptors.insert(String::new());
        assert!(project(&dataset, &criteria).is_empty());
    }

    #[test]
    fn test_search_looks_into_texts() {
        let dataset = museum();
        let mut criteria = FilterCriteria::default();
        criteria.query = "  granite ".into();
        assert_eq!(project(&dataset, &criteria).ids(), vec![ItemId(5)]);
    }

    #[test]
    fn test_empty_dataset_projects_to_empty() {
        let mut criteria = FilterCriteria::default();
        criteria.sculptors.insert("A".into());
        assert!(project(&Dataset::empty(), &criteria).is_empty());
        assert!(project(&Dataset::empty(), &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_result_shares_the_source_snapshot() {
        let dataset = museum();
        let result = project(&dataset, &FilterCriteria::default());
        assert!(result.dataset().same_snapshot(&dataset));
        assert_eq!(result.get(1).map(|i| i.id), Some(ItemId(2)));
        assert!(result.get(99).is_none());
    }
}
