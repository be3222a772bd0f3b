use std::collections::BTreeSet;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Filter dimensions and selection
// ---------------------------------------------------------------------------

/// The categorical dimensions a selection filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    Region,
    Category,
    StoreId,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [
        FilterDimension::Region,
        FilterDimension::Category,
        FilterDimension::StoreId,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterDimension::Region => "Region",
            FilterDimension::Category => "Category",
            FilterDimension::StoreId => "Store_ID",
        }
    }

    /// The sorted distinct values a dataset holds for this dimension.
    pub fn distinct(self, dataset: &Dataset) -> &BTreeSet<String> {
        match self {
            FilterDimension::Region => &dataset.regions,
            FilterDimension::Category => &dataset.categories,
            FilterDimension::StoreId => &dataset.store_ids,
        }
    }
}

/// Per-dimension selection state: the set of allowed values for each filter
/// column. A record passes when its value is in every set; an empty set
/// excludes every record. Selected values absent from the dataset simply
/// filter out nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub regions: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub store_ids: BTreeSet<String>,
}

impl FilterSelection {
    /// Selection with every distinct value selected (show everything).
    pub fn all(dataset: &Dataset) -> Self {
        FilterSelection {
            regions: dataset.regions.clone(),
            categories: dataset.categories.clone(),
            store_ids: dataset.store_ids.clone(),
        }
    }

    /// Mutable access to the selected value set for one dimension.
    pub fn values_mut(&mut self, dim: FilterDimension) -> &mut BTreeSet<String> {
        match dim {
            FilterDimension::Region => &mut self.regions,
            FilterDimension::Category => &mut self.categories,
            FilterDimension::StoreId => &mut self.store_ids,
        }
    }

    /// Whether a record passes all three dimension filters.
    pub fn matches(&self, rec: &Record) -> bool {
        self.regions.contains(&rec.region)
            && self.categories.contains(&rec.category)
            && self.store_ids.contains(&rec.store_id)
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Indices of records passing the selection, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Borrowed subsequence of a dataset passing a selection. Derived state,
/// recomputed on every selection change.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a Dataset, selection: &FilterSelection) -> Self {
        FilteredView {
            dataset,
            indices: filtered_indices(dataset, selection),
        }
    }

    /// Iterate the records in the view, in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.indices.iter().map(|&i| &self.dataset.records[i])
    }

    /// Number of records in the view.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no record passes the selection.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::model::test_support::record;
    use super::*;

    fn east_east_west() -> Dataset {
        Dataset::from_records(vec![
            record("2021-01-01", "East", "Electronics", "S001", 100.0),
            record("2021-01-02", "East", "Clothing", "S002", 200.0),
            record("2021-01-03", "West", "Electronics", "S001", 50.0),
        ])
    }

    #[test]
    fn full_selection_passes_every_record() {
        let ds = east_east_west();
        let view = FilteredView::new(&ds, &FilterSelection::all(&ds));
        assert_eq!(view.len(), ds.len());
    }

    #[test]
    fn selection_restricts_by_set_membership() {
        let ds = east_east_west();
        let mut sel = FilterSelection::all(&ds);
        sel.regions = ["East".to_string()].into_iter().collect();

        let view = FilteredView::new(&ds, &sel);
        assert_eq!(view.len(), 2);
        assert!(view.records().all(|r| r.region == "East"));
    }

    #[test]
    fn empty_set_on_one_dimension_excludes_everything() {
        let ds = east_east_west();
        let mut sel = FilterSelection::all(&ds);
        sel.store_ids.clear();

        let view = FilteredView::new(&ds, &sel);
        assert!(view.is_empty());
    }

    #[test]
    fn stale_selected_value_filters_out_nothing() {
        let ds = east_east_west();
        let mut sel = FilterSelection::all(&ds);
        sel.regions.insert("Atlantis".to_string());

        let view = FilteredView::new(&ds, &sel);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = east_east_west();
        let mut sel = FilterSelection::all(&ds);
        sel.categories = ["Electronics".to_string()].into_iter().collect();

        let first = filtered_indices(&ds, &sel);
        let second = filtered_indices(&ds, &sel);
        assert_eq!(first, second);
    }

    #[test]
    fn view_is_a_subsequence_of_the_dataset() {
        let ds = east_east_west();
        let mut sel = FilterSelection::all(&ds);
        sel.regions = ["West".to_string()].into_iter().collect();

        let indices = filtered_indices(&ds, &sel);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert!(indices.iter().all(|&i| i < ds.len()));
    }
}
