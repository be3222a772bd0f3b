use crate::data::aggregate::{recompute_with_preview, ViewModel, PREVIEW_ROWS};
use crate::data::filter::{FilterDimension, FilterSelection, FilteredView};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Session – dataset + selection + cached derived view
// ---------------------------------------------------------------------------

/// One user session: the immutable dataset, the current filter selection,
/// and the derived [`ViewModel`], recomputed on every selection change.
/// Sessions are independent; nothing here is shared across users.
pub struct Session {
    dataset: Dataset,
    selection: FilterSelection,
    preview_rows: usize,
    view: ViewModel,
}

impl Session {
    /// Start a session with every distinct value selected.
    pub fn new(dataset: Dataset) -> Self {
        Self::with_preview(dataset, PREVIEW_ROWS)
    }

    pub fn with_preview(dataset: Dataset, preview_rows: usize) -> Self {
        let selection = FilterSelection::all(&dataset);
        let view = recompute_with_preview(&dataset, &selection, preview_rows);
        Session {
            dataset,
            selection,
            preview_rows,
            view,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// The derived view for the current selection.
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// Borrowed filtered view for export.
    pub fn filtered_view(&self) -> FilteredView<'_> {
        FilteredView::new(&self.dataset, &self.selection)
    }

    /// Replace the whole selection.
    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.refresh();
    }

    /// Restrict one dimension to exactly the given values. Values absent
    /// from the dataset are kept and simply match nothing.
    pub fn select_only<I>(&mut self, dim: FilterDimension, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        *self.selection.values_mut(dim) = values.into_iter().collect();
        self.refresh();
    }

    /// Select every distinct value in a dimension.
    pub fn select_all(&mut self, dim: FilterDimension) {
        let all = dim.distinct(&self.dataset).clone();
        *self.selection.values_mut(dim) = all;
        self.refresh();
    }

    /// Deselect every value in a dimension (excludes all records).
    pub fn select_none(&mut self, dim: FilterDimension) {
        self.selection.values_mut(dim).clear();
        self.refresh();
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle_value(&mut self, dim: FilterDimension, value: &str) {
        let selected = self.selection.values_mut(dim);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        self.view = recompute_with_preview(&self.dataset, &self.selection, self.preview_rows);
    }
}
