//! Per-color size × quantity × price grid for collection products.
//!
//! # Lifecycle
//!
//! A color's rows are created the first time the color is activated, one row
//! per size in the size vocabulary's order, with empty quantity and price.
//! Deactivating a color only removes it from the selection; its rows stay in
//! the [`ColorMatrix`] so reactivating brings back what was typed. Rows are
//! dropped only by [`ColorSelection::reset`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DraftError;
use crate::types::{ColorId, SizeOption};

/// One size of one color, as typed by the operator.
///
/// Quantity and price are kept as raw text; they are parsed only when the
/// draft is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariantSizeEntry {
    /// Size title from the size vocabulary.
    pub size: String,
    #[serde(rename = "qty", default)]
    pub quantity: String,
    #[serde(default)]
    pub price: String,
}

impl VariantSizeEntry {
    /// An entry for `size` with nothing typed yet.
    #[must_use]
    pub fn blank(size: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            quantity: String::new(),
            price: String::new(),
        }
    }
}

/// The editable columns of a [`VariantSizeEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Quantity,
    Price,
}

/// Rows for every color activated in this draft, selected or not.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorMatrix(BTreeMap<ColorId, Vec<VariantSizeEntry>>);

impl ColorMatrix {
    #[must_use]
    pub fn row(&self, color: &ColorId) -> Option<&[VariantSizeEntry]> {
        self.0.get(color).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, color: &ColorId) -> bool {
        self.0.contains_key(color)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Create blank rows for `color` unless it already has some.
    fn ensure_row(&mut self, color: &ColorId, sizes: &[SizeOption]) {
        if !self.0.contains_key(color) {
            let row = sizes.iter().map(|s| VariantSizeEntry::blank(&s.title)).collect();
            self.0.insert(color.clone(), row);
        }
    }

    fn insert_row(&mut self, color: ColorId, row: Vec<VariantSizeEntry>) {
        self.0.insert(color, row);
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Selected colors plus the retained [`ColorMatrix`].
///
/// Every selected color has rows in the matrix; the matrix may also hold rows
/// for colors that were deactivated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorSelection {
    #[serde(default)]
    selected: Vec<ColorId>,
    #[serde(default)]
    matrix: ColorMatrix,
}

impl ColorSelection {
    /// Selected colors in activation order.
    #[must_use]
    pub fn selected(&self) -> &[ColorId] {
        &self.selected
    }

    #[must_use]
    pub const fn matrix(&self) -> &ColorMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn is_selected(&self, color: &ColorId) -> bool {
        self.selected.contains(color)
    }

    /// Select `color`, creating blank rows from `sizes` on first activation.
    ///
    /// Existing rows are reused unchanged, even if the size vocabulary has
    /// changed since they were created.
    pub fn activate(&mut self, color: &ColorId, sizes: &[SizeOption]) {
        if !self.is_selected(color) {
            self.selected.push(color.clone());
        }
        self.matrix.ensure_row(color, sizes);
    }

    /// Unselect `color`. Its rows are kept.
    pub fn deactivate(&mut self, color: &ColorId) {
        self.selected.retain(|c| c != color);
    }

    /// Activate `color` if unselected, otherwise deactivate it.
    ///
    /// Returns `true` if the color is selected afterwards.
    pub fn toggle(&mut self, color: &ColorId, sizes: &[SizeOption]) -> bool {
        if self.is_selected(color) {
            self.deactivate(color);
            false
        } else {
            self.activate(color, sizes);
            true
        }
    }

    /// Replace one field of one entry with raw text.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::NoSuchEntry`] if `color` has no rows or
    /// `index` is past the end of its row.
    pub fn set_entry_field(
        &mut self,
        color: &ColorId,
        index: usize,
        field: EntryField,
        raw: impl Into<String>,
    ) -> Result<(), DraftError> {
        let entry = self
            .matrix
            .0
            .get_mut(color)
            .and_then(|row| row.get_mut(index))
            .ok_or_else(|| DraftError::NoSuchEntry {
                color: color.clone(),
                index,
            })?;

        match field {
            EntryField::Quantity => entry.quantity = raw.into(),
            EntryField::Price => entry.price = raw.into(),
        }
        Ok(())
    }

    /// Unselect every color, keeping all rows.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Drop the selection and every retained row.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.matrix.clear();
    }

    /// Select `color` with rows that came from a persisted product.
    pub(crate) fn restore(&mut self, color: ColorId, row: Vec<VariantSizeEntry>) {
        if !self.is_selected(&color) {
            self.selected.push(color.clone());
        }
        self.matrix.insert_row(color, row);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::SizeId;

    fn sizes() -> Vec<SizeOption> {
        ["S", "M", "L"]
            .iter()
            .map(|t| SizeOption {
                id: SizeId::new(t.to_lowercase()),
                title: (*t).to_string(),
            })
            .collect()
    }

    #[test]
    fn test_first_activation_creates_blank_rows_in_size_order() {
        let mut selection = ColorSelection::default();
        let c1 = ColorId::new("c1");
        selection.activate(&c1, &sizes());

        let row = selection.matrix().row(&c1).unwrap();
        let titles: Vec<&str> = row.iter().map(|e| e.size.as_str()).collect();
        assert_eq!(titles, vec!["S", "M", "L"]);
        assert!(row.iter().all(|e| e.quantity.is_empty() && e.price.is_empty()));
        assert_eq!(selection.selected(), &[c1]);
    }

    #[test]
    fn test_activate_twice_does_not_duplicate() {
        let mut selection = ColorSelection::default();
        let c1 = ColorId::new("c1");
        selection.activate(&c1, &sizes());
        selection.activate(&c1, &sizes());
        assert_eq!(selection.selected().len(), 1);
        assert_eq!(selection.matrix().len(), 1);
    }

    #[test]
    fn test_reactivation_restores_entries() {
        let mut selection = ColorSelection::default();
        let c1 = ColorId::new("c1");

        selection.activate(&c1, &sizes());
        selection
            .set_entry_field(&c1, 0, EntryField::Quantity, "5")
            .unwrap();
        selection.deactivate(&c1);

        assert!(!selection.is_selected(&c1));
        assert!(selection.matrix().contains(&c1));

        selection.activate(&c1, &sizes());
        assert_eq!(selection.matrix().row(&c1).unwrap()[0].quantity, "5");
    }

    #[test]
    fn test_toggle_flips_selection() {
        let mut selection = ColorSelection::default();
        let c1 = ColorId::new("c1");
        assert!(selection.toggle(&c1, &sizes()));
        assert!(!selection.toggle(&c1, &sizes()));
        assert!(selection.selected().is_empty());
        assert!(selection.matrix().contains(&c1));
    }

    #[test]
    fn test_existing_rows_ignore_new_size_vocabulary() {
        let mut selection = ColorSelection::default();
        let c1 = ColorId::new("c1");
        selection.activate(&c1, &sizes());
        selection.deactivate(&c1);
        selection.activate(&c1, &sizes()[..1]);
        assert_eq!(selection.matrix().row(&c1).unwrap().len(), 3);
    }

    #[test]
    fn test_set_entry_field_touches_one_field() {
        let mut selection = ColorSelection::default();
        let c1 = ColorId::new("c1");
        let c2 = ColorId::new("c2");
        selection.activate(&c1, &sizes());
        selection.activate(&c2, &sizes());

        selection
            .set_entry_field(&c1, 1, EntryField::Price, "12.50")
            .unwrap();

        let row = selection.matrix().row(&c1).unwrap();
        assert_eq!(row[1].price, "12.50");
        assert_eq!(row[1].quantity, "");
        assert_eq!(row[0], VariantSizeEntry::blank("S"));
        assert_eq!(row[2], VariantSizeEntry::blank("L"));
        assert!(
            selection
                .matrix()
                .row(&c2)
                .unwrap()
                .iter()
                .all(|e| e.price.is_empty())
        );
    }

    #[test]
    fn test_set_entry_field_accepts_any_text() {
        let mut selection = ColorSelection::default();
        let c1 = ColorId::new("c1");
        selection.activate(&c1, &sizes());
        selection
            .set_entry_field(&c1, 2, EntryField::Quantity, "-3x")
            .unwrap();
        assert_eq!(selection.matrix().row(&c1).unwrap()[2].quantity, "-3x");
    }

    #[test]
    fn test_set_entry_field_out_of_range() {
        let mut selection = ColorSelection::default();
        let c1 = ColorId::new("c1");
        selection.activate(&c1, &sizes());

        let err = selection
            .set_entry_field(&c1, 3, EntryField::Quantity, "1")
            .unwrap_err();
        assert!(matches!(err, DraftError::NoSuchEntry { index: 3, .. }));

        let err = selection
            .set_entry_field(&ColorId::new("nope"), 0, EntryField::Quantity, "1")
            .unwrap_err();
        assert!(matches!(err, DraftError::NoSuchEntry { index: 0, .. }));
    }

    #[test]
    fn test_clear_selection_keeps_rows_and_reset_drops_them() {
        let mut selection = ColorSelection::default();
        let c1 = ColorId::new("c1");
        selection.activate(&c1, &sizes());

        selection.clear_selection();
        assert!(selection.selected().is_empty());
        assert!(selection.matrix().contains(&c1));

        selection.reset();
        assert!(selection.matrix().is_empty());
    }
}
