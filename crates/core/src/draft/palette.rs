//! Colors available for a product category.

use crate::types::ColorOption;

/// Colors from `vocabulary` that apply to `category`, in vocabulary order.
///
/// No colors are offered until a category is chosen, so an empty
/// `category` yields nothing even if some color lists `""` as a category.
#[must_use]
pub fn available_colors<'a>(category: &str, vocabulary: &'a [ColorOption]) -> Vec<&'a ColorOption> {
    if category.is_empty() {
        return Vec::new();
    }
    vocabulary.iter().filter(|c| c.applies_to(category)).collect()
}
