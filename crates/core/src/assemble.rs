//! Turning drafts into submission records.
//!
//! Assembly is the only place raw draft text becomes numbers. Every failure
//! is reported as a [`ValidationError`] before any request is made.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

use crate::draft::{DesignDraft, ProductDraft, VariantSizeEntry};
use crate::pricing::{discounted_price, formatted_price};
use crate::types::{
    ColorId, ColorOption, ColorVariant, DesignRecord, ProductKind, ProductLayout, ProductRecord,
    SizeEntry,
};

/// Largest amount accepted for any price field.
const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Reasons a draft cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No image has been uploaded.
    #[error("choose at least one image")]
    EmptyImageSet,

    /// A collection has no colors selected.
    #[error("choose at least one color and quantity")]
    NoColorSelected,

    /// A selected color is missing from the color vocabulary.
    #[error("color {0} is not in the color list")]
    UnknownColor(ColorId),

    /// A selected color has no size rows to read quantities from.
    #[error("color {0} has no size rows")]
    MissingSizeRows(ColorId),

    /// A size quantity is not a non-negative whole number.
    #[error("quantity {value:?} for {color} size {size} is not a whole number of at least zero")]
    InvalidQuantity {
        color: ColorId,
        size: String,
        value: String,
    },

    /// A price is not a non-negative amount.
    #[error("price {value:?} is not a valid amount")]
    InvalidPrice { value: String },

    /// The stock count is not a non-negative whole number.
    #[error("stock {value:?} is not a whole number of at least zero")]
    InvalidStock { value: String },

    /// The discount is not a percentage between 0 and 100.
    #[error("discount {value:?} is not a percentage between 0 and 100")]
    InvalidDiscount { value: String },
}

/// Assemble a design create/update body.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyImageSet`] if no image was uploaded.
pub fn assemble_design(draft: &DesignDraft) -> Result<DesignRecord, ValidationError> {
    check_images(&draft.images)?;
    Ok(DesignRecord {
        title: draft.title.clone(),
        images: draft.images.clone(),
        tags: draft.tags.to_vec(),
    })
}

/// Assemble a product create/update body.
///
/// `colors` is the color vocabulary, used for each selected color's title
/// and hex code.
///
/// # Errors
///
/// Checks run in order: images, color selection (collections only), then
/// every numeric field. The first failure is returned.
pub fn assemble_product(
    draft: &ProductDraft,
    colors: &[ColorOption],
) -> Result<ProductRecord, ValidationError> {
    check_images(&draft.images)?;
    if draft.kind == ProductKind::Collection && draft.colors.selected().is_empty() {
        return Err(ValidationError::NoColorSelected);
    }

    let layout = match draft.kind {
        ProductKind::Single => ProductLayout::Single {
            stock: parse_count(&draft.stock).ok_or_else(|| ValidationError::InvalidStock {
                value: draft.stock.clone(),
            })?,
        },
        ProductKind::Collection => ProductLayout::Collection {
            colors: draft
                .colors
                .selected()
                .iter()
                .map(|id| color_variant(id, draft, colors))
                .collect::<Result<_, _>>()?,
        },
    };

    let base = parse_amount(&draft.price)?;
    let percent = parse_percent(&draft.discount)?;

    Ok(ProductRecord {
        title: draft.title.clone(),
        description: draft.description.clone(),
        price: formatted_price(base),
        discount: discounted_price(base, percent),
        images: draft.images.clone(),
        category: draft.category.clone(),
        subcategory: draft.subcategory.clone(),
        factory: draft.factory.clone(),
        layout,
    })
}

/// The discounted price `draft` would be saved with.
///
/// `None` when the discount is blank or zero, or when the price or discount
/// would fail validation.
#[must_use]
pub fn preview_discount(draft: &ProductDraft) -> Option<String> {
    let base = parse_amount(&draft.price).ok()?;
    let percent = parse_percent(&draft.discount).ok()?;
    discounted_price(base, percent)
}

/// Rejects an empty list and the single-blank-URL placeholder.
fn check_images(images: &[String]) -> Result<(), ValidationError> {
    match images {
        [] => Err(ValidationError::EmptyImageSet),
        [only] if only.is_empty() => Err(ValidationError::EmptyImageSet),
        _ => Ok(()),
    }
}

fn color_variant(
    id: &ColorId,
    draft: &ProductDraft,
    vocabulary: &[ColorOption],
) -> Result<ColorVariant, ValidationError> {
    let option = vocabulary
        .iter()
        .find(|c| &c.id == id)
        .ok_or_else(|| ValidationError::UnknownColor(id.clone()))?;

    let row = draft
        .colors
        .matrix()
        .row(id)
        .ok_or_else(|| ValidationError::MissingSizeRows(id.clone()))?;
    let mut size_entries = Vec::with_capacity(row.len());
    for entry in row {
        if let Some(stocked) = stocked_entry(id, entry)? {
            size_entries.push(stocked);
        }
    }

    Ok(ColorVariant {
        color_id: option.id.clone(),
        title: option.title.clone(),
        hex_code: option.hex_code.clone(),
        size_entries,
    })
}

/// `None` for sizes with no stock, which are left out of the record.
fn stocked_entry(
    color: &ColorId,
    entry: &VariantSizeEntry,
) -> Result<Option<SizeEntry>, ValidationError> {
    let quantity = parse_count(&entry.quantity).ok_or_else(|| ValidationError::InvalidQuantity {
        color: color.clone(),
        size: entry.size.clone(),
        value: entry.quantity.clone(),
    })?;
    if quantity == 0 {
        return Ok(None);
    }

    Ok(Some(SizeEntry {
        size: entry.size.clone(),
        quantity,
        price: parse_amount(&entry.price)?,
    }))
}

/// Whole, non-negative count. Blank text counts as zero.
fn parse_count(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    let value: Decimal = raw.parse().ok()?;
    if (value.is_sign_negative() && !value.is_zero()) || !value.fract().is_zero() {
        return None;
    }
    value.to_u32()
}

/// Non-negative amount. Blank text counts as zero.
fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .filter(|v| !v.is_sign_negative() || v.is_zero())
        .filter(|v| *v <= MAX_AMOUNT)
        .ok_or_else(|| ValidationError::InvalidPrice {
            value: raw.to_owned(),
        })
}

/// Percentage in `0..=100`. Blank text means no discount.
fn parse_percent(raw: &str) -> Result<Option<Decimal>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .filter(|v| (Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(v))
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidDiscount {
            value: raw.to_owned(),
        })
}
