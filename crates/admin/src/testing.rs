//! Shared fixtures for unit tests.

use merchdesk_core::{
    CategoryId, CategoryTag, ColorId, ColorOption, ColorVariant, DesignRecord, Factory, FactoryId,
    ProductLayout, ProductRecord, SizeEntry, SizeId, SizeOption, Subcategory, SubcategoryId,
};
use rust_decimal::Decimal;

use crate::vocabulary::Vocabularies;

fn color(id: &str, title: &str, code: &str, categories: &[&str]) -> ColorOption {
    ColorOption {
        id: ColorId::new(id),
        title: title.to_string(),
        hex_code: code.to_string(),
        applicable_categories: categories.iter().map(|c| (*c).to_string()).collect(),
    }
}

/// Shirts offer Red and Blue, Hoodies Red and Green, Mugs Blue. Sizes S, M, L.
pub fn sample_vocabularies() -> Vocabularies {
    Vocabularies {
        categories: ["Shirts", "Hoodies", "Mugs"]
            .iter()
            .enumerate()
            .map(|(i, name)| CategoryTag {
                id: CategoryId::new(i.to_string()),
                name: (*name).to_string(),
            })
            .collect(),
        subcategories: vec![Subcategory {
            id: SubcategoryId::new("s1"),
            name: "Summer".to_string(),
        }],
        factories: vec![Factory {
            id: FactoryId::new("f1"),
            name: "North".to_string(),
        }],
        colors: vec![
            color("c1", "Red", "#ff0000", &["Shirts", "Hoodies"]),
            color("c2", "Blue", "#0000ff", &["Shirts", "Mugs"]),
            color("c3", "Green", "#00ff00", &["Hoodies"]),
        ],
        sizes: ["S", "M", "L"]
            .iter()
            .map(|t| SizeOption {
                id: SizeId::new(*t),
                title: (*t).to_string(),
            })
            .collect(),
    }
}

/// A design tagged Summer and Beach.
pub fn sample_design() -> DesignRecord {
    DesignRecord {
        title: "Wave".to_string(),
        images: vec!["https://cdn.test/wave.png".to_string()],
        tags: vec!["Summer".to_string(), "Beach".to_string()],
    }
}

/// A red hoodie priced 50.00, discounted to 40.00.
pub fn sample_product() -> ProductRecord {
    ProductRecord {
        title: "Hoodie".to_string(),
        description: "<p>Warm</p>".to_string(),
        price: "50.00".to_string(),
        discount: Some("40.00".to_string()),
        images: vec!["https://cdn.test/hoodie.png".to_string()],
        category: "Hoodies".to_string(),
        subcategory: "Summer".to_string(),
        factory: "North".to_string(),
        layout: ProductLayout::Collection {
            colors: vec![ColorVariant {
                color_id: ColorId::new("c1"),
                title: "Red".to_string(),
                hex_code: "#ff0000".to_string(),
                size_entries: vec![SizeEntry {
                    size: "L".to_string(),
                    quantity: 3,
                    price: Decimal::new(5500, 2),
                }],
            }],
        },
    }
}
