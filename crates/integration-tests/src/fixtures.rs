//! Vocabularies and records shared by the flow tests.

use merchdesk_admin::{InMemoryGateway, Vocabularies};
use merchdesk_core::{
    CategoryId, CategoryTag, ColorId, ColorOption, DesignRecord, Factory, FactoryId, SizeId,
    SizeOption, Subcategory, SubcategoryId,
};

fn color(id: &str, title: &str, code: &str, categories: &[&str]) -> ColorOption {
    ColorOption {
        id: ColorId::new(id),
        title: title.to_string(),
        hex_code: code.to_string(),
        applicable_categories: categories.iter().map(|c| (*c).to_string()).collect(),
    }
}

/// Categories Shirts, Hoodies and Mugs.
///
/// | Color | Categories |
/// |-------|------------|
/// | c1 Black | Shirts, Hoodies |
/// | c2 White | Shirts |
/// | c3 Navy | Hoodies |
///
/// Sizes S, M, L, XL in that order.
#[must_use]
pub fn vocabularies() -> Vocabularies {
    Vocabularies {
        categories: ["Shirts", "Hoodies", "Mugs"]
            .iter()
            .zip(1..)
            .map(|(name, id)| CategoryTag {
                id: CategoryId::new(id.to_string()),
                name: (*name).to_string(),
            })
            .collect(),
        subcategories: vec![
            Subcategory {
                id: SubcategoryId::new("1"),
                name: "Summer".to_string(),
            },
            Subcategory {
                id: SubcategoryId::new("2"),
                name: "Winter".to_string(),
            },
        ],
        factories: vec![Factory {
            id: FactoryId::new("1"),
            name: "Harbor Mill".to_string(),
        }],
        colors: vec![
            color("c1", "Black", "#000000", &["Shirts", "Hoodies"]),
            color("c2", "White", "#ffffff", &["Shirts"]),
            color("c3", "Navy", "#1f2a44", &["Hoodies"]),
        ],
        sizes: ["S", "M", "L", "XL"]
            .iter()
            .map(|t| SizeOption {
                id: SizeId::new(*t),
                title: (*t).to_string(),
            })
            .collect(),
    }
}

/// A persisted-looking design with the given tags.
#[must_use]
pub fn design(title: &str, tags: &[&str]) -> DesignRecord {
    DesignRecord {
        title: title.to_string(),
        images: vec![format!("https://cdn.test/{}.png", title.to_lowercase())],
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
    }
}

/// An in-memory service serving [`vocabularies`].
#[must_use]
pub fn gateway() -> InMemoryGateway {
    InMemoryGateway::new(vocabularies())
}
