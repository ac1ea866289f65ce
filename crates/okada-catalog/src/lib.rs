// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Immutable, process-wide vendor catalog.
//!
//! One vendor's menu, compiled in: three categories, fixed regular/extra
//! prices per item. Read-only lookups by category key and item id; there is
//! no mutation at runtime.

use std::collections::HashMap;
use std::sync::LazyLock;

use okada_core::types::{Category, Money, Size};

/// Display name of the single modeled vendor.
pub const VENDOR_NAME: &str = "Bissy Joy Eatery";

/// One item on the vendor menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    /// Unique across the whole catalog, 1..=N. Customers reply with it.
    pub id: u32,
    pub name: &'static str,
    pub regular: Money,
    pub extra: Money,
    pub category: Category,
}

impl CatalogItem {
    /// Whether the customer must choose a portion size. When both prices
    /// are equal the size question is skipped entirely; this equality check
    /// is the sole branch point controlling the size-selection state.
    pub fn has_size_choice(&self) -> bool {
        self.regular != self.extra
    }

    /// Unit price for the chosen portion size.
    pub fn price(&self, size: Size) -> Money {
        match size {
            Size::Regular => self.regular,
            Size::Extra => self.extra,
        }
    }
}

const fn item(
    id: u32,
    name: &'static str,
    regular: Money,
    extra: Money,
    category: Category,
) -> CatalogItem {
    CatalogItem {
        id,
        name,
        regular,
        extra,
        category,
    }
}

static RICE_MEALS: &[CatalogItem] = &[
    item(1, "White Rice", 2500, 3000, Category::RiceMeals),
    item(2, "Jollof & Fried Rice", 2500, 3000, Category::RiceMeals),
    item(3, "Chinese Rice", 4000, 5000, Category::RiceMeals),
    item(4, "Village Rice", 4000, 4500, Category::RiceMeals),
    item(5, "Jollof Macaroni", 3000, 3500, Category::RiceMeals),
    item(6, "Jollof Spaghetti", 3000, 3500, Category::RiceMeals),
    item(7, "Ofada Rice", 4000, 5000, Category::RiceMeals),
    item(8, "Beans & Rice", 3000, 3500, Category::RiceMeals),
];

static SWALLOWS: &[CatalogItem] = &[
    item(9, "Yam Porridge", 3000, 3500, Category::Swallows),
    item(10, "Yam & Egg", 3000, 3500, Category::Swallows),
    item(11, "Beans & Bread", 2500, 3000, Category::Swallows),
    item(12, "Eba", 2500, 3000, Category::Swallows),
    item(13, "Amala", 2500, 3000, Category::Swallows),
    item(14, "Fufu", 3000, 3500, Category::Swallows),
    item(15, "Pounded Yam", 2500, 3000, Category::Swallows),
];

static PROTEINS: &[CatalogItem] = &[
    item(16, "Pepper Soup", 2800, 3000, Category::Proteins),
    item(17, "Chicken", 2000, 2500, Category::Proteins),
    item(18, "Turkey", 3500, 4000, Category::Proteins),
    item(19, "Fish", 2000, 2500, Category::Proteins),
    item(20, "Assorted", 500, 1000, Category::Proteins),
    item(21, "Goat Meat", 500, 1000, Category::Proteins),
    item(22, "Ponmo", 200, 500, Category::Proteins),
    item(23, "Beef", 500, 500, Category::Proteins),
    item(24, "Egg", 300, 300, Category::Proteins),
];

static BY_ID: LazyLock<HashMap<u32, &'static CatalogItem>> = LazyLock::new(|| {
    all_items().map(|i| (i.id, i)).collect()
});

/// All categories in menu display order.
pub fn categories() -> [Category; 3] {
    [Category::RiceMeals, Category::Swallows, Category::Proteins]
}

/// Items in one category, in menu order.
pub fn category_items(category: Category) -> &'static [CatalogItem] {
    match category {
        Category::RiceMeals => RICE_MEALS,
        Category::Swallows => SWALLOWS,
        Category::Proteins => PROTEINS,
    }
}

/// Look up an item by its catalog-wide id.
pub fn item_by_id(id: u32) -> Option<&'static CatalogItem> {
    BY_ID.get(&id).copied()
}

fn all_items() -> impl Iterator<Item = &'static CatalogItem> {
    RICE_MEALS.iter().chain(SWALLOWS).chain(PROTEINS)
}

/// Human-readable heading for a category in menu messages.
pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::RiceMeals => "Rice Meals",
        Category::Swallows => "Swallow & Solids",
        Category::Proteins => "Proteins / Add-ons",
    }
}

/// Format an amount as naira with thousands separators, e.g. `N2,500`.
pub fn format_naira(amount: Money) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-\u{20a6}{grouped}")
    } else {
        format!("\u{20a6}{grouped}")
    }
}

/// Price text for menu listings: single price when sizes are equal,
/// `reg / ext` otherwise.
pub fn price_label(item: &CatalogItem) -> String {
    if item.has_size_choice() {
        format!(
            "{} / {}",
            format_naira(item.regular),
            format_naira(item.extra)
        )
    } else {
        format_naira(item.regular)
    }
}
