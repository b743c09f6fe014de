//! Normalize a scraped remote gear list into a new backpack draft.
//!
//! Weights are converted to grams and quantities parsed as numbers. Ids are
//! assigned from two local counters starting at zero: one for categories and
//! one for items across all categories. The draft is a brand new list, so no
//! existing ids need to be avoided.

use hikegear_catalog::{
    BackpackCategory, BackpackDraft, BackpackItem, RemoteItem, RemotePage, WeightUnit,
};

use crate::error::ImportError;

/// Convert a parsed remote page into a backpack draft.
///
/// `None` means the page could not be fetched or parsed and yields
/// [`ImportError::NotFound`].
pub fn import_remote(page: Option<RemotePage>) -> Result<BackpackDraft, ImportError> {
    let page = page.ok_or_else(|| ImportError::not_found("remote list could not be retrieved"))?;

    let mut next_item_id: u32 = 0;
    let mut list = Vec::with_capacity(page.categories.len());

    for (category_id, category) in (0u32..).zip(page.categories) {
        let mut items = Vec::with_capacity(category.items.len());
        for item in category.items {
            items.push(normalize_item(next_item_id, item)?);
            next_item_id += 1;
        }
        list.push(BackpackCategory {
            id: category_id,
            name: category.name,
            items,
        });
    }

    log::debug!(
        "Normalized remote list '{}': {} categories, {} items",
        page.name,
        list.len(),
        next_item_id
    );

    Ok(BackpackDraft {
        name: page.name,
        description: page.description.unwrap_or_default(),
        list,
    })
}

/// Parse a displayed weight and convert it to grams. Blank weights are 0.
///
/// Returns `None` for text that is not a number or whose value in grams is
/// not finite (`NaN`, `inf`, or an overflow after conversion).
pub fn weight_in_grams(weight: &str, unit: WeightUnit) -> Option<f64> {
    let weight = weight.trim();
    if weight.is_empty() {
        return Some(0.0);
    }
    let grams = weight.parse::<f64>().ok()? * unit.grams_per_unit();
    grams.is_finite().then_some(grams)
}

fn normalize_item(id: u32, item: RemoteItem) -> Result<BackpackItem, ImportError> {
    let unit: WeightUnit = item.unit.parse().map_err(|e: String| {
        ImportError::validation("unit", format!("item '{}': {e}", item.name))
    })?;

    let weight = weight_in_grams(&item.weight, unit).ok_or_else(|| {
        ImportError::validation(
            "weight",
            format!("item '{}': cannot parse weight '{}'", item.name, item.weight),
        )
    })?;

    let quantity = parse_quantity(&item.quantity).ok_or_else(|| {
        ImportError::validation(
            "quantity",
            format!(
                "item '{}': cannot parse quantity '{}'",
                item.name, item.quantity
            ),
        )
    })?;

    Ok(BackpackItem {
        id,
        name: item.name,
        description: item.description,
        weight,
        worn: item.worn,
        consumable: item.consumable,
        quantity,
    })
}

fn parse_quantity(quantity: &str) -> Option<f64> {
    let quantity = quantity.trim();
    if quantity.is_empty() {
        return Some(0.0);
    }
    quantity.parse::<f64>().ok().filter(|q| q.is_finite())
}
