//! Extraction of a gear list from a shared list page.
//!
//! The page layout is identified purely by class names: a list title, an
//! optional description block, and nested category and item list entries.
//! Item fields are kept as the page displays them; unit conversion and
//! number parsing happen in the import layer.

use std::sync::LazyLock;

use hikegear_catalog::{RemoteCategory, RemoteItem, RemotePage};
use scraper::{ElementRef, Html, Selector};

use crate::client::PageClient;

struct PageSelectors {
    list_name: Selector,
    list_description: Selector,
    category: Selector,
    category_name: Selector,
    item: Selector,
    item_name: Selector,
    item_description: Selector,
    worn: Selector,
    consumable: Selector,
    weight: Selector,
    unit: Selector,
    quantity: Selector,
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static SELECTORS: LazyLock<PageSelectors> = LazyLock::new(|| PageSelectors {
    list_name: selector("h1.lpListName"),
    list_description: selector("#lpListDescription p"),
    category: selector("li.lpCategory"),
    category_name: selector("h2.lpCategoryName"),
    item: selector("li.lpItem"),
    item_name: selector("span.lpName"),
    item_description: selector("span.lpDescription"),
    worn: selector("i.lpSprite.lpWorn.lpActive"),
    consumable: selector("i.lpSprite.lpConsumable.lpActive"),
    weight: selector("span.lpWeight"),
    unit: selector("div.lpUnitSelect span.lpDisplay"),
    quantity: selector("span.lpQtyCell"),
});

/// Concatenated text of the first element matching `sel` under `scope`.
fn first_text(scope: ElementRef<'_>, sel: &Selector) -> Option<String> {
    scope.select(sel).next().map(|el| el.text().collect())
}

/// Parse a list page. Returns `None` when the page has no list title,
/// which is what error and placeholder pages look like.
pub fn parse_page(html: &str) -> Option<RemotePage> {
    let s = &*SELECTORS;
    let document = Html::parse_document(html);
    let root = document.root_element();

    let name = first_text(root, &s.list_name)?.trim().to_string();
    let description = first_text(root, &s.list_description);

    let categories = root
        .select(&s.category)
        .map(|category| RemoteCategory {
            name: first_text(category, &s.category_name)
                .map(|n| n.trim().to_string())
                .unwrap_or_default(),
            items: category
                .select(&s.item)
                .map(|item| parse_item(item, s))
                .collect(),
        })
        .collect();

    Some(RemotePage {
        name,
        description,
        categories,
    })
}

fn parse_item(item: ElementRef<'_>, s: &PageSelectors) -> RemoteItem {
    let text = |sel: &Selector| {
        first_text(item, sel)
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    };
    RemoteItem {
        name: text(&s.item_name),
        description: text(&s.item_description),
        worn: item.select(&s.worn).next().is_some(),
        consumable: item.select(&s.consumable).next().is_some(),
        weight: text(&s.weight),
        unit: text(&s.unit),
        quantity: text(&s.quantity),
    }
}

/// Fetch and parse a remote list.
///
/// Any fetch failure is logged and collapsed to `None`, as is a page
/// without a list.
pub fn scrape_backpack(client: &PageClient, url: &str) -> Option<RemotePage> {
    let html = match client.fetch(url) {
        Ok(html) => html,
        Err(e) => {
            log::warn!("Could not fetch {url}: {e}");
            return None;
        }
    };
    let page = parse_page(&html);
    if page.is_none() {
        log::warn!("No gear list found on {url}");
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_PAGE: &str = r#"
<html><body>
  <h1 class="lpListName">  for testing  </h1>
  <div id="lpListDescription"><p>Two nights in the Tatras</p></div>
  <ul class="lpCategories">
    <li class="lpCategory">
      <h2 class="lpCategoryName">Sleep</h2>
      <ul>
        <li class="lpItem">
          <span class="lpName"> Quilt </span>
          <span class="lpDescription"> 850 fill </span>
          <i class="lpSprite lpWorn"></i>
          <i class="lpSprite lpConsumable"></i>
          <span class="lpWeight">1.2</span>
          <div class="lpUnitSelect"><span class="lpDisplay">kg</span></div>
          <span class="lpQtyCell"> 1 </span>
        </li>
        <li class="lpItem">
          <span class="lpName">Jacket</span>
          <span class="lpDescription"></span>
          <i class="lpSprite lpWorn lpActive"></i>
          <span class="lpWeight">12</span>
          <div class="lpUnitSelect"><span class="lpDisplay">oz</span></div>
          <span class="lpQtyCell">1</span>
        </li>
      </ul>
    </li>
    <li class="lpCategory">
      <h2 class="lpCategoryName">Food</h2>
      <ul>
        <li class="lpItem">
          <span class="lpName">Bars</span>
          <i class="lpSprite lpConsumable lpActive"></i>
          <span class="lpWeight">60</span>
          <div class="lpUnitSelect"><span class="lpDisplay">g</span></div>
          <span class="lpQtyCell">4</span>
        </li>
      </ul>
    </li>
  </ul>
</body></html>
"#;

    #[test]
    fn parses_list_structure() {
        let page = parse_page(LIST_PAGE).unwrap();
        assert_eq!(page.name, "for testing");
        assert_eq!(page.description.as_deref(), Some("Two nights in the Tatras"));
        assert_eq!(page.categories.len(), 2);
        assert_eq!(page.categories[0].name, "Sleep");
        assert_eq!(page.categories[0].items.len(), 2);
        assert_eq!(page.categories[1].items.len(), 1);
    }

    #[test]
    fn item_fields_are_trimmed_text() {
        let page = parse_page(LIST_PAGE).unwrap();
        let quilt = &page.categories[0].items[0];
        assert_eq!(quilt.name, "Quilt");
        assert_eq!(quilt.description, "850 fill");
        assert_eq!(quilt.weight, "1.2");
        assert_eq!(quilt.unit, "kg");
        assert_eq!(quilt.quantity, "1");
    }

    #[test]
    fn flags_need_active_class() {
        let page = parse_page(LIST_PAGE).unwrap();
        let quilt = &page.categories[0].items[0];
        assert!(!quilt.worn);
        assert!(!quilt.consumable);

        let jacket = &page.categories[0].items[1];
        assert!(jacket.worn);
        assert!(!jacket.consumable);

        let bars = &page.categories[1].items[0];
        assert!(bars.consumable);
        assert_eq!(bars.description, "");
    }

    #[test]
    fn missing_description_is_none() {
        let html = r#"<h1 class="lpListName">Bare</h1>"#;
        let page = parse_page(html).unwrap();
        assert_eq!(page.name, "Bare");
        assert_eq!(page.description, None);
        assert!(page.categories.is_empty());
    }

    #[test]
    fn page_without_title_is_none() {
        assert!(parse_page("<html><body><p>List not found</p></body></html>").is_none());
        assert!(parse_page("").is_none());
    }
}
