//! Dashboard table helpers: stacked mobile labels and the shop search box

use crate::shared::dom;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

const STACK_SELECTOR: &str = "[data-stack]";
const SEARCH_INPUT_ID: &str = "expShopSearch";
const SEARCH_ROWS_SELECTOR: &str = "#expShopTable tbody tr";

/// Header text for the cell in column `index`; empty past the last header.
pub fn header_label(headers: &[String], index: usize) -> &str {
    headers.get(index).map(String::as_str).unwrap_or("")
}

/// Case-insensitive substring match of a row's text against the search box.
pub fn row_matches(row_text: &str, query: &str) -> bool {
    row_text.to_lowercase().contains(&query.to_lowercase())
}

fn text_of(el: &Element) -> String {
    el.text_content().unwrap_or_default()
}

fn label_cells(table: &Element) {
    let headers: Vec<String> = dom::query_all(table, "thead th")
        .iter()
        .map(|th| text_of(th).trim().to_string())
        .collect();
    for row in dom::query_all(table, "tbody tr") {
        let cells = row.children();
        for index in 0..cells.length() {
            let Some(cell) = cells.item(index) else {
                continue;
            };
            if let Err(e) = cell.set_attribute("data-label", header_label(&headers, index as usize))
            {
                log::warn!("Failed to label table cell: {:?}", e);
            }
        }
    }
}

/// Copies each `thead th` text into `data-label` of the body cells under it.
pub fn install_stack_labels() -> Result<(), String> {
    for table in dom::query_document(STACK_SELECTOR) {
        label_cells(&table);
    }
    Ok(())
}

/// Filters `#expShopTable` rows as the user types into `#expShopSearch`.
pub fn install_search() -> Result<(), String> {
    let Some(input) = dom::by_id::<HtmlInputElement>(SEARCH_INPUT_ID) else {
        return Ok(());
    };
    let source = input.clone();
    dom::listen(&input, "input", move |_| {
        let query = source.value();
        for row in dom::query_document(SEARCH_ROWS_SELECTOR) {
            let Some(row) = row.dyn_ref::<HtmlElement>() else {
                continue;
            };
            let display = if row_matches(&text_of(row), &query) {
                ""
            } else {
                "none"
            };
            if let Err(e) = row.style().set_property("display", display) {
                log::warn!("Failed to filter row: {:?}", e);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_label() {
        let headers = vec!["Shop".to_string(), "Amount".to_string()];
        assert_eq!(header_label(&headers, 0), "Shop");
        assert_eq!(header_label(&headers, 1), "Amount");
        assert_eq!(header_label(&headers, 2), "");
    }

    #[test]
    fn test_row_matches() {
        assert!(row_matches("Golden Valley Mart  120,000", "golden"));
        assert!(row_matches("Golden Valley Mart", "VALLEY m"));
        assert!(row_matches("anything", ""));
        assert!(!row_matches("Golden Valley Mart", "yangon"));
    }
}
