//! Keeps the region and township selects in step with their parents.
//!
//! The server renders every region and township; options carry
//! `data-country-id` / `data-region-id`. The full sets are read once and
//! the selects are refilled from them on each change.

use crate::shared::dom;
use contracts::domain::a002_address::{
    AddressCascade, AddressSelection, CascadeLevel, LocationOption,
};
use contracts::domain::common::LocationId;
use std::rc::Rc;
use web_sys::{HtmlOptionElement, HtmlSelectElement};

const COUNTRY_ID: &str = "id_country";
const REGION_ID: &str = "id_region";
const TOWNSHIP_ID: &str = "id_township";

/// Every option a select was rendered with
#[derive(Default)]
struct SourceOptions {
    values: Vec<String>,
    elements: Vec<HtmlOptionElement>,
}

struct CascadeSelects {
    country: Option<HtmlSelectElement>,
    region: HtmlSelectElement,
    region_sources: SourceOptions,
    township: Option<HtmlSelectElement>,
    township_sources: SourceOptions,
    cascade: AddressCascade,
}

fn read_level(select: &HtmlSelectElement, parent_attr: &str) -> (CascadeLevel, SourceOptions) {
    let raw = dom::read_options(dom::query_all(select, "option"));
    let sources = SourceOptions {
        values: raw.iter().map(|r| r.value.clone()).collect(),
        elements: raw.iter().map(|r| r.element().clone()).collect(),
    };
    let options = raw
        .into_iter()
        .map(|raw| LocationOption {
            id: LocationId::from_form_value(&raw.value),
            parent_id: raw
                .data(parent_attr)
                .and_then(|p| LocationId::from_form_value(&p)),
            label: raw.text,
        })
        .collect();
    (CascadeLevel::new(options), sources)
}

fn selected(select: &HtmlSelectElement) -> Option<LocationId> {
    LocationId::from_form_value(&select.value())
}

/// Index into `source_values` of each filtered option, in display order
fn source_positions(source_values: &[String], options: &[LocationOption]) -> Vec<usize> {
    options
        .iter()
        .filter_map(|option| {
            let value = option.id.as_ref().map(|id| id.as_str()).unwrap_or("");
            source_values.iter().position(|v| v.trim() == value)
        })
        .collect()
}

/// Refills `select` with copies of the rendered options that survived filtering.
fn fill(
    select: &HtmlSelectElement,
    sources: &SourceOptions,
    options: &[LocationOption],
    value: Option<&LocationId>,
) {
    select.set_inner_html("");
    for index in source_positions(&sources.values, options) {
        let source = &sources.elements[index];
        let copy = match source.clone_node_with_deep(true) {
            Ok(node) => node,
            Err(e) => {
                log::warn!("Failed to copy option {}: {:?}", sources.values[index], e);
                continue;
            }
        };
        if let Err(e) = select.append_child(&copy) {
            log::warn!("Failed to append option {}: {:?}", sources.values[index], e);
        }
    }
    select.set_value(value.map(|id| id.as_str()).unwrap_or(""));
}

impl CascadeSelects {
    fn read() -> Option<Self> {
        let region = dom::by_id::<HtmlSelectElement>(REGION_ID)?;
        let township = dom::by_id::<HtmlSelectElement>(TOWNSHIP_ID);
        let (regions, region_sources) = read_level(&region, "country-id");
        let (townships, township_sources) = match &township {
            Some(t) => read_level(t, "region-id"),
            None => Default::default(),
        };
        Some(Self {
            country: dom::by_id::<HtmlSelectElement>(COUNTRY_ID),
            region,
            region_sources,
            township,
            township_sources,
            cascade: AddressCascade::new(regions, townships),
        })
    }

    /// Country changed: refilter regions, then townships.
    fn on_country_change(&self) {
        let Some(country) = &self.country else {
            self.on_region_change();
            return;
        };
        let result = self.cascade.apply(&AddressSelection {
            country: selected(country),
            region: selected(&self.region),
            township: self.township.as_ref().and_then(selected),
        });
        fill(
            &self.region,
            &self.region_sources,
            &result.regions,
            result.selection.region.as_ref(),
        );
        if let Some(township) = &self.township {
            fill(
                township,
                &self.township_sources,
                &result.townships,
                result.selection.township.as_ref(),
            );
        }
    }

    /// Region changed: refilter townships only.
    fn on_region_change(&self) {
        let Some(township) = &self.township else {
            return;
        };
        let (options, value) = self
            .cascade
            .townships
            .reconcile(selected(&self.region).as_ref(), selected(township).as_ref());
        fill(township, &self.township_sources, &options, value.as_ref());
    }
}

/// Wires the cascade if the page has an address form.
pub fn install() -> Result<(), String> {
    let Some(selects) = CascadeSelects::read() else {
        return Ok(());
    };
    let selects = Rc::new(selects);

    selects.on_country_change();

    if let Some(country) = &selects.country {
        let handler = Rc::clone(&selects);
        dom::listen(country, "change", move |_| handler.on_country_change())?;
    }
    if selects.township.is_some() {
        let handler = Rc::clone(&selects);
        dom::listen(&selects.region, "change", move |_| handler.on_region_change())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: Option<&str>, parent: Option<&str>) -> LocationOption {
        LocationOption {
            id: id.map(LocationId::new),
            label: id.unwrap_or("---------").to_string(),
            parent_id: parent.map(LocationId::new),
        }
    }

    #[test]
    fn test_source_positions_follow_filtered_order() {
        let values: Vec<String> = ["", "r1", "r2", "r3"].iter().map(|v| v.to_string()).collect();
        let filtered = vec![
            option(None, None),
            option(Some("r3"), Some("c1")),
            option(Some("r1"), Some("c1")),
        ];
        assert_eq!(source_positions(&values, &filtered), vec![0, 3, 1]);
    }

    #[test]
    fn test_source_positions_skip_unknown_options() {
        let values: Vec<String> = vec!["".to_string(), "t1".to_string()];
        let filtered = vec![option(None, None), option(Some("t9"), Some("r1"))];
        assert_eq!(source_positions(&values, &filtered), vec![0]);
    }
}
