use crate::domain::common::LocationId;
use serde::{Deserialize, Serialize};

/// One `<option>` of a cascade select
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationOption {
    /// `None` for the placeholder ("---------") option
    pub id: Option<LocationId>,
    pub label: String,
    /// Parent key from `data-country-id` / `data-region-id`
    pub parent_id: Option<LocationId>,
}

impl LocationOption {
    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }
}

/// The full option set of one level, as first rendered by the server
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeLevel {
    options: Vec<LocationOption>,
}

impl CascadeLevel {
    pub fn new(options: Vec<LocationOption>) -> Self {
        Self { options }
    }

    /// Options belonging to `parent`, placeholder first.
    ///
    /// With no parent selected only the placeholder remains.
    pub fn children_of(&self, parent: Option<&LocationId>) -> Vec<LocationOption> {
        let placeholder = self.options.iter().find(|o| o.is_placeholder()).cloned();
        let children = self
            .options
            .iter()
            .filter(|o| !o.is_placeholder())
            .filter(|o| parent.is_some() && o.parent_id.as_ref() == parent)
            .cloned();
        placeholder.into_iter().chain(children).collect()
    }

    /// Keeps `current` if it survives filtering, otherwise resets to the placeholder.
    pub fn reconcile(
        &self,
        parent: Option<&LocationId>,
        current: Option<&LocationId>,
    ) -> (Vec<LocationOption>, Option<LocationId>) {
        let options = self.children_of(parent);
        let selected = current
            .filter(|id| options.iter().any(|o| o.id.as_ref() == Some(*id)))
            .cloned();
        (options, selected)
    }
}

/// Selected values across the three levels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSelection {
    pub country: Option<LocationId>,
    pub region: Option<LocationId>,
    pub township: Option<LocationId>,
}

/// Filtered option lists after a change
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeResult {
    pub regions: Vec<LocationOption>,
    pub townships: Vec<LocationOption>,
    pub selection: AddressSelection,
}

/// Region and township levels filtered by their parents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressCascade {
    pub regions: CascadeLevel,
    pub townships: CascadeLevel,
}

impl AddressCascade {
    pub fn new(regions: CascadeLevel, townships: CascadeLevel) -> Self {
        Self { regions, townships }
    }

    /// Re-filters both levels; a region reset cascades to the township.
    pub fn apply(&self, selection: &AddressSelection) -> CascadeResult {
        let (regions, region) = self
            .regions
            .reconcile(selection.country.as_ref(), selection.region.as_ref());
        let (townships, township) = self
            .townships
            .reconcile(region.as_ref(), selection.township.as_ref());
        CascadeResult {
            regions,
            townships,
            selection: AddressSelection {
                country: selection.country.clone(),
                region,
                township,
            },
        }
    }
}
