use tracing::{debug, error, info};

use crate::address::geography::ReferenceTree;
use crate::address::prefill::Prefill;
use crate::address::source::ReferenceSource;
use crate::dom::{option, placeholder_option, Document, NodeId};

pub const COUNTRY_PLACEHOLDER: &str = "Select Country";
pub const PROVINCE_PLACEHOLDER: &str = "Select Province";
pub const CITY_PLACEHOLDER: &str = "Select City/Municipality";

/// Element ids of the three dependent selectors.
#[derive(Debug, Clone)]
pub struct AddressIds {
    pub country: &'static str,
    pub province: &'static str,
    pub city: &'static str,
}

impl Default for AddressIds {
    fn default() -> Self {
        Self {
            country: "country",
            province: "province",
            city: "city",
        }
    }
}

/// How far a prefill replay got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Restored {
    Nothing,
    Country,
    Province,
    City,
}

/// Keeps country → province → city selectors consistent with the reference
/// tree. Province options always belong to the selected country and city
/// options to the selected province: every repopulation starts by resetting
/// the dependent lists to their placeholder.
#[derive(Debug, Clone)]
pub struct AddressCascade {
    country: NodeId,
    province: NodeId,
    city: NodeId,
    tree: Option<ReferenceTree>,
}

impl AddressCascade {
    /// Binds to the three selectors; `None` unless all of them exist.
    pub fn bind(document: &Document, ids: &AddressIds) -> Option<Self> {
        let lookup = |id: &str| {
            let found = document.element_by_id(id);
            if found.is_none() {
                debug!(id, "Address selector not found; cascade not wired");
            }
            found
        };
        Some(Self {
            country: lookup(ids.country)?,
            province: lookup(ids.province)?,
            city: lookup(ids.city)?,
            tree: None,
        })
    }

    pub fn country_select(&self) -> NodeId {
        self.country
    }

    pub fn province_select(&self) -> NodeId {
        self.province
    }

    pub fn city_select(&self) -> NodeId {
        self.city
    }

    pub fn tree(&self) -> Option<&ReferenceTree> {
        self.tree.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.tree.is_some()
    }

    /// Fetches the reference tree once. A failure is logged and leaves the
    /// cascade without data (no retry); returns whether data is available.
    pub async fn load_reference_data(&mut self, source: &dyn ReferenceSource) -> bool {
        if self.tree.is_some() {
            return true;
        }
        match source.fetch().await {
            Ok(tree) => {
                info!(
                    source = %source.describe(),
                    countries = tree.countries().len(),
                    "Reference geography loaded"
                );
                self.tree = Some(tree);
                true
            }
            Err(e) => {
                error!(
                    source = %source.describe(),
                    code = e.code(),
                    "Failed to load reference geography: {e}"
                );
                false
            }
        }
    }

    /// Fills the country selector from the tree when the markup supplied no
    /// real (non-empty-valued) options. Returns the number of options added.
    pub fn populate_countries(&self, document: &mut Document) -> usize {
        let Some(tree) = &self.tree else {
            return 0;
        };
        let has_real_options = document
            .options(self.country)
            .into_iter()
            .any(|o| !document.option_value(o).is_empty());
        if has_real_options {
            return 0;
        }

        if document.options(self.country).is_empty() {
            document.append(self.country, &placeholder_option(COUNTRY_PLACEHOLDER));
        }
        for country in tree.countries() {
            document.append(self.country, &option(&country.name, &country.name));
        }
        tree.countries().len()
    }

    /// Resets province and city lists, then lists `country`'s provinces.
    pub fn populate_provinces(&self, document: &mut Document, country: &str) {
        let provinces = self
            .tree
            .as_ref()
            .map(|t| t.province_names(country))
            .unwrap_or_default();
        if provinces.is_empty() && !country.is_empty() {
            debug!(country, "No provinces for country");
        }
        replace_options(document, self.province, PROVINCE_PLACEHOLDER, &provinces);
        replace_options(document, self.city, CITY_PLACEHOLDER, &[]);
    }

    /// Resets the city list, then lists the cities of `province` in `country`.
    pub fn populate_cities(&self, document: &mut Document, country: &str, province: &str) {
        let cities = self
            .tree
            .as_ref()
            .map(|t| t.city_names(country, province))
            .unwrap_or_default();
        if cities.is_empty() && !province.is_empty() {
            debug!(country, province, "No cities for province");
        }
        replace_options(document, self.city, CITY_PLACEHOLDER, &cities);
    }

    pub fn on_country_change(&self, document: &mut Document) {
        let country = document.value(self.country);
        self.populate_provinces(document, &country);
    }

    pub fn on_province_change(&self, document: &mut Document) {
        let country = document.value(self.country);
        let province = document.value(self.province);
        self.populate_cities(document, &country, &province);
    }

    /// Startup sequence: load the tree, fill countries if the markup has
    /// none, expand a country pre-selected in markup, then replay `prefill`.
    pub async fn start(
        &mut self,
        document: &mut Document,
        source: &dyn ReferenceSource,
        prefill: &Prefill,
    ) -> Restored {
        self.load_reference_data(source).await;
        self.populate_countries(document);

        let preselected = document.value(self.country);
        if !preselected.is_empty() {
            self.populate_provinces(document, &preselected);
        }

        let restored = self.apply_prefill(document, prefill);
        info!(?restored, "Address prefill applied");
        restored
    }

    /// Selects each prefilled level in turn, stopping at the first level
    /// that is absent or not among the available options.
    pub fn apply_prefill(&self, document: &mut Document, prefill: &Prefill) -> Restored {
        let Some(country) = prefill.country() else {
            return Restored::Nothing;
        };
        document.set_value(self.country, country);
        let country = document.value(self.country);
        self.populate_provinces(document, &country);
        if country.is_empty() {
            return Restored::Nothing;
        }

        let Some(province) = prefill.province() else {
            return Restored::Country;
        };
        document.set_value(self.province, province);
        let province = document.value(self.province);
        self.populate_cities(document, &country, &province);
        if province.is_empty() {
            return Restored::Country;
        }

        let Some(city) = prefill.city() else {
            return Restored::Province;
        };
        document.set_value(self.city, city);
        if document.value(self.city).is_empty() {
            Restored::Province
        } else {
            Restored::City
        }
    }
}

fn replace_options(document: &mut Document, select: NodeId, placeholder: &str, items: &[&str]) {
    document.clear_children(select);
    document.append(select, &placeholder_option(placeholder));
    for item in items {
        document.append(select, &option(item, item));
    }
}
