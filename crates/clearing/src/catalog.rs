//! Catalog index: name-keyed lookups over the static site and bidder config.
//!
//! Built once per run and only read afterwards. Duplicate names are
//! rejected rather than letting a later entry shadow an earlier one.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use common::{Bidder, CatalogConfig, Error, Site};
use tracing::debug;

/// A site prepared for O(1) eligibility checks.
#[derive(Debug, Clone)]
pub struct SiteEntry {
    pub name: String,
    pub floor: f64,
    eligible: HashSet<String>,
}

impl SiteEntry {
    fn new(site: Site) -> Self {
        Self {
            name: site.name,
            floor: site.floor,
            eligible: site.bidders.into_iter().collect(),
        }
    }

    /// Whether `bidder` may transact on this site.
    pub fn can_bid(&self, bidder: &str) -> bool {
        self.eligible.contains(bidder)
    }
}

/// Read-only index of sites and bidders by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sites: HashMap<String, SiteEntry>,
    bidders: HashMap<String, Bidder>,
}

impl Catalog {
    /// Index the given sites and bidders by name.
    ///
    /// Fails with `DuplicateSite` / `DuplicateBidder` on the first repeated
    /// name. Numeric fields are taken as-is.
    pub fn build(sites: Vec<Site>, bidders: Vec<Bidder>) -> Result<Self, Error> {
        let mut site_index = HashMap::with_capacity(sites.len());
        for site in sites {
            match site_index.entry(site.name.clone()) {
                Entry::Occupied(_) => return Err(Error::DuplicateSite(site.name)),
                Entry::Vacant(slot) => {
                    slot.insert(SiteEntry::new(site));
                }
            }
        }

        let mut bidder_index = HashMap::with_capacity(bidders.len());
        for bidder in bidders {
            match bidder_index.entry(bidder.name.clone()) {
                Entry::Occupied(_) => return Err(Error::DuplicateBidder(bidder.name)),
                Entry::Vacant(slot) => {
                    slot.insert(bidder);
                }
            }
        }

        debug!(
            "Catalog built: {} sites, {} bidders",
            site_index.len(),
            bidder_index.len()
        );

        Ok(Self {
            sites: site_index,
            bidders: bidder_index,
        })
    }

    pub fn from_config(config: CatalogConfig) -> Result<Self, Error> {
        Self::build(config.sites, config.bidders)
    }

    pub fn site(&self, name: &str) -> Option<&SiteEntry> {
        self.sites.get(name)
    }

    pub fn bidder(&self, name: &str) -> Option<&Bidder> {
        self.bidders.get(name)
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    pub fn bidder_count(&self) -> usize {
        self.bidders.len()
    }
}
