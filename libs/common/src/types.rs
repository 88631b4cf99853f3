//! Wire types shared by the engine and the driver.

use serde::{Deserialize, Serialize};

use crate::Error;

// ── Catalog Types ─────────────────────────────────────────────────────

/// A site as listed in the catalog config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    /// Bidders allowed to transact on this site.
    #[serde(default)]
    pub bidders: Vec<String>,
    /// Minimum adjusted value required to win a unit (inclusive).
    #[serde(default)]
    pub floor: f64,
}

/// A bidder as listed in the catalog config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bidder {
    pub name: String,
    /// Multiplicative factor applied to raw bids: negative is a haircut,
    /// positive a premium.
    #[serde(default)]
    pub adjustment: f64,
}

impl Bidder {
    /// `bid × (1 + adjustment)`.
    pub fn adjusted_bid(&self, bid: f64) -> f64 {
        bid * (1.0 + self.adjustment)
    }
}

/// Static catalog configuration, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default, alias = "Sites")]
    pub sites: Vec<Site>,
    #[serde(default, alias = "Bidders")]
    pub bidders: Vec<Bidder>,
}

impl CatalogConfig {
    pub fn from_json(input: &str) -> Result<Self, Error> {
        serde_json::from_str(input).map_err(|e| Error::ConfigMalformed(e.to_string()))
    }
}

// ── Auction Types ─────────────────────────────────────────────────────

/// A single sealed bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder: String,
    pub unit: String,
    /// Raw bid value, before the bidder's adjustment.
    #[serde(rename = "bid")]
    pub value: f64,
}

/// One auction instance of the input batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auction {
    #[serde(rename = "site")]
    pub site_name: String,
    /// Units sellable in this auction instance.
    #[serde(default)]
    pub units: Vec<String>,
    #[serde(default)]
    pub bids: Vec<Bid>,
}

/// Decode an auction batch.
pub fn parse_batch(input: &str) -> Result<Vec<Auction>, Error> {
    serde_json::from_str(input).map_err(|e| Error::InputMalformed(e.to_string()))
}

// ── Output Types ──────────────────────────────────────────────────────

/// A winning bid as emitted in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinningBid {
    #[serde(flatten)]
    pub bid: Bid,
    /// Adjusted value the bid cleared at, only present when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_config_lowercase_keys() {
        let cfg = CatalogConfig::from_json(
            r#"{"sites":[{"name":"s1","bidders":["b1"],"floor":10}],
                "bidders":[{"name":"b1","adjustment":-0.1}]}"#,
        )
        .unwrap();
        assert_eq!(cfg.sites.len(), 1);
        assert_eq!(cfg.sites[0].bidders, vec!["b1"]);
        assert_eq!(cfg.sites[0].floor, 10.0);
        assert_eq!(cfg.bidders[0].adjustment, -0.1);
    }

    #[test]
    fn test_catalog_config_capitalised_keys() {
        let cfg = CatalogConfig::from_json(
            r#"{"Sites":[{"name":"s1"}],"Bidders":[{"name":"b1"}]}"#,
        )
        .unwrap();
        assert_eq!(cfg.sites[0].name, "s1");
        assert!(cfg.sites[0].bidders.is_empty(), "missing bidder list defaults to empty");
        assert_eq!(cfg.sites[0].floor, 0.0);
        assert_eq!(cfg.bidders[0].adjustment, 0.0);
    }

    #[test]
    fn test_catalog_config_malformed() {
        let err = CatalogConfig::from_json(r#"{"sites":[{"floor":1}]}"#).unwrap_err();
        assert!(matches!(err, Error::ConfigMalformed(_)), "site without a name: {}", err);
    }

    #[test]
    fn test_parse_batch() {
        let batch = parse_batch(
            r#"[{"site":"s1","units":["u1","u2"],"bids":[{"bidder":"b1","unit":"u1","bid":12.5}]},
                {"site":"s2"}]"#,
        )
        .unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].site_name, "s1");
        assert_eq!(batch[0].bids[0].value, 12.5);
        assert!(batch[1].units.is_empty());
        assert!(batch[1].bids.is_empty());
    }

    #[test]
    fn test_parse_batch_malformed() {
        let err = parse_batch(r#"{"site":"s1"}"#).unwrap_err();
        assert!(matches!(err, Error::InputMalformed(_)), "batch must be an array: {}", err);
    }

    #[test]
    fn test_adjusted_bid() {
        let make = |adjustment| Bidder { name: "b".into(), adjustment };
        assert_eq!(make(0.0).adjusted_bid(42.0), 42.0);
        assert_eq!(make(-1.0).adjusted_bid(42.0), 0.0);
        assert_eq!(make(0.5).adjusted_bid(100.0), 150.0);
    }

    #[test]
    fn test_winning_bid_wire_shape() {
        let plain = WinningBid {
            bid: Bid { bidder: "b1".into(), unit: "u1".into(), value: 12.0 },
            adjusted: None,
        };
        let json = serde_json::to_value(&plain).unwrap();
        assert_eq!(json, serde_json::json!({"bidder": "b1", "unit": "u1", "bid": 12.0}));

        let annotated = WinningBid { adjusted: Some(18.0), ..plain };
        let json = serde_json::to_value(&annotated).unwrap();
        assert_eq!(json["adjusted"], serde_json::json!(18.0));
    }
}
