//! Deterministic status classification of order-export records.
//!
//! Status text is matched by substring against the bucket vocabulary. RTO
//! markers are checked first and short-circuit generic matching; everything
//! else can land in several buckets at once when the text contains several
//! vocabulary names.

use orderdash_core::{
    Bucket, Buckets, CostModel, EngineConfig, FieldAliases, Record, normalize_price,
    resolve_or_zero, status_text,
};

/// What the classifier and aggregator read from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub aliases: FieldAliases,
    pub rto_markers: Vec<String>,
    pub cost: CostModel,
}

impl From<&EngineConfig> for Rules {
    fn from(config: &EngineConfig) -> Self {
        Self {
            aliases: config.effective_aliases(),
            rto_markers: config
                .rto_markers
                .iter()
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
            cost: config.cost,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// Running sums gathered during the classification pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulators {
    pub total_listed: f64,
    pub total_discounted: f64,
    pub delivered_count: usize,
    pub delivered_discounted_total: f64,
    pub door_step_total: f64,
}

/// Result of one classification pass
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub buckets: Buckets,
    pub accumulators: Accumulators,
}

/// Buckets a status belongs to, excluding `all`.
/// Yields `[Other]` when nothing matches.
pub fn classify_status(status: &str, rto_markers: &[String]) -> Vec<Bucket> {
    if rto_markers.iter().any(|m| status.contains(m.as_str())) {
        return vec![Bucket::Rto];
    }

    let matched: Vec<Bucket> = Bucket::generic()
        .filter(|b| status.contains(b.as_str()))
        .collect();

    if matched.is_empty() {
        vec![Bucket::Other]
    } else {
        matched
    }
}

/// Classify every record and accumulate the global sums in the same pass
pub fn classify(records: &[Record], rules: &Rules) -> Classification {
    let mut buckets = Buckets::new();
    let mut acc = Accumulators::default();

    for (index, record) in records.iter().enumerate() {
        let status = status_text(record, &rules.aliases.status);
        buckets.push(Bucket::All, index);

        let listed = normalize_price(resolve_or_zero(record, &rules.aliases.listed_price));
        let discounted = normalize_price(resolve_or_zero(record, &rules.aliases.discounted_price));
        acc.total_listed += listed;
        acc.total_discounted += discounted;

        for bucket in classify_status(&status, &rules.rto_markers) {
            buckets.push(bucket, index);
        }

        // Counted on the raw text, whatever bucket the record went to
        if status.contains(Bucket::Delivered.as_str()) {
            acc.delivered_count += 1;
            acc.delivered_discounted_total += discounted;
        }
        if status.contains(Bucket::DoorStepExchanged.as_str()) {
            acc.door_step_total += rules.cost.door_step_unit_value;
        }
    }

    Classification {
        buckets,
        accumulators: acc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: &str) -> Record {
        Record::new().with("Reason for Credit Entry", status)
    }

    fn markers() -> Vec<String> {
        Rules::default().rto_markers
    }

    #[test]
    fn test_rto_takes_priority() {
        assert_eq!(classify_status("rto_initiated", &markers()), vec![Bucket::Rto]);
        assert_eq!(
            classify_status("rto_complete_delivered", &markers()),
            vec![Bucket::Rto]
        );
    }

    #[test]
    fn test_bare_rto_is_not_matched_generically() {
        assert_eq!(classify_status("rto", &markers()), vec![Bucket::Other]);
    }

    #[test]
    fn test_multiple_substrings() {
        assert_eq!(
            classify_status("shipped_then_cancelled", &markers()),
            vec![Bucket::Cancelled, Bucket::Shipped]
        );
    }

    #[test]
    fn test_unknown_and_empty_go_to_other() {
        assert_eq!(classify_status("", &markers()), vec![Bucket::Other]);
        assert_eq!(classify_status("lost_in_transit", &markers()), vec![Bucket::Other]);
    }

    #[test]
    fn test_all_holds_every_record() {
        let records = vec![order("DELIVERED"), order("weird"), Record::new()];
        let c = classify(&records, &Rules::default());
        assert_eq!(c.buckets.members(Bucket::All), &[0, 1, 2]);
        assert_eq!(c.buckets.members(Bucket::Other), &[1, 2]);
        assert_eq!(c.buckets.members(Bucket::Delivered), &[0]);
    }

    #[test]
    fn test_rto_delivered_counts_as_delivered() {
        let records = vec![order("rto_complete_delivered").with("Discounted Price", "700")];
        let c = classify(&records, &Rules::default());
        assert_eq!(c.buckets.members(Bucket::Rto), &[0]);
        assert_eq!(c.buckets.count(Bucket::Delivered), 0);
        assert_eq!(c.accumulators.delivered_count, 1);
        assert_eq!(c.accumulators.delivered_discounted_total, 700.0);
    }

    #[test]
    fn test_door_step_value() {
        let records = vec![order("door_step_exchanged"), order("Door_Step_Exchanged ")];
        let c = classify(&records, &Rules::default());
        assert_eq!(c.accumulators.door_step_total, 160.0);
        assert_eq!(c.buckets.count(Bucket::DoorStepExchanged), 2);
    }

    #[test]
    fn test_unresolvable_prices_contribute_zero() {
        let records = vec![order("shipped").with("Mystery Column", "₹999")];
        let c = classify(&records, &Rules::default());
        assert_eq!(c.accumulators.total_listed, 0.0);
        assert_eq!(c.accumulators.total_discounted, 0.0);
        assert_eq!(c.buckets.members(Bucket::Shipped), &[0]);
    }

    #[test]
    fn test_global_sums_cover_every_bucket() {
        let records = vec![
            order("delivered")
                .with("Supplier Listed Price", "₹1,000")
                .with("Supplier Discounted Price", "₹800"),
            order("rto_locked")
                .with("Listed Price", 500.0)
                .with("Discounted Price", 450.0),
            order("")
                .with("Supplier Listed Price (Incl. GST + Commission)", "250")
                .with("Supplier Discounted Price (Incl GST and Commission)", "200"),
        ];
        let c = classify(&records, &Rules::default());
        assert_eq!(c.accumulators.total_listed, 1750.0);
        assert_eq!(c.accumulators.total_discounted, 1450.0);
        assert_eq!(c.accumulators.delivered_discounted_total, 800.0);
    }

    #[test]
    fn test_custom_rto_markers_from_config() {
        let config = EngineConfig {
            rto_markers: vec!["  RETURNED ".into(), String::new()],
            ..EngineConfig::default()
        };
        let rules = Rules::from(&config);
        assert_eq!(rules.rto_markers, vec!["returned"]);
        assert_eq!(classify_status("returned_to_seller", &rules.rto_markers), vec![Bucket::Rto]);
    }
}
