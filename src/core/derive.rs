use crate::config::profile::DerivedSkuRule;
use crate::core::StockRecord;

/// Appends the records produced by `rules`. Each rule reads the first scraped
/// record with a matching sku; derived records never feed other rules.
pub fn apply_derived_skus(records: &mut Vec<StockRecord>, rules: &[DerivedSkuRule]) {
    let scraped = records.len();
    for rule in rules {
        if rule.divisor == 0 {
            tracing::warn!("Derived SKU {} has divisor 0, skipping", rule.target);
            continue;
        }
        let Some(source) = records[..scraped].iter().find(|r| r.sku == rule.source) else {
            continue;
        };
        let derived = StockRecord {
            sku: rule.target.clone(),
            quantity: source.quantity / rule.divisor,
            source_url: source.source_url.clone(),
            timestamp: source.timestamp,
        };
        tracing::debug!(
            "Derived {} = {} / {} -> {}",
            derived.sku,
            source.quantity,
            rule.divisor,
            derived.quantity
        );
        records.push(derived);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::profile::SupplierProfile;
    use chrono::Utc;

    fn record(sku: &str, quantity: u64) -> StockRecord {
        StockRecord::new(sku, quantity, "https://supplier.test/gel", Utc::now())
    }

    fn pairs(records: &[StockRecord]) -> Vec<(&str, u64)> {
        records.iter().map(|r| (r.sku.as_str(), r.quantity)).collect()
    }

    #[test]
    fn test_default_gel_rules() {
        let mut records = vec![record("ACGEL250", 50), record("ACGEL5L", 3), record("OTHER", 1)];

        apply_derived_skus(&mut records, &SupplierProfile::default().derived);

        assert_eq!(
            pairs(&records),
            vec![
                ("ACGEL250", 50),
                ("ACGEL5L", 3),
                ("OTHER", 1),
                ("ACGEL5L+", 3),
                ("ACGEL250(2)", 25),
                ("ACGEL250(4)", 12),
                ("ACGEL250(12)", 4),
            ]
        );
        assert_eq!(records[3].source_url, records[1].source_url);
        assert_eq!(records[3].timestamp, records[1].timestamp);
    }

    #[test]
    fn test_missing_source_adds_nothing() {
        let mut records = vec![record("OTHER", 10)];
        apply_derived_skus(&mut records, &SupplierProfile::default().derived);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_first_match_wins_and_derived_do_not_chain() {
        let mut records = vec![record("A", 10), record("A", 99)];
        let rules = vec![DerivedSkuRule::new("A", "B", 2), DerivedSkuRule::new("B", "C", 1)];

        apply_derived_skus(&mut records, &rules);

        assert_eq!(pairs(&records), vec![("A", 10), ("A", 99), ("B", 5)]);
    }
}
