use chrono::{TimeZone, Utc};
use stock_scraper::core::PageParser;
use stock_scraper::{ProductFormParser, SupplierProfile};

const SUPPLIER_PAGE: &str = include_str!("fixtures/supplier_page.html");

#[test]
fn test_fixture_yields_expected_stock() {
    let parser = ProductFormParser::new(&SupplierProfile::default().selectors).unwrap();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();

    let records = parser.parse(SUPPLIER_PAGE, "https://aloe.test/order", at);

    let pairs: Vec<(&str, u64)> = records
        .iter()
        .map(|r| (r.sku.as_str(), r.quantity))
        .collect();
    // ACCRM500 has no quantity input and is skipped.
    assert_eq!(
        pairs,
        vec![
            ("ACGEL5L", 14),
            ("ACGEL250", 250),
            ("ACCRM100", 0),
            ("ACSPR200", 36),
        ]
    );
    assert!(records
        .iter()
        .all(|r| r.source_url == "https://aloe.test/order" && r.timestamp == at));
}

#[test]
fn test_columns_outside_containers_are_ignored() {
    let parser = ProductFormParser::new(&SupplierProfile::default().selectors).unwrap();

    let records = parser.parse(SUPPLIER_PAGE, "https://aloe.test/order", Utc::now());

    assert!(records.iter().all(|r| r.sku != "Menu" && r.sku != "Contact"));
}
