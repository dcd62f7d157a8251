use super::*;

fn sample() -> Catalog {
    Catalog::sample().unwrap()
}

fn names(items: &[&Produce]) -> Vec<String> {
    items.iter().map(|p| p.name.clone()).collect()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn sample_loads_six_items() {
    let catalog = sample();
    assert_eq!(catalog.len(), 6);
    let bananas = catalog.get("produce-001").unwrap();
    assert_eq!(bananas.name, "Organic Bananas");
    assert_eq!(bananas.location.aisle, "A1");
    assert!(bananas.is_organic);
}

#[test]
fn from_json_rejects_malformed_input() {
    assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Load(_))));
}

#[test]
fn load_reads_file_and_reports_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, SAMPLE).unwrap();
    assert_eq!(Catalog::load(&path).unwrap().len(), 6);

    let missing = dir.path().join("missing.json");
    assert!(matches!(Catalog::load(&missing), Err(CatalogError::Io { .. })));
}

#[test]
fn serialized_items_use_id_key() {
    let catalog = sample();
    let value = serde_json::to_value(catalog.get("produce-002").unwrap()).unwrap();
    assert_eq!(value["id"], "produce-002");
    assert_eq!(value["isLocal"], true);
    assert!(value.get("_id").is_none());
}

// =============================================================================
// List
// =============================================================================

#[test]
fn list_defaults_to_name_order() {
    let catalog = sample();
    let page = catalog.list(&ProduceQuery::default()).unwrap();
    assert_eq!(page.items.len(), 6);
    assert_eq!(page.items[0].name, "Fresh Blueberries");
    assert_eq!(page.pagination.total_pages, 1);
    assert!(!page.pagination.has_next);
}

#[test]
fn list_filters_and_sorts() {
    let catalog = sample();
    let q = ProduceQuery {
        aisle: Some("A1".into()),
        organic: Some("true".into()),
        sort_by: Some("price".into()),
        sort_order: Some("desc".into()),
        ..Default::default()
    };
    let page = catalog.list(&q).unwrap();
    assert_eq!(names(&page.items), ["Fresh Blueberries", "Organic Bananas"]);
}

#[test]
fn list_paginates() {
    let catalog = sample();
    let q = ProduceQuery { limit: Some("4".into()), page: Some("2".into()), ..Default::default() };
    let page = catalog.list(&q).unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total_pages, 2);
    assert!(page.pagination.has_prev);
    assert!(!page.pagination.has_next);

    let q = ProduceQuery { limit: Some("4".into()), page: Some("9".into()), ..Default::default() };
    assert!(catalog.list(&q).unwrap().items.is_empty());
}

#[test]
fn list_propagates_query_errors() {
    let q = ProduceQuery { limit: Some("500".into()), ..Default::default() };
    assert!(matches!(sample().list(&q), Err(CatalogError::InvalidLimit(_))));
}

// =============================================================================
// Other queries
// =============================================================================

#[test]
fn categories_are_distinct_and_sorted() {
    let c = sample().categories();
    assert_eq!(c.categories, ["berries", "fruits", "leafy_greens", "root_vegetables", "vegetables"]);
    assert_eq!(c.aisles, ["A1", "A2", "A3"]);
}

#[test]
fn by_location_sorts_by_shelf_then_name() {
    let catalog = sample();
    assert_eq!(
        names(&catalog.by_location("A1", None)),
        ["Fresh Blueberries", "Honeycrisp Apples", "Organic Bananas"]
    );
    assert_eq!(names(&catalog.by_location("A1", Some("Apples"))), ["Honeycrisp Apples"]);
    assert!(catalog.by_location("Z9", None).is_empty());
}

#[test]
fn low_stock_is_fewest_first() {
    let catalog = sample();
    assert_eq!(names(&catalog.low_stock(50)), ["Fresh Blueberries", "Fresh Spinach"]);
    assert!(catalog.low_stock(LOW_STOCK_THRESHOLD).is_empty());
}

#[test]
fn stats_summarize_sample() {
    let stats = sample().stats(LOW_STOCK_THRESHOLD);
    assert_eq!(stats.total_items, 6);
    assert_eq!((stats.in_stock, stats.out_of_stock, stats.low_stock), (6, 0, 0));
    assert_eq!(stats.categories["fruits"], 2);
    assert_eq!(stats.categories.len(), 5);
    assert!((stats.total_value - 1262.4).abs() < 1e-6);
}

#[test]
fn stats_count_low_and_empty_shelves() {
    let mut items = sample().items().to_vec();
    items[0].stock = 0;
    items[1].stock = 10;
    items[2].stock = 11;
    let stats = Catalog::new(items).stats(LOW_STOCK_THRESHOLD);
    assert_eq!((stats.in_stock, stats.out_of_stock, stats.low_stock), (5, 1, 1));

    let empty = Catalog::default().stats(LOW_STOCK_THRESHOLD);
    assert_eq!(empty.total_items, 0);
    assert!(empty.total_value.abs() < f64::EPSILON);
}

#[test]
fn stats_json_uses_camel_case() {
    let value = serde_json::to_value(sample().stats(LOW_STOCK_THRESHOLD)).unwrap();
    assert_eq!(value["totalItems"], 6);
    assert_eq!(value["outOfStock"], 0);
    assert_eq!(value["categories"]["berries"], 1);
}

#[test]
fn search_ranks_by_matches() {
    let catalog = sample();
    let found = catalog.search("organic fruits", SEARCH_LIMIT).unwrap();
    assert_eq!(found[0].name, "Organic Bananas");
    assert!(found.iter().any(|p| p.name == "Honeycrisp Apples"));
    assert_eq!(catalog.search("fresh", 1).unwrap().len(), 1);
}

#[test]
fn search_requires_text_and_limit() {
    let catalog = sample();
    assert!(matches!(catalog.search("   ", 10), Err(CatalogError::EmptySearch)));
    assert!(matches!(catalog.search("kale", 0), Err(CatalogError::InvalidLimit(_))));
    assert!(catalog.search("kale", 10).unwrap().is_empty());
}
