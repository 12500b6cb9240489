use super::common::*;
use crate::valuation::location::{
    CatalogError, LocationAnalysisRequest, LocationAnalyzer, LocationCatalog, LocationError,
};

fn request(location: &str) -> LocationAnalysisRequest {
    LocationAnalysisRequest {
        location: location.to_string(),
    }
}

#[test]
fn catalog_parses_lists_and_summary() {
    let catalog = sample_catalog();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.locations(), vec!["Shelbyville", "Springfield"]);

    let analyzer = LocationAnalyzer::new(catalog);
    let analysis = analyzer
        .analyze(&request("Springfield"))
        .expect("known location");

    assert_eq!(analysis.safety_rating, 6.5);
    assert_eq!(
        analysis.schools,
        vec!["Springfield Elementary", "West Springfield High"]
    );
    assert_eq!(analysis.transport, vec!["Monorail", "Bus 12"]);
    assert_eq!(analysis.summary, "Quiet town with a stable market.");
}

#[test]
fn empty_list_columns_yield_empty_lists() {
    let analyzer = LocationAnalyzer::new(sample_catalog());

    let analysis = analyzer
        .analyze(&request("Shelbyville"))
        .expect("known location");

    assert!(analysis.schools.is_empty());
    assert_eq!(analysis.transport, vec!["Bus 3"]);
}

#[test]
fn lookups_ignore_case_and_padding() {
    let analyzer = LocationAnalyzer::new(sample_catalog());

    let analysis = analyzer
        .analyze(&request("  sPRINGFIELD "))
        .expect("case-insensitive lookup");

    assert_eq!(analysis.location, "Springfield");
}

#[test]
fn repeated_lookups_return_identical_records() {
    let analyzer = LocationAnalyzer::new(sample_catalog());

    let first = analyzer.analyze(&request("Springfield")).expect("first");
    let second = analyzer.analyze(&request("springfield")).expect("second");

    assert_eq!(first, second);
}

#[test]
fn unknown_location_is_not_found() {
    let analyzer = LocationAnalyzer::new(sample_catalog());

    let err = analyzer
        .analyze(&request(" Capital City "))
        .expect_err("not in catalog");

    assert_eq!(err, LocationError::NotFound("Capital City".to_string()));
}

#[test]
fn blank_location_is_invalid_input() {
    let analyzer = LocationAnalyzer::new(sample_catalog());

    match analyzer.analyze(&request("   ")) {
        Err(LocationError::Invalid(err)) => assert_eq!(err.field(), "location"),
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn source_failures_surface_as_source_errors() {
    let analyzer = LocationAnalyzer::new(OfflineSource);

    let err = analyzer
        .analyze(&request("Springfield"))
        .expect_err("source offline");

    assert!(matches!(err, LocationError::Source(_)));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn catalog_rejects_out_of_range_safety_rating() {
    let csv = "location,safety_rating,schools,transport,summary\n\
Ogdenville,4.0,,,Fine.\n\
North Haverbrook,11.5,,,Monorail trouble.\n";

    let err = LocationCatalog::from_reader(csv.as_bytes()).expect_err("rating above 10");

    match err {
        CatalogError::InvalidRow { row, reason } => {
            assert_eq!(row, 3);
            assert!(reason.contains("11.5"));
        }
        other => panic!("expected invalid row, got {other:?}"),
    }
}

#[test]
fn catalog_rejects_duplicate_locations() {
    let csv = "location,safety_rating,schools,transport,summary\n\
Ogdenville,4.0,,,Fine.\n\
ogdenville,5.0,,,Again.\n";

    let err = LocationCatalog::from_reader(csv.as_bytes()).expect_err("duplicate row");

    assert!(err.to_string().contains("duplicate location 'ogdenville'"));
}

#[test]
fn catalog_rejects_malformed_numbers() {
    let csv = "location,safety_rating,schools,transport,summary\nOgdenville,safe,,,Fine.\n";

    let err = LocationCatalog::from_reader(csv.as_bytes()).expect_err("rating not numeric");

    assert!(matches!(err, CatalogError::Csv(_)));
    assert!(err.to_string().starts_with("invalid location catalog data: "));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn row_errors_name_the_row_without_a_source() {
    let csv = "location,safety_rating,schools,transport,summary
,4.0,,,Nameless.
";

    let err = LocationCatalog::from_reader(csv.as_bytes()).expect_err("empty location");

    assert_eq!(err.to_string(), "location catalog row 2: location is empty");
    assert!(std::error::Error::source(&err).is_none());
}

#[test]
fn bundled_catalog_loads() {
    let catalog = LocationCatalog::bundled().expect("bundled catalog parses");

    assert!(!catalog.is_empty());
    assert!(catalog.locations().contains(&"Austin"));
}
