//! Integration tests for the modgate library API.

use modgate::{
    AnalysisError, CompilationUnit, ModgateError, UnresolvedPolicy, VerdictStatus, VerifyOptions,
    verify, verify_path,
};
use std::path::Path;

fn bookstore() -> Vec<CompilationUnit> {
    vec![
        CompilationUnit::new("orders.OrderService")
            .defines("orders.OrderService.isOrderValid")
            .references("orders.internal.OrderValidator")
            .references("orders.internal.OrderValidator.isValid"),
        CompilationUnit::new("orders.internal.OrderValidator")
            .defines("orders.internal.OrderValidator.isValid"),
        CompilationUnit::new("inventory.InventoryService")
            .references("orders.OrderService")
            .references("orders.OrderService.isOrderValid"),
    ]
}

#[test]
fn test_facade_and_internal_use_pass() {
    let verdict = verify(&bookstore(), &VerifyOptions::default()).unwrap();

    assert_eq!(verdict.status, VerdictStatus::Pass);
    assert!(verdict.violations.is_empty());
    assert!(verdict.cycles.is_empty());

    let names: Vec<_> = verdict.modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["inventory", "orders"]);
}

#[test]
fn test_direct_internal_access_is_single_violation() {
    let mut units = bookstore();
    units[2] = units[2]
        .clone()
        .references("orders.internal.OrderValidator");

    let verdict = verify(&units, &VerifyOptions::default()).unwrap();

    assert_eq!(verdict.status, VerdictStatus::Fail);
    let rendered: Vec<_> = verdict.violations.iter().map(|v| v.to_string()).collect();
    assert_eq!(
        rendered,
        vec!["inventory.InventoryService -> orders.internal.OrderValidator (internal)"]
    );
}

#[test]
fn test_mutual_public_references_form_one_cycle() {
    let units = vec![
        CompilationUnit::new("a.Api").references("b.Api"),
        CompilationUnit::new("b.Api").references("a.Api"),
    ];

    let verdict = verify(&units, &VerifyOptions::default()).unwrap();

    assert!(verdict.violations.is_empty());
    assert_eq!(verdict.cycles.len(), 1);
    assert_eq!(verdict.cycles[0].to_string(), "a -> b -> a");
    assert_eq!(verdict.status, VerdictStatus::Fail);
}

#[test]
fn test_duplicate_definition_produces_no_verdict() {
    let mut units = bookstore();
    units.push(
        CompilationUnit::new("orders.internal.ValidatorCopy")
            .defines("orders.internal.OrderValidator"),
    );

    match verify(&units, &VerifyOptions::default()) {
        Err(ModgateError::Analysis(AnalysisError::DuplicateSymbol { symbol, .. })) => {
            assert_eq!(symbol, "orders.internal.OrderValidator");
        }
        other => panic!("Expected DuplicateSymbol error, got: {:?}", other),
    }
}

#[test]
fn test_unresolved_policy() {
    let mut units = bookstore();
    units[0] = units[0].clone().references("org.springframework.stereotype.Service");

    let verdict = verify(&units, &VerifyOptions::default()).unwrap();
    assert!(verdict.passed());
    assert_eq!(verdict.unresolved.len(), 1);

    let strict = VerifyOptions {
        on_unresolved: Some(UnresolvedPolicy::Fail),
        ..Default::default()
    };
    let err = verify(&units, &strict).unwrap_err();
    assert!(matches!(
        err,
        ModgateError::Analysis(AnalysisError::UnresolvedSymbol { .. })
    ));
}

#[test]
fn test_repeated_runs_render_identically() {
    let units = vec![
        CompilationUnit::new("shipping.Api").references("billing.internal.Ledger"),
        CompilationUnit::new("billing.internal.Ledger").references("shipping.Api"),
        CompilationUnit::new("billing.Api").references("orders.internal.Rules"),
        CompilationUnit::new("orders.internal.Rules").references("billing.Api"),
    ];

    let render = |units: &[CompilationUnit]| {
        let verdict = verify(units, &VerifyOptions::default()).unwrap();
        serde_json::to_string(&verdict).unwrap()
    };

    let first = render(&units);
    assert_eq!(first, render(&units));

    let mut reversed = units.clone();
    reversed.reverse();
    assert_eq!(first, render(&reversed));
}

#[test]
fn test_verify_fixture_with_root_package() {
    let verdict = verify_path(
        Path::new("tests/fixtures/bookstore/bookstore.units.json"),
        &VerifyOptions::default(),
    )
    .unwrap();

    assert!(verdict.passed(), "{:?}", verdict);
    assert_eq!(verdict.modules.len(), 2);
    assert_eq!(verdict.modules[0].depends_on, vec!["orders".to_string()]);
    // Spring annotations are outside the input and get skipped
    assert_eq!(verdict.unresolved.len(), 3);
}

#[test]
fn test_verify_fixture_directory() {
    let verdict = verify_path(Path::new("tests/fixtures/leaky"), &VerifyOptions::default()).unwrap();

    assert_eq!(verdict.status, VerdictStatus::Fail);
    assert_eq!(verdict.violations.len(), 1);
    assert_eq!(
        verdict.violations[0].to_string(),
        "inventory.InventoryService -> orders.internal.OrderValidator (internal)"
    );
    assert_eq!(verdict.cycles.len(), 1);
    assert_eq!(
        verdict.cycles[0].to_string(),
        "inventory -> orders -> inventory"
    );

    let orders_only = verify_path(
        Path::new("tests/fixtures/leaky"),
        &VerifyOptions {
            module: Some("orders".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(orders_only.violations.is_empty());
    assert_eq!(orders_only.cycles.len(), 1);
}

#[test]
fn test_verify_invalid_path() {
    let result = verify_path(Path::new("/nonexistent/units.json"), &VerifyOptions::default());

    match result {
        Err(ModgateError::PathNotFound(_)) => {}
        Err(e) => panic!("Expected PathNotFound error, got: {:?}", e),
        Ok(_) => panic!("Expected error for invalid path"),
    }
}
