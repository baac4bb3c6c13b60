//! Cache behaviour of the per-family client registries.

use nessie_tree_client::{ApiSettings, Error, TreeApiRegistry};
use std::sync::Arc;

fn registry() -> TreeApiRegistry {
    TreeApiRegistry::new(ApiSettings::default().with_root_url("http://nessie.internal:19120/api"))
        .expect("registry")
}

fn endpoint(i: usize) -> String {
    format!("https://host-{}.example.com/api/v2", i)
}

#[test]
fn test_repeated_lookup_reuses_client() {
    let r = registry();
    let ep = "https://dremio.example.com/nessie/proj-a/api/v1";
    let first = r.tree_api(Some(ep)).unwrap();
    let second = r.tree_api(Some(ep)).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        first.base_path(),
        "https://dremio.example.com/nessieV1/proj-a/api/v1"
    );

    let stats = r.stats().tree_api;
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn test_v1_cache_holds_ten() {
    let r = registry();
    for i in 0..11 {
        r.tree_api(Some(&format!("https://host-{}.example.com/api/v1", i)))
            .unwrap();
    }
    assert_eq!(r.tree_api_cache().len(), 10);
    assert!(!r.tree_api_cache().contains("https://host-0.example.com/api/v1"));
    assert_eq!(r.stats().tree_api.evictions, 1);
}

#[test]
fn test_v2_cache_holds_fifty() {
    let r = registry();
    for i in 0..51 {
        r.api_v2(Some(&endpoint(i))).unwrap();
    }
    assert_eq!(r.api_v2_cache().len(), 50);
    assert!(!r.api_v2_cache().contains(endpoint(0).as_str()));
    assert!(r.api_v2_cache().contains(endpoint(50).as_str()));
}

#[test]
fn test_lru_scenario() {
    let r = TreeApiRegistry::with_capacities(ApiSettings::default(), 2, 2).unwrap();
    let a = r.tree_api(Some("http://a/api/v1")).unwrap();
    let b = r.tree_api(Some("http://b/api/v1")).unwrap();
    let a_hit = r.tree_api(Some("http://a/api/v1")).unwrap();
    assert!(Arc::ptr_eq(&a, &a_hit));
    r.tree_api(Some("http://c/api/v1")).unwrap();
    assert_eq!(r.stats().tree_api.misses, 3);

    // c pushed out b, not a
    let a_still = r.tree_api(Some("http://a/api/v1")).unwrap();
    assert!(Arc::ptr_eq(&a, &a_still));
    assert_eq!(r.stats().tree_api.misses, 3);

    let b_rebuilt = r.tree_api(Some("http://b/api/v1")).unwrap();
    assert!(!Arc::ptr_eq(&b, &b_rebuilt));
    assert_eq!(r.stats().tree_api.misses, 4);
    assert_eq!(r.stats().tree_api.evictions, 2);
}

#[test]
fn test_absent_and_empty_endpoint_share_slot() {
    let r = registry();
    let none = r.api_v2(None).unwrap();
    let empty = r.api_v2(Some("")).unwrap();
    assert!(Arc::ptr_eq(&none, &empty));
    assert_eq!(none.base_path(), "http://nessie.internal:19120/api/v2");
    assert_eq!(r.stats().api_v2.misses, 1);
}

#[test]
fn test_families_are_independent() {
    let r = registry();
    let shared = "http://same.example.com/api";
    r.tree_api(Some(shared)).unwrap();
    r.tree_api(None).unwrap();
    assert_eq!(r.api_v2_cache().len(), 0);
    assert_eq!(r.stats().api_v2, Default::default());

    r.api_v2(Some(shared)).unwrap();
    assert_eq!(r.tree_api_cache().len(), 2);
    assert_eq!(r.api_v2_cache().len(), 1);
    assert_eq!(r.stats().tree_api.misses, 2);
}

#[test]
fn test_failed_construction_retried() {
    let r = registry();
    let bad = "dremio.example.com/nessie/api/v1";
    let first = r.tree_api(Some(bad)).unwrap_err();
    assert!(matches!(first, Error::Configuration { .. }));
    let second = r.tree_api(Some(bad)).unwrap_err();
    assert!(matches!(second, Error::Configuration { .. }));

    let stats = r.stats().tree_api;
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.failures, 2);
    assert!(r.tree_api_cache().is_empty());
}

#[test]
fn test_concurrent_lookups_build_once() {
    let r = Arc::new(registry());
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let r = r.clone();
            std::thread::spawn(move || {
                let ep = if i % 2 == 0 { None } else { Some("") };
                r.tree_api(ep).unwrap()
            })
        })
        .collect();
    let clients: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(clients.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(r.stats().tree_api.misses, 1);
    assert_eq!(r.stats().tree_api.hits, 15);
}
