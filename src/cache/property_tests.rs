//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to verify the storage round-trip and key-derivation
//! properties of the store.

use proptest::prelude::*;

use crate::cache::{shard_prefix, FilesystemCacheStore, KeyDeriver};
use crate::config::Config;
use crate::models::{CacheRequest, CacheResponse, Headers};

// == Strategies ==
fn method_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("GET"), Just("POST"), Just("PUT"), Just("HEAD")].prop_map(String::from)
}

fn url_strategy() -> impl Strategy<Value = String> {
    "http://[a-z]{3,10}\\.com/[a-z0-9]{0,12}"
}

/// Header names and values restricted to wire-safe characters: no control
/// characters, no colon in names, no surrounding whitespace.
fn header_strategy() -> impl Strategy<Value = (String, String)> {
    ("[A-Za-z][A-Za-z0-9-]{0,14}", "[a-zA-Z0-9_.;=/-]{1,24}")
}

fn headers_strategy() -> impl Strategy<Value = Headers> {
    prop::collection::vec(header_strategy(), 0..6).prop_map(Headers::from_iter)
}

fn body_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

fn store_in(root: &std::path::Path, use_gzip: bool) -> FilesystemCacheStore {
    FilesystemCacheStore::new(&Config {
        cache_dir: root.to_path_buf(),
        expiration_secs: 0,
        use_gzip,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Derivation is a pure function of request identity.
    #[test]
    fn prop_key_determinism(method in method_strategy(), url in url_strategy(), body in body_strategy()) {
        let keys = KeyDeriver::default();
        let request = CacheRequest::new(method, url).with_body(body);
        prop_assert_eq!(keys.derive(&request), keys.derive(&request));
    }

    // Requests with different URLs essentially never collide.
    #[test]
    fn prop_distinct_urls_distinct_keys(a in url_strategy(), b in url_strategy()) {
        prop_assume!(a != b);
        let keys = KeyDeriver::default();
        let key_a = keys.derive(&CacheRequest::new("GET", a));
        let key_b = keys.derive(&CacheRequest::new("GET", b));
        prop_assert_ne!(key_a, key_b);
    }

    // The entry path always nests under the two-character shard prefix.
    #[test]
    fn prop_entry_path_nests_under_shard(url in url_strategy()) {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(tmp.path(), false);
        let key = store.derive_key(&CacheRequest::new("GET", url));
        let dir = store.entry_path("scope", &key);
        let expected = tmp.path().join("scope").join(shard_prefix(&key)).join(&key);
        prop_assert_eq!(dir, expected);
    }

    // The header wire codec round-trips any wire-safe header set.
    #[test]
    fn prop_headers_wire_round_trip(headers in headers_strategy()) {
        let parsed = Headers::from_raw(&headers.to_raw());
        prop_assert_eq!(parsed, headers);
    }
}

// Disk-touching properties run with fewer cases.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))]

    // Storing a pair and reading it back yields an identical response.
    #[test]
    fn prop_round_trip(
        method in method_strategy(),
        url in url_strategy(),
        request_body in body_strategy(),
        status in 100u16..600,
        headers in headers_strategy(),
        response_body in body_strategy(),
    ) {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = store_in(tmp.path(), false);
        let request = CacheRequest::new(method, url.clone()).with_body(request_body);
        let response = CacheResponse::new(url, status)
            .with_headers(headers)
            .with_body(response_body);

        store.put("scope", &request, &response).unwrap();
        let cached = store.get("scope", &request).unwrap().unwrap();
        prop_assert_eq!(cached, response);
    }

    // The gzip transform is invisible to callers.
    #[test]
    fn prop_round_trip_with_gzip(
        url in url_strategy(),
        response_body in body_strategy(),
    ) {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = store_in(tmp.path(), true);
        let request = CacheRequest::new("GET", url.clone());
        let response = CacheResponse::new(url, 200).with_body(response_body);

        store.put("scope", &request, &response).unwrap();
        let cached = store.get("scope", &request).unwrap().unwrap();
        prop_assert_eq!(cached, response);
    }

    // The second write for a key fully replaces the first.
    #[test]
    fn prop_overwrite_semantics(
        url in url_strategy(),
        first_body in body_strategy(),
        second_body in body_strategy(),
    ) {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = store_in(tmp.path(), false);
        let request = CacheRequest::new("GET", url.clone());

        store.put("scope", &request, &CacheResponse::new(url.clone(), 200).with_body(first_body)).unwrap();
        store.put("scope", &request, &CacheResponse::new(url, 200).with_body(second_body.clone())).unwrap();

        let cached = store.get("scope", &request).unwrap().unwrap();
        prop_assert_eq!(cached.body, second_body);
    }
}
