// src/tests/template_tests.rs

use crate::catalog::CollectionKind;
use crate::fetcher::percent_decode;
use crate::templates::components::{listing_href, safe_url};

#[test]
fn listing_hrefs_use_path_encoding() {
    assert_eq!(
        listing_href("business", CollectionKind::Current, "Cafe & Bakery"),
        "/business/listings/Cafe%20%26%20Bakery"
    );
    assert_eq!(
        listing_href("commercial", CollectionKind::Previous, "a+b/c"),
        "/commercial/closed/a%2Bb%2Fc"
    );
}

#[test]
fn hrefs_decode_back_to_the_stored_id() {
    for id in ["Cafe & Bakery", "a+b", "50% off", "plain-id_1", "Über Café #2"] {
        let href = listing_href("s", CollectionKind::Current, id);
        let segment = href.rsplit('/').next().unwrap();
        assert_eq!(percent_decode(segment), id);
    }
    assert_eq!(percent_decode("a+b"), "a+b");
}

#[test]
fn only_web_urls_are_safe() {
    assert_eq!(safe_url("https://img.example/a.jpg"), Some("https://img.example/a.jpg"));
    assert_eq!(safe_url(" http://img.example/a.jpg "), Some("http://img.example/a.jpg"));
    assert_eq!(safe_url("/static/flyer.pdf"), Some("/static/flyer.pdf"));

    assert_eq!(safe_url("javascript:alert(1)"), None);
    assert_eq!(safe_url("data:text/html;base64,AAAA"), None);
    assert_eq!(safe_url("//evil.example/x.jpg"), None);
    assert_eq!(safe_url("https://img.example/a.jpg') ; x: url('y"), None);
    assert_eq!(safe_url("https://img.example/a b.jpg"), None);
}
