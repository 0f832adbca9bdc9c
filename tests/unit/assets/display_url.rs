use super::*;

#[test]
fn drop_releases_url() {
    let reg = UrlRegistry::new();
    let url = reg.acquire(SlotKind::Base);
    let s = url.as_str().to_string();
    assert!(s.starts_with("blob:drape/base/"));
    assert!(reg.is_live(&s));
    assert_eq!(reg.live_count(), 1);

    drop(url);
    assert!(!reg.is_live(&s));
    assert_eq!(reg.live_count(), 0);
}

#[test]
fn urls_are_unique_per_acquire() {
    let reg = UrlRegistry::new();
    let a = reg.acquire(SlotKind::Design);
    let b = reg.acquire(SlotKind::Design);
    assert_ne!(a.as_str(), b.as_str());
    assert_eq!(reg.live_count(), 2);
}
