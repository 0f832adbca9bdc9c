use super::*;

fn file(name: &str) -> AssetFile {
    AssetFile::new(name, name.as_bytes().to_vec())
}

fn size(w: u32, h: u32) -> NativeSize {
    NativeSize::new(w, h).unwrap()
}

#[test]
fn replacing_an_asset_keeps_exactly_one_live_url() {
    let mut lib = AssetLibrary::default();
    lib.assign(SlotKind::Base, file("a"));
    let first = lib.slot(SlotKind::Base).display_url().unwrap().to_string();
    lib.assign(SlotKind::Base, file("b"));
    let second = lib.slot(SlotKind::Base).display_url().unwrap().to_string();

    assert_ne!(first, second);
    assert!(!lib.urls().is_live(&first));
    assert!(lib.urls().is_live(&second));
    assert_eq!(lib.urls().live_count(), 1);

    assert!(lib.clear(SlotKind::Base));
    assert_eq!(lib.urls().live_count(), 0);
    assert!(!lib.clear(SlotKind::Base));
}

#[test]
fn stale_decode_is_ignored() {
    let mut lib = AssetLibrary::default();
    let old = lib.assign(SlotKind::Design, file("old"));
    let new = lib.assign(SlotKind::Design, file("new"));

    assert!(!lib.complete(old, size(10, 10)));
    assert!(!lib.slot(SlotKind::Design).is_ready());
    assert_eq!(lib.slot(SlotKind::Design).pending_ticket(), Some(new));

    assert!(lib.complete(new, size(20, 10)));
    assert_eq!(lib.slot(SlotKind::Design).native_size(), Some(size(20, 10)));
    assert_eq!(lib.slot(SlotKind::Design).pending_ticket(), None);
}

#[test]
fn ticket_for_other_slot_is_rejected() {
    let mut slot = AssetSlot::new(SlotKind::Base);
    let urls = UrlRegistry::new();
    let ticket = slot.assign(file("x"), &urls);
    let foreign = DecodeTicket {
        slot: SlotKind::Design,
        generation: ticket.generation,
    };
    assert!(!slot.complete(foreign, size(1, 1)));
}

#[test]
fn pair_is_ready_in_either_completion_order() {
    let mut lib = AssetLibrary::default();
    let b = lib.assign(SlotKind::Base, file("base"));
    let d = lib.assign(SlotKind::Design, file("design"));
    assert!(lib.ready_pair().is_none());

    lib.complete(d, size(5, 5));
    assert!(lib.ready_pair().is_none());
    lib.complete(b, size(50, 50));
    let pair = lib.ready_pair().unwrap();
    assert_eq!(pair, AssetPairKey { base: 1, design: 1 });

    let b2 = lib.assign(SlotKind::Base, file("base2"));
    assert!(lib.ready_pair().is_none());
    lib.complete(b2, size(60, 60));
    assert_eq!(lib.ready_pair().unwrap().base, 2);
}

#[test]
fn asset_file_debug_hides_bytes_and_fingerprint_is_content_based() {
    let a = AssetFile::new("same.png", vec![1u8, 2, 3]);
    let b = AssetFile::new("other.png", vec![1u8, 2, 3]);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.mime(), "application/octet-stream");
    let dbg = format!("{a:?}");
    assert!(dbg.contains("len: 3"));
    assert_eq!(SlotKind::Base.form_field(), "base_photo");
    assert_eq!(SlotKind::Design.form_field(), "design");
}
