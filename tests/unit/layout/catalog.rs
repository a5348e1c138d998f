use std::io::Cursor;

use super::*;

#[test]
fn default_catalog_is_valid_and_resolves() {
    let cat = TemplateCatalog::default();
    cat.validate().unwrap();

    let r = cat.resolve("1x3-triple", "1x3-kawaii").unwrap();
    assert_eq!(r.layout, LayoutKind::Triple);
    assert_eq!(r.asset, "template/triple/Kawaii.png");
    assert_eq!(r.style, "1x3-kawaii");

    let strip = cat.layout("1x4-strip").unwrap();
    assert_eq!(strip.layout, LayoutKind::FourStrip);
    assert_eq!(strip.styles.len(), 3);
}

#[test]
fn unknown_ids_are_validation_errors() {
    let cat = TemplateCatalog::default();
    assert!(matches!(
        cat.resolve("9x9", "x"),
        Err(PhotoboothError::Validation(_))
    ));
    assert!(matches!(
        cat.resolve("1x1-classic", "1x4-groovy"),
        Err(PhotoboothError::Validation(_))
    ));
}

#[test]
fn catalog_json_rejects_traversal() {
    let json = r#"{
        "layouts": [{
            "id": "1x1-classic",
            "name": "Classic",
            "layout": "1x1",
            "styles": [{ "id": "a", "name": "A", "asset": "../secret.png" }]
        }]
    }"#;
    assert!(TemplateCatalog::from_reader(Cursor::new(json)).is_err());
}

#[test]
fn catalog_json_rejects_duplicate_styles() {
    let json = r#"{
        "layouts": [{
            "id": "1x1-classic",
            "name": "Classic",
            "layout": "1x1",
            "styles": [
                { "id": "a", "name": "A", "asset": "a.png" },
                { "id": "a", "name": "A2", "asset": "b.png" }
            ]
        }]
    }"#;
    assert!(TemplateCatalog::from_reader(Cursor::new(json)).is_err());
}

#[test]
fn normalize_rel_path_cleans_separators() {
    assert_eq!(
        normalize_rel_path("template\\./triple//Boo.png").unwrap(),
        "template/triple/Boo.png"
    );
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("./.").is_err());
    assert!(normalize_rel_path("").is_err());
}

#[test]
fn normalize_rel_path_keeps_assets_under_root() {
    assert_eq!(
        normalize_rel_path(" template/Classic Single.png ").unwrap(),
        "template/Classic Single.png"
    );
    for bad in [
        "C:/frames/a.png",
        "c:\\frames\\a.png",
        "template/../../etc/passwd",
        "\\share\\a.png",
    ] {
        assert!(
            matches!(normalize_rel_path(bad), Err(PhotoboothError::Validation(_))),
            "{bad}"
        );
    }
    let err = normalize_rel_path("a/../b.png").unwrap_err();
    assert!(err.to_string().contains("escapes the assets root"));
}

#[test]
fn select_photos_keeps_first_n() {
    let photos = vec!["a", "b", "c", "d", "e"];
    assert_eq!(select_photos(&photos, LayoutKind::Double), vec!["a", "b"]);
    assert_eq!(
        select_photos(&photos[..1], LayoutKind::FourStrip),
        vec!["a"]
    );
}
