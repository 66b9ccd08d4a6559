use minijinja_emit::compilation::{Asset, Compilation};
use minijinja_emit::context::{bundle_context, create_context};

fn compilation_with_assets() -> Compilation {
    let mut compilation = Compilation::new();
    compilation.assets.insert("runtime.js".to_string(), Asset::new("r()"));
    compilation.assets.insert(
        "app.css".to_string(),
        Asset::from_chunks(vec![
            "body{margin:0}".to_string(),
            "\n/*# sourceMappingURL=app.css.map*/".to_string(),
        ]),
    );
    compilation.assets.insert("app.js".to_string(), Asset::new("a()"));
    compilation.assets.insert("print.css".to_string(), Asset::new("@media print{}"));
    compilation
}

#[test]
fn test_bundle_metadata_lists_assets_by_suffix() {
    let compilation = compilation_with_assets();
    let bundle = bundle_context(&compilation);

    assert_eq!(bundle["js"], serde_json::json!(["runtime.js", "app.js"]));
    assert_eq!(bundle["css"], serde_json::json!(["app.css", "print.css"]));
}

#[test]
fn test_inline_style_uses_first_style_asset_chunks() {
    let compilation = compilation_with_assets();
    let bundle = bundle_context(&compilation);

    assert_eq!(
        bundle["css_inline"],
        serde_json::json!("body{margin:0}\n/*# sourceMappingURL=app.css.map*/")
    );
}

#[test]
fn test_inline_style_falls_back_to_empty() {
    // No style asset at all.
    let mut compilation = Compilation::new();
    compilation.assets.insert("app.js".to_string(), Asset::new("a()"));
    assert_eq!(bundle_context(&compilation)["css_inline"], serde_json::json!(""));

    // A style asset without the chunked representation.
    compilation.assets.insert("app.css".to_string(), Asset::new("body{}"));
    assert_eq!(bundle_context(&compilation)["css_inline"], serde_json::json!(""));
}

#[test]
fn test_descriptor_context_merged_on_top() {
    let compilation = compilation_with_assets();

    let mut extra = serde_json::Map::new();
    extra.insert("title".to_string(), serde_json::json!("Home"));

    let context = create_context(Some(&extra), &compilation);
    assert_eq!(context["title"], serde_json::json!("Home"));
    assert_eq!(context["bundle"]["css"], serde_json::json!(["app.css", "print.css"]));
}

#[test]
fn test_descriptor_context_can_override_reserved_key() {
    let compilation = compilation_with_assets();

    let mut extra = serde_json::Map::new();
    extra.insert("bundle".to_string(), serde_json::json!({ "js": [] }));

    let context = create_context(Some(&extra), &compilation);
    assert_eq!(context["bundle"], serde_json::json!({ "js": [] }));
}

#[test]
fn test_empty_compilation_metadata() {
    let compilation = Compilation::new();
    let bundle = bundle_context(&compilation);

    assert_eq!(bundle["js"], serde_json::json!([]));
    assert_eq!(bundle["css"], serde_json::json!([]));
    assert_eq!(bundle["css_inline"], serde_json::json!(""));
}
