//! Render-context construction.
//! Every template sees a reserved key with build-derived metadata (script
//! and style asset names, inlined style content); descriptor-supplied
//! variables are shallow-merged on top and may override it.

use crate::compilation::{Asset, Compilation};
use crate::constants::{BUNDLE_CONTEXT_KEY, SCRIPT_SUFFIX, STYLE_SUFFIX};

/// Builds the context for one render: the reserved key first, then the
/// descriptor's extra variables.
pub fn create_context(
    extra: Option<&serde_json::Map<String, serde_json::Value>>,
    compilation: &Compilation,
) -> serde_json::Value {
    let mut context = serde_json::Map::new();
    context.insert(BUNDLE_CONTEXT_KEY.to_string(), bundle_context(compilation));

    if let Some(extra) = extra {
        for (key, value) in extra {
            context.insert(key.clone(), value.clone());
        }
    }

    serde_json::Value::Object(context)
}

/// Build-derived metadata under the reserved key:
/// - `js`: current asset names ending in `.js`
/// - `css`: current asset names ending in `.css`
/// - `css_inline`: inlined content of the first style asset, empty when
///   there is none
pub fn bundle_context(compilation: &Compilation) -> serde_json::Value {
    let script_assets = assets_with_suffix(compilation, SCRIPT_SUFFIX);
    let style_assets = assets_with_suffix(compilation, STYLE_SUFFIX);

    let style_inline = style_assets
        .first()
        .and_then(|name| compilation.assets.get(name))
        .map(extract_inline_style)
        .unwrap_or_default();

    serde_json::json!({
        "js": script_assets,
        "css": style_assets,
        "css_inline": style_inline,
    })
}

/// Asset names ending in the literal `suffix`, in asset-map order.
pub fn assets_with_suffix(compilation: &Compilation, suffix: &str) -> Vec<String> {
    compilation
        .assets
        .keys()
        .filter(|name| name.ends_with(suffix))
        .cloned()
        .collect()
}

/// Inline text of a style asset: the pre-split content chunk concatenated
/// with the source-map-reference chunk. Assets without that chunked
/// representation yield an empty string; callers must treat the extraction
/// as best-effort.
pub fn extract_inline_style(asset: &Asset) -> String {
    match asset.chunks() {
        [content, map_reference, ..] => format!("{content}{map_reference}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_with_suffix() {
        let mut compilation = Compilation::new();
        compilation.assets.insert("app.js".to_string(), Asset::new("a"));
        compilation.assets.insert("app.css".to_string(), Asset::new("b"));
        compilation.assets.insert("vendor.js".to_string(), Asset::new("c"));
        compilation.assets.insert("app.js.map".to_string(), Asset::new("d"));

        assert_eq!(assets_with_suffix(&compilation, ".js"), vec!["app.js", "vendor.js"]);
        assert_eq!(assets_with_suffix(&compilation, ".css"), vec!["app.css"]);
    }

    #[test]
    fn test_extract_inline_style_requires_chunks() {
        let chunked =
            Asset::from_chunks(vec!["body{}".to_string(), "/*# sourceMappingURL=a */".to_string()]);
        assert_eq!(extract_inline_style(&chunked), "body{}/*# sourceMappingURL=a */");

        let plain = Asset::new("body{}");
        assert_eq!(extract_inline_style(&plain), "");
    }
}
