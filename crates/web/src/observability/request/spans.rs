//! HTTP span helpers.

use storefront_app::assets::AssetKey;
use uuid::Uuid;

/// Collapse identifiers in a request path so spans and metrics group by route.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{product}");
        } else if AssetKey::parse(segment).is_ok() {
            normalised.push_str("{key}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_product_uuids() {
        let path = format!("/products/{}/edit", Uuid::now_v7());

        assert_eq!(route_label(&path), "/products/{product}/edit");
    }

    #[test]
    fn replaces_asset_keys() {
        let path = format!("/assets/{}.png", Uuid::now_v7().simple());

        assert_eq!(route_label(&path), "/assets/{key}");
    }

    #[test]
    fn keeps_static_segments() {
        assert_eq!(route_label("/"), "/");
        assert_eq!(route_label("/products/new"), "/products/new");
    }
}
