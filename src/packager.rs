//! Asset packaging for archive export.
//!
//! Assigns every asset a unique, filesystem-safe filename under the
//! archive's `assets/` folder. The collision counters live in an explicit
//! ordered map so the same asset order always produces the same filename
//! sequence.

use crate::project::Asset;
use crate::utils::sanitize_component;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Build the injective `asset id → filename` map for an asset list.
///
/// Filenames are derived from the asset's declared name (sanitized, with
/// the extension taken from the name or the MIME subtype) and
/// deduplicated with `-2`, `-3`, … suffixes in input order.
pub fn pack_asset_filenames(assets: &[Asset]) -> IndexMap<String, String> {
    let mut map: IndexMap<String, String> = IndexMap::with_capacity(assets.len());
    let mut counters: IndexMap<String, u32> = IndexMap::new();
    let mut taken: HashSet<String> = HashSet::with_capacity(assets.len());

    for (index, asset) in assets.iter().enumerate() {
        let (base, ext) = base_and_ext(asset, index);
        let key = join(&base, &ext);

        let filename = loop {
            let count = counters.entry(key.clone()).or_insert(0);
            *count += 1;
            let candidate = if *count == 1 {
                key.clone()
            } else {
                join(&format!("{}-{}", base, count), &ext)
            };
            // A suffixed name can itself collide with a natural name
            // seen earlier; keep counting until it is free.
            if !taken.contains(&candidate) {
                break candidate;
            }
        };

        taken.insert(filename.clone());
        map.insert(asset.id.clone(), filename);
    }
    map
}

fn join(base: &str, ext: &str) -> String {
    if ext.is_empty() {
        base.to_string()
    } else {
        format!("{}.{}", base, ext)
    }
}

/// Derive the sanitized base name and extension for one asset.
fn base_and_ext(asset: &Asset, index: usize) -> (String, String) {
    let (stem, name_ext) = match asset.name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => (stem, Some(ext)),
        _ => (asset.name.as_str(), None),
    };

    let mut base = sanitize_component(stem);
    if base.is_empty() {
        let primary = asset.mime_type.split('/').next().unwrap_or("");
        let primary = sanitize_component(primary);
        let primary = if primary.is_empty() { "asset" } else { primary.as_str() };
        base = format!("{}-{}", primary, index + 1);
    }

    let ext = match name_ext {
        Some(ext) => sanitize_component(ext),
        None => {
            let subtype = asset
                .mime_type
                .split('/')
                .nth(1)
                .unwrap_or("")
                .split(';')
                .next()
                .unwrap_or("");
            sanitize_component(subtype)
        },
    };

    (base, ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn asset(id: &str, name: &str, mime: &str) -> Asset {
        Asset {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: mime.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_simple_names_pass_through() {
        let assets = vec![asset("a1", "photo.jpg", "image/jpeg")];
        let map = pack_asset_filenames(&assets);
        assert_eq!(map["a1"], "photo.jpg");
    }

    #[test]
    fn test_collisions_get_numeric_suffixes() {
        let assets = vec![
            asset("a1", "photo.jpg", "image/jpeg"),
            asset("a2", "photo.jpg", "image/jpeg"),
            asset("a3", "photo.jpg", "image/jpeg"),
        ];
        let map = pack_asset_filenames(&assets);
        assert_eq!(map["a1"], "photo.jpg");
        assert_eq!(map["a2"], "photo-2.jpg");
        assert_eq!(map["a3"], "photo-3.jpg");
    }

    #[test]
    fn test_suffix_collision_with_natural_name() {
        let assets = vec![
            asset("a1", "photo-2.jpg", "image/jpeg"),
            asset("a2", "photo.jpg", "image/jpeg"),
            asset("a3", "photo.jpg", "image/jpeg"),
        ];
        let map = pack_asset_filenames(&assets);
        assert_eq!(map["a1"], "photo-2.jpg");
        assert_eq!(map["a2"], "photo.jpg");
        // "photo-2.jpg" is taken, so the counter keeps going
        assert_eq!(map["a3"], "photo-3.jpg");
    }

    #[test]
    fn test_unnamed_asset_uses_mime_and_index() {
        let assets = vec![
            asset("a1", "", "image/png"),
            asset("a2", "", "video/mp4"),
        ];
        let map = pack_asset_filenames(&assets);
        assert_eq!(map["a1"], "image-1.png");
        assert_eq!(map["a2"], "video-2.mp4");
    }

    #[test]
    fn test_extension_from_mime_with_parameters() {
        let assets = vec![asset("a1", "clip", "video/mp4; codecs=avc1")];
        let map = pack_asset_filenames(&assets);
        assert_eq!(map["a1"], "clip.mp4");
    }

    #[test]
    fn test_unsafe_names_are_sanitized() {
        let assets = vec![asset("a1", "My Shot (Final).PNG", "image/png")];
        let map = pack_asset_filenames(&assets);
        assert_eq!(map["a1"], "my-shot-final.png");
    }

    proptest! {
        #[test]
        fn prop_filenames_are_injective(
            names in proptest::collection::vec(".{0,24}", 0..16)
        ) {
            let assets: Vec<Asset> = names
                .iter()
                .enumerate()
                .map(|(i, name)| asset(&format!("id-{}", i), name, "image/png"))
                .collect();
            let map = pack_asset_filenames(&assets);
            prop_assert_eq!(map.len(), assets.len());
            let unique: HashSet<&String> = map.values().collect();
            prop_assert_eq!(unique.len(), assets.len());
        }
    }
}
