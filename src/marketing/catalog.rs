//! Variant selection and download descriptor enumeration.
//!
//! Pure transformations from the decoded payload to the flat descriptor
//! sequence the download engine consumes. No I/O happens here; the output
//! is fully determined by (data, format, position).

use crate::config::{FormatFilter, PositionFilter};

use super::data::{DownloadVariant, MarketingData};

/// Extension priority used by [`FormatFilter::Best`]: first present wins.
const BEST_ORDER: [&str; 3] = ["png", "jpg", "tif"];

/// A fully resolved download: output group, target filename, source URL.
///
/// Produced by [`enumerate`], consumed exactly once by the download engine.
/// Carries no identity beyond its field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDescriptor {
    /// Group name, used as the output subdirectory.
    pub group: String,
    /// Target filename: the URL's final path segment, undecoded.
    pub filename: String,
    /// Full source URL.
    pub url: String,
}

/// Collapses a variant list into an ordered (extension, url) mapping.
///
/// Both fields are trimmed. Duplicate extensions keep their first position
/// but take the last URL seen (last-wins), matching the upstream data's
/// mapping semantics.
fn collapse_variants(variants: &[DownloadVariant]) -> Vec<(String, String)> {
    let mut downloads: Vec<(String, String)> = Vec::with_capacity(variants.len());
    for variant in variants {
        let extension = variant.file_extension.trim();
        let url = variant.download_url.trim();
        match downloads.iter_mut().find(|(ext, _)| ext == extension) {
            Some(entry) => entry.1 = url.to_string(),
            None => downloads.push((extension.to_string(), url.to_string())),
        }
    }
    downloads
}

/// Applies the format policy to one item's advertised variants.
///
/// - [`FormatFilter::All`]: every collapsed (extension, url) pair.
/// - [`FormatFilter::Best`]: the single best pair by `png` > `jpg` > `tif`
///   priority; empty when none of the three is offered.
/// - [`FormatFilter::Extension`]: the matching pair, or empty.
///
/// Pure and infallible: an absent extension yields an empty selection,
/// never an error.
#[must_use]
pub fn select_downloads(
    variants: &[DownloadVariant],
    format: &FormatFilter,
) -> Vec<(String, String)> {
    let downloads = collapse_variants(variants);
    match format {
        FormatFilter::All => downloads,
        FormatFilter::Best => BEST_ORDER
            .iter()
            .find_map(|best| downloads.iter().find(|(ext, _)| ext == best))
            .cloned()
            .into_iter()
            .collect(),
        FormatFilter::Extension(wanted) => downloads
            .into_iter()
            .find(|(ext, _)| ext == wanted)
            .into_iter()
            .collect(),
    }
}

/// Returns the substring after the URL's last `/`, with no decoding.
fn filename_from_url(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_string()
}

/// Enumerates download descriptors for the given data and filters.
///
/// Iterates groups in payload order and items in stored order; items whose
/// position slug does not pass `position` are skipped entirely, and the
/// rest contribute one descriptor per pair surviving [`select_downloads`].
///
/// The returned iterator is lazy and borrows `data` and the filters.
pub fn enumerate<'a>(
    data: &'a MarketingData,
    format: &'a FormatFilter,
    position: &'a PositionFilter,
) -> impl Iterator<Item = DownloadDescriptor> + 'a {
    data.groups().iter().flat_map(move |group| {
        group
            .items
            .iter()
            .filter(move |item| position.matches(&item.position_slug))
            .flat_map(move |item| {
                select_downloads(&item.itemdownload_set, format)
                    .into_iter()
                    .map(move |(_, url)| DownloadDescriptor {
                        group: group.name.clone(),
                        filename: filename_from_url(&url),
                        url,
                    })
            })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn variant(extension: &str, url: &str) -> DownloadVariant {
        DownloadVariant {
            file_extension: extension.to_string(),
            download_url: url.to_string(),
        }
    }

    /// The item from the selection scenarios: a png with stray whitespace
    /// in both fields, plus a jpg.
    fn scenario_data() -> MarketingData {
        MarketingData::from_json(
            r#"{
                "banners": {
                    "items": [
                        {
                            "position_slug": "front",
                            "itemdownload_set": [
                                {"file_extension": "png ", "download_url": " http://x/a.png"},
                                {"file_extension": "jpg", "download_url": "http://x/a.jpg"}
                            ]
                        }
                    ]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_select_all_returns_full_mapping() {
        let variants = [variant("png", "http://x/a.png"), variant("jpg", "http://x/a.jpg")];
        let selected = select_downloads(&variants, &FormatFilter::All);
        assert_eq!(
            selected,
            [
                ("png".to_string(), "http://x/a.png".to_string()),
                ("jpg".to_string(), "http://x/a.jpg".to_string()),
            ]
        );
    }

    #[test]
    fn test_select_trims_extension_and_url() {
        let variants = [variant("png ", " http://x/a.png")];
        let selected = select_downloads(&variants, &FormatFilter::All);
        assert_eq!(
            selected,
            [("png".to_string(), "http://x/a.png".to_string())]
        );
    }

    #[test]
    fn test_select_duplicate_extension_last_wins() {
        let variants = [
            variant("png", "http://x/old.png"),
            variant("jpg", "http://x/a.jpg"),
            variant("png", "http://x/new.png"),
        ];
        let selected = select_downloads(&variants, &FormatFilter::All);
        // Last URL wins but the extension keeps its first position
        assert_eq!(
            selected,
            [
                ("png".to_string(), "http://x/new.png".to_string()),
                ("jpg".to_string(), "http://x/a.jpg".to_string()),
            ]
        );
    }

    #[test]
    fn test_select_best_prefers_png() {
        let variants = [
            variant("tif", "http://x/a.tif"),
            variant("jpg", "http://x/a.jpg"),
            variant("png", "http://x/a.png"),
        ];
        let selected = select_downloads(&variants, &FormatFilter::Best);
        assert_eq!(
            selected,
            [("png".to_string(), "http://x/a.png".to_string())]
        );
    }

    #[test]
    fn test_select_best_falls_back_through_priority() {
        let variants = [variant("tif", "http://x/a.tif"), variant("jpg", "http://x/a.jpg")];
        let selected = select_downloads(&variants, &FormatFilter::Best);
        assert_eq!(
            selected,
            [("jpg".to_string(), "http://x/a.jpg".to_string())]
        );

        let variants = [variant("ai", "http://x/a.ai"), variant("tif", "http://x/a.tif")];
        let selected = select_downloads(&variants, &FormatFilter::Best);
        assert_eq!(
            selected,
            [("tif".to_string(), "http://x/a.tif".to_string())]
        );
    }

    #[test]
    fn test_select_best_with_no_known_format_is_empty() {
        let variants = [variant("ai", "http://x/a.ai"), variant("eps", "http://x/a.eps")];
        assert!(select_downloads(&variants, &FormatFilter::Best).is_empty());
    }

    #[test]
    fn test_select_specific_extension_present() {
        let variants = [variant("png", "http://x/a.png"), variant("ai", "http://x/a.ai")];
        let selected =
            select_downloads(&variants, &FormatFilter::Extension("ai".to_string()));
        assert_eq!(selected, [("ai".to_string(), "http://x/a.ai".to_string())]);
    }

    #[test]
    fn test_select_specific_extension_absent_is_empty() {
        let variants = [variant("png", "http://x/a.png")];
        let selected =
            select_downloads(&variants, &FormatFilter::Extension("tif".to_string()));
        assert!(selected.is_empty());
    }

    #[test]
    fn test_select_empty_variants_is_empty() {
        assert!(select_downloads(&[], &FormatFilter::All).is_empty());
        assert!(select_downloads(&[], &FormatFilter::Best).is_empty());
    }

    #[test]
    fn test_filename_from_url_takes_last_segment() {
        assert_eq!(filename_from_url("http://x/path/a.png"), "a.png");
        assert_eq!(filename_from_url("http://x/a%20b.png"), "a%20b.png");
        assert_eq!(filename_from_url("no-slashes"), "no-slashes");
    }

    #[test]
    fn test_enumerate_best_yields_single_descriptor() {
        let data = scenario_data();
        let descriptors: Vec<_> =
            enumerate(&data, &FormatFilter::Best, &PositionFilter::All).collect();

        assert_eq!(
            descriptors,
            [DownloadDescriptor {
                group: "banners".to_string(),
                filename: "a.png".to_string(),
                url: "http://x/a.png".to_string(),
            }]
        );
    }

    #[test]
    fn test_enumerate_all_yields_every_variant() {
        let data = scenario_data();
        let descriptors: Vec<_> =
            enumerate(&data, &FormatFilter::All, &PositionFilter::All).collect();

        let filenames: Vec<&str> = descriptors.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(filenames, ["a.png", "a.jpg"]);
    }

    #[test]
    fn test_enumerate_position_mismatch_yields_nothing() {
        let data = scenario_data();
        let descriptors: Vec<_> = enumerate(
            &data,
            &FormatFilter::All,
            &PositionFilter::Slug("bottom".to_string()),
        )
        .collect();
        assert!(descriptors.is_empty());
    }

    #[test]
    fn test_enumerate_position_slug_filters_items() {
        let data = MarketingData::from_json(
            r#"{
                "banners": {
                    "items": [
                        {
                            "position_slug": "front",
                            "itemdownload_set": [
                                {"file_extension": "png", "download_url": "http://x/front.png"}
                            ]
                        },
                        {
                            "position_slug": "bottom",
                            "itemdownload_set": [
                                {"file_extension": "png", "download_url": "http://x/bottom.png"}
                            ]
                        }
                    ]
                }
            }"#,
        )
        .unwrap();

        let descriptors: Vec<_> = enumerate(
            &data,
            &FormatFilter::All,
            &PositionFilter::Slug("front".to_string()),
        )
        .collect();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].filename, "front.png");
    }

    #[test]
    fn test_enumerate_walks_groups_in_payload_order() {
        let data = MarketingData::from_json(
            r#"{
                "routers": {
                    "items": [
                        {
                            "position_slug": "front",
                            "itemdownload_set": [
                                {"file_extension": "png", "download_url": "http://x/r.png"}
                            ]
                        }
                    ]
                },
                "antennas": {
                    "items": [
                        {
                            "position_slug": "front",
                            "itemdownload_set": [
                                {"file_extension": "png", "download_url": "http://x/n.png"}
                            ]
                        }
                    ]
                }
            }"#,
        )
        .unwrap();

        let groups: Vec<String> = enumerate(&data, &FormatFilter::All, &PositionFilter::All)
            .map(|d| d.group)
            .collect();
        assert_eq!(groups, ["routers", "antennas"]);
    }

    #[test]
    fn test_enumerate_is_deterministic() {
        let data = scenario_data();
        let first: Vec<_> =
            enumerate(&data, &FormatFilter::All, &PositionFilter::All).collect();
        let second: Vec<_> =
            enumerate(&data, &FormatFilter::All, &PositionFilter::All).collect();
        assert_eq!(first, second);
    }
}
