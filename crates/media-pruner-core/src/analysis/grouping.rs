use crate::error::Error;
use crate::model::{AssetGroup, FileEntry, ListingEntry, SkippedFile};
use crate::naming::{self, VersionFamily, VersionToken};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Files from one directory, bucketed by asset.
#[derive(Debug, Default)]
pub struct Grouping {
    pub groups: BTreeMap<String, AssetGroup>,
    pub unversioned: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

/// Parse and bucket a listing.
///
/// Groups are keyed by the exact parsed base name. Files whose suffix looks
/// like a version but fails to classify are skipped. Mixed families fail the
/// whole listing with `MixedVersionFamilies`; see [`check_families`].
pub fn group(entries: &[ListingEntry]) -> Result<Grouping, Error> {
    let mut grouping = Grouping::default();

    for entry in entries {
        let parsed = naming::parse(&entry.file_name);

        let Some(raw) = parsed.raw_token() else {
            debug!("Unversioned: {}", entry.file_name);
            grouping.unversioned.push(entry.path.clone());
            continue;
        };

        let version = match VersionToken::classify(raw) {
            Ok(version) => version,
            Err(err) if err.is_per_file() => {
                debug!("Skipping file {} - {}", entry.file_name, err);
                grouping.skipped.push(SkippedFile {
                    path: entry.path.clone(),
                    reason: err,
                });
                continue;
            }
            Err(err) => return Err(err),
        };

        let key = parsed.base_name.clone();
        let file = FileEntry {
            path: entry.path.clone(),
            base_name: parsed.base_name,
            extension: parsed.extension,
            version,
        };

        match grouping.groups.get_mut(&key) {
            Some(group) => group.push(file),
            None => {
                grouping.groups.insert(key.clone(), AssetGroup::new(key, file));
            }
        }
    }

    check_families(&grouping.groups)?;

    Ok(grouping)
}

/// Reject an asset carrying both date and sequence versions.
///
/// That is either one base name holding both families, or a date group `X_`
/// (from `X_vYYYYMMDD`) next to a sequence group `X` (from `X_vN`). The
/// latter is reported under `X`, with the sequence files listed first.
pub fn check_families(groups: &BTreeMap<String, AssetGroup>) -> Result<(), Error> {
    for group in groups.values() {
        group.check_single_family()?;
    }

    for (base_name, date_group) in groups {
        if date_group.family() != VersionFamily::Date {
            continue;
        }
        let Some(stem) = base_name.strip_suffix('_') else {
            continue;
        };
        let Some(sequence_group) = groups.get(stem) else {
            continue;
        };
        if sequence_group.family() != VersionFamily::Sequence {
            continue;
        }

        debug!(
            "Mixed version types found for {}: {} and {} are one asset",
            stem, stem, base_name
        );
        return Err(Error::MixedVersionFamilies {
            base_name: stem.to_string(),
            files: sequence_group
                .members()
                .iter()
                .chain(date_group.members())
                .map(|m| m.path.clone())
                .collect(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(names: &[&str]) -> Vec<ListingEntry> {
        names
            .iter()
            .map(|name| ListingEntry::new(format!("/media/{}", name), *name))
            .collect()
    }

    #[test]
    fn test_near_identical_base_names_stay_apart() {
        let grouping = group(&listing(&[
            "shot__v1.mov",
            "shot_v2.mov",
            "platev20240101.mov",
            "plate_v20240102.mov",
        ]))
        .unwrap();

        let keys: Vec<&str> = grouping.groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["plate", "plate_", "shot", "shot_"]);
        assert!(grouping.groups.values().all(|g| g.len() == 1));
    }

    #[test]
    fn test_one_base_name_with_both_families_fails() {
        let err = group(&listing(&["plate_v20240101.mov", "plate__v3.mov"])).unwrap_err();
        assert!(
            matches!(err, Error::MixedVersionFamilies { ref base_name, ref files } if base_name == "plate_" && files.len() == 2)
        );
    }

    #[test]
    fn test_groups_by_base_name() {
        let grouping = group(&listing(&[
            "shot_v20240101.mov",
            "shot_v20240201.png",
            "render_v1.mov",
            "render_v2.mov",
            "logo.png",
        ]))
        .unwrap();

        assert_eq!(grouping.groups.len(), 2);
        assert_eq!(grouping.groups["shot_"].len(), 2);
        assert_eq!(grouping.groups["shot_"].family(), VersionFamily::Date);
        assert_eq!(grouping.groups["render"].len(), 2);
        assert_eq!(grouping.groups["render"].family(), VersionFamily::Sequence);
        assert_eq!(grouping.unversioned, vec![PathBuf::from("/media/logo.png")]);
        assert!(grouping.skipped.is_empty());
    }

    #[test]
    fn test_invalid_dates_are_skipped_not_fatal() {
        let grouping = group(&listing(&[
            "shot_v20240230.mov",
            "shot_v20240101.mov",
        ]))
        .unwrap();

        assert_eq!(grouping.skipped.len(), 1);
        assert_eq!(grouping.skipped[0].file_name(), "shot_v20240230.mov");
        assert!(matches!(grouping.skipped[0].reason, Error::InvalidDate(_)));
        assert_eq!(grouping.groups["shot_"].len(), 1);
    }

    #[test]
    fn test_sequence_overflow_is_skipped() {
        let grouping = group(&listing(&["big_v99999999999999999999.mov"])).unwrap();
        assert!(grouping.groups.is_empty());
        assert!(matches!(
            grouping.skipped[0].reason,
            Error::InvalidSequence(_)
        ));
    }

    #[test]
    fn test_mixed_families_fail() {
        let err = group(&listing(&["a_v20240101.mov", "a_v2.mov", "b_v1.mov"])).unwrap_err();
        match err {
            Error::MixedVersionFamilies { base_name, files } => {
                assert_eq!(base_name, "a");
                assert_eq!(files.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
