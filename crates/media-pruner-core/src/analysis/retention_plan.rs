use crate::error::Error;
use crate::model::{AssetGroup, FileEntry, RetentionPlan};
use std::cmp::Ordering;
use tracing::debug;

/// Partition a group into the `keep_count` newest versions and the rest.
///
/// Equal versions (a same-name collision across extensions, say) are ordered
/// by path so the partition is stable from run to run.
pub fn plan(group: &AssetGroup, keep_count: usize) -> Result<RetentionPlan, Error> {
    if keep_count == 0 {
        return Err(Error::InvalidKeepCount(keep_count));
    }
    // Grouping rejects mixed groups, so this only trips on a hand-built group.
    if group.is_mixed() {
        return Err(Error::IncomparableVersions);
    }

    let mut ordered: Vec<FileEntry> = group.members().to_vec();
    ordered.sort_by(newest_first);

    let delete = if ordered.len() > keep_count {
        ordered.split_off(keep_count)
    } else {
        Vec::new()
    };

    debug!(
        "Plan for {}: keep {}, delete {}",
        group.base_name(),
        ordered.len(),
        delete.len()
    );

    Ok(RetentionPlan {
        base_name: group.base_name().to_string(),
        keep: ordered,
        delete,
    })
}

fn newest_first(a: &FileEntry, b: &FileEntry) -> Ordering {
    b.version
        .compare(&a.version)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.path.cmp(&b.path))
}
