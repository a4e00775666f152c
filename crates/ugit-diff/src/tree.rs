use ugit_hash::ObjectId;
use ugit_object::FlatTree;

/// Compare two flat snapshots, yielding every path whose blob differs.
///
/// `None` on a side means the path is absent there. Paths come out in sorted
/// order.
pub fn changed_paths(
    from: &FlatTree,
    to: &FlatTree,
) -> Vec<(String, Option<ObjectId>, Option<ObjectId>)> {
    let mut paths: Vec<&String> = from.keys().chain(to.keys()).collect();
    paths.sort();
    paths.dedup();

    let mut out = Vec::new();
    for path in paths {
        let before = from.get(path).copied();
        let after = to.get(path).copied();
        if before != after {
            out.push((path.clone(), before, after));
        }
    }
    out
}
