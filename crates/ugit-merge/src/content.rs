//! Three-way content merge over lines.
//!
//! Diffs base→ours and base→theirs, interleaves non-overlapping changes, and
//! renders overlapping changes as a conflict block. Content that is not valid
//! UTF-8 on every side falls back to a sentinel-framed concatenation of both
//! sides; neither format is a stable interface.

use ugit_diff::{diff_lines, split_lines, Edit, EditOp};

const CONFLICT_OURS: &[u8] = b"<<<<<<< ours\n";
const CONFLICT_SEP: &[u8] = b"=======\n";
const CONFLICT_THEIRS: &[u8] = b">>>>>>> theirs\n";

const BINARY_SENTINEL: &[u8] = b"!binary conflict!\n";
const BINARY_SEP: &[u8] = b"\n!=====!\n";

/// Merge two revisions of one file against their common base.
pub fn merge_content(base: &[u8], ours: &[u8], theirs: &[u8]) -> Vec<u8> {
    // Agreement, or a change on only one side, resolves without looking at
    // the lines.
    if ours == theirs {
        return ours.to_vec();
    }
    if base == ours {
        return theirs.to_vec();
    }
    if base == theirs {
        return ours.to_vec();
    }

    let text = std::str::from_utf8(base).is_ok()
        && std::str::from_utf8(ours).is_ok()
        && std::str::from_utf8(theirs).is_ok();
    if !text {
        let mut out = Vec::with_capacity(
            BINARY_SENTINEL.len() + ours.len() + BINARY_SEP.len() + theirs.len(),
        );
        out.extend_from_slice(BINARY_SENTINEL);
        out.extend_from_slice(ours);
        out.extend_from_slice(BINARY_SEP);
        out.extend_from_slice(theirs);
        return out;
    }

    merge_lines(base, ours, theirs)
}

/// A contiguous run of changes relative to the base.
#[derive(Debug, Clone, Copy)]
struct ChangeRegion {
    base_start: usize,
    base_len: usize,
    new_start: usize,
    new_len: usize,
}

impl ChangeRegion {
    fn base_end(&self) -> usize {
        self.base_start + self.base_len
    }
}

fn merge_lines(base: &[u8], ours: &[u8], theirs: &[u8]) -> Vec<u8> {
    let base_lines = split_lines(base);
    let ours_lines = split_lines(ours);
    let theirs_lines = split_lines(theirs);

    let ours_regions = change_regions(&diff_lines(base, ours));
    let theirs_regions = change_regions(&diff_lines(base, theirs));

    let mut out = Vec::new();
    let mut base_pos = 0;
    let mut oi = 0;
    let mut ti = 0;

    while oi < ours_regions.len() || ti < theirs_regions.len() {
        let o = ours_regions.get(oi).copied();
        let t = theirs_regions.get(ti).copied();

        match (o, t) {
            (Some(o), Some(t)) if region_precedes(&o, &t) => {
                emit(&mut out, &base_lines, base_pos, o.base_start);
                emit(&mut out, &ours_lines, o.new_start, o.new_start + o.new_len);
                base_pos = o.base_end();
                oi += 1;
            }
            (Some(o), Some(t)) if region_precedes(&t, &o) => {
                emit(&mut out, &base_lines, base_pos, t.base_start);
                emit(&mut out, &theirs_lines, t.new_start, t.new_start + t.new_len);
                base_pos = t.base_end();
                ti += 1;
            }
            (Some(o), Some(t)) => {
                // Overlap. Both sides edited the same stretch of the base.
                let span_start = o.base_start.min(t.base_start);
                let span_end = o.base_end().max(t.base_end());
                emit(&mut out, &base_lines, base_pos, span_start);

                let ours_content = collect(&ours_lines, o.new_start, o.new_len);
                let theirs_content = collect(&theirs_lines, t.new_start, t.new_len);
                if ours_content == theirs_content {
                    out.extend_from_slice(&ours_content);
                } else {
                    out.extend_from_slice(CONFLICT_OURS);
                    out.extend_from_slice(&ours_content);
                    out.extend_from_slice(CONFLICT_SEP);
                    out.extend_from_slice(&theirs_content);
                    out.extend_from_slice(CONFLICT_THEIRS);
                }

                base_pos = span_end;
                oi += 1;
                ti += 1;
            }
            (Some(o), None) => {
                emit(&mut out, &base_lines, base_pos, o.base_start);
                let end = o.new_start + o.new_len;
                emit(&mut out, &ours_lines, o.new_start, end);
                base_pos = o.base_end();
                oi += 1;
            }
            (None, Some(t)) => {
                emit(&mut out, &base_lines, base_pos, t.base_start);
                let end = t.new_start + t.new_len;
                emit(&mut out, &theirs_lines, t.new_start, end);
                base_pos = t.base_end();
                ti += 1;
            }
            (None, None) => unreachable!(),
        }
    }

    emit(&mut out, &base_lines, base_pos, base_lines.len());
    out
}

/// Does `a` end strictly before `b` begins?
///
/// Touching regions count as separate only when `a` actually starts earlier;
/// two insertions at the same base point must conflict.
fn region_precedes(a: &ChangeRegion, b: &ChangeRegion) -> bool {
    a.base_end() < b.base_start || (a.base_end() == b.base_start && a.base_start < b.base_start)
}

/// Collapse an edit script into contiguous change regions.
fn change_regions(edits: &[Edit]) -> Vec<ChangeRegion> {
    let mut regions = Vec::new();
    let mut i = 0;

    while i < edits.len() {
        if edits[i].op == EditOp::Equal {
            i += 1;
            continue;
        }

        let base_start = edits[i].old_index;
        let new_start = edits[i].new_index;
        let mut base_end = base_start;
        let mut new_end = new_start;

        while i < edits.len() && edits[i].op != EditOp::Equal {
            match edits[i].op {
                EditOp::Delete => base_end = edits[i].old_index + 1,
                EditOp::Insert => new_end = edits[i].new_index + 1,
                EditOp::Equal => unreachable!(),
            }
            i += 1;
        }

        regions.push(ChangeRegion {
            base_start,
            base_len: base_end - base_start,
            new_start,
            new_len: new_end - new_start,
        });
    }

    regions
}

/// Append `lines[from..to]` (clamped) with newline terminators.
fn emit(out: &mut Vec<u8>, lines: &[&[u8]], from: usize, to: usize) {
    for line in lines.iter().take(to.min(lines.len())).skip(from) {
        out.extend_from_slice(line);
        out.push(b'\n');
    }
}

/// Collect `count` lines starting at `start` into one buffer.
fn collect(lines: &[&[u8]], start: usize, count: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for line in lines.iter().take((start + count).min(lines.len())).skip(start) {
        buf.extend_from_slice(line);
        buf.push(b'\n');
    }
    buf
}
