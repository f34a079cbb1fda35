//! Myers' O(ND) alignment over token slices, in linear space.
//!
//! Each call finds the middle snake of the edit graph by searching forward
//! from the top-left corner and backward from the bottom-right corner at the
//! same time, then recurses on the two halves. Memory stays proportional to
//! `a.len() + b.len()` and the number of `Keep` ops always equals the LCS
//! length.

use std::iter;
use std::ops::{Index, IndexMut, Range};

/// Per-token alignment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditOp {
    /// Token present on both sides.
    Keep,
    /// Token only in the old sequence.
    Delete,
    /// Token only in the new sequence.
    Insert,
}

/// A contiguous stretch of an alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Region {
    /// Matching tokens, as a range into the old sequence.
    Equal(Range<usize>),
    /// Tokens removed from `old` and added from `new`. Either may be empty.
    Change {
        old: Range<usize>,
        new: Range<usize>,
    },
}

fn common_prefix_len(a: &[&str], b: &[&str]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix_len(a: &[&str], b: &[&str]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Lengths of the shared prefix and suffix of two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Affixes {
    prefix: usize,
    suffix: usize,
}

impl Affixes {
    fn of(a: &[&str], b: &[&str]) -> Self {
        let prefix = common_prefix_len(a, b);
        let suffix = common_suffix_len(&a[prefix..], &b[prefix..]);
        Self { prefix, suffix }
    }

    fn middle<'s, 'a>(&self, seq: &'s [&'a str]) -> &'s [&'a str] {
        &seq[self.prefix..seq.len() - self.suffix]
    }
}

/// Nodes in the edit graph of the trimmed middle. Zero when no search is needed.
pub(crate) fn edit_graph_cells(a: &[&str], b: &[&str]) -> usize {
    let affixes = Affixes::of(a, b);
    let n = a.len() - affixes.prefix - affixes.suffix;
    let m = b.len() - affixes.prefix - affixes.suffix;
    if n == 0 || m == 0 {
        0
    } else {
        (n + 1).saturating_mul(m + 1)
    }
}

/// Minimal alignment of `a` against `b`.
pub(crate) fn align(a: &[&str], b: &[&str]) -> Vec<EditOp> {
    let max_d = max_d(a.len(), b.len());
    let mut vf = V::new(max_d);
    let mut vb = V::new(max_d);
    let mut ops = Vec::with_capacity(a.len() + b.len());
    conquer(a, 0..a.len(), b, 0..b.len(), &mut vf, &mut vb, &mut ops);
    ops
}

/// Shared prefix and suffix kept, everything between replaced wholesale.
///
/// Used when the search would be too large; not minimal in general.
pub(crate) fn replace_middle(a: &[&str], b: &[&str]) -> Vec<EditOp> {
    let affixes = Affixes::of(a, b);
    let (old, new) = (affixes.middle(a), affixes.middle(b));

    let mut ops = Vec::with_capacity(a.len() + b.len());
    push_ops(&mut ops, EditOp::Keep, affixes.prefix);
    push_ops(&mut ops, EditOp::Delete, old.len());
    push_ops(&mut ops, EditOp::Insert, new.len());
    push_ops(&mut ops, EditOp::Keep, affixes.suffix);
    ops
}

/// Group per-token ops into equal and change regions.
pub(crate) fn regions(ops: &[EditOp]) -> Vec<Region> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    let mut idx = 0;

    while idx < ops.len() {
        if ops[idx] == EditOp::Keep {
            let start = i;
            while idx < ops.len() && ops[idx] == EditOp::Keep {
                i += 1;
                j += 1;
                idx += 1;
            }
            out.push(Region::Equal(start..i));
        } else {
            let (old_start, new_start) = (i, j);
            while idx < ops.len() && ops[idx] != EditOp::Keep {
                match ops[idx] {
                    EditOp::Delete => i += 1,
                    EditOp::Insert => j += 1,
                    EditOp::Keep => unreachable!(),
                }
                idx += 1;
            }
            out.push(Region::Change {
                old: old_start..i,
                new: new_start..j,
            });
        }
    }

    out
}

fn push_ops(ops: &mut Vec<EditOp>, op: EditOp, count: usize) {
    ops.extend(iter::repeat(op).take(count));
}

/// Upper bound on the number of search rounds for an `n` by `m` graph.
fn max_d(n: usize, m: usize) -> usize {
    (n + m + 1) / 2 + 1
}

/// Furthest-reaching `x` per diagonal `k`, indexed by signed `k`.
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d + 1],
        }
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.v[(k + self.offset) as usize]
    }
}

/// Point where a shortest path crosses the middle of the graph, in absolute indices.
fn find_middle_snake(
    old: &[&str],
    old_range: Range<usize>,
    new: &[&str],
    new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
) -> Option<(usize, usize)> {
    let n = old_range.len();
    let m = new_range.len();

    // Paths from the two corners can only meet on the same diagonal when
    // their lengths have the parity of `delta`.
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;

    vf[1] = 0;
    vb[1] = 0;

    let d_max = max_d(n, m) as isize;
    for d in 0..d_max {
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf[k - 1] < vf[k + 1]) {
                vf[k + 1]
            } else {
                vf[k - 1] + 1
            };
            let y = (x as isize - k) as usize;
            let (x0, y0) = (x, y);

            if x < n && y < m {
                x += common_prefix_len(
                    &old[old_range.start + x..old_range.end],
                    &new[new_range.start + y..new_range.end],
                );
            }
            vf[k] = x;

            if odd && (k - delta).abs() <= d - 1 && vf[k] + vb[-(k - delta)] >= n {
                return Some((old_range.start + x0, new_range.start + y0));
            }
        }

        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb[k - 1] < vb[k + 1]) {
                vb[k + 1]
            } else {
                vb[k - 1] + 1
            };
            let mut y = (x as isize - k) as usize;

            if x < n && y < m {
                let advance = common_suffix_len(
                    &old[old_range.start..old_range.start + n - x],
                    &new[new_range.start..new_range.start + m - y],
                );
                x += advance;
                y += advance;
            }
            vb[k] = x;

            if !odd && (k - delta).abs() <= d && vb[k] + vf[-(k - delta)] >= n {
                return Some((old_range.start + n - x, new_range.start + m - y));
            }
        }
    }

    None
}

fn conquer(
    old: &[&str],
    mut old_range: Range<usize>,
    new: &[&str],
    mut new_range: Range<usize>,
    vf: &mut V,
    vb: &mut V,
    ops: &mut Vec<EditOp>,
) {
    let prefix = common_prefix_len(&old[old_range.clone()], &new[new_range.clone()]);
    push_ops(ops, EditOp::Keep, prefix);
    old_range.start += prefix;
    new_range.start += prefix;

    let suffix = common_suffix_len(&old[old_range.clone()], &new[new_range.clone()]);
    old_range.end -= suffix;
    new_range.end -= suffix;

    if old_range.is_empty() || new_range.is_empty() {
        push_ops(ops, EditOp::Delete, old_range.len());
        push_ops(ops, EditOp::Insert, new_range.len());
    } else if let Some((x, y)) =
        find_middle_snake(old, old_range.clone(), new, new_range.clone(), vf, vb)
    {
        conquer(old, old_range.start..x, new, new_range.start..y, vf, vb, ops);
        conquer(old, x..old_range.end, new, y..new_range.end, vf, vb, ops);
    } else {
        push_ops(ops, EditOp::Delete, old_range.len());
        push_ops(ops, EditOp::Insert, new_range.len());
    }

    push_ops(ops, EditOp::Keep, suffix);
}
