//! Edit script model.

use serde::{Deserialize, Serialize};

/// Classification of a run of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentTag {
    /// Present in both texts.
    Equal,
    /// Present only in the revised text.
    Insert,
    /// Present only in the baseline text.
    Delete,
}

impl SegmentTag {
    /// Swap `Insert` and `Delete`; `Equal` is unchanged.
    pub fn invert(self) -> Self {
        match self {
            SegmentTag::Equal => SegmentTag::Equal,
            SegmentTag::Insert => SegmentTag::Delete,
            SegmentTag::Delete => SegmentTag::Insert,
        }
    }

    /// Whether this tag marks a change.
    pub fn is_change(self) -> bool {
        self != SegmentTag::Equal
    }
}

/// A maximal run of characters sharing one tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    /// How the run is classified.
    pub tag: SegmentTag,
    /// The characters of the run. Never empty.
    pub value: String,
}

impl Segment {
    /// Create a segment.
    pub fn new(tag: SegmentTag, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }
}

/// Character counts per tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    /// Characters kept.
    pub equal: usize,
    /// Characters added.
    pub inserted: usize,
    /// Characters removed.
    pub deleted: usize,
}

/// Ordered sequence of segments turning the baseline into the revision.
///
/// Built through [`EditScript::push`], which merges runs and drops empty
/// values, so no two adjacent segments ever share a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditScript {
    segments: Vec<Segment>,
}

impl EditScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text under `tag`, extending the last segment when the tag matches.
    pub fn push(&mut self, tag: SegmentTag, value: &str) {
        if value.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(last) if last.tag == tag => last.value.push_str(value),
            _ => self.segments.push(Segment::new(tag, value)),
        }
    }

    /// Append every segment of `other`, merging at the seam.
    pub fn extend(&mut self, other: EditScript) {
        for segment in other.segments {
            self.push(segment.tag, &segment.value);
        }
    }

    /// All segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consume the script, returning its segments.
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Iterate over segments.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Is the script empty? Only true when both inputs were empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if there are any changes.
    pub fn has_changes(&self) -> bool {
        self.segments.iter().any(|s| s.tag.is_change())
    }

    /// Number of Insert and Delete segments.
    pub fn change_count(&self) -> usize {
        self.segments.iter().filter(|s| s.tag.is_change()).count()
    }

    /// Reconstruct the baseline text (Equal + Delete).
    pub fn old_text(&self) -> String {
        self.collect_side(SegmentTag::Delete)
    }

    /// Reconstruct the revised text (Equal + Insert).
    pub fn new_text(&self) -> String {
        self.collect_side(SegmentTag::Insert)
    }

    fn collect_side(&self, change: SegmentTag) -> String {
        self.segments
            .iter()
            .filter(|s| s.tag == SegmentTag::Equal || s.tag == change)
            .map(|s| s.value.as_str())
            .collect()
    }

    /// Character counts per tag.
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for segment in &self.segments {
            let n = segment.value.chars().count();
            match segment.tag {
                SegmentTag::Equal => stats.equal += n,
                SegmentTag::Insert => stats.inserted += n,
                SegmentTag::Delete => stats.deleted += n,
            }
        }
        stats
    }

    /// Inserted plus deleted characters.
    pub fn distance(&self) -> usize {
        let stats = self.stats();
        stats.inserted + stats.deleted
    }

    /// Similarity in `[0, 1]`: twice the kept characters over the total length.
    pub fn ratio(&self) -> f64 {
        let stats = self.stats();
        let total = 2 * stats.equal + stats.inserted + stats.deleted;
        if total == 0 {
            1.0
        } else {
            (2 * stats.equal) as f64 / total as f64
        }
    }

    /// The script describing the reverse comparison.
    ///
    /// Every tag is swapped in place; values and their order are unchanged.
    pub fn mirrored(&self) -> EditScript {
        self.segments
            .iter()
            .map(|seg| Segment::new(seg.tag.invert(), seg.value.as_str()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl FromIterator<Segment> for EditScript {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        let mut script = EditScript::new();
        for segment in iter {
            script.push(segment.tag, &segment.value);
        }
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_merges_same_tag() {
        let mut script = EditScript::new();
        script.push(SegmentTag::Equal, "ab");
        script.push(SegmentTag::Equal, "c");
        script.push(SegmentTag::Insert, "x");
        assert_eq!(
            script.segments(),
            &[
                Segment::new(SegmentTag::Equal, "abc"),
                Segment::new(SegmentTag::Insert, "x"),
            ]
        );
    }

    #[test]
    fn push_skips_empty() {
        let mut script = EditScript::new();
        script.push(SegmentTag::Delete, "");
        assert!(script.is_empty());
    }

    #[test]
    fn reconstructs_both_sides() {
        let script: EditScript = vec![
            Segment::new(SegmentTag::Delete, "k"),
            Segment::new(SegmentTag::Insert, "s"),
            Segment::new(SegmentTag::Equal, "itt"),
            Segment::new(SegmentTag::Delete, "e"),
            Segment::new(SegmentTag::Insert, "i"),
            Segment::new(SegmentTag::Equal, "n"),
            Segment::new(SegmentTag::Insert, "g"),
        ]
        .into_iter()
        .collect();
        assert_eq!(script.old_text(), "kitten");
        assert_eq!(script.new_text(), "sitting");
        assert_eq!(script.change_count(), 5);
        assert_eq!(
            script.stats(),
            DiffStats {
                equal: 4,
                inserted: 3,
                deleted: 2
            }
        );
        assert_eq!(script.distance(), 5);
    }

    #[test]
    fn stats_count_chars_not_bytes() {
        let mut script = EditScript::new();
        script.push(SegmentTag::Insert, "héllo");
        assert_eq!(script.stats().inserted, 5);
    }

    #[test]
    fn ratio_bounds() {
        assert_eq!(EditScript::new().ratio(), 1.0);

        let mut same = EditScript::new();
        same.push(SegmentTag::Equal, "abc");
        assert_eq!(same.ratio(), 1.0);

        let mut disjoint = EditScript::new();
        disjoint.push(SegmentTag::Delete, "abc");
        disjoint.push(SegmentTag::Insert, "xyz");
        assert_eq!(disjoint.ratio(), 0.0);
    }

    #[test]
    fn mirrored_swaps_tags_in_place() {
        let mut script = EditScript::new();
        script.push(SegmentTag::Equal, "a");
        script.push(SegmentTag::Delete, "b");
        script.push(SegmentTag::Insert, "c");
        script.push(SegmentTag::Insert, "");
        script.push(SegmentTag::Equal, "d");
        script.push(SegmentTag::Insert, "e");

        let mirror = script.mirrored();
        assert_eq!(
            mirror.segments(),
            &[
                Segment::new(SegmentTag::Equal, "a"),
                Segment::new(SegmentTag::Insert, "b"),
                Segment::new(SegmentTag::Delete, "c"),
                Segment::new(SegmentTag::Equal, "d"),
                Segment::new(SegmentTag::Delete, "e"),
            ]
        );
        assert_eq!(mirror.old_text(), script.new_text());
        assert_eq!(mirror.new_text(), script.old_text());
        assert_eq!(mirror.mirrored(), script);
    }

    #[test]
    fn serializes_as_tagged_array() {
        let mut script = EditScript::new();
        script.push(SegmentTag::Delete, "k");
        script.push(SegmentTag::Insert, "s");
        let json = serde_json::to_string(&script).unwrap();
        assert_eq!(
            json,
            r#"[{"tag":"delete","value":"k"},{"tag":"insert","value":"s"}]"#
        );
        let parsed: EditScript = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, script);
    }
}
