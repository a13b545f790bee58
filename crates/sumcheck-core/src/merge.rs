//! Full outer join of two normalized tables on the checksum column.

use std::collections::BTreeMap;

use crate::normalize::NormalizedTable;

/// One row of the joined table. A side is `None` when that table has no
/// row with this checksum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRow {
    pub checksum: String,
    pub left: Option<String>,
    pub right: Option<String>,
}

impl JoinedRow {
    /// Whether both sides hold the same filename. A missing side never agrees.
    pub fn agrees(&self) -> bool {
        match (&self.left, &self.right) {
            (Some(l), Some(r)) => l == r,
            _ => false,
        }
    }
}

#[derive(Default)]
struct Group<'a> {
    left: Vec<&'a str>,
    right: Vec<&'a str>,
}

/// Join `left` and `right` on checksum.
///
/// A checksum with `m` rows on the left and `n` on the right yields `m * n`
/// rows; a checksum on one side only yields one row per entry with the other
/// side empty. Output is ordered by checksum, then left order, then right order.
pub fn outer_join(left: &NormalizedTable, right: &NormalizedTable) -> Vec<JoinedRow> {
    let mut groups: BTreeMap<&str, Group<'_>> = BTreeMap::new();
    for row in &left.rows {
        groups
            .entry(row.checksum.as_str())
            .or_default()
            .left
            .push(row.filename.as_str());
    }
    for row in &right.rows {
        groups
            .entry(row.checksum.as_str())
            .or_default()
            .right
            .push(row.filename.as_str());
    }

    let mut out = Vec::with_capacity(left.len().max(right.len()));
    for (checksum, group) in groups {
        match (group.left.is_empty(), group.right.is_empty()) {
            (false, false) => {
                for l in &group.left {
                    for r in &group.right {
                        out.push(JoinedRow {
                            checksum: checksum.to_string(),
                            left: Some(l.to_string()),
                            right: Some(r.to_string()),
                        });
                    }
                }
            }
            (false, true) => out.extend(group.left.iter().map(|l| JoinedRow {
                checksum: checksum.to_string(),
                left: Some(l.to_string()),
                right: None,
            })),
            (true, false) => out.extend(group.right.iter().map(|r| JoinedRow {
                checksum: checksum.to_string(),
                left: None,
                right: Some(r.to_string()),
            })),
            (true, true) => {}
        }
    }
    out
}
