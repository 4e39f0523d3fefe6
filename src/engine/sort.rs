//! Row ordering.
//!
//! Sorting never touches row content: it computes a permutation of row
//! positions and, for the no-op cases, hands back the input untouched.
//!
//! Null policy for the built-in comparator: nulls (and values that cannot be
//! read as the column's type) are greater than every value, so they land at
//! the end when ascending and at the start when descending.

use crate::engine::column::{Column, ColumnSet, ColumnType, call_guarded};
use crate::engine::dates::timestamp_millis;
use crate::engine::resolve::resolve;
use crate::profile_scope;
use crate::types::{CellValue, Row};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::panic::{AssertUnwindSafe, catch_unwind};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

// ============================================================================
// Sort Specification
// ============================================================================

/// Direction of a column's sort. `None` is never stored in a [`SortSpec`]
/// by the header cycle; it exists for indicator rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    /// Next direction in the header cycle: none -> ascending -> descending -> none.
    pub fn next(self) -> Self {
        match self {
            SortDirection::None => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::None,
        }
    }
}

/// The single active sort.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

// ============================================================================
// Header Interaction
// ============================================================================

/// Sort state driven by header clicks. Holds at most one spec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SortState {
    spec: Option<SortSpec>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spec(&self) -> Option<&SortSpec> {
        self.spec.as_ref()
    }

    pub fn set(&mut self, spec: Option<SortSpec>) {
        self.spec = spec.filter(|s| s.direction != SortDirection::None);
    }

    pub fn clear(&mut self) {
        self.spec = None;
    }

    /// Apply a header click on `field`.
    ///
    /// The same column cycles ascending -> descending -> unsorted; any other
    /// column replaces the current sort and starts at ascending. Clicks on
    /// unknown or non-sortable columns are ignored.
    pub fn toggle(&mut self, field: &str, columns: &ColumnSet) -> SortDirection {
        match columns.get(field) {
            Some(column) if column.sortable => {}
            _ => {
                tracing::debug!(field, "Ignoring header click on unsortable column");
                return self.direction_for(field);
            }
        }

        let next = self.direction_for(field).next();
        self.spec = match next {
            SortDirection::None => None,
            direction => Some(SortSpec {
                field: field.to_string(),
                direction,
            }),
        };
        tracing::debug!(field, direction = ?next, "Sort changed");
        next
    }

    /// Direction to show on `field`'s header.
    pub fn direction_for(&self, field: &str) -> SortDirection {
        match &self.spec {
            Some(spec) if spec.field == field => spec.direction,
            _ => SortDirection::None,
        }
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Sorted view of `rows`. Every no-op case borrows the input slice itself.
pub fn sort_rows<'a>(
    rows: &'a [Row],
    spec: Option<&SortSpec>,
    columns: &ColumnSet,
) -> Cow<'a, [Row]> {
    if active_column(spec, columns).is_none() {
        return Cow::Borrowed(rows);
    }
    let order = sorted_order(rows, spec, columns);
    Cow::Owned(order.into_iter().map(|i| rows[i].clone()).collect())
}

/// Permutation of row positions in display order. Identity when there is
/// nothing to sort by.
pub fn sorted_order(rows: &[Row], spec: Option<&SortSpec>, columns: &ColumnSet) -> Vec<usize> {
    profile_scope!("sorted_order");
    let identity: Vec<usize> = (0..rows.len()).collect();

    let Some((column, ascending)) = active_column(spec, columns) else {
        return identity;
    };

    let mut order = identity.clone();
    let sorted = catch_unwind(AssertUnwindSafe(|| match &column.sort_comparator {
        Some(comparator) => {
            let field = column.field.as_str();
            order.sort_by(|&a, &b| {
                call_guarded("sortComparator", field, Ordering::Equal, || {
                    comparator(&rows[a], &rows[b], field, ascending)
                })
            });
        }
        None => {
            let keys: Vec<SortKey> = rows.iter().map(|row| SortKey::new(row, column)).collect();
            order.sort_by(|&a, &b| {
                let ord = keys[a].cmp_natural(&keys[b]);
                if ascending { ord } else { ord.reverse() }
            });
        }
    }));

    match sorted {
        Ok(()) => order,
        Err(_) => {
            // An inconsistent comparator can make the sort itself bail out.
            tracing::warn!(field = %column.field, "Sort aborted, keeping input order");
            identity
        }
    }
}

/// The column to sort by and whether ascending, if the spec is actionable.
fn active_column<'c>(spec: Option<&SortSpec>, columns: &'c ColumnSet) -> Option<(&'c Column, bool)> {
    let spec = spec?;
    let ascending = match spec.direction {
        SortDirection::Ascending => true,
        SortDirection::Descending => false,
        SortDirection::None => return None,
    };
    let column = columns.get(&spec.field)?;
    if !column.sortable {
        return None;
    }
    Some((column, ascending))
}

/// Pre-computed comparison key for one row under one column.
#[derive(Debug, PartialEq)]
enum SortKey {
    Null,
    Number(f64),
    Timestamp(i64),
    Text(TextKey),
}

impl SortKey {
    fn new(row: &Row, column: &Column) -> Self {
        let value = resolve(row, column);
        if value.is_null() {
            return SortKey::Null;
        }
        match column.column_type {
            ColumnType::Number => value.as_f64().map_or(SortKey::Null, SortKey::Number),
            ColumnType::Date => timestamp_millis(&value).map_or(SortKey::Null, SortKey::Timestamp),
            ColumnType::String | ColumnType::Other => SortKey::Text(TextKey::new(&value)),
        }
    }

    /// Ascending order with nulls greater than everything.
    fn cmp_natural(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Null, SortKey::Null) => Ordering::Equal,
            (SortKey::Null, _) => Ordering::Greater,
            (_, SortKey::Null) => Ordering::Less,
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Timestamp(a), SortKey::Timestamp(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Collation key for text cells. Case never matters; letters compare by
/// their base form first and accents only break ties between equal bases,
/// so `"Éclair"` sorts between `"apple"` and `"fig"`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TextKey {
    base: String,
    accented: String,
}

impl TextKey {
    fn new(value: &CellValue) -> Self {
        let accented: String = value
            .to_string()
            .nfd()
            .flat_map(char::to_lowercase)
            .collect();
        let base = accented.chars().filter(|c| !is_combining_mark(*c)).collect();
        Self { base, accented }
    }
}
