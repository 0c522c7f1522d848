//! Generic attribute-based sort/filter engine.
//!
//! Works over any record type that can project itself onto a closed set of
//! named attributes. Each attribute declares its shape ([`AttrKind`]) up
//! front, so the filter predicate is selected by a lookup instead of
//! inspecting sample data at runtime. Optional attributes project to
//! [`AttrValue::Absent`], which sorts after every present value and never
//! matches a filter.

use std::cmp::Ordering;

use crate::difficulty::Difficulty;
use crate::error::OrganizerError;

/// Shape of an attribute's projected values, fixed at the definition site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// A single string; filtering is substring containment.
    Text,
    /// A single non-text value; filtering is equality.
    Scalar,
    /// A list of strings; filtering is membership.
    Collection,
}

/// A record attribute projected to a comparable value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// The attribute is not set on this record.
    Absent,
    Text(String),
    Int(i64),
    Difficulty(Difficulty),
    TextList(Vec<String>),
}

impl AttrValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, AttrValue::Absent)
    }

    fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Absent => "absent",
            AttrValue::Text(_) => "text",
            AttrValue::Int(_) => "integer",
            AttrValue::Difficulty(_) => "difficulty",
            AttrValue::TextList(_) => "list of text",
        }
    }

    /// Ordering between two present values of the same attribute.
    ///
    /// Projections of one attribute always share a variant, so the
    /// cross-variant arm only exists to keep the comparison total.
    fn cmp_present(&self, other: &AttrValue) -> Ordering {
        match (self, other) {
            (AttrValue::Text(a), AttrValue::Text(b)) => a.cmp(b),
            (AttrValue::Int(a), AttrValue::Int(b)) => a.cmp(b),
            (AttrValue::Difficulty(a), AttrValue::Difficulty(b)) => a.cmp(b),
            (AttrValue::TextList(a), AttrValue::TextList(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            AttrValue::Absent => 0,
            AttrValue::Text(_) => 1,
            AttrValue::Int(_) => 2,
            AttrValue::Difficulty(_) => 3,
            AttrValue::TextList(_) => 4,
        }
    }
}

/// A key to filter records by.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterKey {
    Text(String),
    Int(i64),
    Difficulty(Difficulty),
}

impl FilterKey {
    fn type_name(&self) -> &'static str {
        match self {
            FilterKey::Text(_) => "text",
            FilterKey::Int(_) => "integer",
            FilterKey::Difficulty(_) => "difficulty",
        }
    }

    fn same_type(&self, other: &FilterKey) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Equality against a scalar projected value.
    fn equals(&self, value: &AttrValue) -> bool {
        match (self, value) {
            (FilterKey::Text(k), AttrValue::Text(v)) => k == v,
            (FilterKey::Int(k), AttrValue::Int(v)) => k == v,
            (FilterKey::Difficulty(k), AttrValue::Difficulty(v)) => k == v,
            _ => false,
        }
    }
}

impl From<&str> for FilterKey {
    fn from(s: &str) -> Self {
        FilterKey::Text(s.to_string())
    }
}

impl From<i64> for FilterKey {
    fn from(n: i64) -> Self {
        FilterKey::Int(n)
    }
}

impl From<Difficulty> for FilterKey {
    fn from(d: Difficulty) -> Self {
        FilterKey::Difficulty(d)
    }
}

/// A closed set of attribute names with a declared shape per name.
pub trait AttrSpec: Copy {
    /// Shape of the values this attribute projects to.
    fn kind(self) -> AttrKind;
}

/// A record type whose attributes can be projected by name.
pub trait Attributed {
    type Attr: AttrSpec;

    /// Project the record onto one attribute.
    fn project(&self, attr: Self::Attr) -> AttrValue;
}

/// Sort records by one attribute, returning a new ordered sequence.
///
/// The sort is stable: records with equal projected values keep their
/// relative input order. Records whose projection is absent sort after all
/// present values regardless of `reverse`; `reverse` flips only the
/// present-value ordering.
pub fn sort_by<R: Attributed + Clone>(records: &[R], attr: R::Attr, reverse: bool) -> Vec<R> {
    let mut keyed: Vec<(AttrValue, &R)> = records.iter().map(|r| (r.project(attr), r)).collect();
    keyed.sort_by(|(a, _), (b, _)| match (a.is_absent(), b.is_absent()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.cmp_present(b);
            if reverse {
                ord.reverse()
            } else {
                ord
            }
        }
    });
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

/// Filter records by one attribute, returning the matching subsequence in
/// input order.
///
/// All keys must share one type. The predicate follows the attribute's
/// declared [`AttrKind`]:
/// - `Text`: a record matches when any key is a substring of its value, or
///   every key with `mutual_exclusion`.
/// - `Collection`: membership; any key present, or every key with
///   `mutual_exclusion`.
/// - `Scalar`: equality against any key. `mutual_exclusion` with more than
///   one key can never match a scalar and fails fast.
///
/// Records with an absent projection never match.
pub fn filter_by<R: Attributed + Clone>(
    records: &[R],
    attr: R::Attr,
    keys: &[FilterKey],
    mutual_exclusion: bool,
) -> Result<Vec<R>, OrganizerError> {
    let first = keys.first().ok_or(OrganizerError::NoKeys)?;
    if keys.iter().any(|k| !k.same_type(first)) {
        return Err(OrganizerError::MixedKeys);
    }

    let kind = attr.kind();
    match kind {
        AttrKind::Text | AttrKind::Collection => {
            if !matches!(first, FilterKey::Text(_)) {
                return Err(OrganizerError::KeyShape {
                    keys: first.type_name(),
                    values: if kind == AttrKind::Text { "text" } else { "list of text" },
                });
            }
        }
        AttrKind::Scalar => {
            if mutual_exclusion && keys.len() > 1 {
                return Err(OrganizerError::Unsatisfiable);
            }
            // Verify the key type against a sample present value.
            if let Some(sample) = records
                .iter()
                .map(|r| r.project(attr))
                .find(|v| !v.is_absent())
            {
                let compatible = matches!(
                    (first, &sample),
                    (FilterKey::Int(_), AttrValue::Int(_))
                        | (FilterKey::Difficulty(_), AttrValue::Difficulty(_))
                        | (FilterKey::Text(_), AttrValue::Text(_))
                );
                if !compatible {
                    return Err(OrganizerError::KeyShape {
                        keys: first.type_name(),
                        values: sample.type_name(),
                    });
                }
            }
        }
    }

    let matches = |value: &AttrValue| -> bool {
        if value.is_absent() {
            return false;
        }
        match kind {
            AttrKind::Text => {
                let AttrValue::Text(haystack) = value else {
                    return false;
                };
                let contains = |key: &FilterKey| match key {
                    FilterKey::Text(phrase) => haystack.contains(phrase.as_str()),
                    _ => false,
                };
                if mutual_exclusion {
                    keys.iter().all(contains)
                } else {
                    keys.iter().any(contains)
                }
            }
            AttrKind::Collection => {
                let AttrValue::TextList(items) = value else {
                    return false;
                };
                let member = |key: &FilterKey| match key {
                    FilterKey::Text(wanted) => items.iter().any(|item| item == wanted),
                    _ => false,
                };
                if mutual_exclusion {
                    keys.iter().all(member)
                } else {
                    keys.iter().any(member)
                }
            }
            AttrKind::Scalar => keys.iter().any(|key| key.equals(value)),
        }
    };

    Ok(records
        .iter()
        .filter(|r| matches(&r.project(attr)))
        .cloned()
        .collect())
}
