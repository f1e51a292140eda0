use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Named captures for one item, e.g. `{"artist": Some("X"), "title": Some("a")}`.
///
/// Every named group of the template has an entry; a group that did not
/// participate in the match maps to `None`. Carrying the absences keeps the
/// key set identical across a group, so cross-item uniformity checks treat
/// "captured for some items only" as divergence no matter the item order.
pub type CaptureMap = FxHashMap<String, Option<String>>;

/// One successful template match for a whole group: one capture map per item,
/// indexed like the group slice. Lives only for one reconciliation pass.
pub type MatchRecord = Vec<CaptureMap>;

/// A compiled cascade template.
///
/// Matching is case-insensitive and anchored at the start of the base name
/// (authors anchor the end with `$`). Only named capture groups carry
/// information; a template without them can match syntactically but never
/// produces a record.
#[derive(Debug)]
pub struct Template {
    pattern: String,
    regex: Regex,
}

impl Template {
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The source pattern, for diagnostics.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match one base name, returning one entry per named group.
    ///
    /// `None` when the name does not match at position 0 or when no named
    /// group participated in the match.
    fn captures(&self, name: &str) -> Option<CaptureMap> {
        let caps = self.regex.captures(name)?;
        if caps.get(0).map(|m| m.start()) != Some(0) {
            return None;
        }
        let map: CaptureMap = self
            .regex
            .capture_names()
            .flatten()
            .map(|g| {
                (
                    g.to_string(),
                    caps.name(g).map(|m| m.as_str().to_string()),
                )
            })
            .collect();
        if map.values().all(Option::is_none) {
            return None;
        }
        Some(map)
    }
}

/// Try one template against every base name in the group.
///
/// A template is only trustworthy when it matches uniformly: if any single
/// member fails, partial information cannot be attributed consistently across
/// the group, so the whole template is rejected.
pub fn find_all_matches(names: &[String], template: &Template) -> Option<MatchRecord> {
    let mut record = MatchRecord::with_capacity(names.len());
    for name in names {
        match template.captures(name) {
            Some(map) => record.push(map),
            None => {
                trace!(
                    "Template '{}' rejected: '{}' does not match",
                    template.pattern(),
                    name
                );
                return None;
            }
        }
    }
    Some(record)
}
