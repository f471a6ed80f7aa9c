use log::{debug, warn};
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::*;

/// Reduces a name to a form that can be compared across sources.
///
/// Parenthesized parts like "(D-MD)" are dropped and accents are folded.
/// Apostrophes are removed, other punctuation separates words like a space,
/// and the whitespace is collapsed.
///
/// ```
/// use partisan_tally::roster::normalize_name;
/// assert_eq!(normalize_name("Luján (D-NM)"), "lujan");
/// assert_eq!(normalize_name("  Scott,  David "), "scott david");
/// assert_eq!(normalize_name("Ocasio-Cortez"), normalize_name("Ocasio Cortez"));
/// ```
pub fn normalize_name(name: &str) -> String {
    let mut depth: u32 = 0;
    let mut kept = String::with_capacity(name.len());
    for c in name.nfkd() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            c if is_combining_mark(c) => {}
            c if c.is_alphanumeric() => kept.extend(c.to_lowercase()),
            '\'' | '\u{2019}' => {}
            _ => kept.push(' '),
        }
    }
    kept.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// The member roster, indexed for the lookups done during normalization.
///
/// It is built once and then only read.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, Vec<usize>>,
    by_last_name: HashMap<String, Vec<usize>>,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Roster {
        let mut by_id: HashMap<String, usize> = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_last_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            let id = entry.id.trim().to_string();
            if !id.is_empty() {
                if by_id.contains_key(&id) {
                    warn!("Roster: duplicate id {:?}, keeping the first entry", id);
                } else {
                    by_id.insert(id, idx);
                }
            }
            let name = normalize_name(&entry.full_name);
            if !name.is_empty() {
                by_name.entry(name).or_default().push(idx);
            }
            if let Some(last) = entry.last_name.as_deref().map(normalize_name) {
                if !last.is_empty() {
                    by_last_name.entry(last).or_default().push(idx);
                }
            }
        }
        debug!(
            "Roster: {} entries, {} ids, {} names",
            entries.len(),
            by_id.len(),
            by_name.len()
        );
        Roster {
            entries,
            by_id,
            by_name,
            by_last_name,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&RosterEntry> {
        self.by_id.get(id.trim()).map(|idx| &self.entries[*idx])
    }

    fn with_name(&self, name: &str) -> Vec<&RosterEntry> {
        self.lookup(&self.by_name, name)
    }

    fn with_last_name(&self, last_name: &str) -> Vec<&RosterEntry> {
        self.lookup(&self.by_last_name, last_name)
    }

    fn lookup(&self, index: &HashMap<String, Vec<usize>>, name: &str) -> Vec<&RosterEntry> {
        match index.get(&normalize_name(name)) {
            Some(idxs) => idxs.iter().map(|idx| &self.entries[*idx]).collect(),
            None => vec![],
        }
    }
}

/// One way of matching a vote entry with a roster entry.
///
/// The normalizer tries the strategies in order and keeps the first match.
pub trait ResolutionStrategy {
    fn resolution(&self) -> Resolution;

    fn resolve<'r>(
        &self,
        member: &MemberRef,
        hint: Option<&RosterHint>,
        chamber: Chamber,
        roster: &'r Roster,
    ) -> Option<&'r RosterEntry>;
}

/// Exact match on the chamber identifier.
pub struct ById;

/// Match on the normalized display name.
pub struct ByDisplayName;

/// Match on the normalized last name, for the sources that print it separately.
pub struct ByLastName;

impl ResolutionStrategy for ById {
    fn resolution(&self) -> Resolution {
        Resolution::Id
    }

    fn resolve<'r>(
        &self,
        member: &MemberRef,
        _hint: Option<&RosterHint>,
        chamber: Chamber,
        roster: &'r Roster,
    ) -> Option<&'r RosterEntry> {
        roster.get(&member.id).filter(|e| e.chamber == chamber)
    }
}

impl ResolutionStrategy for ByDisplayName {
    fn resolution(&self) -> Resolution {
        Resolution::Name
    }

    fn resolve<'r>(
        &self,
        member: &MemberRef,
        hint: Option<&RosterHint>,
        chamber: Chamber,
        roster: &'r Roster,
    ) -> Option<&'r RosterEntry> {
        pick_unique(roster.with_name(&member.display_name), hint, chamber)
    }
}

impl ResolutionStrategy for ByLastName {
    fn resolution(&self) -> Resolution {
        Resolution::LastName
    }

    fn resolve<'r>(
        &self,
        member: &MemberRef,
        hint: Option<&RosterHint>,
        chamber: Chamber,
        roster: &'r Roster,
    ) -> Option<&'r RosterEntry> {
        let last_name = member.last_name.as_deref()?;
        pick_unique(roster.with_last_name(last_name), hint, chamber)
    }
}

/// The strategies used by default: id, then display name, then last name.
pub fn default_strategies() -> Vec<Box<dyn ResolutionStrategy>> {
    vec![Box::new(ById), Box::new(ByDisplayName), Box::new(ByLastName)]
}

// Several members may share a name (two senators Scott). The state in the hint
// separates them; if it does not, the match is dropped.
fn pick_unique<'r>(
    candidates: Vec<&'r RosterEntry>,
    hint: Option<&RosterHint>,
    chamber: Chamber,
) -> Option<&'r RosterEntry> {
    let in_chamber: Vec<&RosterEntry> = candidates
        .into_iter()
        .filter(|e| e.chamber == chamber)
        .collect();
    match in_chamber.as_slice() {
        [] => None,
        [e] => Some(*e),
        many => {
            let state = hint.and_then(|h| h.state.as_deref());
            let same_state: Vec<&RosterEntry> = many
                .iter()
                .copied()
                .filter(|e| state.is_some() && e.state.as_deref() == state)
                .collect();
            if same_state.len() == 1 {
                Some(same_state[0])
            } else {
                debug!(
                    "pick_unique: ambiguous match between {:?}",
                    many.iter().map(|e| &e.id).collect::<Vec<&String>>()
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, last: Option<&str>, state: &str) -> RosterEntry {
        RosterEntry {
            id: id.to_string(),
            full_name: name.to_string(),
            last_name: last.map(|s| s.to_string()),
            party: Party::Republican,
            state: Some(state.to_string()),
            chamber: Chamber::Senate,
        }
    }

    fn member(id: &str, name: &str, last: Option<&str>) -> MemberRef {
        MemberRef {
            id: id.to_string(),
            display_name: name.to_string(),
            last_name: last.map(|s| s.to_string()),
        }
    }

    #[test]
    fn normalize_strips_punctuation_and_accents() {
        assert_eq!(normalize_name("Alsobrooks (D-MD)"), "alsobrooks");
        assert_eq!(normalize_name("Ocasio-Cortez"), "ocasio cortez");
        assert_eq!(normalize_name("Sánchez, Linda T."), "sanchez linda t");
        assert_eq!(normalize_name("O'Rourke"), "orourke");
        assert_eq!(normalize_name("O\u{2019}Rourke"), "orourke");
        assert_eq!(normalize_name("Smith.Jones"), "smith jones");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn hyphenated_names_match_spaced_names() {
        let mut e = entry("H1", "Alexandria Ocasio-Cortez", Some("Ocasio-Cortez"), "NY");
        e.party = Party::Democratic;
        let roster = Roster::new(vec![e]);
        let m = member("X", "Alexandria Ocasio Cortez", Some("Ocasio Cortez"));
        let found = ByDisplayName.resolve(&m, None, Chamber::Senate, &roster);
        assert_eq!(found.map(|e| e.id.as_str()), Some("H1"));
        let found = ByLastName.resolve(&m, None, Chamber::Senate, &roster);
        assert_eq!(found.map(|e| e.party), Some(Party::Democratic));
    }

    #[test]
    fn id_match_respects_chamber() {
        let roster = Roster::new(vec![entry("S001", "Thune (R-SD)", None, "SD")]);
        let m = member("S001", "whatever", None);
        assert!(ById
            .resolve(&m, None, Chamber::Senate, &roster)
            .is_some());
        assert!(ById.resolve(&m, None, Chamber::House, &roster).is_none());
    }

    #[test]
    fn name_match_is_tolerant() {
        let roster = Roster::new(vec![entry("B1", "Luján (D-NM)", None, "NM")]);
        let m = member("S999", "LUJAN (D-NM)", None);
        let found = ByDisplayName.resolve(&m, None, Chamber::Senate, &roster);
        assert_eq!(found.map(|e| e.id.as_str()), Some("B1"));
    }

    #[test]
    fn ambiguous_last_name_uses_hint_state() {
        let roster = Roster::new(vec![
            entry("S1", "Rick Scott", Some("Scott"), "FL"),
            entry("S2", "Tim Scott", Some("Scott"), "SC"),
        ]);
        let m = member("X", "Scott (R-SC)", Some("Scott"));
        assert!(ByLastName
            .resolve(&m, None, Chamber::Senate, &roster)
            .is_none());
        let hint = RosterHint {
            party: Party::Republican,
            state: Some("SC".to_string()),
        };
        let found = ByLastName.resolve(&m, Some(&hint), Chamber::Senate, &roster);
        assert_eq!(found.map(|e| e.id.as_str()), Some("S2"));
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let roster = Roster::new(vec![
            entry("S1", "First", None, "AA"),
            entry("S1", "Second", None, "BB"),
        ]);
        assert_eq!(roster.len(), 2);
        let states: Vec<Option<&str>> = roster.entries().iter().map(|e| e.state.as_deref()).collect();
        assert_eq!(states, vec![Some("AA"), Some("BB")]);
        assert_eq!(roster.get("S1").map(|e| e.full_name.as_str()), Some("First"));
    }
}
