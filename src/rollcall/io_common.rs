use std::path::Path;

use crate::rollcall::*;

pub fn read_text_file(path: &str) -> RollCallResult<String> {
    fs::read_to_string(path).context(OpeningFileSnafu { path })
}

pub fn resolve_path(root: &Path, path: &str) -> String {
    if Path::new(path).is_absolute() {
        path.to_string()
    } else {
        root.join(path).display().to_string()
    }
}

/// The trimmed content of an optional element, if not blank.
pub fn text(elt: &Option<String>) -> Option<&str> {
    elt.as_deref().map(|s| s.trim()).filter(|s| !s.is_empty())
}

pub fn required<'a>(
    chamber: Chamber,
    elt: &'a Option<String>,
    field: &str,
) -> RollCallResult<&'a str> {
    text(elt).context(MalformedDocumentSnafu {
        chamber,
        reason: format!("missing {}", field),
    })
}

/// Reads the leading digits of a field: "119" or "1st" both work.
pub fn parse_number(chamber: Chamber, field: &str, s: &str) -> RollCallResult<u32> {
    let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok().context(MalformedDocumentSnafu {
        chamber,
        reason: format!("invalid {}: {:?}", field, s),
    })
}

/// Maps an upstream position through the table of a chamber.
///
/// Values missing from the table are an error: they mean the upstream format changed,
/// or the vote is not a simple roll call.
pub fn lookup_position(
    table: &[(&str, Position)],
    chamber: Chamber,
    value: &str,
    member: &str,
) -> RollCallResult<Position> {
    let v = value.trim();
    table
        .iter()
        .find(|(label, _)| label.eq_ignore_ascii_case(v))
        .map(|(_, p)| *p)
        .context(UnknownPositionSnafu {
            chamber,
            value: v,
            member,
        })
}

pub fn make_hint(party: &Option<String>, state: &Option<String>) -> Option<RosterHint> {
    if text(party).is_none() && text(state).is_none() {
        return None;
    }
    Some(RosterHint {
        party: Party::from_code(text(party).unwrap_or("")),
        state: text(state).map(|s| s.to_uppercase()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_with_suffix() {
        assert_eq!(parse_number(Chamber::House, "session", "2nd").unwrap(), 2);
        assert_eq!(parse_number(Chamber::House, "congress", " 119 ").unwrap(), 119);
        assert!(parse_number(Chamber::House, "rollcall-num", "abc").is_err());
    }

    #[test]
    fn blank_elements_are_missing() {
        assert_eq!(text(&Some("  ".to_string())), None);
        assert_eq!(text(&Some(" x ".to_string())), Some("x"));
        assert!(required(Chamber::Senate, &None, "vote_number").is_err());
        assert_eq!(make_hint(&None, &Some(String::new())), None);
        let h = make_hint(&Some("I".to_string()), &Some("vt".to_string())).unwrap();
        assert_eq!(h.party, Party::Independent);
        assert_eq!(h.state.as_deref(), Some("VT"));
    }
}
