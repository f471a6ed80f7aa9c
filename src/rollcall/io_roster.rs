// Member rosters: a local JSON list, or the XML lists of the two chambers.

use serde::Deserialize;

use crate::rollcall::config_reader::parse_chamber;
use crate::rollcall::io_common::*;
use crate::rollcall::*;

pub fn default_provider(chamber: Chamber) -> &'static str {
    match chamber {
        Chamber::House => "house_xml",
        Chamber::Senate => "senate_xml",
    }
}

/// Reads the entries of a roster document.
///
/// Entries without an id and a name (vacant seats) are skipped.
pub fn read_roster(provider: &str, contents: &str, chamber: Chamber) -> RollCallResult<Vec<RosterEntry>> {
    let entries = match provider {
        "json" => read_json_roster(contents, chamber)?,
        "senate_xml" => read_senate_roster(contents)?,
        "house_xml" => read_house_roster(contents)?,
        x => whatever!("Unknown roster provider {:?}", x),
    };
    let mismatched = entries.iter().filter(|e| e.chamber != chamber).count();
    if mismatched > 0 {
        warn!(
            "read_roster: {} entries of the {} roster are not in the {}",
            mismatched, provider, chamber
        );
    }
    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct JsonRosterEntry {
    id: String,
    #[serde(rename = "fullName")]
    full_name: String,
    #[serde(rename = "lastName")]
    last_name: Option<String>,
    party: String,
    state: Option<String>,
    chamber: Option<String>,
}

fn read_json_roster(contents: &str, chamber: Chamber) -> RollCallResult<Vec<RosterEntry>> {
    let raw: Vec<JsonRosterEntry> = serde_json::from_str(contents)
        .with_whatever_context(|_| "Error reading json roster".to_string())?;
    let mut res: Vec<RosterEntry> = Vec::with_capacity(raw.len());
    for e in raw.into_iter() {
        let entry_chamber = match &e.chamber {
            Some(c) => parse_chamber(c)?,
            None => chamber,
        };
        res.push(RosterEntry {
            id: e.id.trim().to_string(),
            full_name: e.full_name.trim().to_string(),
            last_name: text(&e.last_name).map(|s| s.to_string()),
            party: Party::from_code(&e.party),
            state: text(&e.state).map(|s| s.to_uppercase()),
            chamber: entry_chamber,
        });
    }
    Ok(res)
}

#[derive(Debug, Deserialize)]
struct SenateContactInformation {
    #[serde(rename = "member", default)]
    members: Vec<SenateContact>,
}

#[derive(Debug, Deserialize)]
struct SenateContact {
    member_full: Option<String>,
    last_name: Option<String>,
    first_name: Option<String>,
    party: Option<String>,
    state: Option<String>,
    bioguide_id: Option<String>,
}

fn read_senate_roster(contents: &str) -> RollCallResult<Vec<RosterEntry>> {
    let doc: SenateContactInformation =
        quick_xml::de::from_str(contents).context(ParsingRosterXmlSnafu {
            provider: "senate_xml",
        })?;
    let mut res: Vec<RosterEntry> = Vec::with_capacity(doc.members.len());
    for m in doc.members.iter() {
        let full_name = match text(&m.member_full) {
            Some(s) => s.to_string(),
            None => [text(&m.first_name), text(&m.last_name)]
                .iter()
                .flatten()
                .copied()
                .collect::<Vec<&str>>()
                .join(" "),
        };
        let id = text(&m.bioguide_id).unwrap_or("").to_string();
        if id.is_empty() && full_name.is_empty() {
            continue;
        }
        res.push(RosterEntry {
            id,
            full_name,
            last_name: text(&m.last_name).map(|s| s.to_string()),
            party: Party::from_code(text(&m.party).unwrap_or("")),
            state: text(&m.state).map(|s| s.to_uppercase()),
            chamber: Chamber::Senate,
        });
    }
    Ok(res)
}

#[derive(Debug, Deserialize)]
struct HouseMemberData {
    members: Option<HouseMembers>,
}

#[derive(Debug, Deserialize)]
struct HouseMembers {
    #[serde(rename = "member", default)]
    members: Vec<HouseMember>,
}

#[derive(Debug, Deserialize)]
struct HouseMember {
    #[serde(rename = "member-info")]
    info: Option<HouseMemberInfo>,
}

#[derive(Debug, Deserialize)]
struct HouseMemberInfo {
    #[serde(rename = "bioguideID")]
    bioguide_id: Option<String>,
    lastname: Option<String>,
    firstname: Option<String>,
    #[serde(rename = "official-name")]
    official_name: Option<String>,
    party: Option<String>,
    state: Option<HouseState>,
}

#[derive(Debug, Deserialize)]
struct HouseState {
    #[serde(rename = "@postal-code")]
    postal_code: Option<String>,
}

fn read_house_roster(contents: &str) -> RollCallResult<Vec<RosterEntry>> {
    let doc: HouseMemberData = quick_xml::de::from_str(contents).context(ParsingRosterXmlSnafu {
        provider: "house_xml",
    })?;
    let members = doc.members.map(|m| m.members).unwrap_or_default();
    let mut res: Vec<RosterEntry> = Vec::with_capacity(members.len());
    let mut vacant = 0;
    for info in members.into_iter().filter_map(|m| m.info) {
        let id = match text(&info.bioguide_id) {
            Some(id) => id.to_string(),
            None => {
                vacant += 1;
                continue;
            }
        };
        let full_name = match text(&info.official_name) {
            Some(s) => s.to_string(),
            None => [text(&info.firstname), text(&info.lastname)]
                .iter()
                .flatten()
                .copied()
                .collect::<Vec<&str>>()
                .join(" "),
        };
        res.push(RosterEntry {
            id,
            full_name,
            last_name: text(&info.lastname).map(|s| s.to_string()),
            party: Party::from_code(text(&info.party).unwrap_or("")),
            state: info
                .state
                .and_then(|s| s.postal_code)
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
            chamber: Chamber::House,
        });
    }
    debug!("read_house_roster: {} members, {} vacant seats", res.len(), vacant);
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roster() {
        let text = r#"[
            {"id": "S313", "fullName": "Sanders (I-VT)", "lastName": "Sanders", "party": "Independent", "state": "vt"},
            {"id": "B001323", "fullName": "Nicholas J. Begich", "party": "R", "state": "AK", "chamber": "house"}
        ]"#;
        let entries = read_roster("json", text, Chamber::Senate).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].party, Party::Independent);
        assert_eq!(entries[0].state.as_deref(), Some("VT"));
        assert_eq!(entries[0].chamber, Chamber::Senate);
        assert_eq!(entries[1].chamber, Chamber::House);
        assert_eq!(entries[1].last_name, None);
    }

    #[test]
    fn senate_roster() {
        let text = r#"<?xml version="1.0" encoding="UTF-8"?>
<contact_information>
<member>
<member_full>Scott (R-FL)</member_full>
<last_name>Scott</last_name>
<first_name>Rick</first_name>
<party>R</party>
<state>FL</state>
<address>110 Hart Senate Office Building Washington DC 20510</address>
<phone>(202) 224-5274</phone>
<bioguide_id>S001217</bioguide_id>
</member>
<member>
<member_full>Scott (R-SC)</member_full>
<last_name>Scott</last_name>
<first_name>Tim</first_name>
<party>R</party>
<state>SC</state>
<bioguide_id>S001184</bioguide_id>
</member>
<last_updated>January 3, 2025</last_updated>
</contact_information>"#;
        let entries = read_roster("senate_xml", text, Chamber::Senate).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].id, "S001184");
        assert_eq!(entries[1].full_name, "Scott (R-SC)");
        assert_eq!(entries[1].state.as_deref(), Some("SC"));
    }

    #[test]
    fn house_roster_skips_vacancies() {
        let text = r#"<?xml version="1.0" encoding="UTF-8"?>
<MemberData publish-date="January 22, 2025">
<title-info><congress-num>119</congress-num></title-info>
<members>
<member>
<statedistrict>AK00</statedistrict>
<member-info>
<namelist>Begich, Nick</namelist>
<bioguideID>B001323</bioguideID>
<lastname>Begich</lastname>
<firstname>Nick</firstname>
<official-name>Nicholas J. Begich</official-name>
<party>R</party>
<caucus>R</caucus>
<state postal-code="AK"><state-fullname>Alaska</state-fullname></state>
<district>At Large</district>
</member-info>
</member>
<member>
<statedistrict>FL01</statedistrict>
<member-info>
<namelist></namelist>
<bioguideID></bioguideID>
<lastname></lastname>
<party></party>
<state postal-code="FL"><state-fullname>Florida</state-fullname></state>
</member-info>
</member>
</members>
</MemberData>"#;
        let entries = read_roster("house_xml", text, Chamber::House).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "B001323");
        assert_eq!(entries[0].full_name, "Nicholas J. Begich");
        assert_eq!(entries[0].party, Party::Republican);
        assert_eq!(entries[0].state.as_deref(), Some("AK"));
    }

    #[test]
    fn unknown_provider() {
        assert!(read_roster("congress_gov", "[]", Chamber::House).is_err());
        assert_eq!(default_provider(Chamber::Senate), "senate_xml");
    }
}
