// Reader for the roll calls published by the Senate Legislative Information System.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::rollcall::io_common::*;
use crate::rollcall::*;

const SENATE_POSITIONS: &[(&str, Position)] = &[
    ("Yea", Position::Yea),
    ("Nay", Position::Nay),
    ("Present", Position::Present),
    ("Present, Giving Live Pair", Position::Present),
    ("Not Voting", Position::NotVoting),
    ("", Position::NotVoting),
];

pub struct SenateLisReader;

/// "January 20, 2025,  06:11 PM": only the date is kept.
fn parse_vote_date(s: &str) -> RollCallResult<NaiveDate> {
    let day: Vec<&str> = s.split(',').take(2).map(|p| p.trim()).collect();
    let day = day.join(", ");
    NaiveDate::parse_from_str(&day, "%B %d, %Y")
        .ok()
        .context(MalformedDocumentSnafu {
            chamber: Chamber::Senate,
            reason: format!("invalid vote_date: {:?}", s),
        })
}

impl RollCallReader for SenateLisReader {
    fn chamber(&self) -> Chamber {
        Chamber::Senate
    }

    fn read(&self, document: &str) -> RollCallResult<ParsedRollCall> {
        let chamber = Chamber::Senate;
        let doc: SenateRollCall =
            quick_xml::de::from_str(document).context(ParsingXmlSnafu { chamber })?;

        let vote_number = parse_number(
            chamber,
            "vote_number",
            required(chamber, &doc.vote_number, "vote_number")?,
        )?;
        let congress = parse_number(chamber, "congress", required(chamber, &doc.congress, "congress")?)?;
        let session = parse_number(chamber, "session", required(chamber, &doc.session, "session")?)?;
        let date = parse_vote_date(required(chamber, &doc.vote_date, "vote_date")?)?;

        let tie_breaker = match &doc.tie_breaker {
            Some(tb) => match (text(&tb.by_whom), text(&tb.tie_breaker_vote)) {
                (Some(who), Some(v)) => Some(TieBreaker {
                    by_whom: who.to_string(),
                    position: lookup_position(SENATE_POSITIONS, chamber, v, who)?,
                }),
                _ => None,
            },
            None => None,
        };

        let metadata = VoteMetadata {
            chamber,
            congress,
            session,
            vote_number,
            question: text(&doc.vote_question_text)
                .or_else(|| text(&doc.question))
                .unwrap_or("")
                .to_string(),
            result: text(&doc.vote_result_text)
                .or_else(|| text(&doc.vote_result))
                .unwrap_or("")
                .to_string(),
            date,
            title: text(&doc.vote_title).map(|s| s.to_string()),
            tie_breaker,
        };
        debug!("SenateLisReader: metadata {:?}", metadata);

        let members = doc
            .members
            .context(MalformedDocumentSnafu {
                chamber,
                reason: "missing members",
            })?
            .members;
        let mut votes: Vec<RawVote> = Vec::with_capacity(members.len());
        for m in members.iter() {
            let id = text(&m.lis_member_id).unwrap_or("").to_string();
            let display_name = match text(&m.member_full) {
                Some(full) => full.to_string(),
                None => [text(&m.first_name), text(&m.last_name)]
                    .iter()
                    .flatten()
                    .copied()
                    .collect::<Vec<&str>>()
                    .join(" "),
            };
            let position = lookup_position(
                SENATE_POSITIONS,
                chamber,
                m.vote_cast.as_deref().unwrap_or(""),
                &format!("{} ({})", display_name, id),
            )?;
            votes.push(RawVote {
                member: MemberRef {
                    id,
                    display_name,
                    last_name: text(&m.last_name).map(|s| s.to_string()),
                },
                position,
                hint: make_hint(&m.party, &m.state),
            });
        }
        info!(
            "SenateLisReader: vote {} of congress {} session {}: {} votes",
            vote_number,
            congress,
            session,
            votes.len()
        );
        Ok(ParsedRollCall { metadata, votes })
    }
}

#[derive(Debug, Deserialize)]
struct SenateRollCall {
    congress: Option<String>,
    session: Option<String>,
    vote_number: Option<String>,
    vote_date: Option<String>,
    vote_question_text: Option<String>,
    question: Option<String>,
    vote_result_text: Option<String>,
    vote_result: Option<String>,
    vote_title: Option<String>,
    tie_breaker: Option<SenateTieBreaker>,
    members: Option<SenateMembers>,
}

#[derive(Debug, Deserialize)]
struct SenateTieBreaker {
    by_whom: Option<String>,
    tie_breaker_vote: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SenateMembers {
    #[serde(rename = "member", default)]
    members: Vec<SenateMember>,
}

#[derive(Debug, Deserialize)]
struct SenateMember {
    member_full: Option<String>,
    last_name: Option<String>,
    first_name: Option<String>,
    party: Option<String>,
    state: Option<String>,
    vote_cast: Option<String>,
    lis_member_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<roll_call_vote>
<congress>119</congress>
<session>1</session>
<congress_year>2025</congress_year>
<vote_number>7</vote_number>
<vote_date>January 20, 2025,  06:11 PM</vote_date>
<modify_date>January 20, 2025,  06:40 PM</modify_date>
<vote_question_text>On the Nomination PN11-4: Marco Rubio, of Florida, to be Secretary of State</vote_question_text>
<vote_document_text>Marco Rubio, of Florida, to be Secretary of State</vote_document_text>
<vote_result_text>Nomination Confirmed (99-0)</vote_result_text>
<question>On the Nomination</question>
<vote_title>Confirmation Marco Rubio, of Florida, to be Secretary of State</vote_title>
<majority_requirement>1/2</majority_requirement>
<vote_result>Nomination Confirmed</vote_result>
<count><yeas>99</yeas><nays>0</nays><present></present><absent>1</absent></count>
<tie_breaker><by_whom></by_whom><tie_breaker_vote></tie_breaker_vote></tie_breaker>
<members>
<member><member_full>Alsobrooks (D-MD)</member_full><last_name>Alsobrooks</last_name><first_name>Angela</first_name><party>D</party><state>MD</state><vote_cast>Yea</vote_cast><lis_member_id>S428</lis_member_id></member>
<member><member_full>Sanders (I-VT)</member_full><last_name>Sanders</last_name><first_name>Bernard</first_name><party>I</party><state>VT</state><vote_cast>Present, Giving Live Pair</vote_cast><lis_member_id>S313</lis_member_id></member>
<member><member_full>Vance (R-OH)</member_full><last_name>Vance</last_name><first_name>J. D.</first_name><party>R</party><state>OH</state><vote_cast></vote_cast><lis_member_id>S415</lis_member_id></member>
</members>
</roll_call_vote>
"#;

    #[test]
    fn reads_metadata_and_votes() {
        let rc = SenateLisReader.read(DOC).unwrap();
        let m = &rc.metadata;
        assert_eq!((m.congress, m.session, m.vote_number), (119, 1, 7));
        assert_eq!(m.date, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
        assert_eq!(m.result, "Nomination Confirmed (99-0)");
        assert!(m.question.starts_with("On the Nomination PN11-4"));
        assert_eq!(m.tie_breaker, None);
        let positions: Vec<Position> = rc.votes.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![Position::Yea, Position::Present, Position::NotVoting]
        );
        let sanders = &rc.votes[1];
        assert_eq!(sanders.member.id, "S313");
        assert_eq!(sanders.member.display_name, "Sanders (I-VT)");
        assert_eq!(sanders.member.last_name.as_deref(), Some("Sanders"));
        assert_eq!(sanders.hint.as_ref().map(|h| h.party), Some(Party::Independent));
    }

    #[test]
    fn tie_breaker_is_read() {
        let doc = DOC.replace(
            "<by_whom></by_whom><tie_breaker_vote></tie_breaker_vote>",
            "<by_whom>Vice President</by_whom><tie_breaker_vote>Yea</tie_breaker_vote>",
        );
        let rc = SenateLisReader.read(&doc).unwrap();
        assert_eq!(
            rc.metadata.tie_breaker,
            Some(TieBreaker {
                by_whom: "Vice President".to_string(),
                position: Position::Yea
            })
        );
    }

    #[test]
    fn missing_members() {
        let start = DOC.find("<members>").unwrap();
        let end = DOC.find("</members>").unwrap() + "</members>".len();
        let doc = format!("{}{}", &DOC[..start], &DOC[end..]);
        match SenateLisReader.read(&doc) {
            Err(RollCallError::MalformedDocument { reason, .. }) => {
                assert_eq!(reason, "missing members")
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn empty_members() {
        let start = DOC.find("<members>").unwrap();
        let end = DOC.find("</members>").unwrap();
        let doc = format!("{}<members>{}", &DOC[..start], &DOC[end..]);
        let rc = SenateLisReader.read(&doc).unwrap();
        assert!(rc.votes.is_empty());
    }

    #[test]
    fn dates() {
        assert_eq!(
            parse_vote_date("March 4, 2024,  11:45 AM").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );
        assert!(parse_vote_date("2024-03-04").is_err());
    }

    #[test]
    fn unknown_position() {
        let doc = DOC.replace("<vote_cast>Yea</vote_cast>", "<vote_cast>Not Guilty</vote_cast>");
        match SenateLisReader.read(&doc) {
            Err(RollCallError::UnknownPosition { value, member, .. }) => {
                assert_eq!(value, "Not Guilty");
                assert_eq!(member, "Alsobrooks (D-MD) (S428)");
            }
            x => panic!("unexpected {:?}", x),
        }
    }
}
