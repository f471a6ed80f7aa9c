// Reader for the roll calls of the Clerk of the House (clerk.house.gov/evs).

use chrono::NaiveDate;
use serde::Deserialize;

use crate::rollcall::io_common::*;
use crate::rollcall::*;

const HOUSE_POSITIONS: &[(&str, Position)] = &[
    ("Yea", Position::Yea),
    ("Aye", Position::Yea),
    ("Nay", Position::Nay),
    ("No", Position::Nay),
    ("Present", Position::Present),
    ("Not Voting", Position::NotVoting),
];

pub struct HouseClerkReader;

impl RollCallReader for HouseClerkReader {
    fn chamber(&self) -> Chamber {
        Chamber::House
    }

    fn read(&self, document: &str) -> RollCallResult<ParsedRollCall> {
        let chamber = Chamber::House;
        let doc: RollcallVote = quick_xml::de::from_str(document).context(ParsingXmlSnafu { chamber })?;
        let meta = doc.metadata.context(MalformedDocumentSnafu {
            chamber,
            reason: "missing vote-metadata",
        })?;

        let vote_number = parse_number(
            chamber,
            "rollcall-num",
            required(chamber, &meta.rollcall_num, "rollcall-num")?,
        )?;
        let congress = parse_number(chamber, "congress", required(chamber, &meta.congress, "congress")?)?;
        let session = parse_number(chamber, "session", required(chamber, &meta.session, "session")?)?;
        let date_s = required(chamber, &meta.action_date, "action-date")?;
        let date = NaiveDate::parse_from_str(date_s, "%d-%b-%Y")
            .ok()
            .context(MalformedDocumentSnafu {
                chamber,
                reason: format!("invalid action-date: {:?}", date_s),
            })?;

        let metadata = VoteMetadata {
            chamber,
            congress,
            session,
            vote_number,
            question: text(&meta.vote_question).unwrap_or("").to_string(),
            result: text(&meta.vote_result).unwrap_or("").to_string(),
            date,
            title: text(&meta.vote_desc)
                .or_else(|| text(&meta.legis_num))
                .map(|s| s.to_string()),
            tie_breaker: None,
        };
        debug!("HouseClerkReader: metadata {:?}", metadata);

        // An empty vote-data section is a valid roll call, a missing one is not.
        let recorded = doc
            .data
            .context(MalformedDocumentSnafu {
                chamber,
                reason: "missing vote-data",
            })?
            .recorded_votes;
        let mut votes: Vec<RawVote> = Vec::with_capacity(recorded.len());
        for rv in recorded.iter() {
            let leg = &rv.legislator;
            let id = text(&leg.name_id).unwrap_or("").to_string();
            let display_name = text(&leg.unaccented_name)
                .or_else(|| text(&leg.name))
                .unwrap_or("")
                .to_string();
            let position = lookup_position(
                HOUSE_POSITIONS,
                chamber,
                text(&rv.vote).unwrap_or(""),
                &format!("{} ({})", display_name, id),
            )?;
            votes.push(RawVote {
                member: MemberRef {
                    id,
                    display_name,
                    last_name: None,
                },
                position,
                hint: make_hint(&leg.party, &leg.state),
            });
        }
        info!(
            "HouseClerkReader: roll call {} of {}: {} votes",
            vote_number,
            date.format("%Y"),
            votes.len()
        );
        Ok(ParsedRollCall { metadata, votes })
    }
}

#[derive(Debug, Deserialize)]
struct RollcallVote {
    #[serde(rename = "vote-metadata")]
    metadata: Option<HouseMetadata>,
    #[serde(rename = "vote-data")]
    data: Option<HouseVoteData>,
}

#[derive(Debug, Deserialize)]
struct HouseMetadata {
    congress: Option<String>,
    session: Option<String>,
    #[serde(rename = "rollcall-num")]
    rollcall_num: Option<String>,
    #[serde(rename = "legis-num")]
    legis_num: Option<String>,
    #[serde(rename = "vote-question")]
    vote_question: Option<String>,
    #[serde(rename = "vote-result")]
    vote_result: Option<String>,
    #[serde(rename = "action-date")]
    action_date: Option<String>,
    #[serde(rename = "vote-desc")]
    vote_desc: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HouseVoteData {
    #[serde(rename = "recorded-vote", default)]
    recorded_votes: Vec<RecordedVote>,
}

#[derive(Debug, Deserialize)]
struct RecordedVote {
    legislator: Legislator,
    vote: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Legislator {
    #[serde(rename = "@name-id")]
    name_id: Option<String>,
    #[serde(rename = "@unaccented-name")]
    unaccented_name: Option<String>,
    #[serde(rename = "@party")]
    party: Option<String>,
    #[serde(rename = "@state")]
    state: Option<String>,
    #[serde(rename = "$text")]
    name: Option<String>,
}
