// ********* Input data structures ***********

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize)]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    /// The lowercase name, as used in file names and on the command line.
    pub fn label(&self) -> &'static str {
        match self {
            Chamber::House => "house",
            Chamber::Senate => "senate",
        }
    }
}

impl Display for Chamber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The recorded position of one member on a roll call.
///
/// Both chambers use slightly different vocabularies upstream ("Aye" in the House,
/// a blank cell in the Senate, ...). The readers map all of them to these four values.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd, Serialize)]
pub enum Position {
    Yea,
    Nay,
    Present,
    #[serde(rename = "Not Voting")]
    NotVoting,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Yea,
        Position::Nay,
        Position::Present,
        Position::NotVoting,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Position::Yea => "Yea",
            Position::Nay => "Nay",
            Position::Present => "Present",
            Position::NotVoting => "Not Voting",
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Party affiliation.
///
/// The ordering of the variants is the ordering used in the summaries.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd, Serialize)]
pub enum Party {
    Democratic,
    Republican,
    Independent,
    /// A party code that is present upstream but not one of the above.
    Other,
    /// No party information at all (typically: a member missing from the roster).
    Unknown,
}

impl Party {
    pub const ALL: [Party; 5] = [
        Party::Democratic,
        Party::Republican,
        Party::Independent,
        Party::Other,
        Party::Unknown,
    ];

    /// Interprets the party codes found in the Clerk and Senate feeds.
    pub fn from_code(code: &str) -> Party {
        match code.trim().to_ascii_uppercase().as_str() {
            "" => Party::Unknown,
            "D" | "DEM" | "DEMOCRAT" | "DEMOCRATIC" => Party::Democratic,
            "R" | "REP" | "REPUBLICAN" => Party::Republican,
            "I" | "ID" | "IND" | "INDEPENDENT" => Party::Independent,
            _ => Party::Other,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Party::Democratic => "D",
            Party::Republican => "R",
            Party::Independent => "I",
            Party::Other => "Other",
            Party::Unknown => "Unknown",
        }
    }

    pub fn is_major(&self) -> bool {
        matches!(self, Party::Democratic | Party::Republican)
    }
}

impl Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The identity of a member, as printed in a vote document.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize)]
pub struct MemberRef {
    /// Bioguide id (House) or LIS member id (Senate).
    pub id: String,
    pub display_name: String,
    pub last_name: Option<String>,
}

/// Party and state printed next to a member in the vote document itself.
///
/// Only used when the roster does not know the member.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize)]
pub struct RosterHint {
    pub party: Party,
    pub state: Option<String>,
}

/// One line of a roll call, as parsed by the readers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawVote {
    pub member: MemberRef,
    pub position: Position,
    pub hint: Option<RosterHint>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct TieBreaker {
    pub by_whom: String,
    pub position: Position,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct VoteMetadata {
    pub chamber: Chamber,
    pub congress: u32,
    pub session: u32,
    // Never padded here, see the export for the file names.
    pub vote_number: u32,
    pub question: String,
    pub result: String,
    pub date: NaiveDate,
    pub title: Option<String>,
    pub tie_breaker: Option<TieBreaker>,
}

/// A complete roll call as returned by a reader, before any roster lookup.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedRollCall {
    pub metadata: VoteMetadata,
    pub votes: Vec<RawVote>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub id: String,
    pub full_name: String,
    pub last_name: Option<String>,
    pub party: Party,
    pub state: Option<String>,
    pub chamber: Chamber,
}

// ******** Output data structures *********

/// How the identity of a member was established.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize)]
pub enum Resolution {
    Id,
    Name,
    LastName,
    /// Not in the roster, party and state taken from the document.
    Hint,
    Unresolved,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct VoteRecord {
    pub member: MemberRef,
    pub name: String,
    pub party: Party,
    /// None when the state is unknown.
    pub state: Option<String>,
    pub position: Position,
    pub resolution: Resolution,
}

/// A vote entry that could not be matched against the roster.
///
/// This is a warning: the entry is still part of the records.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct UnresolvedMember {
    /// Position of the entry in the source document.
    pub index: usize,
    pub member: MemberRef,
}

impl Display for UnresolvedMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unresolved member #{}: id {:?} name {:?}",
            self.index, self.member.id, self.member.display_name
        )
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default, Serialize)]
pub struct PositionCounts {
    pub yea: u64,
    pub nay: u64,
    pub present: u64,
    pub not_voting: u64,
}

impl PositionCounts {
    pub fn add(&mut self, position: Position) {
        match position {
            Position::Yea => self.yea += 1,
            Position::Nay => self.nay += 1,
            Position::Present => self.present += 1,
            Position::NotVoting => self.not_voting += 1,
        }
    }

    pub fn get(&self, position: Position) -> u64 {
        match position {
            Position::Yea => self.yea,
            Position::Nay => self.nay,
            Position::Present => self.present,
            Position::NotVoting => self.not_voting,
        }
    }

    pub fn total(&self) -> u64 {
        self.yea + self.nay + self.present + self.not_voting
    }

    /// Yea or Nay, whichever has strictly more votes.
    pub fn majority(&self) -> Option<Position> {
        match self.yea.cmp(&self.nay) {
            std::cmp::Ordering::Greater => Some(Position::Yea),
            std::cmp::Ordering::Less => Some(Position::Nay),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct PartyTally {
    pub party: Party,
    pub members: u64,
    pub counts: PositionCounts,
    pub majority: Option<Position>,
}

/// A member of a major party who voted against the majority of their own party.
#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Defector {
    pub member_id: String,
    pub name: String,
    pub party: Party,
    pub state: Option<String>,
    pub position: Position,
    pub party_majority: Position,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct Outcome {
    /// None for a tie that was not broken.
    pub leading: Option<Position>,
    pub margin: u64,
    pub tie_breaker: Option<TieBreaker>,
    pub is_close: bool,
    pub partisan_split: bool,
    /// The major party whose majority carried a party-line vote.
    pub prevailing_party: Option<Party>,
    pub description: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize)]
pub struct PartisanSummary {
    pub total_members: u64,
    pub totals: PositionCounts,
    pub parties: Vec<PartyTally>,
    pub outcome: Outcome,
    pub defectors: Vec<Defector>,
}

impl PartisanSummary {
    pub fn party(&self, party: Party) -> Option<&PartyTally> {
        self.parties.iter().find(|t| t.party == party)
    }
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SummaryRules {
    /// Largest Yea/Nay margin for which a party-line vote is considered close,
    /// and the defectors of both major parties are listed.
    /// No default value: defectors are not computed unless a margin is given.
    pub close_margin: Option<u64>,
}

impl SummaryRules {
    pub const DEFAULT_RULES: SummaryRules = SummaryRules { close_margin: None };
}
