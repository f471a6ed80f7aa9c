use chrono::NaiveDate;

pub use crate::config::*;
use crate::roster::Roster;

/// A builder for assembling a roll call and its roster by hand.
///
/// The readers of the `rollcall` program produce the same structures from the
/// official documents. The builder is meant for tests and for other sources.
///
/// ```
/// use partisan_tally::builder::Builder;
/// use partisan_tally::*;
///
/// let mut builder = Builder::new(Chamber::Senate, 119, 1, 15)
///     .question("On the Cloture Motion");
/// builder.add_member_vote("S428", "Alsobrooks (D-MD)", Party::Democratic, "MD", Position::Yea);
/// builder.add_vote("S999", "Unknown (X-XX)", Position::NotVoting);
///
/// let (roll_call, roster) = builder.build();
/// assert_eq!(roll_call.votes.len(), 2);
/// assert_eq!(roster.len(), 1);
/// ```
pub struct Builder {
    pub(crate) _metadata: VoteMetadata,
    pub(crate) _votes: Vec<RawVote>,
    pub(crate) _roster: Vec<RosterEntry>,
}

impl Builder {
    pub fn new(chamber: Chamber, congress: u32, session: u32, vote_number: u32) -> Builder {
        Builder {
            _metadata: VoteMetadata {
                chamber,
                congress,
                session,
                vote_number,
                question: String::new(),
                result: String::new(),
                date: NaiveDate::default(),
                title: None,
                tie_breaker: None,
            },
            _votes: Vec::new(),
            _roster: Vec::new(),
        }
    }

    pub fn question(mut self, question: &str) -> Builder {
        self._metadata.question = question.to_string();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Builder {
        self._metadata.date = date;
        self
    }

    pub fn tie_breaker(&mut self, by_whom: &str, position: Position) {
        self._metadata.tie_breaker = Some(TieBreaker {
            by_whom: by_whom.to_string(),
            position,
        });
    }

    /// Adds a member to the roster, in the chamber of the vote.
    pub fn add_member(&mut self, id: &str, full_name: &str, party: Party, state: &str) {
        self._roster.push(RosterEntry {
            id: id.to_string(),
            full_name: full_name.to_string(),
            last_name: None,
            party,
            state: Some(state.to_string()),
            chamber: self._metadata.chamber,
        });
    }

    /// Adds a vote without any inline party information.
    pub fn add_vote(&mut self, id: &str, display_name: &str, position: Position) {
        self.add_raw_vote(RawVote {
            member: MemberRef {
                id: id.to_string(),
                display_name: display_name.to_string(),
                last_name: None,
            },
            position,
            hint: None,
        });
    }

    /// Adds a vote with the party and state printed in the document.
    pub fn add_vote_with_hint(
        &mut self,
        id: &str,
        display_name: &str,
        position: Position,
        party: Party,
        state: &str,
    ) {
        self.add_raw_vote(RawVote {
            member: MemberRef {
                id: id.to_string(),
                display_name: display_name.to_string(),
                last_name: None,
            },
            position,
            hint: Some(RosterHint {
                party,
                state: Some(state.to_string()),
            }),
        });
    }

    /// The simplest case: a member known to the roster, and their vote.
    pub fn add_member_vote(
        &mut self,
        id: &str,
        name: &str,
        party: Party,
        state: &str,
        position: Position,
    ) {
        self.add_member(id, name, party, state);
        self.add_vote(id, name, position);
    }

    pub fn add_raw_vote(&mut self, vote: RawVote) {
        self._votes.push(vote);
    }

    pub fn build(self) -> (ParsedRollCall, Roster) {
        (
            ParsedRollCall {
                metadata: self._metadata,
                votes: self._votes,
            },
            Roster::new(self._roster),
        )
    }
}
