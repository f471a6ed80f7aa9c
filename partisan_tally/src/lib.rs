/*!
Normalization of US Congress roll-call votes and partisan summaries.

The House Clerk and the Senate publish their roll calls in two different formats.
Once parsed (see the readers of the `rollcall` program), a roll call becomes a
[ParsedRollCall]: some metadata and one [RawVote] per member, in ballot order.

This crate does the rest, without any I/O:
- [normalize_votes] matches every raw vote against a [roster::Roster] and produces
  one [VoteRecord] per entry. Members that cannot be found are kept, with an unknown
  party, and reported as [UnresolvedMember] warnings.
- [summarize] folds the records into a [PartisanSummary].

```
use partisan_tally::builder::Builder;
use partisan_tally::*;

let mut builder = Builder::new(Chamber::House, 119, 1, 17);
builder.add_member_vote("A000001", "Adams", Party::Democratic, "NC", Position::Yea);
builder.add_member_vote("B000002", "Baird", Party::Republican, "IN", Position::Nay);
let (roll_call, roster) = builder.build();

let res = tally_roll_call(&roll_call, &roster, &SummaryRules::DEFAULT_RULES);
assert_eq!(res.records.len(), 2);
assert_eq!(res.summary.totals.yea, 1);
```
*/

mod config;
use log::{debug, info, warn};

use std::collections::BTreeMap;

pub use crate::config::*;
use crate::roster::{default_strategies, ResolutionStrategy, Roster};

pub mod builder;
pub mod manual;
pub mod roster;

/// The records and the summary for one roll call.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyResult {
    pub records: Vec<VoteRecord>,
    pub unresolved: Vec<UnresolvedMember>,
    pub summary: PartisanSummary,
}

/// Output of the normalization step.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Normalized {
    pub records: Vec<VoteRecord>,
    pub unresolved: Vec<UnresolvedMember>,
}

/// Runs the normalization and the summary on a parsed roll call.
pub fn tally_roll_call(
    roll_call: &ParsedRollCall,
    roster: &Roster,
    rules: &SummaryRules,
) -> TallyResult {
    let meta = &roll_call.metadata;
    info!(
        "Processing {} vote {} (congress {}, session {}): {} entries, roster of {}",
        meta.chamber,
        meta.vote_number,
        meta.congress,
        meta.session,
        roll_call.votes.len(),
        roster.len()
    );
    let normalized = normalize_votes(meta.chamber, &roll_call.votes, roster);
    let summary = summarize(meta, &normalized.records, rules);
    TallyResult {
        records: normalized.records,
        unresolved: normalized.unresolved,
        summary,
    }
}

/// Matches the raw votes against the roster with the default strategies.
///
/// The output has exactly one record per input entry, in the same order.
pub fn normalize_votes(chamber: Chamber, votes: &[RawVote], roster: &Roster) -> Normalized {
    normalize_votes_with(chamber, votes, roster, &default_strategies())
}

/// Same as [normalize_votes], with a custom chain of resolution strategies.
pub fn normalize_votes_with(
    chamber: Chamber,
    votes: &[RawVote],
    roster: &Roster,
    strategies: &[Box<dyn ResolutionStrategy>],
) -> Normalized {
    let mut records: Vec<VoteRecord> = Vec::with_capacity(votes.len());
    let mut unresolved: Vec<UnresolvedMember> = Vec::new();

    for (index, raw) in votes.iter().enumerate() {
        let found = strategies.iter().find_map(|s| {
            s.resolve(&raw.member, raw.hint.as_ref(), chamber, roster)
                .map(|entry| (s.resolution(), entry))
        });
        let record = match found {
            Some((resolution, entry)) => {
                debug!(
                    "normalize_votes: {:?} -> {:?} ({:?})",
                    raw.member.id, entry.id, resolution
                );
                VoteRecord {
                    member: raw.member.clone(),
                    name: entry.full_name.clone(),
                    party: entry.party,
                    state: entry.state.clone(),
                    position: raw.position,
                    resolution,
                }
            }
            None => {
                let warning = UnresolvedMember {
                    index,
                    member: raw.member.clone(),
                };
                warn!("{}", warning);
                unresolved.push(warning);
                let (party, state, resolution) = match &raw.hint {
                    Some(h) => (h.party, h.state.clone(), Resolution::Hint),
                    None => (Party::Unknown, None, Resolution::Unresolved),
                };
                VoteRecord {
                    member: raw.member.clone(),
                    name: raw.member.display_name.clone(),
                    party,
                    state,
                    position: raw.position,
                    resolution,
                }
            }
        };
        records.push(record);
    }

    if !unresolved.is_empty() {
        warn!(
            "normalize_votes: {} of {} members not found in the roster",
            unresolved.len(),
            votes.len()
        );
    }
    Normalized {
        records,
        unresolved,
    }
}

/// Builds the partisan summary of a roll call.
///
/// This is a pure fold over the records: an empty list gives an all-zero summary.
pub fn summarize(
    metadata: &VoteMetadata,
    records: &[VoteRecord],
    rules: &SummaryRules,
) -> PartisanSummary {
    let mut totals = PositionCounts::default();
    let mut buckets: BTreeMap<Party, (u64, PositionCounts)> = BTreeMap::new();
    for r in records.iter() {
        totals.add(r.position);
        let bucket = buckets.entry(r.party).or_default();
        bucket.0 += 1;
        bucket.1.add(r.position);
    }

    let parties: Vec<PartyTally> = buckets
        .into_iter()
        .map(|(party, (members, counts))| PartyTally {
            party,
            members,
            counts,
            majority: counts.majority(),
        })
        .collect();

    let majority_of = |party: Party| -> Option<Position> {
        parties
            .iter()
            .find(|t| t.party == party)
            .and_then(|t| t.majority)
    };
    let dem_majority = majority_of(Party::Democratic);
    let rep_majority = majority_of(Party::Republican);
    let partisan_split = matches!((dem_majority, rep_majority), (Some(d), Some(r)) if d != r);

    let margin = totals.yea.abs_diff(totals.nay);
    let is_close =
        totals.yea + totals.nay > 0 && rules.close_margin.map_or(false, |m| margin <= m);

    let tie_breaker = metadata
        .tie_breaker
        .clone()
        .filter(|tb| totals.yea == totals.nay && is_yea_or_nay(tb.position));
    let leading = match totals.majority() {
        Some(p) => Some(p),
        None => tie_breaker.as_ref().map(|tb| tb.position),
    };

    let prevailing_party = match leading {
        Some(p) if partisan_split => {
            if dem_majority == Some(p) {
                Some(Party::Democratic)
            } else {
                Some(Party::Republican)
            }
        }
        _ => None,
    };

    // The defectors are computed against the majority of their own party, not
    // against the final result.
    let mut defectors: Vec<Defector> = Vec::new();
    if is_close && partisan_split {
        for r in records.iter().filter(|r| r.party.is_major()) {
            if let Some(pm) = majority_of(r.party) {
                if is_yea_or_nay(r.position) && r.position != pm {
                    defectors.push(Defector {
                        member_id: r.member.id.clone(),
                        name: r.name.clone(),
                        party: r.party,
                        state: r.state.clone(),
                        position: r.position,
                        party_majority: pm,
                    });
                }
            }
        }
        info!(
            "summarize: close party-line vote (margin {}), {} defectors",
            margin,
            defectors.len()
        );
    }

    let description = describe_outcome(
        &totals,
        leading,
        tie_breaker.as_ref(),
        is_close,
        prevailing_party,
    );
    debug!("summarize: {}", description);

    PartisanSummary {
        total_members: records.len() as u64,
        totals,
        parties,
        outcome: Outcome {
            leading,
            margin,
            tie_breaker,
            is_close,
            partisan_split,
            prevailing_party,
            description,
        },
        defectors,
    }
}

fn is_yea_or_nay(p: Position) -> bool {
    matches!(p, Position::Yea | Position::Nay)
}

fn describe_outcome(
    totals: &PositionCounts,
    leading: Option<Position>,
    tie_breaker: Option<&TieBreaker>,
    is_close: bool,
    prevailing_party: Option<Party>,
) -> String {
    let mut parts: Vec<String> = Vec::new();
    if totals.yea == 0 && totals.nay == 0 {
        parts.push("No Yea or Nay votes recorded".to_string());
    } else if let Some(tb) = tie_breaker {
        parts.push(format!(
            "Tied {}-{}, broken {} by {}",
            totals.yea, totals.nay, tb.position, tb.by_whom
        ));
    } else {
        match leading {
            Some(Position::Nay) => {
                parts.push(format!("Nay prevails {}-{}", totals.nay, totals.yea))
            }
            Some(_) => parts.push(format!("Yea prevails {}-{}", totals.yea, totals.nay)),
            None => parts.push(format!("Tied {}-{}", totals.yea, totals.nay)),
        }
    }
    if is_close {
        parts.push("close vote".to_string());
    }
    if let Some(party) = prevailing_party {
        parts.push(format!("carried by the {} majority", party));
    }
    parts.join("; ")
}
