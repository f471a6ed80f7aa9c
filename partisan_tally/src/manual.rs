/*!

This is the long-form manual for `partisan_tally` and `rollcall`.

## Input formats

Two vote formats are supported, one per chamber.

### House (`house`)

Roll calls published by the Clerk of the House, for example
`https://clerk.house.gov/evs/2025/roll017.xml`.

Notes:
- the year of the vote and the roll call number identify the document
- the member identifier is the bioguide id (`legislator/@name-id`)
- the positions `Aye` and `No` (used for some questions) count as `Yea` and `Nay`
- party and state are printed next to each legislator. They are only used when the
  member is missing from the roster.

### Senate (`senate`)

Roll calls published on senate.gov (LIS format), for example
`https://www.senate.gov/legislative/LIS/roll_call_votes/vote1191/vote_119_1_00015.xml`.

Notes:
- the member identifier is the LIS member id (`S428`). The roster published by the
  Senate uses bioguide ids, so the senators are usually matched by name.
- a blank position counts as `Not Voting`
- a tie broken by the presiding officer is reported in the outcome

Any position not listed above (`Guilty`, a candidate name in a Speaker election, ...)
stops the processing: such votes are not supported.

## Rosters

The roster gives the party and the state of each member. Three formats are read:

* `json` a list of entries:

```json
[
  {"id": "A000370", "fullName": "Alma S. Adams", "lastName": "Adams",
   "party": "D", "state": "NC", "chamber": "house"}
]
```

* `senate_xml` the contact list of the Senate (`senators_cfm.xml`)
* `house_xml` the member list of the Clerk (`MemberData.xml`). Vacant seats are skipped.

Members are matched by identifier, then by name, then by last name. A name that matches
several members (two senators Scott) is resolved with the state printed in the vote,
if any. Members that cannot be matched are kept, with an `Unknown` party.

## Summary

The summary counts the positions overall and per party. The majority of a party is
the more frequent of Yea and Nay among its members.

When the two major parties have opposite majorities and the overall margin
between Yea and Nay is at most `closeMargin` votes, the members who voted against
the majority of their own party are listed as defectors. There is no default for
`closeMargin`: without it, no defector is listed.

## Configuration file

```json
{
  "outputSettings": {"outputDirectory": "votes", "writeCsv": true, "writeJson": true,
                     "bucket": "my-roll-calls", "region": "us-east-1"},
  "source": {"chamber": "senate", "congress": 119, "session": 1, "voteNumber": 15,
             "filePath": "vote_119_1_00015.xml"},
  "roster": {"provider": "senate_xml", "filePath": "senators_cfm.xml"},
  "rules": {"closeMargin": 2}
}
```

Relative paths are resolved against the directory of the configuration file.
Without `filePath`, the documents are downloaded from the official sites.

## Outputs

The summary is always printed. With an output directory, the files are named after
the vote: `house_2025_17` (year and roll call number) or `senate_119_1_vote_00015`
(congress, session, and the vote number padded to 5 digits):

- `<name>.csv` one row per member: `id,name,party,state,vote`
- `<name>_partisan.csv` the positions by party. The winning position is marked with `✓`.
- `<name>_records.json` and `<name>_summary.json`

With `bucket` (or `--bucket`), every written file is also uploaded to that S3 bucket,
under `<chamber>/<file name>`. The credentials are the usual AWS ones (environment
variables or profile files).
*/
