use log::{debug, info, warn};

use partisan_tally::roster::Roster;
use partisan_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::rollcall::config_reader::*;
use crate::rollcall::io_common::read_text_file;
use crate::rollcall::io_house::HouseClerkReader;
use crate::rollcall::io_senate::SenateLisReader;

pub mod config_reader;
pub mod fetch;
pub mod io_common;
pub mod io_export;
pub mod io_house;
pub mod io_roster;
pub mod io_senate;
pub mod io_upload;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RollCallError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing to JSON"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing CSV file {path}"))]
    WritingCsv { source: csv::Error, path: String },

    // The vote document itself is not usable.
    #[snafu(display("Malformed {chamber} roll call: {reason}"))]
    MalformedDocument { chamber: Chamber, reason: String },
    #[snafu(display("Malformed {chamber} roll call: invalid XML"))]
    ParsingXml {
        source: quick_xml::de::DeError,
        chamber: Chamber,
    },
    #[snafu(display("Unknown position {value:?} for member {member} in {chamber} roll call"))]
    UnknownPosition {
        chamber: Chamber,
        value: String,
        member: String,
    },
    #[snafu(display("Error reading {provider} roster"))]
    ParsingRosterXml {
        source: quick_xml::de::DeError,
        provider: String,
    },

    #[snafu(display("Error downloading {url}"))]
    Downloading { source: reqwest::Error, url: String },
    #[snafu(display("Error downloading {url}: status {status}"))]
    DownloadStatus { url: String, status: u16 },
    #[snafu(display("Error uploading s3://{bucket}/{key}"))]
    Uploading {
        source: s3::error::S3Error,
        bucket: String,
        key: String,
    },
    #[snafu(display("Error uploading s3://{bucket}/{key}: status {status}"))]
    UploadStatus {
        bucket: String,
        key: String,
        status: u16,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RollCallResult<T> = Result<T, RollCallError>;

/// A parser for the roll calls of one chamber.
pub trait RollCallReader {
    fn chamber(&self) -> Chamber;

    /// Parses a complete document. Fails on a malformed document or on a vote
    /// position that is not in the table of the chamber.
    fn read(&self, document: &str) -> RollCallResult<ParsedRollCall>;
}

pub fn reader_for(chamber: Chamber) -> Box<dyn RollCallReader> {
    match chamber {
        Chamber::House => Box::new(HouseClerkReader),
        Chamber::Senate => Box::new(SenateLisReader),
    }
}

/// Everything computed for one roll call.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteReport {
    pub metadata: VoteMetadata,
    pub result: TallyResult,
}

/// Parses a document and runs the normalization and the summary.
///
/// Nothing is produced if the document cannot be parsed.
pub fn process_document(
    reader: &dyn RollCallReader,
    document: &str,
    roster: &Roster,
    rules: &SummaryRules,
) -> RollCallResult<VoteReport> {
    let roll_call = reader.read(document)?;
    debug!(
        "process_document: {} entries in {} vote {}",
        roll_call.votes.len(),
        reader.chamber(),
        roll_call.metadata.vote_number
    );
    let result = tally_roll_call(&roll_call, roster, rules);
    Ok(VoteReport {
        metadata: roll_call.metadata,
        result,
    })
}

fn build_summary_js(report: &VoteReport) -> RollCallResult<JSValue> {
    let unresolved: Vec<JSValue> = report
        .result
        .unresolved
        .iter()
        .map(|u| json!({"index": u.index, "id": u.member.id, "name": u.member.display_name}))
        .collect();
    Ok(json!({
        "vote": serde_json::to_value(&report.metadata).context(SerializingJsonSnafu {})?,
        "summary": serde_json::to_value(&report.result.summary).context(SerializingJsonSnafu {})?,
        "unresolved": unresolved,
    }))
}

// Seats of a full chamber. Vacancies and missing records show up as a difference.
fn expected_members(chamber: Chamber) -> u64 {
    match chamber {
        Chamber::House => 435,
        Chamber::Senate => 100,
    }
}

/// The Democrats and the Independents counted together, as the Independents
/// usually caucus with the Democrats.
fn democrats_with_independents(summary: &PartisanSummary) -> (u64, PositionCounts) {
    let mut members = 0;
    let mut counts = PositionCounts::default();
    for t in summary
        .parties
        .iter()
        .filter(|t| matches!(t.party, Party::Democratic | Party::Independent))
    {
        members += t.members;
        counts.yea += t.counts.yea;
        counts.nay += t.counts.nay;
        counts.present += t.counts.present;
        counts.not_voting += t.counts.not_voting;
    }
    (members, counts)
}

fn print_summary(report: &VoteReport) {
    let meta = &report.metadata;
    let s = &report.result.summary;
    println!();
    println!(
        "{} vote {} ({}): {}",
        meta.chamber, meta.vote_number, meta.date, meta.question
    );
    println!("  Result: {}", meta.result);
    println!("  Total members: {}", s.total_members);
    let expected = expected_members(meta.chamber);
    if s.total_members != expected {
        warn!(
            "{} vote {}: {} members recorded, a full chamber has {}",
            meta.chamber, meta.vote_number, s.total_members, expected
        );
    }
    for t in s.parties.iter() {
        println!(
            "  {:<12} members: {:>3}  Yea: {:>3}  Nay: {:>3}  Present: {:>3}  Not Voting: {:>3}",
            t.party.to_string(),
            t.members,
            t.counts.yea,
            t.counts.nay,
            t.counts.present,
            t.counts.not_voting
        );
    }
    let (di_members, di) = democrats_with_independents(s);
    println!(
        "  Democrats + Independents (D + I) members: {:>3}  Yea: {:>3}  Nay: {:>3}  Present: {:>3}  Not Voting: {:>3}",
        di_members, di.yea, di.nay, di.present, di.not_voting
    );
    println!(
        "  {:<12} members: {:>3}  Yea: {:>3}  Nay: {:>3}  Present: {:>3}  Not Voting: {:>3}",
        "Total",
        s.total_members,
        s.totals.yea,
        s.totals.nay,
        s.totals.present,
        s.totals.not_voting
    );
    println!("  Outcome: {}", s.outcome.description);
    if !s.defectors.is_empty() {
        println!("  Voted against their party:");
        for d in s.defectors.iter() {
            println!(
                "    {} ({}-{}): {}",
                d.name,
                d.party.code(),
                d.state.as_deref().unwrap_or("Unknown"),
                d.position
            );
        }
    }
    if !report.result.unresolved.is_empty() {
        println!(
            "  Warning: {} members not found in the roster",
            report.result.unresolved.len()
        );
    }
    println!();
}

fn load_roster(chamber: Chamber, settings: Option<&RosterSettings>) -> RollCallResult<Roster> {
    let provider = settings
        .map(|s| s.provider.clone())
        .unwrap_or_else(|| io_roster::default_provider(chamber).to_string());
    if provider == "none" {
        info!("No roster: using the party information of the document only");
        return Ok(Roster::default());
    }
    let text = match settings.and_then(|s| s.file_path.clone()) {
        Some(p) => {
            info!("Attempting to read roster file {:?}", p);
            read_text_file(&p)?
        }
        None => {
            let url = fetch::roster_url(chamber, &provider)?;
            fetch::download(&url)?
        }
    };
    let entries = io_roster::read_roster(&provider, &text, chamber)?;
    info!("Read {} roster entries ({})", entries.len(), provider);
    Ok(Roster::new(entries))
}

/// Runs the complete processing of one roll call, as described by the configuration.
pub fn run_vote(
    config: &RollCallConfig,
    check_summary_path: Option<String>,
) -> RollCallResult<VoteReport> {
    info!("config: {:?}", config);

    let request = validate_source(&config.source)?;
    validate_output(&config.output_settings)?;
    let rules = summary_rules(config.rules.as_ref());
    let reader = reader_for(request.chamber);

    let document = match &config.source.file_path {
        Some(p) => {
            info!("Attempting to read vote file {:?}", p);
            read_text_file(p)?
        }
        None => fetch::download(&fetch::vote_url(&request)?)?,
    };
    let roster = load_roster(request.chamber, config.roster.as_ref())?;

    let report = process_document(reader.as_ref(), &document, &roster, &rules)?;
    print_summary(&report);

    if let Some(dir) = &config.output_settings.output_directory {
        let written = io_export::export_report(dir, &report, &config.output_settings)?;
        for p in written.iter() {
            info!("Saved data to {}", p);
        }
        if let Some(bucket) = &config.output_settings.bucket {
            io_upload::upload_files(
                bucket,
                config.output_settings.region.as_deref(),
                request.chamber,
                &written,
            )?;
        }
    }

    let result_js = build_summary_js(&report)?;
    let pretty_js_stats =
        serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;
    debug!("summary:{}", pretty_js_stats);

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(report)
}

pub fn read_summary(path: String) -> RollCallResult<JSValue> {
    let contents =
        fs::read_to_string(path.clone()).context(OpeningFileSnafu { path: path.clone() })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

#[cfg(test)]
mod tests {

    use super::*;
    use snafu::ErrorCompat;

    fn run_vote_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> RollCallResult<()> {
        let test_dir = option_env!("ROLLCALL_TEST_DIR")
            .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data"));
        info!("Running test {}", test_name);
        let config = read_config(&format!("{}/{}/{}", test_dir, test_name, config_lpath))?;
        let res = run_vote(
            &config,
            Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
        );
        if let Err(e) = &res {
            warn!("Error occured {:?}", e);
            eprintln!("An error occured {}", e);
            if let Some(bt) = ErrorCompat::backtrace(e) {
                eprintln!("trace: {}", bt);
            }
        }
        res.map(|_| ())
    }

    fn test_wrapper(test_name: &str) -> RollCallResult<()> {
        run_vote_test(
            test_name,
            format!("{}_config.json", test_name).as_str(),
            format!("{}_expected_summary.json", test_name).as_str(),
        )
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn house_small() {
        init();
        test_wrapper("house_small").unwrap();
    }

    #[test]
    fn senate_small() {
        init();
        test_wrapper("senate_small").unwrap();
    }

    #[test]
    fn senate_close_vote() {
        init();
        test_wrapper("senate_close_vote").unwrap();
    }

    #[test]
    fn malformed_document_is_fatal() {
        init();
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<rollcall-vote>
<vote-metadata>
<congress>119</congress>
<session>1st</session>
<action-date>22-Jan-2025</action-date>
</vote-metadata>
<vote-data>
<recorded-vote><legislator name-id="A000370" party="D" state="NC">Adams</legislator><vote>Yea</vote></recorded-vote>
</vote-data>
</rollcall-vote>"#;
        let res = process_document(
            &HouseClerkReader,
            doc,
            &Roster::default(),
            &SummaryRules::DEFAULT_RULES,
        );
        assert!(matches!(res, Err(RollCallError::MalformedDocument { .. })));
    }

    #[test]
    fn unknown_position_is_fatal() {
        let doc = r#"<roll_call_vote>
<congress>119</congress><session>1</session><vote_number>3</vote_number>
<vote_date>January 9, 2025,  02:00 PM</vote_date>
<members>
<member><member_full>Doe (D-XX)</member_full><last_name>Doe</last_name><party>D</party><state>XX</state><vote_cast>Guilty</vote_cast><lis_member_id>S001</lis_member_id></member>
</members>
</roll_call_vote>"#;
        let res = process_document(
            &SenateLisReader,
            doc,
            &Roster::default(),
            &SummaryRules::DEFAULT_RULES,
        );
        match res {
            Err(RollCallError::UnknownPosition { value, .. }) => assert_eq!(value, "Guilty"),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn same_input_same_output() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/senate_small");
        let doc = read_text_file(&format!("{}/senate_small_vote.xml", dir)).unwrap();
        let roster_txt = read_text_file(&format!("{}/senate_small_roster.xml", dir)).unwrap();
        let entries = io_roster::read_roster("senate_xml", &roster_txt, Chamber::Senate).unwrap();
        let roster = Roster::new(entries);
        let a = process_document(&SenateLisReader, &doc, &roster, &SummaryRules::DEFAULT_RULES)
            .unwrap();
        let b = process_document(&SenateLisReader, &doc, &roster, &SummaryRules::DEFAULT_RULES)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(
            build_summary_js(&a).unwrap().to_string(),
            build_summary_js(&b).unwrap().to_string()
        );
        assert_eq!(
            a.result.summary.totals.total(),
            a.result.records.len() as u64
        );
    }

    #[test]
    fn independents_join_the_democrats() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/senate_small");
        let config = read_config(&format!("{}/senate_small_config.json", dir)).unwrap();
        let report = run_vote(&config, None).unwrap();
        let s = &report.result.summary;
        let (members, counts) = democrats_with_independents(s);
        let d = s.party(Party::Democratic).map(|t| t.members).unwrap_or(0);
        let i = s.party(Party::Independent).map(|t| t.members).unwrap_or(0);
        assert_eq!(members, d + i);
        assert!(i > 0);
        assert_eq!(counts.total(), members);
        assert_eq!(expected_members(Chamber::Senate), 100);
        assert_eq!(expected_members(Chamber::House), 435);
    }

    #[test]
    fn bucket_without_output_directory_is_rejected() {
        init();
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/house_small");
        let mut config = read_config(&format!("{}/house_small_config.json", dir)).unwrap();
        config.output_settings.bucket = Some("roll-calls".to_string());
        let res = run_vote(&config, None);
        assert!(matches!(res, Err(RollCallError::Whatever { .. })));
    }

    #[test]
    fn reference_mismatch_is_reported() {
        init();
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/house_small");
        let config = read_config(&format!("{}/house_small_config.json", dir)).unwrap();
        let res = run_vote(
            &config,
            Some(format!("{}/../senate_small/senate_small_expected_summary.json", dir)),
        );
        assert!(matches!(res, Err(RollCallError::Whatever { .. })));
    }
}
