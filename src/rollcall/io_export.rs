// Writes the records and the summary of a vote to the output directory.

use chrono::Datelike;
use std::path::Path;

use crate::rollcall::config_reader::OutputSettings;
use crate::rollcall::*;

/// The common prefix of the files written for a vote.
///
/// House votes are numbered within a year, Senate votes within a session.
pub fn output_stem(metadata: &VoteMetadata) -> String {
    match metadata.chamber {
        Chamber::House => format!("house_{}_{}", metadata.date.year(), metadata.vote_number),
        Chamber::Senate => format!(
            "senate_{}_{}_vote_{:05}",
            metadata.congress, metadata.session, metadata.vote_number
        ),
    }
}

fn write_records_csv(path: &str, records: &[VoteRecord]) -> RollCallResult<()> {
    let mut wtr = csv::Writer::from_path(path).context(WritingCsvSnafu { path })?;
    wtr.write_record(["id", "name", "party", "state", "vote"])
        .context(WritingCsvSnafu { path })?;
    for r in records.iter() {
        wtr.write_record([
            r.member.id.as_str(),
            r.name.as_str(),
            r.party.code(),
            r.state.as_deref().unwrap_or("Unknown"),
            r.position.label(),
        ])
        .context(WritingCsvSnafu { path })?;
    }
    wtr.flush().context(WritingFileSnafu { path })
}

// One row per position, one column per party. The winning position is marked.
fn write_partisan_csv(path: &str, summary: &PartisanSummary) -> RollCallResult<()> {
    let mut wtr = csv::Writer::from_path(path).context(WritingCsvSnafu { path })?;
    let mut header: Vec<String> = vec!["vote".to_string()];
    header.extend(summary.parties.iter().map(|t| t.party.to_string()));
    header.push("Total".to_string());
    wtr.write_record(&header).context(WritingCsvSnafu { path })?;
    for position in Position::ALL.iter() {
        let label = if summary.outcome.leading == Some(*position) {
            format!("{} ✓", position)
        } else {
            position.to_string()
        };
        let mut row: Vec<String> = vec![label];
        row.extend(
            summary
                .parties
                .iter()
                .map(|t| t.counts.get(*position).to_string()),
        );
        row.push(summary.totals.get(*position).to_string());
        wtr.write_record(&row).context(WritingCsvSnafu { path })?;
    }
    wtr.flush().context(WritingFileSnafu { path })
}

fn write_json<T: serde::Serialize + ?Sized>(path: &str, value: &T) -> RollCallResult<()> {
    let s = serde_json::to_string_pretty(value).context(SerializingJsonSnafu {})?;
    fs::write(path, s).context(WritingFileSnafu { path })
}

/// Writes the files selected by the settings and returns their paths.
/// Both formats are written unless disabled.
pub fn export_report(
    dir: &str,
    report: &VoteReport,
    settings: &OutputSettings,
) -> RollCallResult<Vec<String>> {
    fs::create_dir_all(dir).context(WritingFileSnafu { path: dir })?;
    let stem = output_stem(&report.metadata);
    let file = |suffix: &str| Path::new(dir).join(format!("{}{}", stem, suffix)).display().to_string();
    let mut written: Vec<String> = Vec::new();

    if settings.write_csv.unwrap_or(true) {
        let p = file(".csv");
        write_records_csv(&p, &report.result.records)?;
        written.push(p);
        let p = file("_partisan.csv");
        write_partisan_csv(&p, &report.result.summary)?;
        written.push(p);
    }
    if settings.write_json.unwrap_or(true) {
        let p = file("_records.json");
        write_json(&p, &report.result.records)?;
        written.push(p);
        let p = file("_summary.json");
        write_json(&p, &super::build_summary_js(report)?)?;
        written.push(p);
    }
    debug!("export_report: {:?}", written);
    Ok(written)
}
