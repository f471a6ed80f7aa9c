use crate::rollcall::io_common::resolve_path;
use crate::rollcall::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "writeCsv")]
    pub write_csv: Option<bool>,
    #[serde(rename = "writeJson")]
    pub write_json: Option<bool>,
    /// An S3 bucket that receives a copy of every file written.
    pub bucket: Option<String>,
    /// The region of the bucket. Taken from AWS_REGION when missing.
    pub region: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub chamber: String,
    pub congress: Option<u32>,
    pub session: Option<u32>,
    #[serde(rename = "voteNumber")]
    pub vote_number: Option<u32>,
    pub year: Option<i32>,
    /// A local copy of the vote document. Downloaded when missing.
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RosterSettings {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesSettings {
    #[serde(rename = "closeMargin")]
    pub close_margin: Option<u64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RollCallConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    pub source: SourceSettings,
    pub roster: Option<RosterSettings>,
    pub rules: Option<RulesSettings>,
}

/// The vote to process, once the source settings have been checked.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct VoteRequest {
    pub chamber: Chamber,
    pub congress: Option<u32>,
    pub session: Option<u32>,
    pub year: Option<i32>,
    pub vote_number: Option<u32>,
}

pub fn parse_chamber(s: &str) -> RollCallResult<Chamber> {
    match s.trim().to_lowercase().as_str() {
        "house" => Ok(Chamber::House),
        "senate" => Ok(Chamber::Senate),
        x => whatever!("Chamber must be 'house' or 'senate', got {:?}", x),
    }
}

pub fn validate_source(source: &SourceSettings) -> RollCallResult<VoteRequest> {
    let req = VoteRequest {
        chamber: parse_chamber(&source.chamber)?,
        congress: source.congress,
        session: source.session,
        year: source.year,
        vote_number: source.vote_number,
    };
    // Identifying fields are only needed to download the document.
    if source.file_path.is_none() {
        if req.vote_number.is_none() {
            whatever!("A vote number is required to download a roll call")
        }
        match req.chamber {
            Chamber::House if req.year.is_none() => {
                whatever!("The year is required to download a House roll call")
            }
            Chamber::Senate if req.congress.is_none() || req.session.is_none() => {
                whatever!("The congress and the session are required to download a Senate roll call")
            }
            _ => {}
        }
    }
    if let Some(s) = req.session {
        if s == 0 {
            whatever!("Invalid session number {}", s)
        }
    }
    Ok(req)
}

/// Uploads are made from the written files, so they need an output directory.
pub fn validate_output(settings: &OutputSettings) -> RollCallResult<()> {
    if let (Some(bucket), None) = (&settings.bucket, &settings.output_directory) {
        whatever!(
            "An output directory is required to upload to the bucket {:?}",
            bucket
        )
    }
    Ok(())
}

pub fn summary_rules(rules: Option<&RulesSettings>) -> SummaryRules {
    SummaryRules {
        close_margin: rules.and_then(|r| r.close_margin),
    }
}

/// Reads a configuration file. The relative paths it contains are taken
/// relative to the directory of the file.
pub fn read_config(path: &str) -> RollCallResult<RollCallConfig> {
    let config_str = read_text_file(path)?;
    let mut config: RollCallConfig =
        serde_json::from_str(&config_str).context(ParsingJsonSnafu { path })?;
    let root = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
    config.source.file_path = config.source.file_path.map(|p| resolve_path(root, &p));
    if let Some(r) = config.roster.as_mut() {
        r.file_path = r.file_path.as_ref().map(|p| resolve_path(root, p));
    }
    config.output_settings.output_directory = config
        .output_settings
        .output_directory
        .map(|p| resolve_path(root, &p));
    debug!("read_config: {:?}", config);
    Ok(config)
}
