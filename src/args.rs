use clap::Parser;

/// Fetches a roll-call vote of the US House or Senate and summarizes it by party.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file describing the vote, the roster and the outputs.
    /// The other options override the values it contains.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// ('house' or 'senate') The chamber of the vote.
    #[clap(long, value_parser)]
    pub chamber: Option<String>,

    /// (Senate) The number of the congress, for example 119.
    #[clap(long, value_parser)]
    pub congress: Option<u32>,

    /// (Senate) The session of the congress: 1 or 2.
    #[clap(long, value_parser)]
    pub session: Option<u32>,

    /// The number of the roll call.
    #[clap(long, value_parser)]
    pub vote_num: Option<u32>,

    /// (House) The year of the roll call. House roll calls are numbered within a year.
    #[clap(long, value_parser)]
    pub year: Option<i32>,

    /// (file path) A local copy of the vote document. If not given, the document is downloaded.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path) A local copy of the roster. If not given, the roster of the chamber is downloaded.
    #[clap(long, value_parser)]
    pub roster: Option<String>,

    /// (json, senate_xml, house_xml or none) The format of the roster. Defaults to the XML list
    /// of the chamber.
    #[clap(long, value_parser)]
    pub roster_type: Option<String>,

    /// (directory) If specified, the records and the summary are written as CSV and JSON files
    /// in this directory.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (S3 bucket name) If specified, the files written in the output directory are also
    /// uploaded to this bucket, under '<chamber>/<file name>'. Requires --out.
    #[clap(long, value_parser)]
    pub bucket: Option<String>,

    /// If specified, a party-line vote with a Yea/Nay margin at most this value is considered
    /// close, and the members voting against their party are listed.
    #[clap(long, value_parser)]
    pub close_margin: Option<u64>,

    /// (file path) A reference summary in JSON format. If provided, rollcall checks that the
    /// computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
