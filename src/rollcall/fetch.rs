// Retrieval of the vote documents and the rosters from the official sites.

use crate::rollcall::config_reader::VoteRequest;
use crate::rollcall::*;

const USER_AGENT: &str = concat!("rollcall/", env!("CARGO_PKG_VERSION"));

const SENATE_ROSTER_URL: &str = "https://www.senate.gov/general/contact_information/senators_cfm.xml";
const HOUSE_ROSTER_URL: &str = "https://clerk.house.gov/xml/lists/MemberData.xml";

/// The address of the XML document of a roll call.
pub fn vote_url(request: &VoteRequest) -> RollCallResult<String> {
    let vote = match request.vote_number {
        Some(v) => v,
        None => whatever!("No vote number given"),
    };
    match request.chamber {
        Chamber::House => match request.year {
            Some(year) => Ok(format!(
                "https://clerk.house.gov/evs/{}/roll{:03}.xml",
                year, vote
            )),
            None => whatever!("The year is required for a House roll call"),
        },
        Chamber::Senate => match (request.congress, request.session) {
            (Some(congress), Some(session)) => Ok(format!(
                "https://www.senate.gov/legislative/LIS/roll_call_votes/vote{c}{s}/vote_{c}_{s}_{v:05}.xml",
                c = congress,
                s = session,
                v = vote
            )),
            _ => whatever!("The congress and the session are required for a Senate roll call"),
        },
    }
}

pub fn roster_url(chamber: Chamber, provider: &str) -> RollCallResult<String> {
    match (chamber, provider) {
        (Chamber::Senate, "senate_xml") => Ok(SENATE_ROSTER_URL.to_string()),
        (Chamber::House, "house_xml") => Ok(HOUSE_ROSTER_URL.to_string()),
        (_, p) => whatever!(
            "No download location for a {} roster of type {:?}: provide a roster file",
            chamber,
            p
        ),
    }
}

/// Downloads a document as text. Any status other than a success is an error.
pub fn download(url: &str) -> RollCallResult<String> {
    info!("Downloading {}", url);
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context(DownloadingSnafu { url })?;
    let resp = client.get(url).send().context(DownloadingSnafu { url })?;
    let status = resp.status();
    if !status.is_success() {
        return DownloadStatusSnafu {
            url,
            status: status.as_u16(),
        }
        .fail();
    }
    let body = resp.text().context(DownloadingSnafu { url })?;
    debug!("download: {} bytes from {}", body.len(), url);
    Ok(body)
}
