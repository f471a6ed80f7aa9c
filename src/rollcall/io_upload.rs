// Copies the written files to an S3 bucket.

use s3::bucket::Bucket;
use s3::creds::Credentials;
use s3::region::Region;
use std::path::Path;

use crate::rollcall::*;

const DEFAULT_REGION: &str = "us-east-1";

/// The key of a written file in the bucket: `<chamber>/<file name>`.
pub fn upload_key(chamber: Chamber, path: &str) -> String {
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());
    format!("{}/{}", chamber.label(), name)
}

fn region_name(region: Option<&str>) -> String {
    region
        .map(|r| r.to_string())
        .or_else(|| std::env::var("AWS_REGION").ok())
        .or_else(|| std::env::var("AWS_DEFAULT_REGION").ok())
        .unwrap_or_else(|| DEFAULT_REGION.to_string())
}

/// Uploads the files and returns their keys. The credentials come from the
/// usual AWS environment variables and profile files.
pub fn upload_files(
    bucket_name: &str,
    region: Option<&str>,
    chamber: Chamber,
    paths: &[String],
) -> RollCallResult<Vec<String>> {
    let region_s = region_name(region);
    let region: Region = region_s
        .parse()
        .with_whatever_context(|_| format!("Invalid S3 region {:?}", region_s))?;
    let credentials =
        Credentials::default().with_whatever_context(|_| "No AWS credentials found".to_string())?;
    let bucket = Bucket::new(bucket_name, region, credentials).context(UploadingSnafu {
        bucket: bucket_name,
        key: "",
    })?;

    let mut keys: Vec<String> = Vec::with_capacity(paths.len());
    for p in paths.iter() {
        let key = upload_key(chamber, p);
        let content = fs::read(p).context(OpeningFileSnafu { path: p })?;
        let response = bucket.put_object(&key, &content).context(UploadingSnafu {
            bucket: bucket_name,
            key: &key,
        })?;
        let status = response.status_code();
        if !(200..300).contains(&status) {
            return UploadStatusSnafu {
                bucket: bucket_name,
                key,
                status,
            }
            .fail();
        }
        info!("Uploaded {} to s3://{}/{}", p, bucket_name, key);
        keys.push(key);
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_the_chamber() {
        assert_eq!(
            upload_key(Chamber::Senate, "/tmp/out/senate_119_1_vote_00007.csv"),
            "senate/senate_119_1_vote_00007.csv"
        );
        assert_eq!(
            upload_key(Chamber::House, "house_2025_23_summary.json"),
            "house/house_2025_23_summary.json"
        );
    }

    #[test]
    fn explicit_region_wins() {
        assert_eq!(region_name(Some("eu-west-3")), "eu-west-3");
    }
}
