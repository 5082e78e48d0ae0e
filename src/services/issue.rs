use anyhow::{Context, Result};
use url::Url;

use crate::guard::MinIntervalGuard;
use crate::models::listing::Listing;

const ISSUE_LABEL: &str = "annonce";

/// Builds the prefilled issue-creation link for the hosted repository: the
/// listing's fields travel as a YAML-fenced block in the body. The receiving
/// automation is an opaque collaborator.
pub fn draft_issue_url(repo_url: &str, listing: &Listing) -> Result<Url> {
    let endpoint = format!("{}/issues/new", repo_url.trim_end_matches('/'));
    let mut url = Url::parse(&endpoint)
        .with_context(|| format!("invalid issue repository url: {}", repo_url))?;

    url.query_pairs_mut()
        .append_pair("title", &issue_title(listing))
        .append_pair("labels", ISSUE_LABEL)
        .append_pair("body", &issue_body(listing));

    Ok(url)
}

fn issue_title(listing: &Listing) -> String {
    let subject = listing
        .address
        .as_deref()
        .or(listing.label.as_deref())
        .unwrap_or("sans adresse");
    format!("Nouvelle annonce: {}", subject)
}

fn issue_body(listing: &Listing) -> String {
    format!(
        "```yaml\nloyer: {}\nadresse: {}\ncuisine_equipee: {}\ntype: {}\nparking: {}\nchambres: {}\nsurface_m2: {}\nurl: {}\nlabel: {}\n```\n",
        yaml_int(listing.rent),
        yaml_text(listing.address.as_deref()),
        yaml_text(listing.kitchen_equipped.as_deref()),
        yaml_text(listing.property_type.as_deref()),
        yaml_text(listing.parking.as_deref()),
        yaml_int(listing.bedrooms),
        yaml_float(listing.surface_m2),
        yaml_text(listing.url.as_deref()),
        yaml_text(listing.label.as_deref()),
    )
}

// Absent values serialize as YAML null so the automation sees every key.
fn yaml_text(value: Option<&str>) -> String {
    match value {
        Some(text) => format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\"")),
        None => "~".to_string(),
    }
}

fn yaml_int(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "~".to_string())
}

fn yaml_float(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "~".to_string())
}

/// Debounced submit action: a second trigger inside the guard window is
/// silently dropped, never queued.
pub struct IssueSubmitter {
    repo_url: String,
    guard: MinIntervalGuard,
}

impl IssueSubmitter {
    pub fn new(repo_url: String, guard: MinIntervalGuard) -> IssueSubmitter {
        IssueSubmitter { repo_url, guard }
    }

    /// The prefilled link to open, or None when debounced.
    pub fn try_submit(&mut self, listing: &Listing) -> Result<Option<Url>> {
        if !self.guard.try_acquire() {
            return Ok(None);
        }
        draft_issue_url(&self.repo_url, listing).map(Some)
    }
}
