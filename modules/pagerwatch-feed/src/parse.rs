use std::sync::LazyLock;

use regex::Regex;

use pagerwatch_common::Incident;

/// Fixed structure of a CFA pager alert: the @@ALERT marker, four free-text
/// segments, a 6-digit map grid reference in parentheses, services and
/// appliances paged, and the FIRS number after a literal F.
static INCIDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@@ALERT (.*?) (.*?) (.*?) (.*?) \((\d{6})\) (.*?) (.*?) F(\d+)").unwrap()
});

/// Parse one raw pager message into a structured incident.
///
/// Returns None for any text that does not fit the whole pattern — that is a
/// normal skip, not an error. Only the first match in the text is considered.
pub fn parse_incident(text: &str) -> Option<Incident> {
    let caps = INCIDENT_RE.captures(text)?;

    Some(Incident {
        response_table_ref: caps[1].to_string(),
        incident_type: caps[2].to_string(),
        description: caps[3].to_string(),
        address: caps[4].to_string(),
        grid_reference: caps[5].to_string(),
        services_paged: caps[6].to_string(),
        appliances_paged: caps[7].to_string(),
        // A FIRS suffix too large for i64 is treated as non-conforming.
        firs_number: caps[8].parse().ok()?,
    })
}
