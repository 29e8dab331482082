use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) line: u64,
    pub(crate) member_id: Option<String>,
    pub(crate) assigned_role: String,
    pub(crate) primary_capability: Option<String>,
    pub(crate) capabilities: Vec<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let row: RosterRow = record.deserialize(Some(&headers))?;

        records.push(RosterRecord {
            line,
            member_id: row.member_id,
            assigned_role: row.assigned_role.unwrap_or_default(),
            primary_capability: row.primary_capability,
            capabilities: split_capabilities(row.capabilities.as_deref()),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Member ID", default, deserialize_with = "empty_string_as_none")]
    member_id: Option<String>,
    #[serde(
        rename = "Assigned Role",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    assigned_role: Option<String>,
    #[serde(
        rename = "Primary Capability",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    primary_capability: Option<String>,
    #[serde(
        rename = "Capabilities",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    capabilities: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn split_capabilities(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split([';', ',', '|'])
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
pub(crate) fn split_capabilities_for_tests(raw: Option<&str>) -> Vec<String> {
    split_capabilities(raw)
}
