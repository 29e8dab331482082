//! CSV import of event assignments exported by the scheduling application.
//!
//! Expected columns: `Member ID`, `Assigned Role`, `Primary Capability`, and
//! `Capabilities` (a `;`, `,` or `|` separated list in declaration order). Only
//! `Member ID` is mandatory per row. Repeated members are passed through as-is;
//! the staffing service rejects them.

mod parser;

use crate::workflows::staffing::domain::{MemberAssignment, MemberId};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingMemberId { line: u64 },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingMemberId { line } => {
                write!(f, "roster row on line {} has no member id", line)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::MissingMemberId { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<MemberAssignment>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses assignments in file order, one per row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<MemberAssignment>, RosterImportError> {
        let mut assignments = Vec::new();

        for record in parser::parse_records(reader)? {
            let member_id = record
                .member_id
                .ok_or(RosterImportError::MissingMemberId { line: record.line })?;

            assignments.push(MemberAssignment {
                member_id: MemberId(member_id),
                assigned_role: record.assigned_role,
                primary_capability: record.primary_capability,
                capabilities: record.capabilities,
            });
        }

        debug!(rows = assignments.len(), "roster export parsed");
        Ok(assignments)
    }
}
