use crate::infra::{parse_date, parse_event_type, LoggingAlertPublisher};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use worship_staffing::config::AppConfig;
use worship_staffing::error::AppError;
use worship_staffing::telemetry;
use worship_staffing::workflows::roster_import::RosterImporter;
use worship_staffing::workflows::staffing::{
    EventId, EventStaffingRequest, EventType, RequirementProfile, RequirementRegistry,
    RequirementTier, StaffingReview, StaffingService,
};

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Event type: service, rehearsal, concert or training
    #[arg(long, value_parser = parse_event_type)]
    pub(crate) event_type: EventType,
    /// Identifier used in the report and any raised alert
    #[arg(long, default_value = "cli-event")]
    pub(crate) event_id: String,
    /// Roster CSV export (Member ID, Assigned Role, Primary Capability, Capabilities)
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Event date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) event_date: Option<NaiveDate>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProfilesArgs {
    /// Only print the profile for this event type
    #[arg(long, value_parser = parse_event_type)]
    pub(crate) event_type: Option<EventType>,
}

pub(crate) fn run_staffing_analysis(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        event_type,
        event_id,
        roster_csv,
        event_date,
        today,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let registry = Arc::new(RequirementRegistry::load(&config.staffing)?);
    let assignments = match &roster_csv {
        Some(path) => RosterImporter::from_path(path)?,
        None => Vec::new(),
    };

    let service = StaffingService::new(registry, Arc::new(LoggingAlertPublisher));
    let request = EventStaffingRequest {
        event_id: EventId(event_id),
        event_type,
        event_date,
        assignments,
    };

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let review = service.review(&request, today)?;

    match &roster_csv {
        Some(path) => println!("Roster source: {}", path.display()),
        None => println!("Roster source: none (empty roster)"),
    }
    print!("{}", ReviewReport(&review));

    Ok(())
}

pub(crate) fn run_profile_listing(args: ProfilesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = RequirementRegistry::load(&config.staffing)?;

    let profiles: Vec<&RequirementProfile> = match args.event_type {
        Some(event_type) => vec![registry.profile_for(event_type)],
        None => registry.profiles().iter().collect(),
    };

    for (index, profile) in profiles.into_iter().enumerate() {
        if index > 0 {
            println!();
        }
        print!("{}", ProfileReport(profile));
    }

    Ok(())
}

/// Plain-text rendering of a review for terminal output.
pub(crate) struct ReviewReport<'a>(pub(crate) &'a StaffingReview);

impl fmt::Display for ReviewReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let review = self.0;
        let summary = review.result.summary();

        writeln!(
            f,
            "Staffing review for {} ({})",
            review.event_id, summary.event_label
        )?;
        match (review.event_date, review.days_until_event) {
            (Some(date), Some(days)) if days < 0 => {
                writeln!(f, "Event date: {date} ({} day(s) ago)", -days)?
            }
            (Some(date), Some(days)) => writeln!(f, "Event date: {date} (in {days} day(s))")?,
            _ => writeln!(f, "Event date: not scheduled")?,
        }
        writeln!(
            f,
            "Members: {} of {} required",
            summary.total_members, summary.min_required
        )?;

        writeln!(f, "\nTier coverage")?;
        for entry in &summary.tier_coverage {
            writeln!(
                f,
                "- {}: {}/{} roles filled",
                entry.tier_label, entry.satisfied, entry.total
            )?;
        }

        if summary.assignments.is_empty() {
            writeln!(f, "\nFilled roles: none")?;
        } else {
            writeln!(f, "\nFilled roles")?;
            for assignment in &summary.assignments {
                let members = assignment
                    .member_ids
                    .iter()
                    .map(|member| member.0.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(
                    f,
                    "- [{}] {}: {}",
                    assignment.tier_label, assignment.role_label, members
                )?;
            }
        }

        if summary.gaps.is_empty() {
            writeln!(f, "\nGaps: none")?;
        } else {
            writeln!(f, "\nGaps")?;
            for gap in &summary.gaps {
                write!(f, "- [{}] {} ({}", gap.tier_label, gap.role_label, gap.capability)?;
                if gap.min_count > 1 {
                    write!(f, " x{}", gap.min_count)?;
                }
                writeln!(f, ")")?;
            }
        }

        writeln!(f, "\nVerdict: {}", summary.verdict_label)?;
        for reason in &summary.verdict_reasons {
            writeln!(f, "- {reason}")?;
        }
        if review.alert_raised {
            writeln!(f, "Sign-up alert logged (no notification channel configured)")?;
        }

        Ok(())
    }
}

/// Plain-text rendering of one requirement profile.
pub(crate) struct ProfileReport<'a>(pub(crate) &'a RequirementProfile);

impl fmt::Display for ProfileReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.0;
        writeln!(
            f,
            "{} (minimum {} member(s))",
            profile.event_type().label(),
            profile.min_total_members()
        )?;

        for tier in RequirementTier::ordered() {
            let requirements = profile.requirements_for_tier(tier);
            if requirements.is_empty() {
                continue;
            }
            writeln!(f, "{}", tier.label())?;
            for requirement in requirements {
                write!(
                    f,
                    "- {} ({}",
                    requirement.role_label,
                    requirement.capability.label()
                )?;
                if requirement.min_count > 1 {
                    write!(f, " x{}", requirement.min_count)?;
                }
                writeln!(f, ")")?;
            }
        }

        Ok(())
    }
}
