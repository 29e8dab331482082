use super::domain::{EventType, RequirementProfile, RequirementTier, RoleRequirement};
use crate::config::StaffingConfig;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Startup-time validation failures. None of these can occur per analysis.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no requirement profile defined for {0:?}")]
    MissingProfile(EventType),
    #[error("requirement profile for {0:?} defined more than once")]
    DuplicateProfile(EventType),
    #[error("{event_type:?} profile declares role '{role_label}' more than once")]
    DuplicateRole {
        event_type: EventType,
        role_label: String,
    },
    #[error("role '{role_label}' in the {event_type:?} profile must require at least one member")]
    ZeroMinCount {
        event_type: EventType,
        role_label: String,
    },
    #[error("role '{role_label}' in the {event_type:?} profile has no usable capability")]
    UnspecifiedCapability {
        event_type: EventType,
        role_label: String,
    },
    #[error("failed to read requirement profiles: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid requirement profile data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable lookup from event type to its requirement profile.
///
/// Construction validates that every [`EventType`] has exactly one well-formed
/// profile, which is what makes [`RequirementRegistry::profile_for`] total.
#[derive(Debug, Clone)]
pub struct RequirementRegistry {
    profiles: Vec<RequirementProfile>,
}

impl RequirementRegistry {
    pub fn standard() -> Result<Self, RegistryError> {
        Self::from_profiles(standard_profiles())
    }

    pub fn from_profiles(profiles: Vec<RequirementProfile>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.event_type()) {
                return Err(RegistryError::DuplicateProfile(profile.event_type()));
            }
            validate_profile(profile)?;
        }

        let mut ordered = Vec::with_capacity(EventType::ordered().len());
        for event_type in EventType::ordered() {
            let profile = profiles
                .iter()
                .find(|profile| profile.event_type() == event_type)
                .cloned()
                .ok_or(RegistryError::MissingProfile(event_type))?;
            ordered.push(profile);
        }

        Ok(Self { profiles: ordered })
    }

    /// Reads a JSON array of profile definitions.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let definitions: Vec<ProfileDefinition> = serde_json::from_reader(reader)?;
        let profiles = definitions
            .into_iter()
            .map(ProfileDefinition::into_profile)
            .collect();
        Self::from_profiles(profiles)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn load(config: &StaffingConfig) -> Result<Self, RegistryError> {
        match &config.profiles_path {
            Some(path) => {
                let registry = Self::from_path(path)?;
                info!(path = %path.display(), "loaded requirement profiles from file");
                Ok(registry)
            }
            None => {
                info!("using standard requirement profiles");
                Self::standard()
            }
        }
    }

    pub fn profile_for(&self, event_type: EventType) -> &RequirementProfile {
        &self.profiles[event_type.index()]
    }

    pub fn profiles(&self) -> &[RequirementProfile] {
        &self.profiles
    }
}

fn validate_profile(profile: &RequirementProfile) -> Result<(), RegistryError> {
    let event_type = profile.event_type();
    let mut labels = HashSet::new();

    for requirement in profile.requirements() {
        let role_label = requirement.role_label.clone();
        if !labels.insert(requirement.role_label.as_str()) {
            return Err(RegistryError::DuplicateRole {
                event_type,
                role_label,
            });
        }
        if requirement.min_count == 0 {
            return Err(RegistryError::ZeroMinCount {
                event_type,
                role_label,
            });
        }
        if requirement.capability.is_unspecified() {
            return Err(RegistryError::UnspecifiedCapability {
                event_type,
                role_label,
            });
        }
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
struct ProfileDefinition {
    event_type: EventType,
    min_total_members: usize,
    requirements: Vec<RequirementDefinition>,
}

#[derive(Debug, Deserialize)]
struct RequirementDefinition {
    role_label: String,
    capability: String,
    tier: RequirementTier,
    #[serde(default = "default_min_count")]
    min_count: usize,
}

fn default_min_count() -> usize {
    1
}

impl ProfileDefinition {
    fn into_profile(self) -> RequirementProfile {
        let requirements = self
            .requirements
            .into_iter()
            .map(|definition| {
                RoleRequirement::new(
                    definition.role_label.trim(),
                    &definition.capability,
                    definition.tier,
                )
                .with_min_count(definition.min_count)
            })
            .collect();

        RequirementProfile::new(self.event_type, self.min_total_members, requirements)
    }
}

fn standard_profiles() -> Vec<RequirementProfile> {
    use RequirementTier::{Critical, High, Medium};

    vec![
        RequirementProfile::new(
            EventType::Service,
            5,
            vec![
                RoleRequirement::new("Lead Vocalist", "vocal", Critical),
                RoleRequirement::new("Piano Principal", "piano", Critical),
                RoleRequirement::new("Drummer", "drums", Critical),
                RoleRequirement::new("Guitarist", "guitar", High),
                RoleRequirement::new("Bassist", "bass", High),
                RoleRequirement::new("Backing Vocalist", "vocal", Medium),
                RoleRequirement::new("Sound Engineer", "sound", Medium),
            ],
        ),
        RequirementProfile::new(
            EventType::Rehearsal,
            2,
            vec![
                RoleRequirement::new("Piano Principal", "piano", Critical),
                RoleRequirement::new("Lead Vocalist", "vocal", High),
                RoleRequirement::new("Guitarist", "guitar", Medium),
            ],
        ),
        RequirementProfile::new(
            EventType::Concert,
            8,
            vec![
                RoleRequirement::new("Lead Vocalists", "vocal", Critical).with_min_count(2),
                RoleRequirement::new("Piano Principal", "piano", Critical),
                RoleRequirement::new("Drummer", "drums", Critical),
                RoleRequirement::new("Bassist", "bass", Critical),
                RoleRequirement::new("Guitarist", "guitar", High),
                RoleRequirement::new("Backing Vocalists", "vocal", High).with_min_count(2),
                RoleRequirement::new("Sound Engineer", "sound", Medium),
                RoleRequirement::new("Violinist", "violin", Medium),
            ],
        ),
        RequirementProfile::new(
            EventType::Training,
            1,
            vec![
                RoleRequirement::new("Accompanist", "piano", Critical),
                RoleRequirement::new("Vocal Coach", "vocal", High),
                RoleRequirement::new("Guitarist", "guitar", Medium),
            ],
        ),
    ]
}
