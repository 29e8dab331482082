use super::capability::CapabilityToken;
use super::domain::{MemberId, RequirementProfile, RoleRequirement, RosterEntry};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequirementVerdict {
    Satisfied { member_ids: Vec<MemberId> },
    Unmatched { available: usize },
}

#[derive(Debug, Clone)]
pub(crate) struct RequirementMatch<'p> {
    pub requirement: &'p RoleRequirement,
    pub verdict: RequirementVerdict,
}

#[derive(Debug, Clone)]
pub(crate) struct MatchOutcome<'p> {
    pub matches: Vec<RequirementMatch<'p>>,
    pub total_members: usize,
}

/// Members not yet claimed by a requirement, grouped by capability in first-seen order.
struct AvailabilityPool<'r> {
    by_capability: HashMap<&'r CapabilityToken, VecDeque<&'r MemberId>>,
    members: usize,
}

impl<'r> AvailabilityPool<'r> {
    fn from_roster(roster: &'r [RosterEntry]) -> Self {
        let mut seen: HashSet<&MemberId> = HashSet::new();
        let mut by_capability: HashMap<&CapabilityToken, VecDeque<&MemberId>> = HashMap::new();

        for entry in roster {
            if !seen.insert(&entry.member_id) {
                warn!(member_id = %entry.member_id, "duplicate roster entry ignored");
                continue;
            }
            if entry.capability.is_unspecified() {
                continue;
            }
            by_capability
                .entry(&entry.capability)
                .or_default()
                .push_back(&entry.member_id);
        }

        Self {
            by_capability,
            members: seen.len(),
        }
    }

    fn available(&self, capability: &CapabilityToken) -> usize {
        self.by_capability.get(capability).map_or(0, VecDeque::len)
    }

    /// Takes `count` members or none at all.
    fn claim(&mut self, capability: &CapabilityToken, count: usize) -> Option<Vec<MemberId>> {
        if capability.is_unspecified() || self.available(capability) < count {
            return None;
        }

        let queue = self.by_capability.get_mut(capability)?;
        Some(queue.drain(..count).cloned().collect())
    }
}

/// Single greedy pass: CRITICAL requirements claim members before HIGH, HIGH before MEDIUM,
/// and declaration order breaks ties inside a tier.
pub(crate) fn match_requirements<'p>(
    profile: &'p RequirementProfile,
    roster: &[RosterEntry],
) -> MatchOutcome<'p> {
    let mut pool = AvailabilityPool::from_roster(roster);

    let mut ordered: Vec<&RoleRequirement> = profile.requirements().iter().collect();
    ordered.sort_by_key(|requirement| requirement.tier);

    let matches = ordered
        .into_iter()
        .map(|requirement| {
            let verdict = match pool.claim(&requirement.capability, requirement.min_count) {
                Some(member_ids) => RequirementVerdict::Satisfied { member_ids },
                None => RequirementVerdict::Unmatched {
                    available: pool.available(&requirement.capability),
                },
            };
            debug!(
                role = %requirement.role_label,
                capability = %requirement.capability,
                tier = requirement.tier.label(),
                ?verdict,
                "requirement evaluated"
            );
            RequirementMatch {
                requirement,
                verdict,
            }
        })
        .collect();

    MatchOutcome {
        matches,
        total_members: pool.members,
    }
}
