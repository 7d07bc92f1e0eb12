//! Roster validation before heat generation.
//!
//! Checks structural integrity of competitors and event definitions
//! before any heats are drawn. Detects:
//! - Duplicate IDs
//! - Partnerships and gear declarations naming unknown events or
//!   competitors
//! - Self-partnership and self gear-sharing
//! - One-sided partnerships (A lists B but B does not list A)
//! - Partner pairs violating an event's gender rule

use std::collections::{HashMap, HashSet};

use crate::models::{Competitor, EventSpec, PartnerRule};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A partnership or gear declaration names an event that doesn't exist.
    UnknownEvent,
    /// A partnership or gear declaration names a competitor that doesn't
    /// exist.
    UnknownCompetitor,
    /// A competitor is partnered or gear-paired with themselves.
    SelfReference,
    /// A lists B as partner for an event but B does not list A.
    AsymmetricPartnership,
    /// A partner pair violates the event's gender rule.
    PartnerRuleViolation,
    /// An entrant in a partnered event has no registered partner, or the
    /// partner is not entered.
    MissingPartner,
    /// An entrant's gender does not match a gendered event's field.
    GenderMismatch,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster against the events it will be scheduled into.
///
/// Checks:
/// 1. No duplicate competitor IDs
/// 2. No duplicate event IDs
/// 3. Partnership and gear declarations reference existing events and
///    competitors
/// 4. Nobody is partnered or sharing gear with themselves
/// 5. Every partnership is declared by both sides
/// 6. Partner pairs satisfy the event's gender rule
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(competitors: &[Competitor], events: &[EventSpec]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut event_ids = HashSet::new();
    let mut by_event: HashMap<&str, &EventSpec> = HashMap::new();
    for event in events {
        if !event_ids.insert(event.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate event ID: {}", event.id),
            ));
        }
        by_event.insert(event.id.as_str(), event);
    }

    let mut competitor_ids = HashSet::new();
    let mut by_competitor: HashMap<&str, &Competitor> = HashMap::new();
    for c in competitors {
        if !competitor_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate competitor ID: {}", c.id),
            ));
        }
        by_competitor.insert(c.id.as_str(), c);
    }

    for c in competitors {
        for (event_id, other) in c.partners.iter().chain(c.gear_sharing.iter()) {
            if !event_ids.contains(event_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownEvent,
                    format!("Competitor '{}' references unknown event '{event_id}'", c.id),
                ));
            }
            if !competitor_ids.contains(other.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCompetitor,
                    format!(
                        "Competitor '{}' references unknown competitor '{other}'",
                        c.id
                    ),
                ));
            }
            if *other == c.id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfReference,
                    format!("Competitor '{}' is paired with themselves in '{event_id}'", c.id),
                ));
            }
        }
    }

    // Partnerships must be symmetric, and pairs must satisfy the event's
    // gender rule.
    for c in competitors {
        for (event_id, other_id) in &c.partners {
            let Some(other) = by_competitor.get(other_id.as_str()) else {
                continue; // Already reported above.
            };
            if other.partner_for(event_id) != Some(c.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::AsymmetricPartnership,
                    format!(
                        "'{}' lists '{other_id}' as partner for '{event_id}' but not vice versa",
                        c.id
                    ),
                ));
            }
            if let Some(rule) = by_event.get(event_id.as_str()).and_then(|e| e.partnered) {
                let compatible = match rule {
                    PartnerRule::SameGender => c.gender == other.gender,
                    PartnerRule::MixedGender => c.gender != other.gender,
                    PartnerRule::Any => true,
                };
                if !compatible {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::PartnerRuleViolation,
                        format!(
                            "Pair '{}'/'{other_id}' violates the gender rule of '{event_id}'",
                            c.id
                        ),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates one event's entered roster just before heat generation.
///
/// Checks:
/// 1. Gendered events contain only entrants of that gender
/// 2. In partnered events, every entrant has a partner who is also entered
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_entries(event: &EventSpec, roster: &[Competitor]) -> ValidationResult {
    let mut errors = Vec::new();
    let entered: HashSet<&str> = roster.iter().map(|c| c.id.as_str()).collect();

    for c in roster {
        if let Some(gender) = event.gendered {
            if c.gender != gender {
                errors.push(ValidationError::new(
                    ValidationErrorKind::GenderMismatch,
                    format!("Competitor '{}' entered in gendered event '{}'", c.id, event.id),
                ));
            }
        }
        if event.is_partnered() {
            match c.partner_for(&event.id) {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::MissingPartner,
                    format!("Competitor '{}' has no partner for '{}'", c.id, event.id),
                )),
                Some(partner) if !entered.contains(partner) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::MissingPartner,
                        format!(
                            "Partner '{partner}' of '{}' is not entered in '{}'",
                            c.id, event.id
                        ),
                    ));
                }
                Some(_) => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, ScoringType};

    fn sample_events() -> Vec<EventSpec> {
        vec![
            EventSpec::new("underhand", "underhand", ScoringType::Time),
            EventSpec::new("jj_saw", "saw_hand", ScoringType::Time)
                .partnered(PartnerRule::MixedGender),
        ]
    }

    fn sample_competitors() -> Vec<Competitor> {
        vec![
            Competitor::new("c1", Gender::F).with_partner("jj_saw", "c2"),
            Competitor::new("c2", Gender::M).with_partner("jj_saw", "c1"),
            Competitor::new("c3", Gender::F),
        ]
    }

    #[test]
    fn test_valid_roster() {
        assert!(validate_roster(&sample_competitors(), &sample_events()).is_ok());
    }

    #[test]
    fn test_duplicate_competitor_id() {
        let competitors = vec![
            Competitor::new("c1", Gender::F).with_name("Alice"),
            Competitor::new("c1", Gender::F).with_name("Alicia"),
        ];
        let errors = validate_roster(&competitors, &sample_events()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_duplicate_event_id() {
        let events = vec![
            EventSpec::new("e", "underhand", ScoringType::Time),
            EventSpec::new("e", "underhand", ScoringType::Time),
        ];
        let errors = validate_roster(&sample_competitors(), &events).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("event")));
    }

    #[test]
    fn test_unknown_event_reference() {
        let competitors = vec![
            Competitor::new("c1", Gender::F).with_gear_sharing("NONEXISTENT", "c2"),
            Competitor::new("c2", Gender::M),
        ];
        let errors = validate_roster(&competitors, &sample_events()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownEvent));
    }

    #[test]
    fn test_unknown_partner() {
        let competitors = vec![Competitor::new("c1", Gender::F).with_partner("jj_saw", "GHOST")];
        let errors = validate_roster(&competitors, &sample_events()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownCompetitor));
    }

    #[test]
    fn test_self_partnership() {
        let competitors = vec![Competitor::new("c1", Gender::F).with_partner("jj_saw", "c1")];
        let errors = validate_roster(&competitors, &sample_events()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SelfReference));
    }

    #[test]
    fn test_asymmetric_partnership() {
        let competitors = vec![
            Competitor::new("c1", Gender::F).with_partner("jj_saw", "c2"),
            Competitor::new("c2", Gender::M), // Does not list c1 back.
        ];
        let errors = validate_roster(&competitors, &sample_events()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::AsymmetricPartnership));
    }

    #[test]
    fn test_partner_gender_rule() {
        // jj_saw requires mixed-gender pairs.
        let competitors = vec![
            Competitor::new("c1", Gender::F).with_partner("jj_saw", "c3"),
            Competitor::new("c3", Gender::F).with_partner("jj_saw", "c1"),
        ];
        let errors = validate_roster(&competitors, &sample_events()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::PartnerRuleViolation));
    }

    #[test]
    fn test_entries_gender_mismatch() {
        let event = EventSpec::new("underhand_w", "underhand", ScoringType::Time)
            .gendered(Gender::F);
        let roster = vec![
            Competitor::new("c1", Gender::F),
            Competitor::new("c2", Gender::M),
        ];
        let errors = validate_entries(&event, &roster).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::GenderMismatch);
        assert!(errors[0].message.contains("c2"));
    }

    #[test]
    fn test_entries_partner_missing_or_not_entered() {
        let event = EventSpec::new("jj_saw", "saw_hand", ScoringType::Time)
            .partnered(PartnerRule::MixedGender);
        let roster = vec![
            Competitor::new("c1", Gender::F).with_partner("jj_saw", "ABSENT"),
            Competitor::new("c2", Gender::M), // No partner at all.
        ];
        let errors = validate_entries(&event, &roster).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::MissingPartner));
    }

    #[test]
    fn test_entries_valid() {
        let event = EventSpec::new("jj_saw", "saw_hand", ScoringType::Time)
            .partnered(PartnerRule::MixedGender);
        let roster = vec![
            Competitor::new("c1", Gender::F).with_partner("jj_saw", "c2"),
            Competitor::new("c2", Gender::M).with_partner("jj_saw", "c1"),
        ];
        assert!(validate_entries(&event, &roster).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let competitors = vec![
            Competitor::new("c1", Gender::F).with_partner("jj_saw", "c1"),
            Competitor::new("c1", Gender::F),
        ];
        let errors = validate_roster(&competitors, &sample_events()).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
