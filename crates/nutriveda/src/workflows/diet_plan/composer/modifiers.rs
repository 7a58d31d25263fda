use super::super::domain::{ActivityLevel, DemographicProfile, DoshaAxis, HealthCondition};
use super::config::ComposerConfig;
use super::tables;

const YOUNG_BELOW_AGE: u16 = 16;
const ELDER_ABOVE_AGE: u16 = 60;
const MATURE_ABOVE_AGE: u16 = 50;
const EARLY_LIFE_BELOW_AGE: u16 = 25;

/// Demographic adjustments appended to a plan. Every field is additive.
#[derive(Debug, Default)]
pub(crate) struct Adjustments {
    pub special_notes: Vec<String>,
    pub seasonal: Option<String>,
    pub health: Vec<String>,
}

pub(crate) fn adjustments(
    config: &ComposerConfig,
    demographics: Option<&DemographicProfile>,
) -> Adjustments {
    let mut adjustments = Adjustments::default();
    let Some(profile) = demographics else {
        return adjustments;
    };

    if config.personalization {
        if matches!(profile.age, Some(age) if !(YOUNG_BELOW_AGE..=ELDER_ABOVE_AGE).contains(&age))
        {
            adjustments
                .special_notes
                .push("Easily digestible foods recommended due to age".to_string());
        }
        if profile.activity == Some(ActivityLevel::High) {
            adjustments
                .special_notes
                .push("Increase portion sizes and include more proteins".to_string());
        }
    }

    if config.seasonal_adjustments {
        adjustments.seasonal = profile
            .season
            .map(|season| tables::seasonal_adjustment(season).to_string());
    }

    if config.health_adjustments {
        adjustments.health = profile
            .health_conditions
            .iter()
            .filter_map(|condition| tables::health_adjustment(*condition))
            .map(str::to_string)
            .collect();
    }

    adjustments
}

pub(crate) fn recommendations(
    config: &ComposerConfig,
    dominant: DoshaAxis,
    demographics: Option<&DemographicProfile>,
) -> Vec<String> {
    let mut recommendations: Vec<String> = tables::lifestyle_recommendations(dominant)
        .iter()
        .map(|line| line.to_string())
        .collect();

    let Some(profile) = demographics else {
        return recommendations;
    };

    if config.personalization {
        match profile.activity {
            Some(ActivityLevel::Low) => recommendations
                .push("Start with gentle exercises like walking or yoga".to_string()),
            Some(ActivityLevel::High) => {
                recommendations.push("Ensure adequate rest and recovery time".to_string())
            }
            _ => {}
        }

        match profile.age {
            Some(age) if age > MATURE_ABOVE_AGE => {
                recommendations.push("Focus on gentle, low-impact exercises".to_string())
            }
            Some(age) if age < EARLY_LIFE_BELOW_AGE => {
                recommendations.push("Establish healthy habits early in life".to_string())
            }
            _ => {}
        }
    }

    if config.health_adjustments && profile.has_condition(HealthCondition::DigestiveIssues) {
        recommendations.push("Eat mindfully and chew food thoroughly".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::diet_plan::domain::Season;

    #[test]
    fn no_demographics_means_no_adjustments() {
        let adjustments = adjustments(&ComposerConfig::default(), None);
        assert!(adjustments.special_notes.is_empty());
        assert!(adjustments.seasonal.is_none());
        assert!(adjustments.health.is_empty());
    }

    #[test]
    fn age_band_boundaries_are_inclusive() {
        let config = ComposerConfig::default();
        for (age, expected) in [(15, 1), (16, 0), (60, 0), (61, 1)] {
            let profile = DemographicProfile {
                age: Some(age),
                ..DemographicProfile::default()
            };
            assert_eq!(
                adjustments(&config, Some(&profile)).special_notes.len(),
                expected,
                "age {age}"
            );
        }
    }

    #[test]
    fn unmapped_health_conditions_are_dropped() {
        let profile = DemographicProfile {
            health_conditions: [
                HealthCondition::Diabetes,
                HealthCondition::SleepIssues,
                HealthCondition::Hypertension,
            ]
            .into_iter()
            .collect(),
            season: Some(Season::Winter),
            ..DemographicProfile::default()
        };

        let adjustments = adjustments(&ComposerConfig::default(), Some(&profile));

        assert_eq!(adjustments.health.len(), 2);
        assert_eq!(
            adjustments.seasonal.as_deref(),
            Some("Increase warming foods and healthy fats")
        );
    }

    #[test]
    fn disabled_switches_suppress_their_modifiers() {
        let config = ComposerConfig {
            personalization: false,
            seasonal_adjustments: false,
            health_adjustments: false,
            ..ComposerConfig::default()
        };
        let profile = DemographicProfile {
            age: Some(70),
            activity: Some(ActivityLevel::High),
            season: Some(Season::Summer),
            health_conditions: [HealthCondition::DigestiveIssues].into_iter().collect(),
            ..DemographicProfile::default()
        };

        let adjustments = adjustments(&config, Some(&profile));
        assert!(adjustments.special_notes.is_empty());
        assert!(adjustments.seasonal.is_none());
        assert!(adjustments.health.is_empty());
        assert_eq!(
            recommendations(&config, DoshaAxis::Pitta, Some(&profile)).len(),
            tables::lifestyle_recommendations(DoshaAxis::Pitta).len()
        );
    }

    #[test]
    fn recommendations_add_one_sentence_per_signal() {
        let profile = DemographicProfile {
            age: Some(22),
            activity: Some(ActivityLevel::Low),
            health_conditions: [HealthCondition::DigestiveIssues].into_iter().collect(),
            ..DemographicProfile::default()
        };

        let recommendations =
            recommendations(&ComposerConfig::default(), DoshaAxis::Kapha, Some(&profile));

        assert_eq!(recommendations.len(), 4 + 3);
        assert_eq!(
            recommendations[4],
            "Start with gentle exercises like walking or yoga"
        );
        assert_eq!(recommendations[5], "Establish healthy habits early in life");
        assert_eq!(recommendations[6], "Eat mindfully and chew food thoroughly");
    }
}
