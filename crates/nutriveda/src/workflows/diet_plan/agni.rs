//! Digestive readiness advice and the fixed mindful eating guidance.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgniAdvice {
    pub should_eat: bool,
    pub message: String,
    pub recommendation: String,
}

pub fn check_agni(is_hungry: bool) -> AgniAdvice {
    if is_hungry {
        AgniAdvice {
            should_eat: true,
            message: "Your Agni is ready. Enjoy your meal mindfully.".to_string(),
            recommendation: "Follow the pre-meal reminders for optimal digestion.".to_string(),
        }
    } else {
        AgniAdvice {
            should_eat: false,
            message: "Your Agni (digestive fire) may not be ready. Wait until you feel true \
                      hunger before eating."
                .to_string(),
            recommendation: "Try light movement, drink warm water, or wait 30-60 minutes."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindfulEatingGuide {
    pub pre_meal: Vec<String>,
    pub during_meal: Vec<String>,
    pub post_meal: Vec<String>,
    pub timing_rules: Vec<String>,
}

impl MindfulEatingGuide {
    pub fn standard() -> Self {
        Self {
            pre_meal: owned(&[
                "Sit in a calm, peaceful environment",
                "Take 3 deep breaths before eating",
                "Express gratitude for the meal",
                "Avoid distractions (TV, phone, work)",
                "Ensure you are in a calm emotional state",
            ]),
            during_meal: owned(&[
                "Chew each bite 32 times for optimal digestion",
                "Focus on the taste, texture, and aroma",
                "Eat at a moderate, relaxed pace",
                "Sip warm water between bites if needed",
                "Stop eating when 75% full",
                "Avoid excessive conversation while eating",
            ]),
            post_meal: owned(&[
                "Take a short 10-minute walk",
                "Sit in Vajrasana (thunderbolt pose) for 5-10 minutes",
                "Rest for 15 minutes, but avoid sleeping immediately",
                "Avoid cold water; sip warm water instead",
            ]),
            timing_rules: owned(&[
                "Largest meal at LUNCH (12 PM - 2 PM) when Agni is strongest",
                "Light breakfast to awaken digestion",
                "Lightest meal at DINNER (before 7 PM)",
                "Maintain regular meal times daily",
                "Wait 3-4 hours between meals",
                "Only eat when truly hungry (check your Agni)",
            ]),
        }
    }
}

pub fn daily_routine() -> Vec<String> {
    owned(&[
        "Wake up: 6:00 AM - 7:00 AM",
        "Drink warm water upon waking",
        "Breakfast: 7:00 AM - 9:00 AM (Light)",
        "Lunch: 12:00 PM - 2:00 PM (Heaviest meal)",
        "Dinner: 6:00 PM - 7:00 PM (Lightest meal)",
        "Sleep: 10:00 PM - 11:00 PM",
    ])
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agni_gate_maps_hunger_to_advice() {
        assert!(check_agni(true).should_eat);
        let waiting = check_agni(false);
        assert!(!waiting.should_eat);
        assert!(waiting.recommendation.contains("warm water"));
    }
}
