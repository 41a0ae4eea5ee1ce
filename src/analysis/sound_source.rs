//! Heuristic sound-source estimation
//!
//! A fixed, ordered table of independent rules. Every rule is evaluated on
//! its own and several may fire for the same reading (ranges overlap: 72 dB
//! during the day matches both footsteps and conversation). Output is ranked
//! by confidence; equal confidences keep table order.

use crate::types::{SoundSourceEstimate, SoundSourceKind, TimeOfDay};

/// One predicate -> estimate rule
pub struct SoundSourceRule {
    pub kind: SoundSourceKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub confidence: f64,
    pub description: &'static str,
    pub applies: fn(f64, TimeOfDay) -> bool,
}

impl SoundSourceRule {
    fn estimate(&self) -> SoundSourceEstimate {
        SoundSourceEstimate {
            kind: self.kind,
            label: self.label,
            icon: self.icon,
            confidence: self.confidence,
            description: self.description,
        }
    }
}

pub static SOUND_SOURCE_RULES: [SoundSourceRule; 5] = [
    SoundSourceRule {
        kind: SoundSourceKind::Footsteps,
        label: "Footsteps / walking",
        icon: "🚶",
        confidence: 0.75,
        description: "Most likely footsteps from the floor above or a neighbouring unit",
        applies: |db, _| db >= 70.0,
    },
    SoundSourceRule {
        kind: SoundSourceKind::Voice,
        label: "Voices / conversation",
        icon: "🗣️",
        confidence: 0.65,
        description: "Talking from a neighbouring unit or outside",
        applies: |db, _| (60.0..75.0).contains(&db),
    },
    SoundSourceRule {
        kind: SoundSourceKind::Appliance,
        label: "Appliances / household activity",
        icon: "🔧",
        confidence: 0.60,
        description: "Vacuum cleaner, washing machine or similar appliances",
        applies: |db, tod| db >= 65.0 && tod == TimeOfDay::Day,
    },
    SoundSourceRule {
        kind: SoundSourceKind::DoorSlam,
        label: "Door slam",
        icon: "🚪",
        confidence: 0.55,
        description: "A door being opened or closed forcefully",
        applies: |db, _| db >= 80.0,
    },
    SoundSourceRule {
        kind: SoundSourceKind::TvMusic,
        label: "TV / music",
        icon: "📺",
        confidence: 0.70,
        description: "Television or music played at high volume",
        applies: |db, tod| tod == TimeOfDay::Night && db >= 60.0,
    },
];

/// Probable sources for a peak reading, highest confidence first.
/// Empty when no rule fires.
pub fn estimate_sound_sources(db: f64, time_of_day: TimeOfDay) -> Vec<SoundSourceEstimate> {
    let mut sources: Vec<SoundSourceEstimate> = SOUND_SOURCE_RULES
        .iter()
        .filter(|rule| (rule.applies)(db, time_of_day))
        .map(SoundSourceRule::estimate)
        .collect();
    // stable: ties stay in rule order
    sources.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sources: &[SoundSourceEstimate]) -> Vec<SoundSourceKind> {
        sources.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_overlapping_rules_fire_together() {
        let sources = estimate_sound_sources(72.0, TimeOfDay::Day);
        assert_eq!(
            kinds(&sources),
            vec![SoundSourceKind::Footsteps, SoundSourceKind::Voice, SoundSourceKind::Appliance]
        );
        assert_eq!(sources[0].confidence, 0.75);
        assert_eq!(sources[1].confidence, 0.65);
    }

    #[test]
    fn test_quiet_reading_has_no_sources() {
        assert!(estimate_sound_sources(30.0, TimeOfDay::Day).is_empty());
        assert!(estimate_sound_sources(59.9, TimeOfDay::Night).is_empty());
    }

    #[test]
    fn test_night_ranks_tv_between_footsteps_and_voice() {
        let sources = estimate_sound_sources(72.0, TimeOfDay::Night);
        assert_eq!(
            kinds(&sources),
            vec![SoundSourceKind::Footsteps, SoundSourceKind::TvMusic, SoundSourceKind::Voice]
        );
    }

    #[test]
    fn test_severe_daytime_reading() {
        let sources = estimate_sound_sources(85.0, TimeOfDay::Day);
        assert_eq!(
            kinds(&sources),
            vec![SoundSourceKind::Footsteps, SoundSourceKind::Appliance, SoundSourceKind::DoorSlam]
        );
    }

    #[test]
    fn test_voice_upper_bound_is_exclusive() {
        let sources = estimate_sound_sources(75.0, TimeOfDay::Night);
        assert!(!kinds(&sources).contains(&SoundSourceKind::Voice));
        let sources = estimate_sound_sources(60.0, TimeOfDay::Day);
        assert_eq!(kinds(&sources), vec![SoundSourceKind::Voice]);
    }

    #[test]
    fn test_output_is_sorted_descending() {
        for tod in [TimeOfDay::Day, TimeOfDay::Night] {
            let mut db = 0.0;
            while db <= 120.0 {
                let sources = estimate_sound_sources(db, tod);
                assert!(sources.windows(2).all(|w| w[0].confidence >= w[1].confidence));
                db += 0.5;
            }
        }
    }
}
