//! Drop resolution: scoring, strikes and combo for a routed container
//!
//! Pure: takes the container, the chosen lane, the combo going in and the
//! active event, and returns the deltas for the controller to apply.

use serde::Serialize;

use super::container::{Container, Lane};
use super::events::{EventKind, ResolveContext};
use super::state::FeedbackMessage;
use crate::consts::*;
use crate::round_half_up;

/// Outcome of routing one container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub score_delta: i64,
    pub strike_delta: u32,
    pub combo_after: u32,
    pub counts_as_correct: bool,
    pub feedback: Vec<FeedbackMessage>,
}

/// Score multiplier for a combo count (1.0x, +0.25x every 3 drops, capped at 2.0x)
pub fn combo_multiplier(combo: u32) -> f64 {
    1.0 + (combo / COMBO_STEP).min(COMBO_MAX_STEPS) as f64 * COMBO_STEP_BONUS
}

/// Resolve a drop of `container` into `lane`
pub fn resolve(
    container: &Container,
    lane: Lane,
    combo: u32,
    active_event: Option<EventKind>,
) -> Resolution {
    let base_value = container.base_value();
    let is_correct_by_default = lane == container.default_lane();

    let mut feedback = Vec::new();
    let mut points: i64 = 0;
    let mut strikes: u32 = 0;
    let mut combo = combo;
    let mut counts_as_correct = false;

    // Base outcome
    if lane == Lane::Hold {
        points += HOLD_POINTS;
        combo = 0;
        feedback.push(FeedbackMessage::good("Hold fallback +5"));
    } else if is_correct_by_default {
        points += base_value;
        counts_as_correct = true;
        feedback.push(FeedbackMessage::good(format!("+{} Correct", base_value)));
    } else {
        points += WRONG_LANE_PENALTY;
        strikes += 1;
        combo = 0;
        feedback.push(FeedbackMessage::bad("Wrong lane -10, +1 strike"));
    }

    // Event modifier
    if let Some(kind) = active_event {
        let effect = kind.resolve(&ResolveContext {
            lane,
            container,
            is_correct_by_default,
        });

        if effect.force_correct {
            counts_as_correct = true;
            if !is_correct_by_default {
                // Reverses the wrong-lane strike, not its score
                points += FORCED_CORRECT_BONUS;
                strikes = strikes.saturating_sub(1);
            }
            if effect.skip_default_correct_points {
                points -= base_value;
            }
            feedback.push(FeedbackMessage::good("Exemption applied"));
        }

        if effect.points != 0 {
            points += effect.points;
            let sign = if effect.points > 0 { "+" } else { "" };
            let text = format!("{}{} {}", sign, effect.points, kind.name());
            feedback.push(if effect.points > 0 {
                FeedbackMessage::good(text)
            } else {
                FeedbackMessage::bad(text)
            });
        }
    }

    // Combo
    if counts_as_correct {
        combo += 1;
        let multiplier = combo_multiplier(combo);
        if multiplier > 1.0 {
            let bonus = round_half_up(points as f64 * (multiplier - 1.0));
            points += bonus;
            feedback.push(FeedbackMessage::good(format!(
                "Combo x{:.2} +{}",
                multiplier, bonus
            )));
        }
    }

    Resolution {
        score_delta: points,
        strike_delta: strikes,
        combo_after: combo,
        counts_as_correct,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::container::ContainerKind;
    use crate::sim::state::Tone;

    fn food() -> Container {
        Container::new(1, ContainerKind::Food)
    }

    #[test]
    fn test_multiplier_steps() {
        assert_eq!(combo_multiplier(0), 1.0);
        assert_eq!(combo_multiplier(2), 1.0);
        assert_eq!(combo_multiplier(3), 1.25);
        assert_eq!(combo_multiplier(6), 1.5);
        assert_eq!(combo_multiplier(12), 2.0);
        assert_eq!(combo_multiplier(40), 2.0);
    }

    #[test]
    fn test_correct_drop_no_event() {
        let r = resolve(&food(), Lane::Domestic, 0, None);
        assert_eq!(r.score_delta, 15);
        assert_eq!(r.strike_delta, 0);
        assert_eq!(r.combo_after, 1);
        assert!(r.counts_as_correct);
        assert_eq!(r.feedback[0].text, "+15 Correct");
    }

    #[test]
    fn test_food_exemption_on_import() {
        // -10 wrong lane, +10 reversal, -15 skipped base, +15 event = 0
        let r = resolve(&food(), Lane::Import, 4, Some(EventKind::FoodExemption));
        assert_eq!(r.score_delta, 0);
        assert_eq!(r.strike_delta, 0);
        assert_eq!(r.combo_after, 1);
        assert!(r.counts_as_correct);
        let texts: Vec<&str> = r.feedback.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Wrong lane -10, +1 strike", "Exemption applied", "+15 Food Exemption"]
        );
    }

    #[test]
    fn test_wrong_lane_resets_combo() {
        let machinery = Container::new(1, ContainerKind::Machinery);
        let r = resolve(&machinery, Lane::Domestic, 9, None);
        assert_eq!(r.score_delta, -10);
        assert_eq!(r.strike_delta, 1);
        assert_eq!(r.combo_after, 0);
        assert_eq!(r.feedback[0].tone, Tone::Bad);
    }

    #[test]
    fn test_hold_resets_combo() {
        let r = resolve(&food(), Lane::Hold, 7, None);
        assert_eq!(r.score_delta, 5);
        assert_eq!(r.strike_delta, 0);
        assert_eq!(r.combo_after, 0);
        assert!(!r.counts_as_correct);
    }

    #[test]
    fn test_hold_under_backlog() {
        let r = resolve(&food(), Lane::Hold, 0, Some(EventKind::InspectionBacklog));
        assert_eq!(r.score_delta, 0);
        assert_eq!(r.feedback.last().map(|f| f.text.as_str()), Some("-5 Inspection Backlog"));
    }

    #[test]
    fn test_combo_bonus_at_six() {
        // Sixth correct drop worth 20: 1.5x => +10
        let electronics = Container::new(1, ContainerKind::Electronics);
        let r = resolve(&electronics, Lane::Import, 5, None);
        assert_eq!(r.combo_after, 6);
        assert_eq!(r.score_delta, 30);
        assert_eq!(r.feedback.last().map(|f| f.text.as_str()), Some("Combo x1.50 +10"));
    }

    #[test]
    fn test_combo_bonus_rounds() {
        // 15 * 0.25 = 3.75 => 4
        let r = resolve(&food(), Lane::Domestic, 2, None);
        assert_eq!(r.combo_after, 3);
        assert_eq!(r.score_delta, 19);
    }

    #[test]
    fn test_event_points_feed_the_multiplier() {
        // 25 base + 12 event = 37, combo 3 => round(9.25) = 9
        let machinery = Container::new(1, ContainerKind::Machinery);
        let r = resolve(&machinery, Lane::Import, 2, Some(EventKind::PriorityMachinery));
        assert_eq!(r.score_delta, 46);
    }

    #[test]
    fn test_surcharge_on_correct_import() {
        let electronics = Container::new(1, ContainerKind::Electronics);
        let r = resolve(&electronics, Lane::Import, 0, Some(EventKind::ImportSurcharge));
        assert_eq!(r.score_delta, 10);
        assert!(r.counts_as_correct);
    }

    #[test]
    fn test_audit_stacks_with_wrong_lane() {
        let electronics = Container::new(1, ContainerKind::Electronics);
        let r = resolve(&electronics, Lane::Domestic, 3, Some(EventKind::DomesticAudit));
        assert_eq!(r.score_delta, -15);
        assert_eq!(r.strike_delta, 1);
        assert_eq!(r.combo_after, 0);
    }

    #[test]
    fn test_fast_track_correct_domestic() {
        let r = resolve(&food(), Lane::Domestic, 0, Some(EventKind::DomesticFastTrack));
        assert_eq!(r.score_delta, 25);
    }

    proptest::proptest! {
        #[test]
        fn prop_hold_and_wrong_lane_reset_combo(combo in 0u32..100, hold in proptest::bool::ANY) {
            let machinery = Container::new(1, ContainerKind::Machinery);
            let lane = if hold { Lane::Hold } else { Lane::Domestic };
            for event in EventKind::catalog().iter().map(|d| Some(d.kind)).chain([None]) {
                let r = resolve(&machinery, lane, combo, event);
                proptest::prop_assert_eq!(r.combo_after, 0);
                proptest::prop_assert!(!r.counts_as_correct);
            }
        }
    }
}
