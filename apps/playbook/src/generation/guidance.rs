//! Tone and priority guidance — short phrases the prompt attaches to the
//! acknowledgment and escalation sections.

use crate::models::{Priority, Tone};

/// Phrasing hint for the acknowledgment section.
pub fn tone_guidance(tone: Tone) -> &'static str {
    match tone {
        Tone::Friendly => "warm, upbeat, first-name basis",
        Tone::Formal => "courteous, precise, no slang",
        Tone::Empathetic => "validate the customer's frustration before anything else",
        Tone::Apologetic => "take ownership and apologise sincerely, without excuses",
        Tone::Neutral => "factual and even, no emotional language",
    }
}

/// Escalation policy for the given priority.
pub fn escalation_guidance(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => {
            "Resolve at first-line support; escalate only if the customer asks twice."
        }
        Priority::Medium => {
            "Hand off to a product specialist if unresolved after one follow-up."
        }
        Priority::High => {
            "Escalate immediately to a senior agent or the on-call lead and promise a same-day update."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tone_has_guidance() {
        for tone in Tone::ALL {
            assert!(!tone_guidance(tone).is_empty());
        }
    }

    #[test]
    fn test_high_priority_escalates_immediately() {
        assert!(escalation_guidance(Priority::High).contains("immediately"));
        assert!(!escalation_guidance(Priority::Low).contains("immediately"));
    }

    #[test]
    fn test_escalation_guidance_differs_per_priority() {
        let low = escalation_guidance(Priority::Low);
        let medium = escalation_guidance(Priority::Medium);
        let high = escalation_guidance(Priority::High);
        assert_ne!(low, medium);
        assert_ne!(medium, high);
    }
}
