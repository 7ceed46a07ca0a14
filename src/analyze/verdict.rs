use crate::types::analysis::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerdictInputs {
    pub is_measurable: bool,
    pub is_speculation: bool,
    pub is_reliable: bool,
    pub limitation_count: usize,
    pub privilege_count: usize,
}

/// Fixed decision order; the first matching rule wins.
///
/// With the current thresholds a privilege-less system that is still
/// measurable lands on `Estimable`, and rules 4 and 5 only fire for inputs
/// whose flags disagree with each other. The order is kept as is so that
/// retuned thresholds do not reshuffle the outcome.
pub fn decide(inputs: &VerdictInputs) -> Verdict {
    if inputs.is_reliable && inputs.limitation_count > 0 {
        Verdict::Measurable
    } else if inputs.is_measurable && !inputs.is_speculation {
        Verdict::Estimable
    } else if inputs.is_speculation {
        Verdict::Speculation
    } else if inputs.privilege_count == 0 {
        Verdict::NoPrivileges
    } else {
        Verdict::Indeterminate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(
        is_measurable: bool,
        is_speculation: bool,
        is_reliable: bool,
        limitation_count: usize,
        privilege_count: usize,
    ) -> VerdictInputs {
        VerdictInputs {
            is_measurable,
            is_speculation,
            is_reliable,
            limitation_count,
            privilege_count,
        }
    }

    #[test]
    fn reliable_with_limits_is_measurable() {
        let verdict = decide(&inputs(true, false, true, 9, 3));
        assert_eq!(verdict, Verdict::Measurable);
    }

    #[test]
    fn reliable_without_limits_falls_to_estimable() {
        let verdict = decide(&inputs(true, false, true, 0, 0));
        assert_eq!(verdict, Verdict::Estimable);
    }

    #[test]
    fn mid_confidence_is_estimable() {
        let verdict = decide(&inputs(true, false, false, 4, 2));
        assert_eq!(verdict, Verdict::Estimable);
    }

    #[test]
    fn speculation_wins_over_privilege_count() {
        let unmeasurable = decide(&inputs(false, true, false, 0, 0));
        assert_eq!(unmeasurable, Verdict::Speculation);

        let low_confidence = decide(&inputs(true, true, false, 3, 1));
        assert_eq!(low_confidence, Verdict::Speculation);
    }

    #[test]
    fn remaining_rules_are_evaluated_in_order() {
        let empty = decide(&inputs(false, false, false, 0, 0));
        assert_eq!(empty, Verdict::NoPrivileges);

        let unresolved = decide(&inputs(false, false, false, 2, 1));
        assert_eq!(unresolved, Verdict::Indeterminate);
    }
}
