//! FILENAME: navigation/src/icon.rs
//! Group icon assignment.
//!
//! Well-known program areas get a fixed icon by keyword; everything
//! else draws from a rotating fallback cycle, with the pick memoised
//! per group name so a group keeps its icon for the whole session.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupIcon {
    Brain,
    Pill,
    Ribbon,
    Activity,
    HeartPulse,
    Stethoscope,
}

const KEYWORD_ICONS: &[(&str, GroupIcon)] = &[
    ("สุขภาพจิต", GroupIcon::Brain),
    ("ยาเสพติด", GroupIcon::Pill),
    ("มะเร็ง", GroupIcon::Ribbon),
];

const FALLBACK_CYCLE: &[GroupIcon] = &[
    GroupIcon::Activity,
    GroupIcon::HeartPulse,
    GroupIcon::Stethoscope,
];

/// Fallback picks made so far: which group got which icon, and where
/// the rotation currently stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconAssignments {
    assigned: Vec<(String, GroupIcon)>,
    cursor: usize,
}

/// Resolves the icon for `group`, returning the icon together with
/// the updated assignment state. Keyword matches never consume a
/// rotation slot.
pub fn assign_icon(group: &str, prior: &IconAssignments) -> (GroupIcon, IconAssignments) {
    for (keyword, icon) in KEYWORD_ICONS {
        if group.contains(keyword) {
            return (*icon, prior.clone());
        }
    }
    if let Some((_, icon)) = prior.assigned.iter().find(|(name, _)| name == group) {
        return (*icon, prior.clone());
    }
    let icon = FALLBACK_CYCLE[prior.cursor % FALLBACK_CYCLE.len()];
    let mut next = prior.clone();
    next.assigned.push((group.to_string(), icon));
    next.cursor += 1;
    (icon, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_win_over_rotation() {
        let state = IconAssignments::default();
        let (icon, next) = assign_icon("งานสุขภาพจิตและยาเสพติด", &state);
        assert_eq!(icon, GroupIcon::Brain);
        assert_eq!(next, state);
    }

    #[test]
    fn fallback_rotates_and_remembers() {
        let s0 = IconAssignments::default();
        let (a, s1) = assign_icon("กลุ่มหนึ่ง", &s0);
        let (b, s2) = assign_icon("กลุ่มสอง", &s1);
        let (c, s3) = assign_icon("กลุ่มสาม", &s2);
        let (d, s4) = assign_icon("กลุ่มสี่", &s3);
        assert_eq!(a, GroupIcon::Activity);
        assert_eq!(b, GroupIcon::HeartPulse);
        assert_eq!(c, GroupIcon::Stethoscope);
        // Cycle wraps around once the fallbacks run out.
        assert_eq!(d, GroupIcon::Activity);

        // A group seen before keeps its icon and does not advance the cycle.
        let (again, s5) = assign_icon("กลุ่มสอง", &s4);
        assert_eq!(again, GroupIcon::HeartPulse);
        assert_eq!(s5, s4);
    }
}
