//! Distance windows used to grade a note's contact with the judgement line.

use crate::models::stats::Judgement;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceWindow {
    pub perfect: f64,
    pub great: f64,
}

impl ToleranceWindow {
    pub fn new(perfect: f64, great: f64) -> Self {
        Self { perfect, great }
    }

    /// Whether a contact distance is close enough to judge at all.
    pub fn in_range(&self, contact_distance: f64) -> bool {
        contact_distance <= self.great
    }

    /// Grade for a matched gesture, `None` outside the great window.
    ///
    /// Only the distance decides between PERFECT and GREAT.
    pub fn judge(&self, contact_distance: f64) -> Option<Judgement> {
        if contact_distance <= self.perfect {
            Some(Judgement::Perfect)
        } else if contact_distance <= self.great {
            Some(Judgement::Great)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_boundaries_are_inclusive() {
        let window = ToleranceWindow::new(20.0, 45.0);
        assert_eq!(window.judge(0.0), Some(Judgement::Perfect));
        assert_eq!(window.judge(20.0), Some(Judgement::Perfect));
        assert_eq!(window.judge(20.5), Some(Judgement::Great));
        assert_eq!(window.judge(45.0), Some(Judgement::Great));
        assert_eq!(window.judge(45.1), None);
        assert!(window.in_range(45.0));
        assert!(!window.in_range(45.1));
    }
}
