use serde::Serialize;

/// Quality mark on a task. A mark becomes immutable once committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum QualityMark {
    #[default]
    Unset,
    Pending(f64),
    Locked(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum QualityMarkError {
    #[error("quality mark already saved as {saved}")]
    Locked { saved: f64 },
    #[error("quality mark {value} is outside 0-100")]
    OutOfRange { value: f64 },
    #[error("no draft quality mark to commit")]
    NoDraft,
}

fn validate(value: f64) -> Result<f64, QualityMarkError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(QualityMarkError::OutOfRange { value })
    }
}

impl QualityMark {
    /// The committed mark. Drafts never count toward scoring.
    pub fn saved_value(&self) -> Option<f64> {
        match self {
            Self::Locked(value) => Some(*value),
            _ => None,
        }
    }

    pub fn draft_value(&self) -> Option<f64> {
        match self {
            Self::Pending(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }

    pub fn stage_draft(&mut self, value: f64) -> Result<(), QualityMarkError> {
        if let Self::Locked(saved) = self {
            return Err(QualityMarkError::Locked { saved: *saved });
        }

        *self = Self::Pending(validate(value)?);
        Ok(())
    }

    pub fn commit(&mut self) -> Result<f64, QualityMarkError> {
        match *self {
            Self::Pending(value) => {
                *self = Self::Locked(value);
                Ok(value)
            }
            Self::Locked(saved) => Err(QualityMarkError::Locked { saved }),
            Self::Unset => Err(QualityMarkError::NoDraft),
        }
    }

    /// Quick-save path: stage and commit in one step.
    pub fn save(&mut self, value: f64) -> Result<f64, QualityMarkError> {
        self.stage_draft(value)?;
        self.commit()
    }

    pub fn discard_draft(&mut self) {
        if matches!(self, Self::Pending(_)) {
            *self = Self::Unset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_then_commit_locks_the_mark() {
        let mut mark = QualityMark::default();
        mark.stage_draft(72.0).expect("draft accepted");
        assert_eq!(mark.saved_value(), None);
        assert_eq!(mark.draft_value(), Some(72.0));

        assert_eq!(mark.commit(), Ok(72.0));
        assert!(mark.is_locked());
        assert_eq!(mark.saved_value(), Some(72.0));
    }

    #[test]
    fn locked_mark_rejects_overwrites() {
        let mut mark = QualityMark::Locked(88.0);
        assert_eq!(
            mark.stage_draft(40.0),
            Err(QualityMarkError::Locked { saved: 88.0 })
        );
        assert_eq!(
            mark.save(95.0),
            Err(QualityMarkError::Locked { saved: 88.0 })
        );
        assert_eq!(mark, QualityMark::Locked(88.0));
    }

    #[test]
    fn out_of_range_and_missing_drafts_are_rejected() {
        let mut mark = QualityMark::Unset;
        assert_eq!(
            mark.stage_draft(101.0),
            Err(QualityMarkError::OutOfRange { value: 101.0 })
        );
        assert!(matches!(
            mark.stage_draft(f64::NAN),
            Err(QualityMarkError::OutOfRange { .. })
        ));
        assert_eq!(mark.commit(), Err(QualityMarkError::NoDraft));
    }

    #[test]
    fn discarding_a_draft_resets_to_unset() {
        let mut mark = QualityMark::Pending(50.0);
        mark.discard_draft();
        assert_eq!(mark, QualityMark::Unset);

        let mut locked = QualityMark::Locked(60.0);
        locked.discard_draft();
        assert_eq!(locked, QualityMark::Locked(60.0));
    }
}
