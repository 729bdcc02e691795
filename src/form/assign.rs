use crate::api::{AssignRequest, ShiftRef};
use crate::period::parse_date;

/// Input buffers of the roster board's assign form.
///
/// A shift is named either by `shift_id`, or by `date` plus `shift_type`
/// when the shift may not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignForm {
    pub staff_id: String,
    pub shift_id: String,
    pub date: String,
    pub shift_type: String,
}

impl AssignForm {
    pub fn by_shift_id(staff_id: impl Into<String>, shift_id: impl Into<String>) -> Self {
        AssignForm {
            staff_id: staff_id.into(),
            shift_id: shift_id.into(),
            ..AssignForm::default()
        }
    }

    pub fn by_slot(
        staff_id: impl Into<String>,
        date: impl Into<String>,
        shift_type: impl Into<String>,
    ) -> Self {
        AssignForm {
            staff_id: staff_id.into(),
            date: date.into(),
            shift_type: shift_type.into(),
            ..AssignForm::default()
        }
    }

    pub fn clear(&mut self) {
        *self = AssignForm::default();
    }
}

fn parse_id(label: &str, raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(format!("{} is required", label));
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("{} must contain only digits", label));
    }
    raw.parse::<i64>()
        .map_err(|_| format!("{} is out of range", label))
}

/// Validates the assign form and builds the request body
pub fn validate_assignment(form: &AssignForm) -> Result<AssignRequest, String> {
    let staff_id = parse_id("Staff id", &form.staff_id)?;

    let shift = if !form.shift_id.trim().is_empty() {
        ShiftRef::Id {
            shift_id: parse_id("Shift id", &form.shift_id)?,
        }
    } else if !form.date.trim().is_empty() || !form.shift_type.trim().is_empty() {
        let date = parse_date(&form.date).map_err(|e| e.to_string())?;
        let shift_type = form.shift_type.trim();
        if shift_type.is_empty() {
            return Err("Shift type is required when assigning by date".to_string());
        }
        ShiftRef::Slot {
            date,
            shift_type: shift_type.to_string(),
        }
    } else {
        return Err("Shift id (or date and shift type) is required".to_string());
    };

    Ok(AssignRequest { staff_id, shift })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn by_shift_id() {
        let request = validate_assignment(&AssignForm::by_shift_id("1", " 1 ")).unwrap();
        assert_eq!(request.staff_id, 1);
        assert_eq!(request.shift, ShiftRef::Id { shift_id: 1 });
    }

    #[test]
    fn by_date_and_type() {
        let request =
            validate_assignment(&AssignForm::by_slot("3", "2026-10-20", "night")).unwrap();
        assert_eq!(
            request.shift,
            ShiftRef::Slot {
                date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
                shift_type: "night".into()
            }
        );
    }

    #[test]
    fn staff_id_must_be_numeric() {
        assert_eq!(
            validate_assignment(&AssignForm::by_shift_id("", "1")),
            Err("Staff id is required".to_string())
        );
        assert_eq!(
            validate_assignment(&AssignForm::by_shift_id("x1", "1")),
            Err("Staff id must contain only digits".to_string())
        );
        assert!(validate_assignment(&AssignForm::by_shift_id("-1", "1")).is_err());
    }

    #[test]
    fn shift_must_be_named() {
        assert!(validate_assignment(&AssignForm::by_shift_id("1", "")).is_err());
        assert!(validate_assignment(&AssignForm::by_shift_id("1", "one")).is_err());
        assert!(validate_assignment(&AssignForm::by_slot("1", "2026-10-20", " ")).is_err());
        assert!(validate_assignment(&AssignForm::by_slot("1", "20/10/2026", "night")).is_err());
    }
}
