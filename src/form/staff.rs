use crate::api::NewStaff;

/// Input buffers of the "add staff" form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffForm {
    pub name: String,
    pub age: String,
    pub position: String,
}

impl StaffForm {
    pub fn new(name: impl Into<String>, age: impl Into<String>, position: impl Into<String>) -> Self {
        StaffForm {
            name: name.into(),
            age: age.into(),
            position: position.into(),
        }
    }

    pub fn clear(&mut self) {
        *self = StaffForm::default();
    }
}

/// Validates the staff form and builds the create body
pub fn validate_staff(form: &StaffForm) -> Result<NewStaff, String> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("Name is required".to_string());
    }

    let age_raw = form.age.trim();
    if age_raw.is_empty() {
        return Err("Age is required".to_string());
    }
    let age = match age_raw.parse::<i64>() {
        Ok(age) if age >= 1 => age,
        Ok(_) => return Err("Age must be a positive number".to_string()),
        Err(_) => return Err(format!("Age must be a whole number, got '{}'", age_raw)),
    };
    let age = u32::try_from(age).map_err(|_| format!("Age {} is out of range", age))?;

    Ok(NewStaff {
        name: name.to_string(),
        age,
        position: form.position.trim().to_string(),
    })
}
