use crate::libtnpsc::validator::{sanitize, validate};
use log::debug;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

pub const REGISTRATION_FIELDS: [&str; 4] = ["name", "contactNo", "whatsappNo", "email"];

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("invalid fields: {}", .0.join(", "))]
    Invalid(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub name: String,
    pub contact_no: String,
    pub whatsapp_no: String,
    pub email: String,
}

/// Values, touched set and error flags of the registration form.
///
/// A field only shows up in `errors` once it has been blurred or the form has
/// been submitted.
#[derive(Debug, Clone)]
pub struct FormState {
    fields: Vec<(String, String)>,
    touched: HashSet<String>,
    errors: HashMap<String, bool>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(&REGISTRATION_FIELDS)
    }
}

impl FormState {
    pub fn new(names: &[&str]) -> Self {
        Self {
            fields: names.iter().map(|n| (n.to_string(), String::new())).collect(),
            touched: HashSet::new(),
            errors: HashMap::new(),
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.get(field).copied().unwrap_or(false)
    }

    pub fn change(&mut self, field: &str, raw: &str) {
        let value = sanitize(field, raw);
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => *slot = value,
            None => {
                debug!("[Form] Ignoring change to unknown field {:?}", field);
                return;
            }
        }
        if self.is_touched(field) {
            self.revalidate(field);
        }
    }

    pub fn blur(&mut self, field: &str) {
        if self.value(field).is_none() {
            debug!("[Form] Ignoring blur of unknown field {:?}", field);
            return;
        }
        self.touched.insert(field.to_string());
        self.revalidate(field);
    }

    /// Marks every field touched and validates all of them.
    pub fn submit(&mut self) -> Result<Registration, FormError> {
        let names: Vec<String> = self.fields.iter().map(|(name, _)| name.clone()).collect();
        for name in &names {
            self.touched.insert(name.clone());
            self.revalidate(name);
        }

        let invalid: Vec<String> = names
            .into_iter()
            .filter(|name| self.has_error(name))
            .collect();
        if !invalid.is_empty() {
            debug!("[Form] Submit blocked by {:?}", invalid);
            return Err(FormError::Invalid(invalid));
        }

        let get = |field: &str| self.value(field).unwrap_or_default().to_string();
        Ok(Registration {
            name: get("name"),
            contact_no: get("contactNo"),
            whatsapp_no: get("whatsappNo"),
            email: get("email"),
        })
    }

    fn revalidate(&mut self, field: &str) {
        let valid = validate(field, self.value(field).unwrap_or_default());
        self.errors.insert(field.to_string(), !valid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fill_valid(form: &mut FormState) {
        form.change("name", "Kavya");
        form.change("contactNo", "9876543210");
        form.change("whatsappNo", "98765-43210");
        form.change("email", "kavya@example.in");
    }

    #[test]
    fn change_before_blur_does_not_flag() {
        let mut form = FormState::default();
        form.change("contactNo", "12");
        assert!(!form.is_touched("contactNo"));
        assert!(!form.has_error("contactNo"));
    }

    #[test]
    fn blur_validates_and_change_then_revalidates() {
        let mut form = FormState::default();
        form.change("contactNo", "12");
        form.blur("contactNo");
        assert!(form.has_error("contactNo"));

        form.change("contactNo", "1234567890");
        assert!(!form.has_error("contactNo"));

        form.change("contactNo", "123456789");
        assert!(form.has_error("contactNo"));
    }

    #[test]
    fn phone_input_is_sanitized() {
        let mut form = FormState::default();
        form.change("whatsappNo", "(987) 654-3210");
        assert_eq!(form.value("whatsappNo"), Some("9876543210"));
    }

    #[test]
    fn submit_touches_every_field() {
        let mut form = FormState::default();
        form.change("name", "Kavya");
        let err = form.submit().unwrap_err();
        assert_eq!(
            err,
            FormError::Invalid(vec![
                "contactNo".to_string(),
                "whatsappNo".to_string(),
                "email".to_string()
            ])
        );
        for field in REGISTRATION_FIELDS {
            assert!(form.is_touched(field));
        }
        assert!(!form.has_error("name"));
    }

    #[test]
    fn submit_returns_registration_when_valid() {
        let mut form = FormState::default();
        fill_valid(&mut form);
        let registration = form.submit().unwrap();
        assert_eq!(
            registration,
            Registration {
                name: "Kavya".to_string(),
                contact_no: "9876543210".to_string(),
                whatsapp_no: "9876543210".to_string(),
                email: "kavya@example.in".to_string(),
            }
        );
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut form = FormState::default();
        form.change("age", "40");
        form.blur("age");
        assert_eq!(form.value("age"), None);
        assert!(!form.is_touched("age"));
        assert_eq!(form.field_names().count(), 4);
    }
}
