use once_cell::sync::Lazy;
use regex::Regex;

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Tel,
    Email,
    Text,
}

pub fn input_kind(field: &str) -> InputKind {
    if field.contains("No") {
        InputKind::Tel
    } else if field == "email" {
        InputKind::Email
    } else {
        InputKind::Text
    }
}

pub fn validate(field: &str, value: &str) -> bool {
    match input_kind(field) {
        InputKind::Tel => PHONE.is_match(value),
        InputKind::Email => EMAIL.is_match(value),
        InputKind::Text => !value.trim().is_empty(),
    }
}

/// Strips non-digits from phone-like fields as the user types.
pub fn sanitize(field: &str, raw: &str) -> String {
    match input_kind(field) {
        InputKind::Tel => raw.chars().filter(|c| c.is_ascii_digit()).collect(),
        _ => raw.to_string(),
    }
}

/// `contactNo` -> `Contact No`
pub fn label(field: &str) -> String {
    let mut chars = field.chars();
    let mut ret = String::with_capacity(field.len() + 4);
    if let Some(first) = chars.next() {
        ret.extend(first.to_uppercase());
    }
    for c in chars {
        if c.is_uppercase() {
            ret.push(' ');
        }
        ret.push(c);
    }
    ret.trim().to_string()
}

pub fn error_message(field: &str) -> String {
    match input_kind(field) {
        InputKind::Tel | InputKind::Email => format!("Please enter a valid {}", label(field)),
        InputKind::Text => format!("{} is required", label(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("name", "", false)]
    #[case("name", "   ", false)]
    #[case("name", "x", true)]
    #[case("city", "x", true)]
    #[case("contactNo", "1234567890", true)]
    #[case("contactNo", "123", false)]
    #[case("contactNo", "12345678901", false)]
    #[case("whatsappNo", "98765 43210", false)]
    #[case("email", "a@b.co", true)]
    #[case("email", "someone@mail.example.org", true)]
    #[case("email", "not-an-email", false)]
    #[case("email", "a@b.c", false)]
    #[case("email", "a b@c.com", false)]
    #[case("email", "@b.co", false)]
    fn validates(#[case] field: &str, #[case] value: &str, #[case] expected: bool) {
        assert_eq!(validate(field, value), expected);
    }

    #[test]
    fn phone_fields_drop_non_digits() {
        assert_eq!(sanitize("contactNo", "98-76 54"), "987654");
        assert_eq!(sanitize("whatsappNo", "+91 abc"), "91");
        assert_eq!(sanitize("name", "Ada 9"), "Ada 9");
    }

    #[rstest]
    #[case("name", "Name")]
    #[case("contactNo", "Contact No")]
    #[case("whatsappNo", "Whatsapp No")]
    #[case("email", "Email")]
    fn labels(#[case] field: &str, #[case] expected: &str) {
        assert_eq!(label(field), expected);
    }

    #[test]
    fn messages_follow_field_category() {
        assert_eq!(error_message("name"), "Name is required");
        assert_eq!(error_message("contactNo"), "Please enter a valid Contact No");
        assert_eq!(error_message("email"), "Please enter a valid Email");
    }

    #[test]
    fn input_kinds() {
        assert_eq!(input_kind("contactNo"), InputKind::Tel);
        assert_eq!(input_kind("email"), InputKind::Email);
        assert_eq!(input_kind("name"), InputKind::Text);
    }
}
