use std::fmt;
use std::str::FromStr;

/// Platform hint describing which on-screen keyboard suits a field.
///
/// Hints are advisory only; no field other than the PIN enforces a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Text,
    Tel,
    Email,
    Numeric,
}

impl InputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::Text => "text",
            InputMode::Tel => "tel",
            InputMode::Email => "email",
            InputMode::Numeric => "numeric",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every field of the interest form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    FirstName,
    LastName,
    Phone,
    Email,
    CostGuess,
    Pin,
}

impl FieldId {
    pub const ALL: [FieldId; 6] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Phone,
        FieldId::Email,
        FieldId::CostGuess,
        FieldId::Pin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::FirstName => "First Name",
            FieldId::LastName => "Last Name",
            FieldId::Phone => "Phone Number",
            FieldId::Email => "Email Address",
            FieldId::CostGuess => "Guess the Air Fryer's Cost",
            FieldId::Pin => "Spidr PIN",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FieldId::FirstName => "Josh",
            FieldId::LastName => "Kim",
            FieldId::Phone => "555-123-4567",
            FieldId::Email => "josh@example.com",
            FieldId::CostGuess => "$149",
            FieldId::Pin => "####-####-####-####",
        }
    }

    pub fn input_mode(self) -> InputMode {
        match self {
            FieldId::FirstName | FieldId::LastName => InputMode::Text,
            FieldId::Phone => InputMode::Tel,
            FieldId::Email => InputMode::Email,
            FieldId::CostGuess | FieldId::Pin => InputMode::Numeric,
        }
    }

    /// Key used when the form is serialized or seeded.
    pub fn key(self) -> &'static str {
        match self {
            FieldId::FirstName => "firstName",
            FieldId::LastName => "lastName",
            FieldId::Phone => "phone",
            FieldId::Email => "email",
            FieldId::CostGuess => "costGuess",
            FieldId::Pin => "spidrPin",
        }
    }

    pub fn is_pin(self) -> bool {
        matches!(self, FieldId::Pin)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError {
    pub name: String,
}

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known = FieldId::ALL
            .iter()
            .map(|field| field.key())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "unknown field '{}' (expected one of: {known})", self.name)
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for FieldId {
    type Err = UnknownFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_'))
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        let field = match normalized.as_str() {
            "firstname" | "first" => FieldId::FirstName,
            "lastname" | "last" => FieldId::LastName,
            "phone" | "phonenumber" => FieldId::Phone,
            "email" | "emailaddress" => FieldId::Email,
            "costguess" | "cost" => FieldId::CostGuess,
            "spidrpin" | "pin" => FieldId::Pin,
            _ => {
                return Err(UnknownFieldError {
                    name: raw.to_string(),
                });
            }
        };
        Ok(field)
    }
}

/// A malformed `KEY=VALUE` seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedError {
    MissingSeparator(String),
    UnknownField(UnknownFieldError),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::MissingSeparator(raw) => {
                write!(f, "expected KEY=VALUE, got '{raw}'")
            }
            SeedError::UnknownField(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for SeedError {}

/// Splits `KEY=VALUE` into a field and its raw value.
///
/// Only the first `=` separates; the value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(FieldId, &str), SeedError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| SeedError::MissingSeparator(raw.to_string()))?;
    let field = key.parse::<FieldId>().map_err(SeedError::UnknownField)?;
    Ok((field, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_keys_and_aliases() {
        for field in FieldId::ALL {
            assert_eq!(field.key().parse::<FieldId>(), Ok(field));
        }
        assert_eq!("first-name".parse::<FieldId>(), Ok(FieldId::FirstName));
        assert_eq!("cost_guess".parse::<FieldId>(), Ok(FieldId::CostGuess));
        assert_eq!("PIN".parse::<FieldId>(), Ok(FieldId::Pin));
    }

    #[test]
    fn unknown_field_lists_known_keys() {
        let err = "zip".parse::<FieldId>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'zip'"));
        assert!(message.contains("spidrPin"));
    }

    #[test]
    fn assignments_split_on_first_equals() {
        assert_eq!(
            parse_assignment("email=a=b@example.com"),
            Ok((FieldId::Email, "a=b@example.com"))
        );
        assert_eq!(parse_assignment("pin="), Ok((FieldId::Pin, "")));
        assert!(matches!(
            parse_assignment("firstName"),
            Err(SeedError::MissingSeparator(_))
        ));
        assert!(matches!(
            parse_assignment("nickname=Jo"),
            Err(SeedError::UnknownField(_))
        ));
    }

    #[test]
    fn numeric_leaning_fields_hint_input_mode() {
        assert_eq!(FieldId::Phone.input_mode(), InputMode::Tel);
        assert_eq!(FieldId::Email.input_mode(), InputMode::Email);
        assert_eq!(FieldId::CostGuess.input_mode(), InputMode::Numeric);
        assert_eq!(FieldId::Pin.input_mode(), InputMode::Numeric);
        assert_eq!(FieldId::FirstName.input_mode(), InputMode::Text);
    }
}
