use crate::form::FieldId;

/// Focusable elements in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldId),
    PinToggle,
    Submit,
}

const ORDER: [Focus; 8] = [
    Focus::Field(FieldId::FirstName),
    Focus::Field(FieldId::LastName),
    Focus::Field(FieldId::Phone),
    Focus::Field(FieldId::Email),
    Focus::Field(FieldId::CostGuess),
    Focus::Field(FieldId::Pin),
    Focus::PinToggle,
    Focus::Submit,
];

impl Default for Focus {
    fn default() -> Self {
        ORDER[0]
    }
}

impl Focus {
    /// Moves `delta` steps through the tab order, wrapping at both ends.
    pub fn step(self, delta: i32) -> Self {
        let len = ORDER.len() as i32;
        let current = ORDER.iter().position(|f| *f == self).unwrap_or(0) as i32;
        let next = ((current + delta) % len + len) % len;
        ORDER[next as usize]
    }

    pub fn field(self) -> Option<FieldId> {
        match self {
            Focus::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn is_button(self) -> bool {
        matches!(self, Focus::PinToggle | Focus::Submit)
    }
}
