use api_types::expense::ExpenseNew;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Amount,
    Description,
    PaidBy,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Description => "Description",
            Self::PaidBy => "Paid by",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Amount => Self::Description,
            Self::Description => Self::PaidBy,
            Self::PaidBy => Self::Amount,
        }
    }
}

/// Rejected before anything reaches the network.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Amount must be positive")]
    Amount,
    #[error("Description is required")]
    Description,
    #[error("Paid by is required")]
    PaidBy,
}

/// Raw text of the "add expense" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub amount: String,
    pub description: String,
    pub paid_by: String,
    pub focus: FormField,
}

impl ExpenseForm {
    /// Checks amount, description and payer, in that order.
    pub fn validate(&self) -> Result<ExpenseNew, ValidationError> {
        let amount = parse_amount(&self.amount)
            .filter(|amount| *amount > 0.0)
            .ok_or(ValidationError::Amount)?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::Description);
        }

        let paid_by = self.paid_by.trim();
        if paid_by.is_empty() {
            return Err(ValidationError::PaidBy);
        }

        Ok(ExpenseNew {
            amount,
            description: description.to_string(),
            paid_by: paid_by.to_string(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Amount => &self.amount,
            FormField::Description => &self.description,
            FormField::PaidBy => &self.paid_by,
        }
    }

    pub fn push(&mut self, ch: char) {
        self.active_field_mut().push(ch);
    }

    pub fn pop(&mut self) {
        self.active_field_mut().pop();
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Amount => &mut self.amount,
            FormField::Description => &mut self.description,
            FormField::PaidBy => &mut self.paid_by,
        }
    }
}

/// Parses a decimal amount, accepting `.` or `,` as separator.
fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}
