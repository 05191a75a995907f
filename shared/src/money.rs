use crate::format::format_hundredths;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    Euros,
    SwissFrancs,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Euros => "€",
            Currency::SwissFrancs => "CHF",
        }
    }
}

/// A price in cents, with its currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub cents: i64,
    pub currency: Currency,
}

impl Amount {
    pub fn euros(cents: i64) -> Self {
        Self { cents, currency: Currency::Euros }
    }

    pub fn swiss_francs(cents: i64) -> Self {
        Self { cents, currency: Currency::SwissFrancs }
    }

    pub fn negated(self) -> Self {
        Self { cents: -self.cents, ..self }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = format_hundredths(self.cents);
        match self.currency {
            Currency::SwissFrancs => write!(f, "{} {}", self.currency.symbol(), value),
            Currency::Euros => write!(f, "{}{}", value, self.currency.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::euros(0).to_string(), "0€");
        assert_eq!(Amount::euros(100).to_string(), "1€");
        assert_eq!(Amount::euros(-100).to_string(), "-1€");
        assert_eq!(Amount::euros(110).to_string(), "1,10€");
        assert_eq!(Amount::swiss_francs(110).to_string(), "CHF 1,10");
        assert_eq!(Amount::swiss_francs(11589).to_string(), "CHF 115,89");
    }

    #[test]
    fn test_negated() {
        assert_eq!(Amount::euros(250).negated(), Amount::euros(-250));
    }
}
