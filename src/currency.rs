//! The currencies a ledger can be kept in.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A currency that transaction amounts are denominated in.
///
/// All transactions in one report are assumed to share a currency, no
/// conversion is ever performed.
///
/// Serialized as a `{name, code, sign}` object. When deserializing, either
/// that object or a bare ISO 4217 code such as `"NZD"` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "CurrencyRepr", into = "CurrencyRepr")]
pub enum Currency {
    /// New Zealand dollar.
    #[default]
    Nzd,
    /// Australian dollar.
    Aud,
    /// United States dollar.
    Usd,
    /// Canadian dollar.
    Cad,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
    /// Japanese yen.
    Jpy,
    /// Swiss franc.
    Chf,
    /// Polish złoty.
    Pln,
    /// Ukrainian hryvnia.
    Uah,
}

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Currency; 10] = [
        Currency::Nzd,
        Currency::Aud,
        Currency::Usd,
        Currency::Cad,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Chf,
        Currency::Pln,
        Currency::Uah,
    ];

    /// The human readable name, e.g. "New Zealand Dollar".
    pub fn name(self) -> &'static str {
        match self {
            Self::Nzd => "New Zealand Dollar",
            Self::Aud => "Australian Dollar",
            Self::Usd => "US Dollar",
            Self::Cad => "Canadian Dollar",
            Self::Eur => "Euro",
            Self::Gbp => "British Pound",
            Self::Jpy => "Japanese Yen",
            Self::Chf => "Swiss Franc",
            Self::Pln => "Polish Zloty",
            Self::Uah => "Ukrainian Hryvnia",
        }
    }

    /// The ISO 4217 code, e.g. "NZD".
    pub fn code(self) -> &'static str {
        match self {
            Self::Nzd => "NZD",
            Self::Aud => "AUD",
            Self::Usd => "USD",
            Self::Cad => "CAD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Chf => "CHF",
            Self::Pln => "PLN",
            Self::Uah => "UAH",
        }
    }

    /// The symbol placed before amounts, e.g. "$".
    pub fn sign(self) -> &'static str {
        match self {
            Self::Nzd | Self::Aud | Self::Usd | Self::Cad => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
            Self::Chf => "CHF ",
            Self::Pln => "zł ",
            Self::Uah => "₴",
        }
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let code = code.trim();

        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| Error::UnknownCurrency(code.to_owned()))
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CurrencyRepr {
    Code(String),
    Triple {
        name: String,
        code: String,
        sign: String,
    },
}

impl TryFrom<CurrencyRepr> for Currency {
    type Error = Error;

    fn try_from(repr: CurrencyRepr) -> Result<Self, Self::Error> {
        match repr {
            CurrencyRepr::Code(code) => code.parse(),
            CurrencyRepr::Triple { code, .. } => code.parse(),
        }
    }
}

impl From<Currency> for CurrencyRepr {
    fn from(currency: Currency) -> Self {
        CurrencyRepr::Triple {
            name: currency.name().to_owned(),
            code: currency.code().to_owned(),
            sign: currency.sign().to_owned(),
        }
    }
}
