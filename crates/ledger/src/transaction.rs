use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pocketbook_core::{DomainError, DomainResult, Entity, TransactionId, ValueObject};

/// Direction of a transaction's amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub const INCOME_LABEL: &'static str = "Pemasukan";
    pub const EXPENSE_LABEL: &'static str = "Pengeluaran";

    /// Human-facing label; doubles as the stored tag.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => Self::INCOME_LABEL,
            TransactionKind::Expense => Self::EXPENSE_LABEL,
        }
    }

    /// Strict inverse of [`TransactionKind::label`].
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            Self::INCOME_LABEL => Some(TransactionKind::Income),
            Self::EXPENSE_LABEL => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lenient parse for user input: the labels or `income`/`expense`, any case.
impl FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pemasukan" | "income" => Ok(TransactionKind::Income),
            "pengeluaran" | "expense" => Ok(TransactionKind::Expense),
            other => Err(DomainError::invalid_type(format!(
                "'{other}' is not one of: Pemasukan, Pengeluaran, income, expense"
            ))),
        }
    }
}

/// Non-negative, finite decimal magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl ValueObject for Amount {}

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Largest accepted amount (10^18).
    ///
    /// Totals of up to 7.9e10 such amounts stay within `Decimal`'s range, so
    /// summing a ledger never overflows.
    pub const MAX: Amount = Amount(Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0));

    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::invalid_amount(format!(
                "amount must not be negative (got {value})"
            )));
        }
        if value > Self::MAX.0 {
            return Err(DomainError::invalid_amount(format!(
                "amount must not exceed {} (got {value})",
                Self::MAX.0
            )));
        }
        if value.is_zero() {
            return Ok(Self::ZERO);
        }
        Ok(Self(value.normalize()))
    }

    /// Parse user input. Accepts plain and scientific notation.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_amount("amount is required"));
        }
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| DomainError::invalid_amount(format!("'{trimmed}' is not a number")))?;
        Self::new(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl core::fmt::Display for Amount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Amount::new(value).map_err(serde::de::Error::custom)
    }
}

/// One recorded income or expense event (immutable once created).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    date: NaiveDate,
    description: String,
    amount: Amount,
    kind: TransactionKind,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Amount,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            amount,
            kind,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> TransactionId {
        Transaction::id(self)
    }
}

/// Input for [`crate::Ledger::add`].
///
/// `amount` is checked on add; `date` falls back to today when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub kind: TransactionKind,
}

impl NewTransaction {
    pub fn new(description: impl Into<String>, amount: Decimal, kind: TransactionKind) -> Self {
        Self {
            description: description.into(),
            amount,
            date: None,
            kind,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Build from raw text fields.
    ///
    /// Fails with `InvalidAmount`, `InvalidType` or `InvalidDate`. An empty
    /// date string counts as "not supplied".
    pub fn parse(
        description: &str,
        amount: &str,
        date: Option<&str>,
        kind: &str,
    ) -> DomainResult<Self> {
        let amount = Amount::parse(amount)?;
        let kind = kind.parse::<TransactionKind>()?;
        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => Some(parse_date(raw)?),
            None => None,
        };
        Ok(Self {
            description: description.to_string(),
            amount: amount.value(),
            date,
            kind,
        })
    }
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| DomainError::invalid_date(format!("'{}': {e}", raw.trim())))
}
