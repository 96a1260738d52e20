use super::error::AfipError;
use super::period::ReportPeriod;

/// Highest remittance number the 4-digit header slot can carry.
pub const MAX_REMITTANCE: u16 = 9999;

/// Remittance (remesa) counter of an IVA Turismo report.
///
/// Each successful file generation for a period consumes one number, starting
/// at 1. The counter belongs to the report entity; callers hold it behind
/// `&mut` so concurrent generations for the same report are serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemittanceSequence {
    period: ReportPeriod,
    next: u16,
}

impl RemittanceSequence {
    /// Create a sequence starting at 1.
    pub fn new(period: ReportPeriod) -> Self {
        Self { period, next: 1 }
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(period: ReportPeriod, next: u16) -> Result<Self, AfipError> {
        if next == 0 || next > MAX_REMITTANCE {
            return Err(AfipError::Numbering(format!(
                "remittance {next} outside 1..={MAX_REMITTANCE}"
            )));
        }
        Ok(Self { period, next })
    }

    /// Period the sequence currently numbers.
    pub fn period(&self) -> ReportPeriod {
        self.period
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> Result<u16, AfipError> {
        if self.next > MAX_REMITTANCE {
            return Err(AfipError::Numbering(format!(
                "remittance numbers exhausted for period {}",
                self.period
            )));
        }
        Ok(self.next)
    }

    /// Consume and return the next number.
    pub fn advance(&mut self) -> Result<u16, AfipError> {
        let num = self.peek()?;
        self.next += 1;
        Ok(num)
    }

    /// Switch to a later period, restarting at 1. Returns true if it moved.
    pub fn auto_advance(&mut self, period: ReportPeriod) -> bool {
        if period > self.period {
            self.period = period;
            self.next = 1;
            true
        } else {
            false
        }
    }
}
