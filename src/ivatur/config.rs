use serde::{Deserialize, Serialize};

use crate::core::fixed::digits_only;
use crate::core::{AfipError, MAX_REMITTANCE, ReportPeriod};

/// Identity of one IVA Turismo presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// CUIT of the reporting company, dashes allowed (`20-12345678-9`).
    pub company_cuit: String,
    /// Reporting month.
    pub period: ReportPeriod,
    /// Remittance (remesa) number within the period, 1–9999.
    pub remittance: u16,
}

impl ReportConfig {
    /// Company CUIT as the 11 digits AFIP expects.
    pub fn cuit(&self) -> Result<String, AfipError> {
        let digits = digits_only(&self.company_cuit);
        if digits.len() != 11 {
            return Err(AfipError::Encoding(format!(
                "company CUIT {:?} must have 11 digits",
                self.company_cuit
            )));
        }
        Ok(digits)
    }

    /// Check the fields every record and the filename depend on.
    pub fn validate(&self) -> Result<(), AfipError> {
        self.cuit()?;
        if self.remittance == 0 || self.remittance > MAX_REMITTANCE {
            return Err(AfipError::Numbering(format!(
                "remittance {} outside 1..={MAX_REMITTANCE}",
                self.remittance
            )));
        }
        Ok(())
    }
}

/// Builder for [`ReportConfig`].
///
/// # Example
///
/// ```
/// use afip_turismo::ReportPeriod;
/// use afip_turismo::ivatur::ReportConfigBuilder;
///
/// let config = ReportConfigBuilder::new("20-12345678-9", ReportPeriod::new(2025, 6).unwrap())
///     .remittance(2)
///     .build();
/// assert_eq!(config.cuit().unwrap(), "20123456789");
/// ```
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Start a configuration for the first remittance of `period`.
    pub fn new(company_cuit: impl Into<String>, period: ReportPeriod) -> Self {
        Self {
            config: ReportConfig {
                company_cuit: company_cuit.into(),
                period,
                remittance: 1,
            },
        }
    }

    /// Set the remittance number.
    pub fn remittance(mut self, remittance: u16) -> Self {
        self.config.remittance = remittance;
        self
    }

    pub fn build(self) -> ReportConfig {
        self.config
    }
}
