use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AfipError, AuthorizationKind, PaymentType};
use crate::wsct::{AssociatedVoucher, TourismItem, VatSubtotal};

/// Foreign tourist the voucher was issued to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tourist {
    /// AFIP identification type code.
    pub document_type: String,
    /// Passport or foreign id number.
    pub document_number: String,
    /// Full name as printed on the voucher.
    pub name: String,
    /// AFIP country code.
    pub country_code: String,
}

/// Voucher-level amounts, in the voucher currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherAmounts {
    pub taxed: Decimal,
    pub untaxed: Decimal,
    pub exempt: Decimal,
    pub refund: Decimal,
    pub total: Decimal,
}

/// CAE or CAI granted to the voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub kind: AuthorizationKind,
    pub code: String,
}

/// Everything the encoder needs to write one voucher, whatever its origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourismVoucher {
    /// Human-readable reference used in log events (invoice name).
    pub label: String,
    /// AFIP voucher type code (195, 196, 197, 362).
    pub document_type: String,
    pub point_of_sale: String,
    pub number: String,
    pub emission_date: Option<NaiveDate>,
    pub tourist: Tourist,
    /// Receiver tax-id code.
    pub tax_id: String,
    /// Issuer/receiver relation code.
    pub relation_code: String,
    pub amounts: VoucherAmounts,
    pub currency_code: String,
    pub exchange_rate: Decimal,
    pub authorization: Option<Authorization>,
    pub vat_subtotals: Vec<VatSubtotal>,
    pub associated: Vec<AssociatedVoucher>,
    pub items: Vec<TourismItem>,
    pub payment_type: Option<PaymentType>,
}

impl TourismVoucher {
    /// Sum of all VAT subtotals.
    pub fn vat_total(&self) -> Decimal {
        self.vat_subtotals.iter().map(|s| s.amount).sum()
    }

    /// Label for log events, falling back to `type-pv-number`.
    pub fn display_name(&self) -> String {
        if self.label.is_empty() {
            format!("{}-{}-{}", self.document_type, self.point_of_sale, self.number)
        } else {
            self.label.clone()
        }
    }
}

/// Anything that can be resolved into a [`TourismVoucher`].
///
/// Resolution may fail (bad XML, unparseable date); the encoder resolves
/// every source before writing a single line, so a failure never leaves a
/// partial file.
pub trait VoucherSource {
    fn voucher(&self) -> Result<TourismVoucher, AfipError>;
}

impl VoucherSource for TourismVoucher {
    fn voucher(&self) -> Result<TourismVoucher, AfipError> {
        Ok(self.clone())
    }
}

impl<T: VoucherSource + ?Sized> VoucherSource for &T {
    fn voucher(&self) -> Result<TourismVoucher, AfipError> {
        (**self).voucher()
    }
}

impl<T: VoucherSource + ?Sized> VoucherSource for Box<T> {
    fn voucher(&self) -> Result<TourismVoucher, AfipError> {
        (**self).voucher()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn vat_total_sums_subtotals() {
        let v = TourismVoucher {
            vat_subtotals: vec![
                VatSubtotal {
                    code: "5".into(),
                    amount: dec!(21.00),
                },
                VatSubtotal {
                    code: "4".into(),
                    amount: dec!(10.50),
                },
            ],
            ..Default::default()
        };
        assert_eq!(v.vat_total(), dec!(31.50));
    }

    #[test]
    fn display_name_falls_back_to_identity() {
        let mut v = TourismVoucher {
            document_type: "195".into(),
            point_of_sale: "2".into(),
            number: "15".into(),
            ..Default::default()
        };
        assert_eq!(v.display_name(), "195-2-15");
        v.label = "FA-T 00002-00000015".into();
        assert_eq!(v.display_name(), "FA-T 00002-00000015");
    }

    #[test]
    fn boxed_sources_resolve() {
        let sources: Vec<Box<dyn VoucherSource>> = vec![Box::new(TourismVoucher::default())];
        assert!(sources[0].voucher().is_ok());
    }
}
