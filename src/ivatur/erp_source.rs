//! Adapter for invoices that never went through WSCT.
//!
//! Older invoices only carry ERP fields: a `PV-NUMBER` document number, the
//! partner's identification and per-line VAT. This adapter maps them onto a
//! [`TourismVoucher`] with the same defaults the accounting side applies.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::voucher::{Authorization, Tourist, TourismVoucher, VoucherAmounts, VoucherSource};
use crate::core::{
    AfipError, AuthorizationKind, ItemType, PaymentType, RelationCode, TourismCode,
};
use crate::wsct::{AssociatedVoucher, TourismItem, VatSubtotal};

/// Currency reported when the invoice has none.
pub const DEFAULT_CURRENCY: &str = "PES";

/// Invoice partner (the tourist).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpPartner {
    pub name: String,
    /// Identification number; dashes are dropped.
    pub vat: String,
    /// AFIP identification type code.
    pub identification_type: String,
    /// AFIP country code.
    pub country_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpInvoiceLine {
    pub description: String,
    pub item_code: String,
    pub item_type: ItemType,
    pub tourism_code: TourismCode,
    /// WSCT VAT bucket of the line tax (`5` for 21%).
    pub vat_bucket: String,
    pub vat_amount: Decimal,
    /// Line total including VAT.
    pub total: Decimal,
}

/// A previously issued voucher this one refers to (credit/debit notes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpAssociatedInvoice {
    pub document_type: String,
    /// `PV-NUMBER` document number.
    pub document_number: String,
}

/// Invoice as stored by the ERP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErpInvoice {
    /// Invoice display name.
    pub name: String,
    pub document_type: String,
    /// `PV-NUMBER`, e.g. `0002-00000015`.
    pub document_number: String,
    pub invoice_date: Option<NaiveDate>,
    pub partner: ErpPartner,
    pub tax_id: String,
    pub relation: Option<RelationCode>,
    pub taxed_amount: Decimal,
    pub untaxed_amount: Decimal,
    pub exempt_amount: Decimal,
    pub refund_amount: Decimal,
    pub total_amount: Decimal,
    pub currency_code: Option<String>,
    pub currency_rate: Option<Decimal>,
    pub authorization: Option<(AuthorizationKind, String)>,
    pub payment_type: Option<PaymentType>,
    pub lines: Vec<ErpInvoiceLine>,
    pub associated: Vec<ErpAssociatedInvoice>,
}

/// Split `PV-NUMBER`. Anything else is reported with point of sale `00000`
/// and the last eight characters as number.
pub fn split_document_number(label: &str, raw: &str) -> (String, String) {
    let raw = raw.trim();
    if let Some((pv, number)) = raw.split_once('-') {
        let (pv, number) = (pv.trim(), number.trim());
        if !pv.is_empty() && !number.is_empty() && !number.contains('-') {
            return (pv.to_string(), number.to_string());
        }
    }
    tracing::warn!(
        invoice = label,
        document_number = raw,
        "document number is not in PV-NUMBER form"
    );
    let tail: String = {
        let chars: Vec<char> = raw.chars().collect();
        chars[chars.len().saturating_sub(8)..].iter().collect()
    };
    ("00000".to_string(), tail)
}

/// Sum line VAT per bucket, buckets in first-seen order.
fn group_vat(lines: &[ErpInvoiceLine]) -> Vec<VatSubtotal> {
    let mut subtotals: Vec<VatSubtotal> = Vec::new();
    for line in lines {
        let bucket = line.vat_bucket.trim();
        match subtotals.iter_mut().find(|s| s.code == bucket) {
            Some(s) => s.amount += line.vat_amount,
            None => subtotals.push(VatSubtotal {
                code: bucket.to_string(),
                amount: line.vat_amount,
            }),
        }
    }
    subtotals
}

impl VoucherSource for ErpInvoice {
    fn voucher(&self) -> Result<TourismVoucher, AfipError> {
        let (point_of_sale, number) = split_document_number(&self.name, &self.document_number);

        let associated = self
            .associated
            .iter()
            .map(|a| {
                let (pv, num) = split_document_number(&self.name, &a.document_number);
                AssociatedVoucher {
                    voucher_type: a.document_type.clone(),
                    point_of_sale: pv,
                    number: num,
                }
            })
            .collect();

        let items = self
            .lines
            .iter()
            .map(|l| TourismItem {
                kind: l.item_type.code().to_string(),
                tourism_code: l.tourism_code.code().to_string(),
                code: l.item_code.clone(),
                description: l.description.clone(),
                vat_rate_code: l.vat_bucket.trim().to_string(),
                vat_amount: l.vat_amount,
                amount: l.total,
            })
            .collect();

        let currency_code = self
            .currency_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string();

        Ok(TourismVoucher {
            label: self.name.clone(),
            document_type: self.document_type.clone(),
            point_of_sale,
            number,
            emission_date: self.invoice_date,
            tourist: Tourist {
                document_type: self.partner.identification_type.clone(),
                document_number: self.partner.vat.replace('-', "").trim().to_string(),
                name: self.partner.name.clone(),
                country_code: self.partner.country_code.clone(),
            },
            tax_id: self.tax_id.clone(),
            relation_code: self.relation.unwrap_or_default().code().to_string(),
            amounts: VoucherAmounts {
                taxed: self.taxed_amount,
                untaxed: self.untaxed_amount,
                exempt: self.exempt_amount,
                refund: self.refund_amount,
                total: self.total_amount,
            },
            currency_code,
            exchange_rate: self.currency_rate.unwrap_or(Decimal::ONE),
            authorization: self.authorization.as_ref().map(|(kind, code)| Authorization {
                kind: *kind,
                code: code.clone(),
            }),
            vat_subtotals: group_vat(&self.lines),
            associated,
            items,
            payment_type: self.payment_type,
        })
    }
}
