//! Line encoders for the eight IVA Turismo record types.
//!
//! Each function returns one line without terminator. Every line is checked
//! against the width of its [`RecordType`] before it is returned.

use super::config::ReportConfig;
use super::voucher::TourismVoucher;
use crate::core::fixed::{self, Overflow, amount, blank, numeric, text, zeros};
use crate::core::{AfipError, vat_rate_code};
use crate::wsct::{AssociatedVoucher, TourismItem, VatSubtotal};

/// AFIP form (régimen) code of IVA Turismo.
pub const FORM_CODE: &str = "8089";
/// Form version written in the header.
pub const FORM_VERSION: &str = "0100";

const AMOUNT_WIDTH: usize = 15;

/// The record types of an IVA Turismo file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Header,
    SaleVoucher,
    VatSubtotal,
    Tourist,
    Taxes,
    AssociatedVoucher,
    Item,
    Payment,
}

impl RecordType {
    /// Two-digit type prefix.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Header => "01",
            Self::SaleVoucher => "02",
            Self::VatSubtotal => "03",
            Self::Tourist => "04",
            Self::Taxes => "05",
            Self::AssociatedVoucher => "06",
            Self::Item => "07",
            Self::Payment => "08",
        }
    }

    /// Total line width in bytes, prefix included.
    pub fn width(&self) -> usize {
        match self {
            Self::Header => 32,
            Self::SaleVoucher => 195,
            Self::VatSubtotal => 34,
            Self::Tourist => 96,
            Self::Taxes => 80,
            Self::AssociatedVoucher => 18,
            Self::Item => 312,
            Self::Payment => 64,
        }
    }

    /// Record type of a line, from its prefix.
    pub fn of_line(line: &str) -> Option<Self> {
        let kind = match line.get(..2)? {
            "01" => Self::Header,
            "02" => Self::SaleVoucher,
            "03" => Self::VatSubtotal,
            "04" => Self::Tourist,
            "05" => Self::Taxes,
            "06" => Self::AssociatedVoucher,
            "07" => Self::Item,
            "08" => Self::Payment,
            _ => return None,
        };
        Some(kind)
    }
}

fn finish(kind: RecordType, fields: &[String]) -> Result<String, AfipError> {
    let mut line = String::with_capacity(kind.width());
    line.push_str(kind.code());
    for f in fields {
        line.push_str(f);
    }
    let width = line.len();
    if width != kind.width() {
        return Err(AfipError::Encoding(format!(
            "record {} is {width} bytes wide, expected {}",
            kind.code(),
            kind.width()
        )));
    }
    Ok(line)
}

fn emission_date(v: &TourismVoucher) -> Result<String, AfipError> {
    v.emission_date
        .map(|d| d.format("%Y%m%d").to_string())
        .ok_or_else(|| {
            AfipError::Encoding(format!("voucher {} has no emission date", v.display_name()))
        })
}

/// Authorization type (A3) and code (N14); blanks and zeros when absent.
fn authorization(v: &TourismVoucher) -> Result<(String, String), AfipError> {
    match &v.authorization {
        Some(auth) => Ok((
            text("authorization_type", auth.kind.code(), 3, Overflow::Reject)?,
            numeric("authorization_code", &auth.code, 14)?,
        )),
        None => Ok((blank(3), zeros(14))),
    }
}

/// Record 01. The no-movement flag is `1` only when `voucher_count` is zero.
pub fn header_record(config: &ReportConfig, voucher_count: usize) -> Result<String, AfipError> {
    config.validate()?;
    let flag = if voucher_count == 0 { "1" } else { "0" };
    finish(
        RecordType::Header,
        &[
            numeric("company_cuit", &config.cuit()?, 11)?,
            config.period.yyyymm(),
            numeric("remittance", &config.remittance.to_string(), 4)?,
            FORM_CODE.to_string(),
            FORM_VERSION.to_string(),
            flag.to_string(),
        ],
    )
}

/// Record 02: voucher identity, tourist, amounts, currency and authorization.
pub fn sale_voucher_record(v: &TourismVoucher) -> Result<String, AfipError> {
    let (auth_type, auth_code) = authorization(v)?;
    finish(
        RecordType::SaleVoucher,
        &[
            numeric("document_type", &v.document_type, 3)?,
            numeric("point_of_sale", &v.point_of_sale, 5)?,
            numeric("number", &v.number, 8)?,
            emission_date(v)?,
            numeric("tourist_document_type", &v.tourist.document_type, 2)?,
            text(
                "tourist_document_number",
                &v.tourist.document_number,
                20,
                Overflow::Reject,
            )?,
            numeric("country_code", &v.tourist.country_code, 4)?,
            numeric("tax_id", &v.tax_id, 2)?,
            numeric("relation_code", &v.relation_code, 2)?,
            amount("taxed_amount", v.amounts.taxed, AMOUNT_WIDTH)?,
            amount("untaxed_amount", v.amounts.untaxed, AMOUNT_WIDTH)?,
            amount("exempt_amount", v.amounts.exempt, AMOUNT_WIDTH)?,
            amount("refund_amount", v.amounts.refund, AMOUNT_WIDTH)?,
            amount("vat_total", v.vat_total(), AMOUNT_WIDTH)?,
            text("currency_code", &v.currency_code, 3, Overflow::Reject)?,
            fixed::fixed_decimal("exchange_rate", v.exchange_rate, 12, 6)?,
            auth_type,
            auth_code,
            blank(11),
            amount("total_amount", v.amounts.total, AMOUNT_WIDTH)?,
        ],
    )
}

/// Record 03. The taxable base slot is always zero-filled.
pub fn vat_subtotal_record(subtotal: &VatSubtotal) -> Result<String, AfipError> {
    finish(
        RecordType::VatSubtotal,
        &[
            vat_rate_code(&subtotal.code).to_string(),
            zeros(AMOUNT_WIDTH),
            amount("vat_amount", subtotal.amount, AMOUNT_WIDTH)?,
        ],
    )
}

/// Record 04. Nationality and residence both take the tourist's country.
pub fn tourist_record(v: &TourismVoucher) -> Result<String, AfipError> {
    let country = numeric("country_code", &v.tourist.country_code, 4)?;
    finish(
        RecordType::Tourist,
        &[
            numeric("tourist_document_type", &v.tourist.document_type, 2)?,
            text(
                "tourist_document_number",
                &v.tourist.document_number,
                20,
                Overflow::Reject,
            )?,
            country.clone(),
            text("tourist_name", &v.tourist.name, 60, Overflow::Truncate)?,
            country.clone(),
            country,
        ],
    )
}

/// Record 05: the company's view of the voucher and its refund.
pub fn taxes_record(config: &ReportConfig, v: &TourismVoucher) -> Result<String, AfipError> {
    let (auth_type, auth_code) = authorization(v)?;
    finish(
        RecordType::Taxes,
        &[
            numeric("company_cuit", &config.cuit()?, 11)?,
            numeric("document_type", &v.document_type, 3)?,
            numeric("point_of_sale", &v.point_of_sale, 5)?,
            numeric("number", &v.number, 8)?,
            auth_type,
            auth_code,
            emission_date(v)?,
            blank(11),
            amount("refund_amount", v.amounts.refund, AMOUNT_WIDTH)?,
        ],
    )
}

/// Record 06.
pub fn associated_voucher_record(assoc: &AssociatedVoucher) -> Result<String, AfipError> {
    finish(
        RecordType::AssociatedVoucher,
        &[
            numeric("associated_type", &assoc.voucher_type, 3)?,
            numeric("associated_point_of_sale", &assoc.point_of_sale, 5)?,
            numeric("associated_number", &assoc.number, 8)?,
        ],
    )
}

/// Record 07. Only the item description may be truncated.
pub fn item_record(item: &TourismItem) -> Result<String, AfipError> {
    finish(
        RecordType::Item,
        &[
            numeric("item_type", &item.kind, 2)?,
            numeric("tourism_code", &item.tourism_code, 4)?,
            text("item_code", &item.code, 30, Overflow::Reject)?,
            blank(11),
            blank(8),
            blank(3),
            text("item_description", &item.description, 200, Overflow::Truncate)?,
            blank(5),
            blank(15),
            vat_rate_code(&item.vat_rate_code).to_string(),
            amount("item_vat_amount", item.vat_amount, AMOUNT_WIDTH)?,
            amount("item_amount", item.amount, AMOUNT_WIDTH)?,
        ],
    )
}

/// Record 08. A voucher without a payment type cannot be reported.
pub fn payment_record(v: &TourismVoucher) -> Result<String, AfipError> {
    let payment = v.payment_type.ok_or_else(|| {
        AfipError::Encoding(format!("voucher {} has no payment type", v.display_name()))
    })?;
    finish(
        RecordType::Payment,
        &[
            numeric("payment_type", payment.code(), 2)?,
            blank(11),
            blank(34),
            amount("payment_amount", v.amounts.total, AMOUNT_WIDTH)?,
        ],
    )
}
