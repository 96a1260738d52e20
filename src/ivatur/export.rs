//! Assembly of the complete IVA Turismo file.

use super::config::ReportConfig;
use super::records::{
    FORM_CODE, associated_voucher_record, header_record, item_record, payment_record,
    sale_voucher_record, taxes_record, tourist_record, vat_subtotal_record,
};
use super::voucher::{TourismVoucher, VoucherSource};
use crate::core::{AfipError, RemittanceSequence, is_iva_tur_document_type};

const CRLF: &str = "\r\n";

/// A generated presentation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// `F8089.<CUIT>.<YYYYMM>00.<remittance>.TXT`
    pub filename: String,
    /// CRLF-terminated records.
    pub content: String,
}

impl ExportFile {
    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.content.into_bytes()
    }

    /// Records without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split_terminator(CRLF)
    }
}

/// Filename AFIP expects for this presentation.
pub fn export_filename(config: &ReportConfig) -> Result<String, AfipError> {
    config.validate()?;
    Ok(format!(
        "F{FORM_CODE}.{}.{}00.{:04}.TXT",
        config.cuit()?,
        config.period.yyyymm(),
        config.remittance
    ))
}

fn push(out: &mut String, line: String) {
    out.push_str(&line);
    out.push_str(CRLF);
}

fn encode_voucher(out: &mut String, config: &ReportConfig, v: &TourismVoucher) -> Result<(), AfipError> {
    if v.authorization.is_none() {
        tracing::warn!(voucher = %v.display_name(), "voucher has no CAE or CAI");
    }
    push(out, sale_voucher_record(v)?);
    for subtotal in &v.vat_subtotals {
        push(out, vat_subtotal_record(subtotal)?);
    }
    push(out, tourist_record(v)?);
    push(out, taxes_record(config, v)?);
    for assoc in &v.associated {
        push(out, associated_voucher_record(assoc)?);
    }
    for item in &v.items {
        push(out, item_record(item)?);
    }
    push(out, payment_record(v)?);
    Ok(())
}

/// Encode the vouchers of one presentation.
///
/// Every source is resolved before the first line is written; any failure
/// aborts the whole file. Records follow the order header, then per voucher
/// 02, 03 per VAT subtotal, 04, 05, 06 per associated voucher, 07 per item
/// and 08.
pub fn encode_report<S: VoucherSource>(
    config: &ReportConfig,
    sources: &[S],
) -> Result<ExportFile, AfipError> {
    if sources.is_empty() {
        return Err(AfipError::Encoding("no vouchers to export".into()));
    }
    let filename = export_filename(config)?;

    let vouchers = sources
        .iter()
        .map(|s| s.voucher())
        .collect::<Result<Vec<_>, _>>()?;

    let mut content = String::new();
    push(&mut content, header_record(config, vouchers.len())?);
    for v in &vouchers {
        if !is_iva_tur_document_type(&v.document_type) {
            tracing::warn!(
                voucher = %v.display_name(),
                document_type = %v.document_type,
                "voucher type is not an IVA Turismo document type"
            );
        }
        encode_voucher(&mut content, config, v)?;
        tracing::debug!(voucher = %v.display_name(), "voucher encoded");
    }

    tracing::info!(
        filename = %filename,
        period = %config.period,
        vouchers = vouchers.len(),
        "IVA Turismo file generated"
    );
    Ok(ExportFile { filename, content })
}

/// Encode with the next remittance number of `sequence`.
///
/// A later `config.period` restarts the sequence at 1; an earlier one is
/// rejected. The number is consumed only if encoding succeeds.
pub fn encode_next_remittance<S: VoucherSource>(
    sequence: &mut RemittanceSequence,
    config: &ReportConfig,
    sources: &[S],
) -> Result<ExportFile, AfipError> {
    let mut next = sequence.clone();
    if config.period < next.period() {
        return Err(AfipError::Numbering(format!(
            "period {} precedes remittance sequence period {}",
            config.period,
            next.period()
        )));
    }
    next.auto_advance(config.period);

    let numbered = ReportConfig {
        remittance: next.peek()?,
        ..config.clone()
    };
    let file = encode_report(&numbered, sources)?;
    next.advance()?;
    *sequence = next;
    Ok(file)
}
