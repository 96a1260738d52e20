//! IVA Turismo (régimen 8089) fixed-width export.
//!
//! Vouchers come from a [`VoucherSource`]: either [`XmlVoucher`] (stored
//! WSCT request + response) or [`ErpInvoice`] (legacy ERP fields). The
//! encoder writes one header and, per voucher, records 02 to 08 with CRLF
//! line endings.
//!
//! # Example
//!
//! ```ignore
//! use afip_turismo::ivatur::*;
//! use afip_turismo::{PaymentType, ReportPeriod};
//!
//! let config = ReportConfigBuilder::new("20-12345678-9", ReportPeriod::new(2025, 6)?)
//!     .remittance(1)
//!     .build();
//! let voucher = XmlVoucher::parse(&request_xml, &response_xml)?
//!     .tourist_name("Jane Doe")
//!     .payment_type(PaymentType::CreditCard);
//!
//! let file = encode_report(&config, &[voucher])?;
//! std::fs::write(&file.filename, file.as_bytes())?;
//! ```

mod config;
mod erp_source;
mod export;
mod records;
mod voucher;
mod xml_source;

pub use config::{ReportConfig, ReportConfigBuilder};
pub use erp_source::{
    DEFAULT_CURRENCY, ErpAssociatedInvoice, ErpInvoice, ErpInvoiceLine, ErpPartner,
    split_document_number,
};
pub use export::{ExportFile, encode_next_remittance, encode_report, export_filename};
pub use records::{
    FORM_CODE, FORM_VERSION, RecordType, associated_voucher_record, header_record, item_record,
    payment_record, sale_voucher_record, taxes_record, tourist_record, vat_subtotal_record,
};
pub use voucher::{Authorization, Tourist, TourismVoucher, VoucherAmounts, VoucherSource};
pub use xml_source::XmlVoucher;
