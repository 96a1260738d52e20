//! # afip-turismo
//!
//! Argentine AFIP tourism invoicing: reads the WSCT (Comprobantes de
//! Turismo) SOAP payloads stored with each invoice and writes the IVA
//! Turismo (régimen 8089) fixed-width presentation file.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Amounts are rounded half away from zero when converted to cents.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "ivatur")] {
//! use afip_turismo::ivatur::*;
//! use afip_turismo::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let config = ReportConfigBuilder::new("20-12345678-9", ReportPeriod::new(2025, 6).unwrap()).build();
//! let voucher = TourismVoucher {
//!     document_type: "195".into(),
//!     point_of_sale: "2".into(),
//!     number: "15".into(),
//!     emission_date: NaiveDate::from_ymd_opt(2025, 6, 14),
//!     amounts: VoucherAmounts { total: dec!(1210), ..Default::default() },
//!     payment_type: Some(PaymentType::CreditCard),
//!     ..Default::default()
//! };
//!
//! let file = encode_report(&config, &[voucher]).unwrap();
//! assert_eq!(file.filename, "F8089.20123456789.20250600.0001.TXT");
//! assert_eq!(file.lines().count(), 5);
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Errors, AFIP code tables, periods, remittance numbering, fixed-width fields |
//! | `wsct` | WSCT request/response parsing and request XML generation |
//! | `ivatur` (default) | IVA Turismo records and file export |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "wsct")]
pub mod wsct;

#[cfg(feature = "ivatur")]
pub mod ivatur;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
