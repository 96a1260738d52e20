//! WSCT (Comprobantes de Turismo) SOAP payloads.
//!
//! Extracts the `autorizarComprobante` request and response envelopes into
//! plain value structs, and renders requests back to XML.
//!
//! # Example
//!
//! ```
//! use afip_turismo::wsct;
//!
//! let request_xml = r#"
//! <ser:autorizarComprobanteRequest xmlns:ser="http://ar.gob.afip.wsct/CTService/">
//!   <authRequest><token>T</token><sign>S</sign><cuitRepresentada>20123456789</cuitRepresentada></authRequest>
//!   <comprobanteRequest>
//!     <codigoTipoComprobante>195</codigoTipoComprobante>
//!     <arrayItems>
//!       <item><codigo>HAB</codigo><importeItem>121.00</importeItem></item>
//!     </arrayItems>
//!   </comprobanteRequest>
//! </ser:autorizarComprobanteRequest>"#;
//!
//! let req = wsct::parse_request(request_xml).unwrap();
//! assert_eq!(req.voucher.voucher_type, "195");
//! assert_eq!(req.voucher.items.len(), 1);
//! assert_eq!(req.voucher.items[0].code, "HAB");
//! ```

mod request;
mod response;
mod types;
pub(crate) mod xml_utils;

pub use request::{parse_request, to_request_xml};
pub use response::parse_response;
pub use types::*;

/// SOAP 1.1 envelope namespace.
pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// WSCT service namespace (`CTService`).
pub const WSCT_NS: &str = "http://ar.gob.afip.wsct/CTService/";
