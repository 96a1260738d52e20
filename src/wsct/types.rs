use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AfipError, AuthorizationKind, parse_afip_date};

/// `authRequest`: WSAA credentials forwarded with every WSCT call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRequest {
    /// `token`
    pub token: String,
    /// `sign`
    pub sign: String,
    /// `cuitRepresentada`: CUIT the call is made on behalf of.
    pub represented_cuit: String,
}

/// `item`: one line of tourism-service detail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourismItem {
    /// `tipo`: item type (0 general, 97 advance, 99 discount).
    pub kind: String,
    /// `codigoTurismo`: tourism service code.
    pub tourism_code: String,
    /// `codigo`: seller's item code.
    pub code: String,
    /// `descripcion`
    pub description: String,
    /// `codigoAlicuotaIVA`: VAT bucket code.
    pub vat_rate_code: String,
    /// `importeIVA`
    pub vat_amount: Decimal,
    /// `importeItem`
    pub amount: Decimal,
}

/// `subtotalIVA`: VAT total of one rate bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatSubtotal {
    /// `codigo`: VAT bucket code.
    pub code: String,
    /// `importe`
    pub amount: Decimal,
}

/// `comprobanteAsociado`: reference to a previously issued voucher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedVoucher {
    /// `codigoTipoComprobante`
    pub voucher_type: String,
    /// `numeroPuntoVenta`
    pub point_of_sale: String,
    /// `numeroComprobante`
    pub number: String,
}

/// `comprobanteRequest`: one voucher submitted for authorization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherRequest {
    /// `codigoTipoComprobante`
    pub voucher_type: String,
    /// `numeroPuntoVenta`
    pub point_of_sale: String,
    /// `numeroComprobante`
    pub number: String,
    /// `fechaEmision`, kept verbatim (`YYYY-MM-DD` in WSCT).
    pub emission_date: String,
    /// `codigoTipoAutorizacion`
    pub authorization_type_code: String,
    /// `codigoTipoDocumento`: tourist document type.
    pub document_type: String,
    /// `numeroDocumento`: tourist document number.
    pub document_number: String,
    /// `idImpositivo`: tax-id code of the receiver.
    pub tax_id: String,
    /// `codigoPais`
    pub country_code: String,
    /// `domicilioReceptor`
    pub receiver_address: String,
    /// `codigoRelacionEmisorReceptor`
    pub relation_code: String,
    /// `importeGravado`
    pub taxed_amount: Decimal,
    /// `importeNoGravado`
    pub untaxed_amount: Decimal,
    /// `importeExento`
    pub exempt_amount: Decimal,
    /// `importeReintegro`
    pub refund_amount: Decimal,
    /// `importeTotal`
    pub total_amount: Decimal,
    /// `codigoMoneda`
    pub currency_code: String,
    /// `cotizacionMoneda`
    pub exchange_rate: Decimal,
    /// `observaciones`
    pub observations: String,
    /// `arrayItems/item`, in document order.
    pub items: Vec<TourismItem>,
    /// `arraySubtotalesIVA/subtotalIVA`, in document order.
    pub vat_subtotals: Vec<VatSubtotal>,
    /// `arrayComprobantesAsociados/comprobanteAsociado`, in document order.
    pub associated_vouchers: Vec<AssociatedVoucher>,
}

/// `autorizarComprobanteRequest`: the full unit parsed from a request envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizeRequest {
    pub auth: AuthRequest,
    pub voucher: VoucherRequest,
}

/// `codigoDescripcion`: an error or observation returned by AFIP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfipMessage {
    pub code: String,
    pub description: String,
}

/// Result of `autorizarComprobante`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherResponse {
    /// `cuit`: issuer CUIT echoed by AFIP.
    pub cuit: String,
    /// `codigoTipoComprobante`
    pub voucher_type: String,
    /// `numeroPuntoVenta`
    pub point_of_sale: String,
    /// `numeroComprobante`
    pub number: String,
    /// `fechaEmision`
    pub emission_date: String,
    /// CAE or CAI, whichever node AFIP returned; `None` if neither.
    pub authorization: Option<AuthorizationKind>,
    /// Value of the `CAE` / `CAI` node.
    pub authorization_code: String,
    /// `fechaVencimientoCAE` / `fechaVencimientoCAI`, verbatim.
    pub expiry_date: String,
    /// `resultado` (`A` approved, `R` rejected, `O` observed).
    pub result: String,
    /// `arrayErrores`
    pub errors: Vec<AfipMessage>,
    /// `arrayObservaciones`
    pub observations: Vec<AfipMessage>,
}

impl VoucherResponse {
    /// `"CAE"`, `"CAI"` or `""`.
    pub fn authorization_type(&self) -> &'static str {
        self.authorization.map(|k| k.code()).unwrap_or("")
    }

    /// Voucher number assigned by AFIP, if it is a valid integer.
    pub fn voucher_number(&self) -> Option<u64> {
        self.number.trim().parse().ok()
    }

    /// Authorization expiry as a date; `None` if AFIP sent none.
    pub fn expiry(&self) -> Result<Option<NaiveDate>, AfipError> {
        if self.expiry_date.trim().is_empty() {
            return Ok(None);
        }
        parse_afip_date("fechaVencimiento", &self.expiry_date).map(Some)
    }

    pub fn is_approved(&self) -> bool {
        self.result.trim() == "A"
    }
}
