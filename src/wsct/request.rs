//! `autorizarComprobanteRequest` parsing and generation.

use super::types::*;
use super::xml_utils::{Anchor, ScopedHandler, XmlResult, XmlWriter, parse_decimal, walk};
use super::{SOAP_NS, WSCT_NS};
use crate::core::AfipError;

const REQUEST: &str = "autorizarComprobanteRequest";
const AUTH: &str = "authRequest";
const VOUCHER: &str = "comprobanteRequest";

/// Parse a WSCT `autorizarComprobante` SOAP request.
///
/// The request, `authRequest` and `comprobanteRequest` nodes are required;
/// absent leaves default to empty text or zero. Items, VAT subtotals and
/// associated vouchers are only read from their own list containers directly
/// below `comprobanteRequest`.
pub fn parse_request(xml: &str) -> Result<AuthorizeRequest, AfipError> {
    let anchors = [Anchor {
        namespace: WSCT_NS,
        local: REQUEST,
    }];
    let mut p = RequestParsed::default();
    walk(xml, &anchors, &mut p)?;
    p.into_request()
}

#[derive(Default)]
struct RequestParsed {
    seen_request: bool,
    seen_auth: bool,
    seen_voucher: bool,

    auth: AuthRequest,
    voucher: RawVoucher,

    items: Vec<RawItem>,
    current_item: Option<RawItem>,
    subtotals: Vec<RawSubtotal>,
    current_subtotal: Option<RawSubtotal>,
    associated: Vec<AssociatedVoucher>,
    current_associated: Option<AssociatedVoucher>,
}

#[derive(Default)]
struct RawVoucher {
    voucher_type: String,
    point_of_sale: String,
    number: String,
    emission_date: String,
    authorization_type_code: String,
    document_type: String,
    document_number: String,
    tax_id: String,
    country_code: String,
    receiver_address: String,
    relation_code: String,
    taxed_amount: String,
    untaxed_amount: String,
    exempt_amount: String,
    refund_amount: String,
    total_amount: String,
    currency_code: String,
    exchange_rate: String,
    observations: String,
}

#[derive(Default)]
struct RawItem {
    kind: String,
    tourism_code: String,
    code: String,
    description: String,
    vat_rate_code: String,
    vat_amount: String,
    amount: String,
}

#[derive(Default)]
struct RawSubtotal {
    code: String,
    amount: String,
}

impl ScopedHandler for RequestParsed {
    fn open(&mut self, _anchor: usize, rel: &[&str]) {
        match rel {
            [_, VOUCHER, "arrayItems", "item"] => self.current_item = Some(RawItem::default()),
            [_, VOUCHER, "arraySubtotalesIVA", "subtotalIVA"] => {
                self.current_subtotal = Some(RawSubtotal::default())
            }
            [_, VOUCHER, "arrayComprobantesAsociados", "comprobanteAsociado"] => {
                self.current_associated = Some(AssociatedVoucher::default())
            }
            _ => {}
        }
    }

    fn close(&mut self, _anchor: usize, rel: &[&str], text: &str) {
        match rel {
            [_] => self.seen_request = true,
            [_, AUTH] => self.seen_auth = true,
            [_, AUTH, leaf] => {
                let slot = match *leaf {
                    "token" => &mut self.auth.token,
                    "sign" => &mut self.auth.sign,
                    "cuitRepresentada" => &mut self.auth.represented_cuit,
                    _ => return,
                };
                *slot = text.to_string();
            }
            [_, VOUCHER] => self.seen_voucher = true,
            [_, VOUCHER, leaf] => self.voucher.set(leaf, text),

            [_, VOUCHER, "arrayItems", "item"] => {
                if let Some(item) = self.current_item.take() {
                    self.items.push(item);
                }
            }
            [_, VOUCHER, "arrayItems", "item", leaf] => {
                if let Some(item) = self.current_item.as_mut() {
                    item.set(leaf, text);
                }
            }

            [_, VOUCHER, "arraySubtotalesIVA", "subtotalIVA"] => {
                if let Some(sub) = self.current_subtotal.take() {
                    self.subtotals.push(sub);
                }
            }
            [_, VOUCHER, "arraySubtotalesIVA", "subtotalIVA", leaf] => {
                if let Some(sub) = self.current_subtotal.as_mut() {
                    match *leaf {
                        "codigo" => sub.code = text.to_string(),
                        "importe" => sub.amount = text.to_string(),
                        _ => {}
                    }
                }
            }

            [_, VOUCHER, "arrayComprobantesAsociados", "comprobanteAsociado"] => {
                if let Some(ca) = self.current_associated.take() {
                    self.associated.push(ca);
                }
            }
            [_, VOUCHER, "arrayComprobantesAsociados", "comprobanteAsociado", leaf] => {
                if let Some(ca) = self.current_associated.as_mut() {
                    match *leaf {
                        "codigoTipoComprobante" => ca.voucher_type = text.to_string(),
                        "numeroPuntoVenta" => ca.point_of_sale = text.to_string(),
                        "numeroComprobante" => ca.number = text.to_string(),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}

impl RawVoucher {
    fn set(&mut self, leaf: &str, text: &str) {
        let slot = match leaf {
            "codigoTipoComprobante" => &mut self.voucher_type,
            "numeroPuntoVenta" => &mut self.point_of_sale,
            "numeroComprobante" => &mut self.number,
            "fechaEmision" => &mut self.emission_date,
            "codigoTipoAutorizacion" => &mut self.authorization_type_code,
            "codigoTipoDocumento" => &mut self.document_type,
            "numeroDocumento" => &mut self.document_number,
            "idImpositivo" => &mut self.tax_id,
            "codigoPais" => &mut self.country_code,
            "domicilioReceptor" => &mut self.receiver_address,
            "codigoRelacionEmisorReceptor" => &mut self.relation_code,
            "importeGravado" => &mut self.taxed_amount,
            "importeNoGravado" => &mut self.untaxed_amount,
            "importeExento" => &mut self.exempt_amount,
            "importeReintegro" => &mut self.refund_amount,
            "importeTotal" => &mut self.total_amount,
            "codigoMoneda" => &mut self.currency_code,
            "cotizacionMoneda" => &mut self.exchange_rate,
            "observaciones" => &mut self.observations,
            _ => return,
        };
        *slot = text.to_string();
    }
}

impl RawItem {
    fn set(&mut self, leaf: &str, text: &str) {
        let slot = match leaf {
            "tipo" => &mut self.kind,
            "codigoTurismo" => &mut self.tourism_code,
            "codigo" => &mut self.code,
            "descripcion" => &mut self.description,
            "codigoAlicuotaIVA" => &mut self.vat_rate_code,
            "importeIVA" => &mut self.vat_amount,
            "importeItem" => &mut self.amount,
            _ => return,
        };
        *slot = text.to_string();
    }
}

impl RequestParsed {
    fn into_request(self) -> Result<AuthorizeRequest, AfipError> {
        if !self.seen_request {
            return Err(AfipError::MissingNode(REQUEST.into()));
        }
        if !self.seen_auth {
            return Err(AfipError::MissingNode(AUTH.into()));
        }
        if !self.seen_voucher {
            return Err(AfipError::MissingNode(VOUCHER.into()));
        }

        let items = self
            .items
            .into_iter()
            .map(|i| -> Result<TourismItem, AfipError> {
                Ok(TourismItem {
                    vat_amount: parse_decimal("importeIVA", &i.vat_amount)?,
                    amount: parse_decimal("importeItem", &i.amount)?,
                    kind: i.kind,
                    tourism_code: i.tourism_code,
                    code: i.code,
                    description: i.description,
                    vat_rate_code: i.vat_rate_code,
                })
            })
            .collect::<Result<Vec<_>, AfipError>>()?;

        let vat_subtotals = self
            .subtotals
            .into_iter()
            .map(|s| -> Result<VatSubtotal, AfipError> {
                Ok(VatSubtotal {
                    amount: parse_decimal("importe", &s.amount)?,
                    code: s.code,
                })
            })
            .collect::<Result<Vec<_>, AfipError>>()?;

        let v = self.voucher;
        let voucher = VoucherRequest {
            taxed_amount: parse_decimal("importeGravado", &v.taxed_amount)?,
            untaxed_amount: parse_decimal("importeNoGravado", &v.untaxed_amount)?,
            exempt_amount: parse_decimal("importeExento", &v.exempt_amount)?,
            refund_amount: parse_decimal("importeReintegro", &v.refund_amount)?,
            total_amount: parse_decimal("importeTotal", &v.total_amount)?,
            exchange_rate: parse_decimal("cotizacionMoneda", &v.exchange_rate)?,
            voucher_type: v.voucher_type,
            point_of_sale: v.point_of_sale,
            number: v.number,
            emission_date: v.emission_date,
            authorization_type_code: v.authorization_type_code,
            document_type: v.document_type,
            document_number: v.document_number,
            tax_id: v.tax_id,
            country_code: v.country_code,
            receiver_address: v.receiver_address,
            relation_code: v.relation_code,
            currency_code: v.currency_code,
            observations: v.observations,
            items,
            vat_subtotals,
            associated_vouchers: self.associated,
        };

        Ok(AuthorizeRequest {
            auth: self.auth,
            voucher,
        })
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Render an [`AuthorizeRequest`] as the SOAP envelope WSCT expects.
///
/// Empty item, subtotal and associated-voucher lists are omitted.
pub fn to_request_xml(req: &AuthorizeRequest) -> XmlResult {
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        "soapenv:Envelope",
        &[("xmlns:soapenv", SOAP_NS), ("xmlns:ser", WSCT_NS)],
    )?;
    w.empty_element("soapenv:Header")?;
    w.start_element("soapenv:Body")?;
    w.start_element("ser:autorizarComprobanteRequest")?;

    w.start_element(AUTH)?;
    w.text_element("token", &req.auth.token)?;
    w.text_element("sign", &req.auth.sign)?;
    w.text_element("cuitRepresentada", &req.auth.represented_cuit)?;
    w.end_element(AUTH)?;

    let v = &req.voucher;
    w.start_element(VOUCHER)?;
    w.text_element("codigoTipoComprobante", &v.voucher_type)?;
    w.text_element("numeroPuntoVenta", &v.point_of_sale)?;
    w.text_element("numeroComprobante", &v.number)?;
    w.text_element("fechaEmision", &v.emission_date)?;
    w.text_element("codigoTipoAutorizacion", &v.authorization_type_code)?;
    w.text_element("codigoTipoDocumento", &v.document_type)?;
    w.text_element("numeroDocumento", &v.document_number)?;
    w.text_element("idImpositivo", &v.tax_id)?;
    w.text_element("codigoPais", &v.country_code)?;
    w.text_element("domicilioReceptor", &v.receiver_address)?;
    w.text_element("codigoRelacionEmisorReceptor", &v.relation_code)?;
    w.decimal_element("importeGravado", v.taxed_amount)?;
    w.decimal_element("importeNoGravado", v.untaxed_amount)?;
    w.decimal_element("importeExento", v.exempt_amount)?;
    w.decimal_element("importeReintegro", v.refund_amount)?;
    w.decimal_element("importeTotal", v.total_amount)?;
    w.text_element("codigoMoneda", &v.currency_code)?;
    w.decimal_element("cotizacionMoneda", v.exchange_rate)?;
    w.text_element("observaciones", &v.observations)?;

    if !v.items.is_empty() {
        w.start_element("arrayItems")?;
        for item in &v.items {
            w.start_element("item")?;
            w.text_element("tipo", &item.kind)?;
            w.text_element("codigoTurismo", &item.tourism_code)?;
            w.text_element("codigo", &item.code)?;
            w.text_element("descripcion", &item.description)?;
            w.text_element("codigoAlicuotaIVA", &item.vat_rate_code)?;
            w.decimal_element("importeIVA", item.vat_amount)?;
            w.decimal_element("importeItem", item.amount)?;
            w.end_element("item")?;
        }
        w.end_element("arrayItems")?;
    }

    if !v.vat_subtotals.is_empty() {
        w.start_element("arraySubtotalesIVA")?;
        for sub in &v.vat_subtotals {
            w.start_element("subtotalIVA")?;
            w.text_element("codigo", &sub.code)?;
            w.decimal_element("importe", sub.amount)?;
            w.end_element("subtotalIVA")?;
        }
        w.end_element("arraySubtotalesIVA")?;
    }

    if !v.associated_vouchers.is_empty() {
        w.start_element("arrayComprobantesAsociados")?;
        for ca in &v.associated_vouchers {
            w.start_element("comprobanteAsociado")?;
            w.text_element("codigoTipoComprobante", &ca.voucher_type)?;
            w.text_element("numeroPuntoVenta", &ca.point_of_sale)?;
            w.text_element("numeroComprobante", &ca.number)?;
            w.end_element("comprobanteAsociado")?;
        }
        w.end_element("arrayComprobantesAsociados")?;
    }

    w.end_element(VOUCHER)?;
    w.end_element("ser:autorizarComprobanteRequest")?;
    w.end_element("soapenv:Body")?;
    w.end_element("soapenv:Envelope")?;

    w.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const MINIMAL: &str = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ser="http://ar.gob.afip.wsct/CTService/">
  <soapenv:Body>
    <ser:autorizarComprobanteRequest>
      <authRequest><token>T</token><sign>S</sign><cuitRepresentada>20123456789</cuitRepresentada></authRequest>
      <comprobanteRequest><codigoTipoComprobante>195</codigoTipoComprobante></comprobanteRequest>
    </ser:autorizarComprobanteRequest>
  </soapenv:Body>
</soapenv:Envelope>"#;

    #[test]
    fn leaves_default_when_absent() {
        let req = parse_request(MINIMAL).unwrap();
        assert_eq!(req.auth.token, "T");
        assert_eq!(req.voucher.voucher_type, "195");
        assert_eq!(req.voucher.number, "");
        assert_eq!(req.voucher.total_amount, dec!(0));
        assert!(req.voucher.items.is_empty());
    }

    #[test]
    fn request_in_foreign_namespace_is_missing() {
        let xml = MINIMAL.replace("http://ar.gob.afip.wsct/CTService/", "urn:other");
        assert!(matches!(
            parse_request(&xml),
            Err(AfipError::MissingNode(n)) if n == REQUEST
        ));
    }

    #[test]
    fn empty_request_reports_auth_missing() {
        let xml = r#"<ser:autorizarComprobanteRequest xmlns:ser="http://ar.gob.afip.wsct/CTService/"/>"#;
        assert!(matches!(
            parse_request(xml),
            Err(AfipError::MissingNode(n)) if n == AUTH
        ));
    }

    #[test]
    fn generated_envelope_parses_back() {
        let req = parse_request(MINIMAL).unwrap();
        let xml = to_request_xml(&req).unwrap();
        assert!(xml.contains("<soapenv:Header/>"));
        assert!(!xml.contains("arrayItems"));
        assert_eq!(parse_request(&xml).unwrap(), req);
    }
}
