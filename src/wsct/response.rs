use super::types::{AfipMessage, VoucherResponse};
use super::xml_utils::{Anchor, ScopedHandler, walk};
use super::{SOAP_NS, WSCT_NS};
use crate::core::{AfipError, AuthorizationKind};

const RESPONSE: &str = "autorizarComprobanteResponse";
const RETURN: &str = "autorizarComprobanteReturn";
const VOUCHER: &str = "comprobanteResponse";

const ANCHOR_RESPONSE: usize = 0;
const ANCHOR_FAULT: usize = 1;

/// Parse the SOAP response of `autorizarComprobante`.
///
/// The authorization kind is decided by node presence: a `CAE` node wins,
/// otherwise a `CAI` node, otherwise none. `resultado` is kept either way.
/// A SOAP fault is reported as [`AfipError::Parse`] with its `faultstring`.
pub fn parse_response(xml: &str) -> Result<VoucherResponse, AfipError> {
    let anchors = [
        Anchor {
            namespace: WSCT_NS,
            local: RESPONSE,
        },
        Anchor {
            namespace: SOAP_NS,
            local: "Fault",
        },
    ];
    let mut p = ResponseParsed::default();
    walk(xml, &anchors, &mut p)?;
    p.into_response()
}

#[derive(Default)]
struct ResponseParsed {
    seen_response: bool,
    fault: Option<String>,

    resp: VoucherResponse,
    cae: Option<String>,
    cae_expiry: String,
    cai: Option<String>,
    cai_expiry: String,
    current_message: Option<AfipMessage>,
}

impl ScopedHandler for ResponseParsed {
    fn open(&mut self, anchor: usize, rel: &[&str]) {
        if anchor == ANCHOR_RESPONSE {
            if let [_, RETURN, "arrayErrores" | "arrayObservaciones", "codigoDescripcion"] = rel {
                self.current_message = Some(AfipMessage::default());
            }
        }
    }

    fn close(&mut self, anchor: usize, rel: &[&str], text: &str) {
        if anchor == ANCHOR_FAULT {
            match rel {
                [_] => {
                    self.fault.get_or_insert_with(String::new);
                }
                [_, "faultstring"] => self.fault = Some(text.to_string()),
                _ => {}
            }
            return;
        }

        match rel {
            [_] => self.seen_response = true,
            [_, RETURN, "resultado"] => self.resp.result = text.to_string(),
            [_, RETURN, VOUCHER, leaf] => self.set_voucher_leaf(leaf, text),
            [_, RETURN, list, "codigoDescripcion"] => {
                if let Some(msg) = self.current_message.take() {
                    match *list {
                        "arrayErrores" => self.resp.errors.push(msg),
                        "arrayObservaciones" => self.resp.observations.push(msg),
                        _ => {}
                    }
                }
            }
            [_, RETURN, _, "codigoDescripcion", leaf] => {
                if let Some(msg) = self.current_message.as_mut() {
                    match *leaf {
                        "codigo" => msg.code = text.to_string(),
                        "descripcion" => msg.description = text.to_string(),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
}

impl ResponseParsed {
    fn set_voucher_leaf(&mut self, leaf: &str, text: &str) {
        let text = text.to_string();
        match leaf {
            "cuit" => self.resp.cuit = text,
            "codigoTipoComprobante" => self.resp.voucher_type = text,
            "numeroPuntoVenta" => self.resp.point_of_sale = text,
            "numeroComprobante" => self.resp.number = text,
            "fechaEmision" => self.resp.emission_date = text,
            "CAE" => self.cae = Some(text),
            "fechaVencimientoCAE" => self.cae_expiry = text,
            "CAI" => self.cai = Some(text),
            "fechaVencimientoCAI" => self.cai_expiry = text,
            _ => {}
        }
    }

    fn into_response(self) -> Result<VoucherResponse, AfipError> {
        if let Some(fault) = self.fault {
            let detail = if fault.is_empty() { "no faultstring" } else { fault.as_str() };
            return Err(AfipError::Parse(format!("SOAP fault: {detail}")));
        }
        if !self.seen_response {
            return Err(AfipError::MissingNode(RESPONSE.into()));
        }

        let mut resp = self.resp;
        if let Some(cae) = self.cae {
            resp.authorization = Some(AuthorizationKind::Cae);
            resp.authorization_code = cae;
            resp.expiry_date = self.cae_expiry;
        } else if let Some(cai) = self.cai {
            resp.authorization = Some(AuthorizationKind::Cai);
            resp.authorization_code = cai;
            resp.expiry_date = self.cai_expiry;
        }
        Ok(resp)
    }
}
