use super::voucher::{Authorization, Tourist, TourismVoucher, VoucherAmounts, VoucherSource};
use crate::core::{AfipError, PaymentType, parse_afip_date};
use crate::wsct::{AuthorizeRequest, VoucherResponse, parse_request, parse_response};

/// A voucher authorized through WSCT, read back from the stored request and
/// response envelopes.
///
/// The tourist name and the payment type are not part of the WSCT payloads
/// and must be supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct XmlVoucher {
    label: String,
    request: AuthorizeRequest,
    response: VoucherResponse,
    tourist_name: String,
    payment_type: Option<PaymentType>,
}

impl XmlVoucher {
    pub fn new(request: AuthorizeRequest, response: VoucherResponse) -> Self {
        Self {
            request,
            response,
            ..Default::default()
        }
    }

    /// Parse both envelopes.
    pub fn parse(request_xml: &str, response_xml: &str) -> Result<Self, AfipError> {
        Ok(Self::new(parse_request(request_xml)?, parse_response(response_xml)?))
    }

    /// Reference used in log events.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn tourist_name(mut self, name: impl Into<String>) -> Self {
        self.tourist_name = name.into();
        self
    }

    pub fn payment_type(mut self, payment: PaymentType) -> Self {
        self.payment_type = Some(payment);
        self
    }

    pub fn request(&self) -> &AuthorizeRequest {
        &self.request
    }

    pub fn response(&self) -> &VoucherResponse {
        &self.response
    }
}

/// The response echoes the identity AFIP registered; fall back to what was sent.
fn prefer(response: &str, request: &str) -> String {
    if response.trim().is_empty() {
        request.trim().to_string()
    } else {
        response.trim().to_string()
    }
}

impl VoucherSource for XmlVoucher {
    fn voucher(&self) -> Result<TourismVoucher, AfipError> {
        let req = &self.request.voucher;
        let resp = &self.response;

        let raw_date = prefer(&resp.emission_date, &req.emission_date);
        let emission_date = if raw_date.is_empty() {
            None
        } else {
            Some(parse_afip_date("fechaEmision", &raw_date)?)
        };

        Ok(TourismVoucher {
            label: self.label.clone(),
            document_type: prefer(&resp.voucher_type, &req.voucher_type),
            point_of_sale: prefer(&resp.point_of_sale, &req.point_of_sale),
            number: prefer(&resp.number, &req.number),
            emission_date,
            tourist: Tourist {
                document_type: req.document_type.clone(),
                document_number: req.document_number.clone(),
                name: self.tourist_name.clone(),
                country_code: req.country_code.clone(),
            },
            tax_id: req.tax_id.clone(),
            relation_code: req.relation_code.clone(),
            amounts: VoucherAmounts {
                taxed: req.taxed_amount,
                untaxed: req.untaxed_amount,
                exempt: req.exempt_amount,
                refund: req.refund_amount,
                total: req.total_amount,
            },
            currency_code: req.currency_code.clone(),
            exchange_rate: req.exchange_rate,
            authorization: resp.authorization.map(|kind| Authorization {
                kind,
                code: resp.authorization_code.clone(),
            }),
            vat_subtotals: req.vat_subtotals.clone(),
            associated: req.associated_vouchers.clone(),
            items: req.items.clone(),
            payment_type: self.payment_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AuthorizationKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn pair() -> (AuthorizeRequest, VoucherResponse) {
        let mut req = AuthorizeRequest::default();
        req.voucher.voucher_type = "195".into();
        req.voucher.point_of_sale = "2".into();
        req.voucher.number = "0".into();
        req.voucher.emission_date = "2025-06-14".into();
        req.voucher.total_amount = dec!(1210);
        let resp = VoucherResponse {
            number: "15".into(),
            authorization: Some(AuthorizationKind::Cai),
            authorization_code: "12345678901234".into(),
            ..Default::default()
        };
        (req, resp)
    }

    #[test]
    fn response_identity_wins_when_present() {
        let (req, resp) = pair();
        let v = XmlVoucher::new(req, resp)
            .tourist_name("Jane Doe")
            .payment_type(PaymentType::DebitCard)
            .voucher()
            .unwrap();
        assert_eq!(v.number, "15");
        assert_eq!(v.point_of_sale, "2");
        assert_eq!(v.emission_date, NaiveDate::from_ymd_opt(2025, 6, 14));
        assert_eq!(v.tourist.name, "Jane Doe");
        assert_eq!(v.payment_type, Some(PaymentType::DebitCard));
        assert_eq!(
            v.authorization,
            Some(Authorization {
                kind: AuthorizationKind::Cai,
                code: "12345678901234".into()
            })
        );
    }

    #[test]
    fn bad_emission_date_is_a_format_error() {
        let (mut req, resp) = pair();
        req.voucher.emission_date = "14/06/2025".into();
        assert!(matches!(
            XmlVoucher::new(req, resp).voucher(),
            Err(AfipError::Format { .. })
        ));
    }

    #[test]
    fn missing_emission_date_resolves_to_none() {
        let (mut req, resp) = pair();
        req.voucher.emission_date.clear();
        assert_eq!(XmlVoucher::new(req, resp).voucher().unwrap().emission_date, None);
    }
}
