#![cfg(feature = "ivatur")]

use afip_turismo::ivatur::*;
use afip_turismo::wsct::{TourismItem, VatSubtotal};
use afip_turismo::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const REQUEST_XML: &str = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ser="http://ar.gob.afip.wsct/CTService/">
  <soapenv:Body>
    <ser:autorizarComprobanteRequest>
      <authRequest><token>T</token><sign>S</sign><cuitRepresentada>20123456789</cuitRepresentada></authRequest>
      <comprobanteRequest>
        <codigoTipoComprobante>195</codigoTipoComprobante>
        <numeroPuntoVenta>2</numeroPuntoVenta>
        <numeroComprobante>15</numeroComprobante>
        <fechaEmision>2025-06-14</fechaEmision>
        <codigoTipoDocumento>94</codigoTipoDocumento>
        <numeroDocumento>AB123456</numeroDocumento>
        <idImpositivo>9</idImpositivo>
        <codigoPais>212</codigoPais>
        <codigoRelacionEmisorReceptor>1</codigoRelacionEmisorReceptor>
        <importeGravado>1000.00</importeGravado>
        <importeReintegro>210.00</importeReintegro>
        <importeTotal>1210.00</importeTotal>
        <codigoMoneda>DOL</codigoMoneda>
        <cotizacionMoneda>1100.25</cotizacionMoneda>
        <arrayItems>
          <item>
            <tipo>0</tipo><codigoTurismo>2</codigoTurismo><codigo>HAB</codigo>
            <descripcion>Habitación doble, 2 noches</descripcion>
            <codigoAlicuotaIVA>5</codigoAlicuotaIVA>
            <importeIVA>210.00</importeIVA><importeItem>1210.00</importeItem>
          </item>
        </arrayItems>
        <arraySubtotalesIVA>
          <subtotalIVA><codigo>5</codigo><importe>210.00</importe></subtotalIVA>
        </arraySubtotalesIVA>
        <arrayComprobantesAsociados>
          <comprobanteAsociado>
            <codigoTipoComprobante>195</codigoTipoComprobante>
            <numeroPuntoVenta>2</numeroPuntoVenta>
            <numeroComprobante>9</numeroComprobante>
          </comprobanteAsociado>
        </arrayComprobantesAsociados>
      </comprobanteRequest>
    </ser:autorizarComprobanteRequest>
  </soapenv:Body>
</soapenv:Envelope>"#;

const RESPONSE_XML: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:autorizarComprobanteResponse xmlns:ns2="http://ar.gob.afip.wsct/CTService/">
      <ns2:autorizarComprobanteReturn>
        <comprobanteResponse>
          <CAE>75123456789012</CAE>
          <fechaVencimientoCAE>2025-06-24</fechaVencimientoCAE>
        </comprobanteResponse>
        <resultado>A</resultado>
      </ns2:autorizarComprobanteReturn>
    </ns2:autorizarComprobanteResponse>
  </soap:Body>
</soap:Envelope>"#;

fn june() -> ReportPeriod {
    ReportPeriod::new(2025, 6).unwrap()
}

fn config() -> ReportConfig {
    ReportConfigBuilder::new("20-12345678-9", june()).build()
}

fn xml_voucher() -> XmlVoucher {
    XmlVoucher::parse(REQUEST_XML, RESPONSE_XML)
        .unwrap()
        .label("FT 0002-00000015")
        .tourist_name("Jane Doe")
        .payment_type(PaymentType::CreditCard)
}

fn erp_invoice() -> ErpInvoice {
    ErpInvoice {
        name: "FT 0003-00000042".into(),
        document_type: "195".into(),
        document_number: "0003-00000042".into(),
        invoice_date: NaiveDate::from_ymd_opt(2025, 6, 20),
        partner: ErpPartner {
            name: "John Smith".into(),
            vat: "X-987654".into(),
            identification_type: "94".into(),
            country_code: "203".into(),
        },
        tax_id: "9".into(),
        taxed_amount: dec!(500),
        total_amount: dec!(605),
        authorization: Some((AuthorizationKind::Cae, "75000000000001".into())),
        payment_type: Some(PaymentType::BankTransfer),
        lines: vec![ErpInvoiceLine {
            description: "Noche".into(),
            item_code: "HAB-SGL".into(),
            item_type: ItemType::General,
            tourism_code: TourismCode::LodgingWithoutBreakfast,
            vat_bucket: "5".into(),
            vat_amount: dec!(105),
            total: dec!(605),
        }],
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Full file
// ---------------------------------------------------------------------------

#[test]
fn xml_sourced_file() {
    let file = encode_report(&config(), &[xml_voucher()]).unwrap();
    assert_eq!(file.filename, "F8089.20123456789.20250600.0001.TXT");

    let lines: Vec<&str> = file.lines().collect();
    let kinds: Vec<&str> = lines.iter().map(|l| &l[..2]).collect();
    assert_eq!(kinds, ["01", "02", "03", "04", "05", "06", "07", "08"]);

    for line in &lines {
        let kind = RecordType::of_line(line).unwrap();
        assert_eq!(line.len(), kind.width(), "{line}");
    }
    assert!(file.content.is_ascii());
    assert_eq!(&lines[6][60..86], "Habitacion doble, 2 noches");

    assert!(lines[0].ends_with('0'));
    assert_eq!(&lines[1][134..152], "000000001100250000");
    assert_eq!(&lines[1][152..169], "CAE75123456789012");
    assert_eq!(lines[2], format!("0311{}000000000021000", "0".repeat(15)));
    assert!(lines[3].contains("Jane Doe"));
    assert_eq!(lines[5], "061950000200000009");
    assert!(lines[7].starts_with("0801"));
    assert_eq!(file.content.matches("\r\n").count(), 8);
}

#[test]
fn mixed_sources_in_one_file() {
    let sources: Vec<Box<dyn VoucherSource>> =
        vec![Box::new(xml_voucher()), Box::new(erp_invoice())];
    let file = encode_report(&config(), &sources).unwrap();
    let kinds: Vec<&str> = file.lines().map(|l| &l[..2]).collect();
    assert_eq!(
        kinds,
        ["01", "02", "03", "04", "05", "06", "07", "08", "02", "03", "04", "05", "07", "08"]
    );
    let erp_sale = file.lines().nth(8).unwrap();
    assert_eq!(&erp_sale[..18], "021950000300000042");
    assert_eq!(&erp_sale[131..134], "PES");
    assert_eq!(&erp_sale[134..152], "000000000001000000");
}

#[test]
fn no_movement_flag() {
    assert!(header_record(&config(), 0).unwrap().ends_with('1'));
    assert!(header_record(&config(), 1).unwrap().ends_with('0'));
}

#[test]
fn one_bad_voucher_aborts_the_file() {
    let mut bad = erp_invoice();
    bad.invoice_date = None;
    let sources: Vec<Box<dyn VoucherSource>> = vec![Box::new(xml_voucher()), Box::new(bad)];
    assert!(encode_report(&config(), &sources).unwrap_err().is_encoding());
}

#[test]
fn invalid_company_cuit() {
    let config = ReportConfigBuilder::new("", june()).build();
    assert!(encode_report(&config, &[xml_voucher()]).unwrap_err().is_encoding());
}

#[test]
fn negative_amount_is_rejected() {
    let mut inv = erp_invoice();
    inv.refund_amount = dec!(-1);
    assert!(matches!(
        encode_report(&config(), &[inv]),
        Err(AfipError::Encoding(_))
    ));
}

#[test]
fn amount_overflow_is_rejected() {
    let mut inv = erp_invoice();
    inv.total_amount = Decimal::new(10_000_000_000_000, 0);
    assert!(matches!(
        encode_report(&config(), &[inv]),
        Err(AfipError::Overflow { width: 15, .. })
    ));
}

#[test]
fn long_description_is_truncated() {
    let item = TourismItem {
        kind: "0".into(),
        tourism_code: "1".into(),
        description: "ñ".repeat(250),
        ..Default::default()
    };
    let line = item_record(&item).unwrap();
    assert_eq!(line.len(), RecordType::Item.width());
    assert_eq!(line.matches('n').count(), 200);
}

#[test]
fn vat_mapping_in_subtotals() {
    for (bucket, code) in [("5", "11"), ("4", "10"), ("6", "10"), ("3", "10")] {
        let line = vat_subtotal_record(&VatSubtotal {
            code: bucket.into(),
            amount: dec!(1),
        })
        .unwrap();
        assert_eq!(&line[2..4], code);
    }
}

// ---------------------------------------------------------------------------
// Remittance numbering
// ---------------------------------------------------------------------------

#[test]
fn remittances_are_consecutive() {
    let mut seq = RemittanceSequence::new(june());
    let first = encode_next_remittance(&mut seq, &config(), &[erp_invoice()]).unwrap();
    let second = encode_next_remittance(&mut seq, &config(), &[erp_invoice()]).unwrap();
    assert!(first.filename.ends_with(".0001.TXT"));
    assert!(second.filename.ends_with(".0002.TXT"));
    assert_eq!(&second.lines().next().unwrap()[19..23], "0002");
}

#[test]
fn new_period_restarts_remittance() {
    let mut seq = RemittanceSequence::starting_at(june(), 7).unwrap();
    let july = ReportConfigBuilder::new("20123456789", ReportPeriod::new(2025, 7).unwrap()).build();
    let file = encode_next_remittance(&mut seq, &july, &[erp_invoice()]).unwrap();
    assert_eq!(file.filename, "F8089.20123456789.20250700.0001.TXT");
    assert_eq!(seq.period(), ReportPeriod::new(2025, 7).unwrap());
    assert_eq!(seq.peek().unwrap(), 2);
}

#[test]
fn earlier_period_is_rejected() {
    let mut seq = RemittanceSequence::new(ReportPeriod::new(2025, 7).unwrap());
    assert!(matches!(
        encode_next_remittance(&mut seq, &config(), &[erp_invoice()]),
        Err(AfipError::Numbering(_))
    ));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_json_roundtrip() {
    let config = ReportConfigBuilder::new("20-12345678-9", june())
        .remittance(3)
        .build();
    let json = serde_json::to_string(&config).unwrap();
    let back: ReportConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
    assert_eq!(export_filename(&back).unwrap(), "F8089.20123456789.20250600.0003.TXT");
}

#[test]
fn config_json_with_invalid_period_is_rejected() {
    let json = r#"{"company_cuit":"20123456789","period":{"year":2025,"month":13},"remittance":1}"#;
    let err = serde_json::from_str::<ReportConfig>(json).unwrap_err();
    assert!(err.to_string().contains("invalid period month 13"), "{err}");
}

#[test]
fn export_bytes() {
    let file = encode_report(&config(), &[erp_invoice()]).unwrap();
    let len = file.as_bytes().len();
    assert_eq!(file.clone().into_bytes().len(), len);
    assert!(file.as_bytes().starts_with(b"01"));
}
