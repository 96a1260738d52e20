use afip_turismo::ivatur::*;
use afip_turismo::*;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

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

fn main() -> Result<(), AfipError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let period = ReportPeriod::from_range(
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    )?;
    println!("=== {} ===", period.report_name());

    // Voucher authorized through WSCT
    let wsct_voucher = XmlVoucher::parse(REQUEST_XML, RESPONSE_XML)?
        .label("FT 0002-00000015")
        .tourist_name("Jane Doe")
        .payment_type(PaymentType::CreditCard);

    // Older invoice known only by its ERP fields
    let legacy = ErpInvoice {
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
    };

    let sources: Vec<Box<dyn VoucherSource>> = vec![Box::new(wsct_voucher), Box::new(legacy)];
    let config = ReportConfigBuilder::new("20-12345678-9", period).build();
    let mut remittances = RemittanceSequence::new(period);

    let file = encode_next_remittance(&mut remittances, &config, &sources)?;
    println!("{}", file.filename);
    for line in file.lines() {
        println!("{line}");
    }
    println!("next remittance: {}", remittances.peek()?);
    Ok(())
}
