use afip_turismo::wsct::*;

const RESPONSE_XML: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:autorizarComprobanteResponse xmlns:ns2="http://ar.gob.afip.wsct/CTService/">
      <ns2:autorizarComprobanteReturn>
        <comprobanteResponse>
          <cuit>20123456789</cuit>
          <codigoTipoComprobante>195</codigoTipoComprobante>
          <numeroPuntoVenta>2</numeroPuntoVenta>
          <numeroComprobante>15</numeroComprobante>
          <fechaEmision>2025-06-14</fechaEmision>
        </comprobanteResponse>
        <resultado>R</resultado>
        <arrayErrores>
          <codigoDescripcion><codigo>10</codigo><descripcion>CUIT representada no autorizada</descripcion></codigoDescripcion>
        </arrayErrores>
      </ns2:autorizarComprobanteReturn>
    </ns2:autorizarComprobanteResponse>
  </soap:Body>
</soap:Envelope>"#;

fn main() {
    // ── 1. Build a request and read it back ────────────────────────────
    println!("=== Request ===");
    let mut req = AuthorizeRequest::default();
    req.auth.represented_cuit = "20123456789".into();
    req.voucher.voucher_type = "195".into();
    req.voucher.point_of_sale = "2".into();
    req.voucher.number = "15".into();
    req.voucher.items.push(TourismItem {
        kind: "0".into(),
        tourism_code: "1".into(),
        code: "HAB".into(),
        description: "Habitación single".into(),
        vat_rate_code: "5".into(),
        ..Default::default()
    });

    match to_request_xml(&req) {
        Ok(xml) => {
            println!("{xml}");
            match parse_request(&xml) {
                Ok(back) => println!("items read back: {}", back.voucher.items.len()),
                Err(e) => println!("  Parse failed: {e}"),
            }
        }
        Err(e) => println!("  Serialization failed: {e}"),
    }

    // ── 2. Rejected response ───────────────────────────────────────────
    println!("\n=== Response ===");
    match parse_response(RESPONSE_XML) {
        Ok(resp) => {
            println!("resultado: {}", resp.result);
            println!("authorization: {:?}", resp.authorization);
            for e in &resp.errors {
                println!("  [{}] {}", e.code, e.description);
            }
        }
        Err(e) => println!("  Parse failed: {e}"),
    }

    // ── 3. SOAP fault ──────────────────────────────────────────────────
    println!("\n=== Fault ===");
    let fault = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body><soap:Fault><faultcode>soap:Server</faultcode><faultstring>Token expirado</faultstring></soap:Fault></soap:Body></soap:Envelope>"#;
    if let Err(e) = parse_response(fault) {
        println!("  {e}");
    }
}
