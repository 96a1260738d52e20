#![no_main]

use afip_turismo::wsct::{parse_request, to_request_xml};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(req) = parse_request(s) else {
        return;
    };
    let xml = to_request_xml(&req).expect("serializing a parsed request must succeed");
    let back = parse_request(&xml).expect("generated request must parse");
    assert_eq!(back.voucher.items.len(), req.voucher.items.len());
    assert_eq!(back.voucher.total_amount, req.voucher.total_amount);
});
