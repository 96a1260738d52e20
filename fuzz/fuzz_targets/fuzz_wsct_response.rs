#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(resp) = afip_turismo::wsct::parse_response(s) {
            let _ = resp.expiry();
            let _ = resp.voucher_number();
        }
    }
});
