use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use afip_turismo::ivatur::*;
use afip_turismo::wsct::{self, AuthorizeRequest, TourismItem, VatSubtotal};
use afip_turismo::*;

fn config() -> ReportConfig {
    ReportConfigBuilder::new("20-12345678-9", ReportPeriod::new(2025, 6).unwrap()).build()
}

fn voucher(n: usize, items: usize) -> TourismVoucher {
    TourismVoucher {
        label: format!("FT 0002-{n:08}"),
        document_type: "195".into(),
        point_of_sale: "2".into(),
        number: n.to_string(),
        emission_date: NaiveDate::from_ymd_opt(2025, 6, 14),
        tourist: Tourist {
            document_type: "94".into(),
            document_number: format!("P{n:07}"),
            name: "Jane Doe".into(),
            country_code: "212".into(),
        },
        tax_id: "9".into(),
        relation_code: "1".into(),
        amounts: VoucherAmounts {
            taxed: dec!(1000),
            refund: dec!(210),
            total: dec!(1210),
            ..Default::default()
        },
        currency_code: "DOL".into(),
        exchange_rate: dec!(1100.25),
        vat_subtotals: vec![VatSubtotal {
            code: "5".into(),
            amount: dec!(210),
        }],
        items: (0..items)
            .map(|i| TourismItem {
                kind: "0".into(),
                tourism_code: "2".into(),
                code: format!("HAB-{i}"),
                description: format!("Habitación doble, noche {i}"),
                vat_rate_code: "5".into(),
                vat_amount: dec!(21),
                amount: dec!(121),
            })
            .collect(),
        payment_type: Some(PaymentType::CreditCard),
        ..Default::default()
    }
}

fn request() -> AuthorizeRequest {
    let v = voucher(1, 10);
    let mut req = AuthorizeRequest::default();
    req.voucher.voucher_type = v.document_type;
    req.voucher.number = v.number;
    req.voucher.emission_date = "2025-06-14".into();
    req.voucher.total_amount = v.amounts.total;
    req.voucher.items = v.items;
    req.voucher.vat_subtotals = v.vat_subtotals;
    req
}

fn bench_encode_single(c: &mut Criterion) {
    let config = config();
    let vouchers = [voucher(1, 3)];
    c.bench_function("encode_single_voucher", |b| {
        b.iter(|| black_box(encode_report(black_box(&config), black_box(&vouchers))));
    });
}

fn bench_encode_month(c: &mut Criterion) {
    let config = config();
    let vouchers: Vec<TourismVoucher> = (1..=500).map(|n| voucher(n, 3)).collect();
    c.bench_function("encode_500_vouchers", |b| {
        b.iter(|| black_box(encode_report(black_box(&config), black_box(&vouchers))));
    });
}

fn bench_request_parse(c: &mut Criterion) {
    let xml = wsct::to_request_xml(&request()).unwrap();
    c.bench_function("wsct_request_parse", |b| {
        b.iter(|| black_box(wsct::parse_request(black_box(&xml))));
    });
}

fn bench_request_serialize(c: &mut Criterion) {
    let req = request();
    c.bench_function("wsct_request_serialize", |b| {
        b.iter(|| black_box(wsct::to_request_xml(black_box(&req))));
    });
}

criterion_group!(
    benches,
    bench_encode_single,
    bench_encode_month,
    bench_request_parse,
    bench_request_serialize,
);
criterion_main!(benches);
