use serde::{Deserialize, Serialize};

/// AFIP voucher type codes that belong to the IVA Turismo regime (letter T).
///
/// 195–197 are the WSCT factura/nota de débito/nota de crédito T; 362 is the
/// matching paper voucher accepted by the export.
pub const IVA_TUR_DOCUMENT_TYPES: [&str; 4] = ["195", "196", "197", "362"];

/// True if `code` (with or without leading zeros) is an IVA Turismo voucher type.
pub fn is_iva_tur_document_type(code: &str) -> bool {
    let code = code.trim().trim_start_matches('0');
    IVA_TUR_DOCUMENT_TYPES.contains(&code)
}

/// Map a WSCT VAT bucket code to the rate code used in records 03 and 07.
///
/// Bucket `5` (21%) is reported as `11`; every other bucket as `10`.
pub fn vat_rate_code(bucket: &str) -> &'static str {
    if bucket.trim() == "5" { "11" } else { "10" }
}

/// Kind of authorization AFIP granted to a voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorizationKind {
    /// Código de Autorización Electrónico.
    Cae,
    /// Código de Autorización de Impresión.
    Cai,
}

impl AuthorizationKind {
    /// Literal written to the export file.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cae => "CAE",
            Self::Cai => "CAI",
        }
    }

    /// Parse from `"CAE"` / `"CAI"` (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CAE" => Some(Self::Cae),
            "CAI" => Some(Self::Cai),
            _ => None,
        }
    }
}

/// Payment method configured on the journal that settled the voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    /// 1: Tarjeta de crédito.
    CreditCard,
    /// 2: Tarjeta de débito.
    DebitCard,
    /// 3: Transferencia bancaria.
    BankTransfer,
}

impl PaymentType {
    /// AFIP numeric code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CreditCard => "1",
            Self::DebitCard => "2",
            Self::BankTransfer => "3",
        }
    }

    /// Parse from the numeric code, leading zeros allowed.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().trim_start_matches('0') {
            "1" => Some(Self::CreditCard),
            "2" => Some(Self::DebitCard),
            "3" => Some(Self::BankTransfer),
            _ => None,
        }
    }
}

/// WSCT item type (`tipo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// 0: Item general.
    General,
    /// 97: Anticipo.
    Advance,
    /// 99: Descuento general.
    GeneralDiscount,
}

impl ItemType {
    /// WSCT `tipo` value.
    pub fn code(&self) -> &'static str {
        match self {
            Self::General => "0",
            Self::Advance => "97",
            Self::GeneralDiscount => "99",
        }
    }

    /// Parse from the WSCT `tipo` value (`0`, `97` or `99`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "0" | "00" => Some(Self::General),
            "97" => Some(Self::Advance),
            "99" => Some(Self::GeneralDiscount),
            _ => None,
        }
    }
}

/// WSCT tourism service code (`codigoTurismo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TourismCode {
    /// 1: Hotelería, alojamiento sin desayuno.
    LodgingWithoutBreakfast,
    /// 2: Hotelería, alojamiento con desayuno.
    LodgingWithBreakfast,
    /// 5: Excedente.
    Surplus,
}

impl TourismCode {
    /// WSCT `codigoTurismo` value.
    pub fn code(&self) -> &'static str {
        match self {
            Self::LodgingWithoutBreakfast => "1",
            Self::LodgingWithBreakfast => "2",
            Self::Surplus => "5",
        }
    }

    /// Parse from the numeric code, leading zeros allowed.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().trim_start_matches('0') {
            "1" => Some(Self::LodgingWithoutBreakfast),
            "2" => Some(Self::LodgingWithBreakfast),
            "5" => Some(Self::Surplus),
            _ => None,
        }
    }
}

/// Relation between issuer and receiver (`codigoRelacionEmisorReceptor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RelationCode {
    /// 1: Alojamiento directo a turista no residente.
    #[default]
    DirectToTourist,
    /// 2: Alojamiento a agencia de viaje residente.
    ResidentAgency,
    /// 3: Alojamiento a agencia de viaje no residente.
    NonResidentAgency,
}

impl RelationCode {
    /// AFIP numeric code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DirectToTourist => "1",
            Self::ResidentAgency => "2",
            Self::NonResidentAgency => "3",
        }
    }

    /// Parse from the numeric code, leading zeros allowed.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().trim_start_matches('0') {
            "1" => Some(Self::DirectToTourist),
            "2" => Some(Self::ResidentAgency),
            "3" => Some(Self::NonResidentAgency),
            _ => None,
        }
    }
}
