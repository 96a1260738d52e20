//! Shared building blocks: errors, AFIP code tables, reporting periods,
//! remittance numbering and fixed-width field encoders.

mod codes;
mod error;
pub mod fixed;
mod numbering;
mod period;

pub use codes::*;
pub use error::*;
pub use numbering::*;
pub use period::*;
