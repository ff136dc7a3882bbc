pub mod common;
pub mod i18n;
pub mod pagination;
pub mod prize;
pub mod ranking;
pub mod reward;
pub mod sale;
pub mod user;

pub use common::*;
pub use i18n::*;
pub use pagination::*;
pub use prize::*;
pub use ranking::*;
pub use reward::*;
pub use sale::*;
pub use user::*;
