pub mod auth_service;
pub mod prize_service;
pub mod ranking_service;
pub mod reward_service;
pub mod sales_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::*;
pub use prize_service::*;
pub use ranking_service::*;
pub use reward_service::*;
pub use sales_service::*;
pub use user_service::*;
