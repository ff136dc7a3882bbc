pub mod jwt;
pub mod password;
pub mod period;
pub mod validation;

pub use jwt::*;
pub use password::*;
pub use period::Period;
pub use validation::*;
