mod budget;
mod category;
mod goal;
mod payment_method;
mod transaction;
mod user;

pub use budget::*;
pub use category::*;
pub use goal::*;
pub use payment_method::*;
pub use transaction::*;
pub use user::*;
