pub mod cart;
pub mod context;
pub mod customer;
pub mod navigation;
pub mod order;
pub mod payment;
pub mod result;
pub mod route;
pub mod session;

pub use cart::*;
pub use context::*;
pub use customer::*;
pub use navigation::*;
pub use order::*;
pub use payment::*;
pub use result::*;
pub use route::*;
pub use session::*;
