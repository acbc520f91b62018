pub mod address;
pub mod handler;
pub mod payment;
pub mod providers;
pub mod registry;
pub mod shipping;

pub use address::*;
pub use handler::*;
pub use payment::*;
pub use providers::*;
pub use registry::*;
pub use shipping::*;
