pub mod add;
pub mod dual;

pub use add::{AddRequest, AddRouter};
pub use dual::{DualCommand, run_dual};
