pub mod edit;
pub mod list;
pub mod outputs;
pub mod property;
pub mod up_to_date;

pub use edit::{add_command, delete_command, rename_command};
pub use list::{list_command, platforms_command};
pub use outputs::outputs_command;
pub use property::{get_command, set_command};
pub use up_to_date::up_to_date_command;
