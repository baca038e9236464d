//! AppIntent-, AppCommand- und AppNotification-Enums für den
//! Intent/Command-Datenfluss.

mod command;
mod intent;
mod notification;

pub use command::AppCommand;
pub use intent::AppIntent;
pub use notification::AppNotification;
