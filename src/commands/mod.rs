pub mod alarms;
pub mod complete;
pub mod events;
pub mod new;
pub mod skip;
