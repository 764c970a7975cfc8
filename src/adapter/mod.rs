//! In-process implementations of the actor capability

pub mod clock;
pub mod sim_actor;
pub mod task_log;

pub use clock::Clock;
pub use sim_actor::{BusyToken, SimActor};
pub use task_log::{TaskLog, TaskRecord, TaskRow};
