//! TurnDriver Actor - advances the simulation clock
//!
//! The driver stands in for the external arbiter: every `Tick` message moves the
//! shared [`Clock`] forward by one tick, which grants a turn to every actor whose
//! accrued delay has elapsed. It stops advancing once its tick budget is spent.

use std::sync::Arc;

use ractor::{Actor, ActorProcessingErr, ActorRef, SpawnErr, rpc::CallResult};
use tracing::{Level, event};

use crate::{
    actor::message::{DriverStatus, TickOutcome, TurnDriverMessage},
    adapter::clock::Clock,
    domain::{constant::turn_driver, error::WorkflowError}
};

/// TurnDriver Actor State - the driven clock and the tick budget
pub struct TurnDriverState {
    clock:     Arc<Clock>,
    /// Ticks this driver may still advance, counted from spawn
    max_ticks: u64,
    /// Ticks advanced so far
    driven:    u64
}

/// TurnDriver Actor - one tick per message
pub struct TurnDriver;

#[async_trait::async_trait]
impl Actor for TurnDriver {
    type Arguments = (Arc<Clock>, u64);
    type Msg = TurnDriverMessage;
    type State = TurnDriverState;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        (clock, max_ticks): Self::Arguments
    ) -> Result<Self::State, ActorProcessingErr> {
        event!(Level::DEBUG, event = turn_driver::DRIVER_STARTED, tick = %clock.tick(), max_ticks = %max_ticks);

        Ok(TurnDriverState { clock, max_ticks, driven: 0 })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State
    ) -> Result<(), ActorProcessingErr> {
        match message {
            TurnDriverMessage::Tick { reply } => {
                let outcome = self.handle_tick(state);
                if let Err(e) = reply.send(outcome) {
                    event!(Level::ERROR, event = turn_driver::REPLY_FAILED, request = "tick", error = %e);
                }
                Ok(())
            }
            TurnDriverMessage::Status { reply } => {
                let status =
                    DriverStatus { tick: state.clock.tick(), driven: state.driven, max_ticks: state.max_ticks };
                if let Err(e) = reply.send(status) {
                    event!(Level::ERROR, event = turn_driver::REPLY_FAILED, request = "status", error = %e);
                }
                Ok(())
            }
        }
    }

    async fn post_stop(&self, _myself: ActorRef<Self::Msg>, state: &mut Self::State) -> Result<(), ActorProcessingErr> {
        event!(Level::DEBUG, event = turn_driver::DRIVER_STOPPED, tick = %state.clock.tick(), driven = %state.driven);
        Ok(())
    }
}

impl TurnDriver {
    /// Spawn a driver for `clock` that advances at most `max_ticks` ticks
    pub async fn spawn_driver(clock: Arc<Clock>, max_ticks: u64) -> Result<ActorRef<TurnDriverMessage>, SpawnErr> {
        let (driver_ref, _handle) = Actor::spawn(None, TurnDriver, (clock, max_ticks)).await?;
        Ok(driver_ref)
    }

    /// Ask `driver` to advance one tick
    pub async fn tick(driver: &ActorRef<TurnDriverMessage>) -> Result<TickOutcome, WorkflowError> {
        match ractor::rpc::call(driver, |reply| TurnDriverMessage::Tick { reply }, None).await {
            Ok(CallResult::Success(outcome)) => Ok(outcome),
            Ok(_) => Err(WorkflowError::Generic("turn driver did not answer the tick request".to_string())),
            Err(e) => Err(WorkflowError::Generic(format!("failed to reach turn driver: {e}")))
        }
    }

    /// Ask `driver` for its progress
    pub async fn status(driver: &ActorRef<TurnDriverMessage>) -> Result<DriverStatus, WorkflowError> {
        match ractor::rpc::call(driver, |reply| TurnDriverMessage::Status { reply }, None).await {
            Ok(CallResult::Success(status)) => Ok(status),
            Ok(_) => Err(WorkflowError::Generic("turn driver did not answer the status request".to_string())),
            Err(e) => Err(WorkflowError::Generic(format!("failed to reach turn driver: {e}")))
        }
    }

    fn handle_tick(&self, state: &mut TurnDriverState) -> TickOutcome {
        if state.driven >= state.max_ticks {
            event!(Level::DEBUG, event = turn_driver::TICK_LIMIT_REACHED,
                   tick = %state.clock.tick(), max_ticks = %state.max_ticks);
            return TickOutcome::LimitReached(state.clock.tick());
        }

        state.driven += 1;
        let tick = state.clock.advance();
        event!(Level::TRACE, event = turn_driver::TICK_ADVANCED, tick = %tick);
        TickOutcome::Advanced(tick)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{
        adapter::SimActor,
        workflow::{Idling, WorkflowRegistrar}
    };

    #[tokio::test]
    async fn test_driver_advances_until_limit() {
        let clock = Arc::new(Clock::new());
        let driver = TurnDriver::spawn_driver(clock.clone(), 2).await.unwrap();

        assert_eq!(TurnDriver::tick(&driver).await.unwrap(), TickOutcome::Advanced(1));
        assert_eq!(TurnDriver::tick(&driver).await.unwrap(), TickOutcome::Advanced(2));
        assert_eq!(TurnDriver::tick(&driver).await.unwrap(), TickOutcome::LimitReached(2));

        let status = TurnDriver::status(&driver).await.unwrap();
        assert_eq!(status, DriverStatus { tick: 2, driven: 2, max_ticks: 2 });
        assert_eq!(clock.tick(), 2);

        driver.stop(None);
    }

    #[tokio::test]
    async fn test_driver_grants_turns_to_waiting_actor() {
        let clock = Arc::new(Clock::new());
        let actor = Arc::new(SimActor::new("eve", clock.clone()));
        let idling = Arc::new(Idling::new());
        WorkflowRegistrar::new().allocate(actor.clone(), &*idling).unwrap();
        let driver = TurnDriver::spawn_driver(clock.clone(), 10).await.unwrap();

        let worker = {
            let idling = idling.clone();
            thread::spawn(move || idling.idle_for(2))
        };

        while !worker.is_finished() {
            if actor.next_turn() > clock.tick() {
                TurnDriver::tick(&driver).await.unwrap();
            }
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
        worker.join().unwrap();

        assert_eq!(clock.tick(), 2);
        assert_eq!(actor.task_log().len(), 3);
        driver.stop(None);
    }
}
