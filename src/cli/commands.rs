//! CLI command handlers

use std::{
    path::Path,
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration
};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    actor::{TickOutcome, TurnDriver},
    adapter::{Clock, SimActor},
    config::{self, SimulationConfig},
    port::actor::Actor,
    workflow::{CompletionFlag, Idling, WorkflowRegistrar}
};

/// Resolve the effective configuration from an explicit path or the default location
pub fn resolve_config(path: Option<&Path>, no_logging: bool) -> Result<SimulationConfig> {
    let mut config = match path {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?
    };

    if no_logging {
        config.logging = false;
    }

    Ok(config)
}

/// Handle the config command - print the effective configuration
pub fn handle_config_command(path: Option<&Path>, no_logging: bool) -> Result<()> {
    let location = match path {
        Some(path) => path.to_path_buf(),
        None => config::get_config_file_path()?
    };
    let config = resolve_config(path, no_logging)?;

    println!("# {}", location.display());
    print!("{}", serde_yaml::to_string(&config).context("Failed to serialize config")?);

    Ok(())
}

/// Handle the idle-for command
pub async fn handle_idle_for_command(duration: u64, actors: usize, config: &SimulationConfig) -> Result<()> {
    let actors = simulate(actors, config, move |idling| idling.idle_for(duration), |_| {}).await?;
    print_logs(&actors);
    Ok(())
}

/// Handle the idle-until command
pub async fn handle_idle_until_command(ticks: u64, actors: usize, config: &SimulationConfig) -> Result<()> {
    let flag = Arc::new(CompletionFlag::new());
    if ticks == 0 {
        flag.complete();
    }

    let waiting = flag.clone();
    let actors = simulate(
        actors,
        config,
        move |idling| idling.idle_until(&waiting),
        move |tick| {
            if tick >= ticks {
                flag.complete();
            }
        }
    )
    .await?;

    print_logs(&actors);
    Ok(())
}

/// Run `job` on one idling workflow per actor, advancing the clock whenever
/// every unfinished actor is waiting for a later turn.
///
/// `before_tick` is called with the upcoming tick while every unfinished actor
/// is blocked waiting for its turn. Returns the actors once every job
/// has finished, or an error if the tick budget runs out first.
pub async fn simulate<J, T>(
    actor_count: usize,
    config: &SimulationConfig,
    job: J,
    before_tick: T
) -> Result<Vec<Arc<SimActor>>>
where
    J: Fn(&Idling) + Send + Sync + 'static,
    T: Fn(u64)
{
    let clock = Arc::new(Clock::new());
    let registrar = WorkflowRegistrar::with_logging(config.logging);
    let job = Arc::new(job);

    let mut actors = Vec::with_capacity(actor_count);
    let mut workers: Vec<JoinHandle<()>> = Vec::with_capacity(actor_count);

    for index in 0..actor_count {
        let actor = Arc::new(SimActor::new(format!("actor-{}", index + 1), clock.clone()));
        let idling = Arc::new(Idling::new());
        registrar.allocate(actor.clone(), &*idling)?;

        let job = job.clone();
        workers.push(thread::spawn(move || (*job)(&idling)));
        actors.push(actor);
    }

    let driver = TurnDriver::spawn_driver(clock.clone(), config.ticks).await?;
    let progress = tick_progress(config.ticks);
    let interval = Duration::from_millis(config.tick_interval_ms);

    loop {
        let pending: Vec<&Arc<SimActor>> = actors
            .iter()
            .zip(&workers)
            .filter(|(_, worker)| !worker.is_finished())
            .map(|(actor, _)| actor)
            .collect();

        if pending.is_empty() {
            break;
        }

        if !pending.iter().all(|actor| actor.next_turn() > clock.tick()) {
            tokio::time::sleep(Duration::from_millis(1)).await;
            continue;
        }

        before_tick(clock.tick() + 1);

        match TurnDriver::tick(&driver).await? {
            TickOutcome::Advanced(_) => progress.inc(1),
            TickOutcome::LimitReached(tick) => {
                progress.abandon();
                driver.stop(None);
                anyhow::bail!(
                    "tick budget of {} exhausted at tick {} with {} actor(s) still busy",
                    config.ticks,
                    tick,
                    pending.len()
                );
            }
        }

        if !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }

    progress.finish_and_clear();
    driver.stop(None);

    for worker in workers {
        worker.join().map_err(|_| anyhow::anyhow!("a workflow thread panicked"))?;
    }

    Ok(actors)
}

fn tick_progress(ticks: u64) -> ProgressBar {
    let progress = ProgressBar::new(ticks);
    if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} tick {pos}/{len} {wide_bar:.cyan/blue}") {
        progress.set_style(style);
    }
    progress
}

fn print_logs(actors: &[Arc<SimActor>]) {
    for actor in actors {
        let log = actor.task_log();
        println!("{}: {} task(s), finished at tick {}", actor.name(), log.len(), actor.next_turn());
        if !log.is_empty() {
            println!("{}", Table::new(log.rows()));
        }
    }
}
