//! Battle client: command line parsing, team assembly and narration.
//!
//! ```text
//! Args ──→ RuntimeConfig ──┐
//!                           ├─→ BattleRuntime ──→ Topic::Turn ──→ narrator (stdout)
//! RosterStore / factory ───┘                 └──→ summary (stdout), roster saved
//! ```

mod args;
mod narration;
mod teams;

pub use args::Args;
pub use narration::{Names, describe};
pub use teams::{Teams, assemble_teams};

use battle_content::{AbilityCatalogLoader, RosterStore};
use battle_core::Side;
use battle_runtime::{BattleRuntime, BattleSetup, RuntimeConfig, Topic};
use tokio::sync::broadcast::error::RecvError;

/// Runs one battle as described by `args`.
pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.runtime_config(RuntimeConfig::from_env())?;

    let catalog = match &args.abilities {
        Some(path) => AbilityCatalogLoader::load(path)?,
        None => AbilityCatalogLoader::load_embedded()?,
    };

    let store = args.roster.as_ref().map(RosterStore::new);
    if let Some(store) = store.as_ref().filter(|_| args.clear_roster) {
        store.clear()?;
    }
    let stored = match &store {
        Some(store) => store.load(&catalog)?,
        None => Vec::new(),
    };

    let Teams {
        side_a,
        side_b,
        bench,
    } = assemble_teams(stored, args.team_size, &catalog, config.battle.seed)?;
    let names = Names::from_teams(&side_a, &side_b);

    tracing::info!(
        seed = config.battle.seed,
        delay_ms = config.turn_delay.as_millis() as u64,
        "starting battle"
    );
    let mut runtime = BattleRuntime::new(config, BattleSetup::new(side_a, side_b))?;

    let mut turns = runtime.subscribe(Topic::Turn);
    let narrator = tokio::spawn(async move {
        loop {
            match turns.recv().await {
                Ok(event) => {
                    if let Some(line) = describe(&event.battle, &names) {
                        println!("[turn {:>4}] {line}", event.turn);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "narrator fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let outcome = runtime.run().await;
    let combatants = runtime.into_combatants();
    narrator.await?;

    if let Some(store) = &store {
        store.save(combatants.iter().chain(&bench))?;
        tracing::info!(path = %store.path().display(), "roster saved");
    }

    let result = outcome?;
    let label = match result.winner {
        Side::A => "Side A",
        Side::B => "Side B",
    };
    println!("{label} wins after {} turn(s)", result.turns);
    for id in &result.survivors {
        if let Some(survivor) = combatants.iter().find(|c| c.id() == *id) {
            println!(
                "  {} ({}): {}/{} HP",
                survivor.name(),
                id,
                survivor.health(),
                survivor.maximums().health
            );
        }
    }

    Ok(())
}
