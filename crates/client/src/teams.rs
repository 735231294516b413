//! Team assembly from stored and generated combatants.

use battle_content::CombatantFactory;
use battle_core::{AbilityCatalog, CatalogError, Combatant};

/// Both sides of a battle plus stored combatants that sit this one out.
#[derive(Debug)]
pub struct Teams {
    pub side_a: Vec<Combatant>,
    pub side_b: Vec<Combatant>,
    pub bench: Vec<Combatant>,
}

/// Fills two sides of `team_size` from `stored` (in order), generating
/// recruits with fresh ids for any empty slots.
pub fn assemble_teams(
    stored: Vec<Combatant>,
    team_size: u16,
    catalog: &AbilityCatalog,
    seed: u64,
) -> Result<Teams, CatalogError> {
    let team_size = usize::from(team_size);
    let needed = team_size * 2;

    let mut pool = stored;
    let bench = if pool.len() > needed {
        pool.split_off(needed)
    } else {
        Vec::new()
    };

    let next_id = pool
        .iter()
        .chain(&bench)
        .map(|c| c.id().0)
        .max()
        .map_or(1, |id| id + 1);
    let missing = needed - pool.len();
    if missing > 0 {
        tracing::info!(missing, "generating recruits");
        let mut factory = CombatantFactory::new(catalog, seed).starting_at(next_id);
        pool.extend(factory.create_team(missing)?);
    }

    let side_b = pool.split_off(team_size);
    Ok(Teams {
        side_a: pool,
        side_b,
        bench,
    })
}
