//! Delver - Entry Point
//!
//! Runs a short scripted adventure against the player core: enter the
//! caverns, walk into a jackal until one of the two falls, then save
//! the game or write a memorial.

use anyhow::Result;

use delver::data::{GameConfig, CONFIG_FILE};
use delver::entities::monster::{Monster, MonsterKind};
use delver::game::Session;
use delver::save::{save_game, write_memorial};
use delver::world::Direction;
use delver::Player;

/// Actions taken before the demo gives up
const MAX_ACTIONS: usize = 200;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Delver v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load(CONFIG_FILE);
    let mut session = Session::new(&config);
    let mut player = Player::from_config(&mut session, &config);

    player.enter_map(&mut session, 1, false);

    let lair = player.pos.step(Direction::East).step(Direction::East);
    if let Some(map) = session.dungeon.level_mut(1) {
        map.add_monster(Monster::new(MonsterKind::Jackal, lair));
    }

    for _ in 0..MAX_ACTIONS {
        if session.is_over() || !jackal_alive(&session) {
            break;
        }
        let turns = player.move_dir(&mut session, Direction::East, true);
        player.make_move(&mut session, turns);
    }

    for entry in player.log.iter() {
        println!("[{:>5}] {}", entry.gtime, entry.message);
    }

    match session.game_over() {
        Some(report) => {
            println!("\n{}\n{}", report.title, report.description);
            let path = write_memorial(report, &player.name, config.memorial_dir.as_deref())?;
            println!("Memorial written to {}", path.display());
        }
        None => {
            println!(
                "\n{} stands at {} with {} of {} hp, score {}.",
                player.name,
                player.pos,
                player.hp,
                player.hp_max(),
                player.calc_score(&session, false)
            );
            save_game(&session, &player, 0)?;
        }
    }

    log::info!("Delver shut down cleanly");
    Ok(())
}

fn jackal_alive(session: &Session) -> bool {
    session
        .dungeon
        .level(1)
        .map(|map| map.monsters().iter().any(|m| m.kind == MonsterKind::Jackal))
        .unwrap_or(false)
}
