//! Experience and leveling
//!
//! The experience table, level titles, and the player's level changes.
//! Experience is the single driver of the level: gaining or losing it moves
//! the level, and explicit level changes snap experience into range.

use crate::entities::player::Player;
use crate::game::death::DeathCause;
use crate::game::state::Session;

/// Highest attainable experience level
pub const MAX_LEVEL: u32 = 100;

/// Experience needed for each level; entry `n` is the threshold of level `n + 1`
pub const EXP_TABLE: [u32; 101] = [
    0, 10, 20, 40, 80, 160, 320, 640, 1280, 2560, 5120, // 1-11
    10240, 20480, 40960, 100000, 200000, 400000, 700000, 1000000, // 12-19
    2000000, 3000000, 4000000, 5000000, 6000000, 8000000, 10000000, // 20-26
    12000000, 14000000, 16000000, 18000000, 20000000, 22000000, 24000000, 26000000, 28000000,
    30000000, 32000000, 34000000, 36000000, 38000000, 40000000, 42000000, 44000000, 46000000,
    48000000, 50000000, 52000000, 54000000, 56000000, 58000000, 60000000, 62000000, 64000000,
    66000000, 68000000, 70000000, 72000000, 74000000, 76000000, 78000000, 80000000, 82000000,
    84000000, 86000000, 88000000, 90000000, 92000000, 94000000, 96000000, 98000000, 100000000,
    105000000, 110000000, 115000000, 120000000, 125000000, 130000000, 135000000, 140000000,
    145000000, 150000000, 155000000, 160000000, 165000000, 170000000, 175000000, 180000000,
    185000000, 190000000, 195000000, 200000000, 210000000, 220000000, 230000000, 240000000,
    250000000, 260000000, 270000000, 280000000, 290000000, 300000000,
];

const EVIL_MASTER: &str = "mighty evil master";
const APPRENTICE_DEMI_GOD: &str = "apprentice demi-god";
const MINOR_DEMI_GOD: &str = "minor demi-god";
const MAJOR_DEMI_GOD: &str = "major demi-god";
const MINOR_DEITY: &str = "minor deity";
const MAJOR_DEITY: &str = "major deity";
const NOVICE_GUARDIAN: &str = "novice guardian";
const APPRENTICE_GUARDIAN: &str = "apprentice guardian";

const LEVEL_TITLES: [&str; MAX_LEVEL as usize] = [
    "novice explorer", "apprentice explorer", "practiced explorer",
    "expert explorer", "novice adventurer", "adventurer",
    "apprentice conjurer", "conjurer", "master conjurer",
    "apprentice mage", "mage", "experienced mage",
    "master mage", "apprentice warlord", "novice warlord",
    "expert warlord", "master warlord", "apprentice gorgon",
    "gorgon", "practiced gorgon", "master gorgon",
    "demi-gorgon", "evil master", "great evil master",
    EVIL_MASTER, EVIL_MASTER, EVIL_MASTER,
    EVIL_MASTER, EVIL_MASTER, EVIL_MASTER,
    EVIL_MASTER, EVIL_MASTER, EVIL_MASTER,
    EVIL_MASTER, EVIL_MASTER, EVIL_MASTER,
    EVIL_MASTER, EVIL_MASTER, EVIL_MASTER,
    APPRENTICE_DEMI_GOD, APPRENTICE_DEMI_GOD, APPRENTICE_DEMI_GOD,
    APPRENTICE_DEMI_GOD, APPRENTICE_DEMI_GOD, APPRENTICE_DEMI_GOD,
    APPRENTICE_DEMI_GOD, APPRENTICE_DEMI_GOD, APPRENTICE_DEMI_GOD,
    MINOR_DEMI_GOD, MINOR_DEMI_GOD, MINOR_DEMI_GOD,
    MINOR_DEMI_GOD, MINOR_DEMI_GOD, MINOR_DEMI_GOD,
    MINOR_DEMI_GOD, MINOR_DEMI_GOD, MINOR_DEMI_GOD,
    MAJOR_DEMI_GOD, MAJOR_DEMI_GOD, MAJOR_DEMI_GOD,
    MAJOR_DEMI_GOD, MAJOR_DEMI_GOD, MAJOR_DEMI_GOD,
    MAJOR_DEMI_GOD, MAJOR_DEMI_GOD, MAJOR_DEMI_GOD,
    MINOR_DEITY, MINOR_DEITY, MINOR_DEITY,
    MINOR_DEITY, MINOR_DEITY, MINOR_DEITY,
    MINOR_DEITY, MINOR_DEITY, MINOR_DEITY,
    MAJOR_DEITY, MAJOR_DEITY, MAJOR_DEITY,
    MAJOR_DEITY, MAJOR_DEITY, MAJOR_DEITY,
    MAJOR_DEITY, MAJOR_DEITY, MAJOR_DEITY,
    NOVICE_GUARDIAN, NOVICE_GUARDIAN, NOVICE_GUARDIAN,
    APPRENTICE_GUARDIAN, APPRENTICE_GUARDIAN, APPRENTICE_GUARDIAN,
    APPRENTICE_GUARDIAN, APPRENTICE_GUARDIAN, APPRENTICE_GUARDIAN,
    "earth guardian", "air guardian", "fire guardian",
    "water guardian", "time guardian", "ethereal guardian",
    "The Creator",
];

/// Experience needed to reach a level
pub fn exp_for_level(level: u32) -> u32 {
    let level = level.clamp(1, MAX_LEVEL + 1);
    EXP_TABLE[(level - 1) as usize]
}

/// The level matching an amount of experience
pub fn level_for_exp(experience: u32) -> u32 {
    (1..=MAX_LEVEL)
        .rev()
        .find(|l| exp_for_level(*l) <= experience)
        .unwrap_or(1)
}

/// Experience still missing for the next level (0 at the top)
pub fn exp_to_next_level(level: u32, experience: u32) -> u32 {
    if level >= MAX_LEVEL {
        return 0;
    }
    exp_for_level(level + 1).saturating_sub(experience)
}

/// Title of an experience level
pub fn level_title(level: u32) -> &'static str {
    let idx = level.clamp(1, MAX_LEVEL) - 1;
    LEVEL_TITLES[idx as usize]
}

/// Indefinite article for a word
pub fn a_an(word: &str) -> &'static str {
    match word.chars().next() {
        Some(c) if "aeiouAEIOU".contains(c) => "an",
        _ => "a",
    }
}

impl Player {
    pub fn level_title(&self) -> &'static str {
        level_title(self.level)
    }

    /// Add experience, rising as many levels as it pays for
    pub fn gain_exp(&mut self, session: &mut Session, amount: u32) {
        if amount == 0 {
            return;
        }
        self.experience = self.experience.saturating_add(amount);
        self.stats.max_xp = self.stats.max_xp.max(self.experience);

        let mut levels = 0;
        while self.level + levels < MAX_LEVEL
            && exp_for_level(self.level + levels + 1) <= self.experience
        {
            levels += 1;
        }
        if levels > 0 {
            self.level_up(session, levels);
        }
    }

    /// Remove experience, dropping the levels it no longer pays for
    pub fn lose_exp(&mut self, session: &mut Session, amount: u32) {
        if amount == 0 {
            return;
        }
        self.experience = self.experience.saturating_sub(amount);

        let mut levels = 0;
        while self.level - levels > 1 && exp_for_level(self.level - levels) > self.experience {
            levels += 1;
        }
        if levels > 0 {
            self.level_down(session, levels);
        }
    }

    /// Rise `count` levels, growing hp and mana maxima
    pub fn level_up(&mut self, session: &mut Session, count: u32) {
        if count == 0 || self.level >= MAX_LEVEL {
            return;
        }

        let title_before = self.level_title();
        let target = (self.level + count).min(MAX_LEVEL);
        let gained = target - self.level;
        self.level = target;

        let title = self.level_title();
        if title != title_before {
            self.log.add(format!(
                "You gain experience and become {} {}!",
                a_an(title),
                title
            ));
        } else {
            self.log.add("You gain experience!");
        }
        log::info!("{} reached level {}", self.name, self.level);

        self.stats.max_level = self.stats.max_level.max(self.level);

        // Levels gained by magic bring the experience up to match
        if self.experience < exp_for_level(self.level) {
            let missing = exp_for_level(self.level) - self.experience;
            self.gain_exp(session, missing);
        }

        for _ in 0..gained {
            let hp = self.level_vitals_delta(session, self.attributes.constitution);
            self.hp_max_gain(hp);
            let mp = self.level_vitals_delta(session, self.attributes.intelligence);
            self.mp_max_gain(mp);
        }
    }

    /// Drop `count` levels; falling below level 1 is fatal
    pub fn level_down(&mut self, session: &mut Session, count: u32) {
        if count == 0 {
            return;
        }

        let lost = count.min(self.level);
        self.level -= lost;
        self.log
            .add(format!("You return to experience level {}...", self.level));
        log::info!("{} dropped to level {}", self.name, self.level);

        if self.level == 0 && self.die(session, DeathCause::LastLevel) {
            return;
        }
        self.level = self.level.max(1);

        // Experience beyond the new level is lost
        if self.level < MAX_LEVEL && self.experience >= exp_for_level(self.level + 1) {
            self.experience = exp_for_level(self.level);
        }

        for _ in 0..lost {
            let hp = self.level_vitals_delta(session, self.attributes.constitution);
            self.hp_max_lose(hp);
            let mp = self.level_vitals_delta(session, self.attributes.intelligence);
            self.mp_max_lose(mp);
        }
    }

    /// Random hp or mana maximum change for one level, scaled by a stat
    fn level_vitals_delta(&self, session: &mut Session, stat: i32) -> i32 {
        let difficulty = session.difficulty_scalar();
        let mut base = (stat - difficulty) >> 1;
        if (self.level as i32) < (7 - difficulty).max(0) {
            base += stat >> 2;
        }
        session.rng.rand_1n(3) + session.rng.rand_0n(base.max(1))
    }

    /// Heal, never beyond the effective maximum
    pub fn hp_gain(&mut self, amount: i32) -> i32 {
        self.hp = (self.hp + amount).min(self.hp_max());
        self.hp
    }

    pub fn mp_gain(&mut self, amount: i32) -> i32 {
        self.mp = (self.mp + amount).min(self.mp_max());
        self.mp
    }

    pub fn mp_lose(&mut self, amount: i32) -> i32 {
        self.mp = (self.mp - amount).max(0);
        self.mp
    }

    /// Raise the base hp maximum without healing
    pub fn hp_max_gain(&mut self, amount: i32) -> i32 {
        self.hp_max += amount;
        self.hp_max
    }

    /// Lower the base hp maximum, keeping it at 1 or more
    pub fn hp_max_lose(&mut self, amount: i32) -> i32 {
        self.hp_max = (self.hp_max - amount).max(1);
        self.hp = self.hp.min(self.hp_max());
        self.hp_max
    }

    pub fn mp_max_gain(&mut self, amount: i32) -> i32 {
        self.mp_max += amount;
        self.mp_max
    }

    pub fn mp_max_lose(&mut self, amount: i32) -> i32 {
        self.mp_max = (self.mp_max - amount).max(1);
        self.mp = self.mp.min(self.mp_max());
        self.mp_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player() -> (Session, Player) {
        let mut session = Session::seeded(17);
        let player = Player::new(&mut session, "Tester", Default::default());
        (session, player)
    }

    #[test]
    fn test_table() {
        assert_eq!(exp_for_level(1), 0);
        assert_eq!(exp_for_level(2), 10);
        assert_eq!(exp_for_level(3), 20);
        assert_eq!(level_for_exp(0), 1);
        assert_eq!(level_for_exp(19), 2);
        assert_eq!(level_for_exp(20), 3);
        assert_eq!(level_for_exp(u32::MAX), MAX_LEVEL);
        assert!(EXP_TABLE.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_level_title() {
        assert_eq!(level_title(1), "novice explorer");
        assert_eq!(level_title(25), "mighty evil master");
        assert_eq!(level_title(100), "The Creator");
        assert_eq!(a_an("adventurer"), "an");
        assert_eq!(a_an("mage"), "a");
    }

    #[test]
    fn test_gain_ten_experience() {
        let (mut session, mut player) = player();
        assert_eq!(player.experience, 0);
        let hp_max = player.hp_max;

        player.gain_exp(&mut session, 10);
        assert_eq!(player.level, 2);
        assert_eq!(player.stats.max_level, 2);
        assert!(player.hp_max > hp_max);
        assert!(player.log.contains("You gain experience and become an apprentice explorer!"));
        assert_eq!(exp_to_next_level(player.level, player.experience), 10);
    }

    #[test]
    fn test_level_up_snaps_experience() {
        let (mut session, mut player) = player();
        player.level_up(&mut session, 3);
        assert_eq!(player.level, 4);
        assert_eq!(player.experience, exp_for_level(4));
        assert_eq!(player.stats.max_xp, 40);
    }

    #[test]
    fn test_level_down_snaps_experience() {
        let (mut session, mut player) = player();
        player.gain_exp(&mut session, 100);
        assert_eq!(player.level, 5);

        player.level_down(&mut session, 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.experience, 20);
        assert!(player.log.contains("You return to experience level 3..."));
        assert!(player.hp_max >= 1);
    }

    #[test]
    fn test_level_cap() {
        let (mut session, mut player) = player();
        player.gain_exp(&mut session, u32::MAX);
        assert_eq!(player.level, MAX_LEVEL);
        let log_len = player.log.len();
        player.level_up(&mut session, 1);
        assert_eq!(player.level, MAX_LEVEL);
        assert_eq!(player.log.len(), log_len);
    }

    #[test]
    fn test_losing_last_level_is_fatal() {
        let (mut session, mut player) = player();
        player.level_down(&mut session, 1);
        assert!(session.is_over());
        assert_eq!(
            session.game_over().map(|r| r.cause),
            Some(DeathCause::LastLevel)
        );
    }

    #[test]
    fn test_hp_helpers() {
        let (_session, mut player) = player();
        player.hp = 1;
        player.hp_gain(1000);
        assert_eq!(player.hp, player.hp_max());
        player.hp_max_lose(1000);
        assert_eq!(player.hp_max, 1);
        assert_eq!(player.hp, 1);
        player.mp_lose(1000);
        assert_eq!(player.mp, 0);
    }

    proptest! {
        #[test]
        fn prop_level_tracks_experience(
            steps in proptest::collection::vec((any::<bool>(), 0u32..50000), 1..30)
        ) {
            let (mut session, mut player) = player();
            for (gain, amount) in steps {
                if gain {
                    player.gain_exp(&mut session, amount);
                } else {
                    player.lose_exp(&mut session, amount);
                }
                prop_assert_eq!(player.level, level_for_exp(player.experience));
            }
        }
    }
}
