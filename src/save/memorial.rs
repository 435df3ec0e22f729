//! Memorial files
//!
//! Plain-text copies of a finished character's death report.

use std::fs;
use std::path::{Path, PathBuf};

use super::save_game::save_directory;
use super::SaveError;
use crate::game::death::DeathReport;

/// Default memorial location, beside the save slots
pub fn memorial_directory() -> PathBuf {
    match save_directory().parent() {
        Some(parent) => parent.join("memorials"),
        None => PathBuf::from("./memorials"),
    }
}

/// File name proposed for a character's memorial
pub fn memorial_file_name(name: &str) -> String {
    let clean: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if clean.is_empty() {
        "memorial.txt".to_string()
    } else {
        format!("{}.txt", clean)
    }
}

/// Write the report into `dir` (or the default directory).
/// Returns the path written.
pub fn write_memorial(
    report: &DeathReport,
    name: &str,
    dir: Option<&Path>,
) -> Result<PathBuf, SaveError> {
    let dir = dir.map(Path::to_path_buf).unwrap_or_else(memorial_directory);
    fs::create_dir_all(&dir)?;

    let path = dir.join(memorial_file_name(name));
    let mut content = format!("{}\n\n{}", report.title, report.text);
    if !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(&path, content)?;

    log::info!("Memorial written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::death::DeathCause;
    use crate::game::state::Session;
    use crate::entities::player::Player;

    #[test]
    fn test_file_name() {
        assert_eq!(memorial_file_name("Ada"), "Ada.txt");
        assert_eq!(memorial_file_name("../etc/x"), "___etc_x.txt");
        assert_eq!(memorial_file_name(""), "memorial.txt");
    }

    #[test]
    fn test_write_memorial() {
        let mut session = Session::seeded(71);
        let mut player = Player::new(&mut session, "Mourned", Default::default());
        player.die(&mut session, DeathCause::Quit);
        let report = session.game_over().cloned().expect("report");

        let dir = std::env::temp_dir().join(format!("delver-memorial-{}", std::process::id()));
        let path = write_memorial(&report, &player.name, Some(&dir)).expect("written");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("Mourned.txt"));

        let content = fs::read_to_string(&path).expect("readable");
        assert!(content.starts_with(&report.title));
        assert!(content.contains(&report.description));
        let _ = fs::remove_dir_all(dir);
    }
}
