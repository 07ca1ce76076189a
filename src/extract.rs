use std::collections::HashMap;

use log::debug;

use crate::records::{Entry, Stat, CHAMPIONSHIP_POINTS_STAT, RANK_STAT};

/// Stats that describe the standing itself and are never treated as races.
pub const NON_RACE_STATS: [&str; 2] = [RANK_STAT, CHAMPIONSHIP_POINTS_STAT];

/// One entry per athlete id. A later entry replaces an earlier one but keeps
/// the position where the id was first seen.
pub fn unique_drivers(entries: &[Entry]) -> Vec<&Entry> {
    let drivers = last_wins(entries.iter(), |entry| entry.athlete.id.as_str());
    debug!("{} entries -> {} unique drivers", entries.len(), drivers.len());
    drivers
}

/// One stat per stat name across all entries, excluding [`NON_RACE_STATS`].
pub fn unique_races(entries: &[Entry]) -> Vec<&Stat> {
    let stats = entries
        .iter()
        .flat_map(|entry| entry.stats.iter())
        .filter(|stat| !NON_RACE_STATS.contains(&stat.name.as_str()));
    let races = last_wins(stats, |stat| stat.name.as_str());
    debug!("{} unique races", races.len());
    races
}

fn last_wins<'a, T, I, K>(items: I, key: K) -> Vec<&'a T>
where
    I: Iterator<Item = &'a T>,
    K: Fn(&'a T) -> &'a str,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<&T> = Vec::new();
    for item in items {
        match slots.get(key(item)) {
            Some(&slot) => unique[slot] = item,
            None => {
                slots.insert(key(item), unique.len());
                unique.push(item);
            }
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, team: &str, stats: serde_json::Value) -> Entry {
        serde_json::from_value(json!({
            "athlete": {"id": id},
            "team": team,
            "stats": stats,
        }))
        .unwrap()
    }

    #[test]
    fn drivers_keep_last_seen_entry() {
        let entries = vec![
            entry("VER", "Red Bull", json!([])),
            entry("NOR", "McLaren", json!([])),
            entry("VER", "Racing Bulls", json!([])),
        ];
        let drivers = unique_drivers(&entries);
        assert_eq!(drivers.len(), 2);
        assert_eq!(drivers[0].athlete.id, "VER");
        assert_eq!(drivers[0].team.as_deref(), Some("Racing Bulls"));
        assert_eq!(drivers[1].athlete.id, "NOR");
    }

    #[test]
    fn races_skip_rank_and_championship_points() {
        let entries = vec![
            entry(
                "VER",
                "Red Bull",
                json!([
                    {"name": "rank", "value": 1},
                    {"name": "championshipPts", "value": 575},
                    {"name": "wins", "displayName": "Wins", "value": 9}
                ]),
            ),
            entry(
                "NOR",
                "McLaren",
                json!([
                    {"name": "rank", "value": 2},
                    {"name": "wins", "displayName": "Race Wins", "value": 3},
                    {"name": "poles", "displayName": "Poles", "value": 8}
                ]),
            ),
        ];
        let races = unique_races(&entries);
        let names: Vec<_> = races.iter().map(|stat| stat.name.as_str()).collect();
        assert_eq!(names, ["wins", "poles"]);
        assert_eq!(races[0].display_name.as_deref(), Some("Race Wins"));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(unique_drivers(&[]).is_empty());
        assert!(unique_races(&[]).is_empty());
    }
}
