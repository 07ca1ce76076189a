use serde::Serialize;

use crate::{
    extract::{unique_drivers, unique_races},
    records::{
        driver_record, race_record, standing_record, DriverRecord, Entry, RaceRecord,
        StandingRecord,
    },
    store::Table,
    upsert::map_row,
};

/// The rows an ingest would send, grouped by table.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Preview {
    pub drivers: Vec<DriverRecord>,
    pub races: Vec<RaceRecord>,
    pub standings: Vec<StandingRecord>,
}

impl Preview {
    /// Maps every extracted item; items that fail to map are logged and left out.
    pub fn build(entries: &[Entry]) -> Self {
        let drivers = unique_drivers(entries)
            .into_iter()
            .filter_map(|entry| {
                map_row(Table::Drivers, &entry.athlete.id, driver_record(entry)).ok()
            })
            .collect();
        let races = unique_races(entries)
            .into_iter()
            .filter_map(|stat| map_row(Table::Races, &stat.name, race_record(stat)).ok())
            .collect();
        let standings = entries
            .iter()
            .filter_map(|entry| {
                map_row(Table::Standings, &entry.athlete.id, standing_record(entry)).ok()
            })
            .collect();

        Self {
            drivers,
            races,
            standings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::decode_entries;
    use serde_json::json;

    #[test]
    fn groups_rows_by_table_and_drops_unmappable_ones() {
        let entries = decode_entries(vec![
            json!({
                "athlete": {
                    "id": "VER",
                    "displayName": "Max Verstappen",
                    "abbreviation": "VER",
                    "flag": {"alt": "Netherlands", "href": "https://flags.example/ned.png"}
                },
                "team": "Red Bull",
                "stats": [
                    {"name": "rank", "displayName": "Rank", "value": 1},
                    {"name": "championshipPts", "value": 575},
                    {"name": "wins", "displayName": "Wins", "value": 9},
                    {"name": "laps"}
                ]
            }),
            json!({"athlete": {"id": "HAM"}, "stats": [{"name": "rank", "value": 7}]}),
        ])
        .unwrap();

        let preview = Preview::build(&entries);
        let output = serde_json::to_value(&preview).unwrap();

        let tables: Vec<_> = output.as_object().unwrap().keys().cloned().collect();
        assert_eq!(tables.len(), 3);
        for table in ["drivers", "races", "standings"] {
            assert!(output[table].is_array(), "{table} should be an array");
        }

        assert_eq!(output["drivers"], json!([{
            "driver_id": "VER",
            "driver_name": "Max Verstappen",
            "abbreviation": "VER",
            "nationality": "Netherlands",
            "href": "https://flags.example/ned.png",
            "team": "Red Bull"
        }]));
        assert_eq!(output["races"].as_array().unwrap().len(), 1);
        assert_eq!(output["races"][0]["race_id"], "wins");
        assert_eq!(output["standings"], json!([{
            "race_id": "rank",
            "race_name": "Rank",
            "race_date": "1970-01-01T00:00:00Z",
            "driver_id": "VER",
            "driver_name": "Max Verstappen",
            "team": "Red Bull",
            "position": 1,
            "points": 575
        }]));
    }
}
