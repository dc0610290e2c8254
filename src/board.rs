use crate::aerodrome::Aerodrome;
use crate::runway::Runway;
use crate::time::Time;
use colored::Colorize;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct QueueRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "Callsign")]
    pub callsign: String,
    #[tabled(rename = "ETA")]
    pub eta: Time,
    #[tabled(rename = "Priority")]
    pub priority: String,
}

pub fn rows(runway: &Runway) -> Vec<QueueRow> {
    runway
        .queue()
        .iter()
        .enumerate()
        .map(|(i, ac)| QueueRow {
            position: i + 1,
            callsign: ac.id().to_string(),
            eta: ac.remaining_time(),
            priority: if ac.is_emergency() {
                "EMERGENCY".red().bold().to_string()
            } else {
                String::new()
            },
        })
        .collect()
}

/// Renders every runway as its own table, first to land on top.
pub fn render(aerodrome: &Aerodrome) -> String {
    aerodrome
        .runways()
        .iter()
        .enumerate()
        .map(|(i, runway)| {
            let title = format!("Runway {} (load {})", i + 1, runway.total_landing_time().0);
            let title = title.as_str().bold();
            if runway.is_empty() {
                format!("{}\n  no traffic", title)
            } else {
                let mut table = Table::new(rows(runway));
                table.with(Style::rounded());
                table.with(Alignment::left());
                format!("{}\n{}", title, table)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::Aircraft;

    #[test]
    fn test_rows_follow_queue_order() {
        let mut aerodrome = Aerodrome::new(1).unwrap();
        aerodrome.assign(Aircraft::new("A", 20, false).unwrap()).unwrap();
        aerodrome.assign(Aircraft::new("E", 10, true).unwrap()).unwrap();

        let rows = rows(&aerodrome.runways()[0]);
        assert_eq!(vec!["E", "A"], rows.iter().map(|r| r.callsign.as_str()).collect::<Vec<_>>());
        assert_eq!(vec![Time(10), Time(30)], rows.iter().map(|r| r.eta).collect::<Vec<_>>());
        assert!(rows[0].priority.contains("EMERGENCY"));
        assert!(rows[1].priority.is_empty());
    }

    #[test]
    fn test_render_lists_every_runway() {
        colored::control::set_override(false);
        let mut aerodrome = Aerodrome::new(2).unwrap();
        aerodrome.assign(Aircraft::new("IL-62-15", 12, false).unwrap()).unwrap();

        let board = render(&aerodrome);
        assert!(board.contains("Runway 1 (load 12)"));
        assert!(board.contains("IL-62-15"));
        assert!(board.contains("~12"));
        assert!(board.contains("Runway 2 (load 0)\n  no traffic"));
    }
}
