//! Builds a small ward roster by hand and prints the result.
//!
//! Run with: `cargo run --example weekly_roster`
//! Set `RUST_LOG=shiftwise=debug` to watch the search.

use qtty::{Minute, Quantity};
use shiftwise::combo::TargetPair;
use shiftwise::person::{Person, PersonLimits};
use shiftwise::shift::{Day, TimeSlot};
use shiftwise::{logging, SchedulerConfig, SchedulerError, ShiftGroup, Supervisor};

fn main() -> Result<(), SchedulerError> {
    logging::init();
    println!("=== Weekly Roster Example ===\n");

    let mut group = ShiftGroup::new();
    for day in [Day::Sunday, Day::Monday, Day::Tuesday, Day::Wednesday, Day::Thursday] {
        group.add_shift(day, TimeSlot::Morning, 2)?;
        group.add_shift(day, TimeSlot::Noon, 1)?;
        group.add_shift(day, TimeSlot::Night, 1)?;
    }
    group.add_shift(Day::Friday, TimeSlot::Morning, 1)?;
    group.add_shift(Day::Friday, TimeSlot::Evening, 1)?;
    group.add_shift(Day::Saturday, TimeSlot::Morning, 1)?;

    let relaxed = PersonLimits {
        max_shifts: 6,
        max_nights: 2,
        max_weekend_shifts: 1,
    };
    let names = ["Avi", "Bella", "Chen", "Dalia", "Eitan", "Fay", "Gil"];
    for name in names {
        group.add_person(Person::new(name).with_limits(relaxed))?;
    }
    let hana = group.add_person(Person::new("Hana").with_double_shift(true).with_max_nights(0))?;

    // Hana is away at the start of the week.
    for slot in TimeSlot::ALL {
        group.block(hana, Day::Sunday, slot)?;
        group.block(hana, Day::Monday, slot)?;
    }

    let config = SchedulerConfig::default()
        .with_timeout(Quantity::<Minute>::new(0.5))
        .with_target_pair(TargetPair::new("Avi", "Bella", 2.0))
        .with_target_pair(TargetPair::new("Chen", "Dalia", -1.0));

    let supervisor = Supervisor::new(config)?;
    let run = supervisor.run_detailed(group)?;

    if let Some(report) = &run.report {
        println!("Search statistics: {:?}\n", report.stats);
    }

    let result = run.result;
    if !result.success {
        if let Some(reason) = &result.failure_reason {
            println!("No roster: {reason}");
        }
        return Ok(());
    }

    println!("--- Roster ---");
    for day in Day::ALL {
        let cells: Vec<String> = TimeSlot::ALL
            .into_iter()
            .map(|slot| {
                let names = result.assigned(day, slot);
                if names.is_empty() {
                    "-".to_string()
                } else {
                    names.join(", ")
                }
            })
            .collect();
        println!("{:<14} {}", day.to_string(), cells.join(" | "));
    }

    println!("\n--- Shifts per person ---");
    if let Some(counts) = &result.shift_counts {
        for (name, count) in counts {
            println!("{name:<8} {count}");
        }
    }

    Ok(())
}
