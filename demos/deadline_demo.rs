//! Races the search against a short deadline on random instances.
//!
//! Run with: `cargo run --example deadline_demo`

use std::time::Instant;

use qtty::{Quantity, Second};
use shiftwise::generator::{GeneratorConfig, RosterGenerator};
use shiftwise::{logging, SchedulerConfig, SchedulerError, Supervisor};

fn main() -> Result<(), SchedulerError> {
    logging::init();
    println!("=== Deadline Example ===\n");

    let config = SchedulerConfig::default()
        .with_timeout(Quantity::<Second>::new(0.5))
        .with_cancel_grace(Quantity::<Second>::new(0.25));
    let supervisor = Supervisor::new(config)?;

    let instances = GeneratorConfig {
        people: 14,
        coverage: 0.75,
        need_range: (1, 3),
        unavailability: 0.15,
        ..GeneratorConfig::default()
    };
    let mut generator = RosterGenerator::new(instances, 42);

    for round in 1..=5 {
        let group = generator.generate()?;
        let (day, night) = RosterGenerator::demand(&group);
        let started = Instant::now();
        let result = supervisor.run(group)?;
        let elapsed = shiftwise::units::from_duration(started.elapsed());

        let outcome = match &result.failure_reason {
            None => "solved".to_string(),
            Some(reason) => reason.to_string(),
        };
        println!(
            "Instance {round}: {day} day + {night} night slots -> {outcome} ({:.3} s)",
            elapsed.value()
        );
    }

    Ok(())
}
