use std::thread;
use std::time::Duration;

use crossbeam_channel::bounded;
use rand::Rng;
use tracing_subscriber::EnvFilter;

use elevator_scan::config::SimulationConfig;
use elevator_scan::{Car, ElevatorController, Heading, Passenger};

fn main() -> std::io::Result<()> {
    // INITIALIZE LOGGING
    // Quiet unless RUST_LOG is set, since the status board owns the terminal.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // READ CONFIGURATION
    let config = SimulationConfig::get();

    // CREATE THE CAR
    let car = match Car::new(config.min_floor, config.max_floor, config.start_floor, Heading::Idle) {
        Ok(car) => car,
        Err(err) => {
            eprintln!("bad configuration: {err}");
            std::process::exit(1);
        }
    };
    let mut controller = ElevatorController::with_settings(car, config.settings());

    // INITIALIZE THREAD FOR THE STATUS MONITOR
    {
        let status_rx = controller.watch();
        let car = controller.car();
        thread::Builder::new()
            .name("monitor".to_string())
            .spawn(move || elevator_scan::debug::main(car, status_rx))?;
    }

    // START THE DISPATCH LOOP
    let (drained_tx, drained_rx) = bounded(1);
    controller.start(Some(drained_tx))?;

    // SUBMIT PASSENGERS IN TWO WAVES
    controller.submit_all(generate_passengers(&config, config.passengers));
    thread::sleep(Duration::from_millis(500));
    controller.submit_all(generate_passengers(&config, config.passengers / 5));

    // WAIT FOR THE BUILDING TO DRAIN
    if drained_rx.recv_timeout(Duration::from_secs(60)).is_err() {
        eprintln!("simulation did not drain in time");
    }
    let floor = controller.car().floor();
    controller.stop();
    println!("simulation complete, car parked at floor {floor}");
    Ok(())
}

/// Random travel requests across the building, in the spirit of a busy
/// lobby. Same-floor rolls are skipped, so a batch may come up short of
/// `count`.
fn generate_passengers(config: &SimulationConfig, count: u32) -> Vec<Passenger> {
    let mut rng = rand::rng();
    let mut passengers = Vec::with_capacity(count as usize);
    for i in 0..count {
        let origin = rng.random_range(config.min_floor..=config.max_floor);
        let destination = rng.random_range(config.min_floor..=config.max_floor);
        if let Ok(passenger) = Passenger::new(format!("passenger-{i}"), origin, destination) {
            passengers.push(passenger);
        }
    }
    passengers
}
