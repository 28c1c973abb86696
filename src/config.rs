use std::env;
use std::fs;
use std::time::Duration;

/// Tunables for the dispatch loop.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Delay between dispatch ticks. Stands in for the floor-arrival
    /// events a real installation would get from its sensors.
    pub poll_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            poll_interval: Duration::from_millis(100),
        }
    }
}

const CONFIG_FILE: &str = "config.json";

/// Configuration for the demo binary, read from an optional `config.json`
/// with command-line overrides.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    pub min_floor: u8,
    pub max_floor: u8,
    pub start_floor: u8,
    pub passengers: u32,
    pub poll_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            min_floor: 1,
            max_floor: 9,
            start_floor: 5,
            passengers: 100,
            poll_interval_ms: 100,
        }
    }
}

impl SimulationConfig {
    pub fn get() -> Self {
        let mut config = match fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    println!("could not parse {CONFIG_FILE} ({err}), using default settings...");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        config.apply_env_args();
        config
    }

    pub fn settings(&self) -> Settings {
        Settings {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    fn apply_env_args(&mut self) {
        let args: Vec<String> = env::args().collect();
        for arg_pair in args.rchunks_exact(2) {
            match arg_pair[0].as_str() {
                "--passengers" => {
                    match arg_pair[1].parse::<u32>() {
                        Ok(num) => self.passengers = num,
                        Err(_) => println!("passenger count {} is not a number, skipping...", arg_pair[1]),
                    };
                }
                "--interval" => {
                    match arg_pair[1].parse::<u64>() {
                        Ok(num) => self.poll_interval_ms = num,
                        Err(_) => println!("interval {} is not a number, skipping...", arg_pair[1]),
                    };
                }
                _ => (),
            }
        }
    }
}
