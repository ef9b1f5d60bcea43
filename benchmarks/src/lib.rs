//! Shared fixtures for the pidloop benchmarks

use pidloop_library::ControlLoop;

/// First-order plant: every command moves the reading by `gain * command`
#[derive(Debug, Clone, Copy)]
pub struct Plant {
    pub reading: f64,
    pub gain: f64,
}

impl Plant {
    pub fn new(reading: f64, gain: f64) -> Self {
        Self { reading, gain }
    }

    /// Apply one actuator command and return the new reading
    pub fn step(&mut self, command: f64) -> f64 {
        self.reading += self.gain * command;
        self.reading
    }
}

/// Run `pid` against `plant` until it reports done or `max_cycles` pass.
/// Returns the number of cycles used.
pub fn run_to_completion(pid: &mut ControlLoop, plant: &mut Plant, max_cycles: usize) -> usize {
    for cycle in 0..max_cycles {
        if pid.is_done(plant.reading) {
            return cycle;
        }
        let command = pid.update(plant.reading);
        plant.step(command);
    }
    max_cycles
}
