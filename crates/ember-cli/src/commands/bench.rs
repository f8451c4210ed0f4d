//! Bench command

use super::config::ConfigFile;
use anyhow::{Context, Result};
use ember_effects::create_effect;
use std::time::{Duration, Instant};

pub struct BenchArgs {
    pub config: Option<String>,
    pub frames: Option<u32>,
    pub effects: Option<Vec<String>>,
}

/// Running average of measured durations, each sample halving the weight
/// of everything before it.
#[derive(Debug, Default)]
struct SmoothedTimer {
    millis: f64,
}

impl SmoothedTimer {
    fn record(&mut self, elapsed: Duration) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        self.millis = 0.5 * (self.millis + ms);
    }

    fn millis(&self) -> f64 {
        self.millis
    }
}

pub fn run(args: BenchArgs) -> Result<()> {
    let mut file = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    if let Some(frames) = args.frames {
        file.bench.frames = frames;
    }
    if let Some(effects) = args.effects {
        file.bench.effects = effects;
    }
    file.bench.validate()?;

    let bench = &file.bench;
    log::info!(
        "benchmarking {} effect(s), {} frame(s) at dt {}",
        bench.effects.len(),
        bench.frames,
        bench.delta_time
    );

    print!("count | ");
    for name in &bench.effects {
        print!("{} | ", name);
    }
    println!();
    println!("-------|----------");

    let mut timer = SmoothedTimer::default();
    for count in bench.counts() {
        print!("{} | ", count);
        for name in &bench.effects {
            let mut preset = file.preset_for(name);
            preset.max_particles = count;
            let mut effect = create_effect(name, &preset)
                .with_context(|| format!("Failed to create effect '{}'", name))?;

            let start = Instant::now();
            for _ in 0..bench.frames {
                effect.update(bench.delta_time);
            }
            timer.record(start.elapsed());

            log::debug!(
                "{} at {}: {} alive after {} frame(s)",
                name,
                count,
                effect.num_alive_particles(),
                bench.frames
            );
            print!("{:.3} | ", timer.millis());
        }
        println!();
    }
    println!("time in milliseconds");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_halves_history() {
        let mut timer = SmoothedTimer::default();
        timer.record(Duration::from_millis(8));
        assert!((timer.millis() - 4.0).abs() < 1e-9);
        timer.record(Duration::from_millis(8));
        assert!((timer.millis() - 6.0).abs() < 1e-9);
        timer.record(Duration::ZERO);
        assert!((timer.millis() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_effect_is_rejected_by_validation() {
        let result = run(BenchArgs {
            config: None,
            frames: Some(1),
            effects: Some(vec!["smoke".to_string()]),
        });
        assert!(result.is_err());
    }
}
