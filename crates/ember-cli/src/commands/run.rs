//! Run command

use super::config::ConfigFile;
use anyhow::{Context, Result};
use ember_effects::create_effect;
use std::time::Instant;

pub struct RunArgs {
    pub effect: String,
    pub count: Option<usize>,
    pub frames: u32,
    pub dt: f64,
    pub config: Option<String>,
}

pub fn run(args: RunArgs) -> Result<()> {
    if !(args.dt > 0.0) {
        anyhow::bail!("--dt must be positive, got {}", args.dt);
    }

    let mut preset = match &args.config {
        Some(path) => ConfigFile::load(path)?.preset_for(&args.effect),
        None => Default::default(),
    };
    if let Some(count) = args.count {
        preset.max_particles = count;
    }

    let mut effect = create_effect(&args.effect, &preset)
        .with_context(|| format!("Failed to create effect '{}'", args.effect))?;

    let start = Instant::now();
    for _ in 0..args.frames {
        effect.update(args.dt);
    }
    let elapsed = start.elapsed();

    let system = effect.system();
    println!("effect:    {}", effect.name());
    println!(
        "particles: {} alive / {} total",
        effect.num_alive_particles(),
        effect.num_all_particles()
    );
    println!(
        "simulated: {} frame(s), {:.3} s",
        args.frames,
        f64::from(args.frames) * args.dt
    );
    println!("elapsed:   {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    println!(
        "memory:    {:.1} KiB",
        system.memory_usage() as f64 / 1024.0
    );

    Ok(())
}
