//! List command

use anyhow::Result;
use ember_effects::EFFECT_NAMES;

pub fn run() -> Result<()> {
    for name in EFFECT_NAMES {
        println!("{}", name);
    }
    Ok(())
}
