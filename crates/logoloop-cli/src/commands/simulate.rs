use anyhow::{bail, Result};

use logoloop_core::marquee::{simulate, Simulation};
use logoloop_core::AppConfig;

pub fn run(config: &AppConfig, sim: &Simulation, json: bool) -> Result<()> {
    if !(sim.seconds.is_finite() && sim.seconds >= 0.0) {
        bail!("--seconds must be a non-negative number");
    }
    if !(sim.sample_every.is_finite() && sim.sample_every > 0.0) {
        bail!("--every must be a positive number");
    }

    let samples = simulate(&config.marquee, sim);

    if json {
        for sample in &samples {
            println!("{}", sample.to_json_line()?);
        }
        return Ok(());
    }

    println!(
        "{:>7}  {:>10}  {:>10}  {:>7}  {:>6}",
        "time", "velocity", "offset", "hovered", "copies"
    );
    for sample in &samples {
        println!(
            "{:>7.2}  {:>10.2}  {:>10.2}  {:>7}  {:>6}",
            sample.time,
            sample.velocity,
            sample.offset,
            if sample.hovered { "yes" } else { "no" },
            sample.copy_count
        );
    }

    Ok(())
}
