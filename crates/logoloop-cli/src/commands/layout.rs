use anyhow::{bail, Result};

use logoloop_core::marquee::{accessible_labels, LayoutMeasurer, MeasureTrigger};
use logoloop_core::AppConfig;

pub fn run(config: &AppConfig, container_width: f64, sequence_width: f64) -> Result<()> {
    if !container_width.is_finite() || container_width < 0.0 {
        bail!("container width must be a non-negative number, got {}", container_width);
    }

    let mut measurer = LayoutMeasurer::from_config(&config.marquee);
    if !measurer.measure(container_width, sequence_width, MeasureTrigger::InputsChanged) {
        println!("Sequence width {} is not measurable; the track stays as mounted.", sequence_width);
    }

    let state = measurer.state();
    println!("Sequence width:  {}", state.sequence_width);
    println!("Container width: {}", state.container_width);
    println!(
        "Copies:          {} (min {}, headroom {})",
        state.copy_count, config.marquee.min_copies, config.marquee.copy_headroom
    );

    let labels = accessible_labels(&config.items);
    if !labels.is_empty() {
        println!("\nAnnounced once as \"{}\" ({}):", config.marquee.aria_label, labels.len());
        for label in labels {
            println!("  {}", label);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative_container() {
        assert!(run(&AppConfig::default(), -1.0, 100.0).is_err());
        assert!(run(&AppConfig::default(), 1200.0, 1000.0).is_ok());
    }
}
