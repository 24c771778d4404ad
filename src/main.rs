use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use country_centroids::config::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use country_centroids::logging::init_logging;
use country_centroids::{run, Config};

fn main() -> anyhow::Result<()> {
    let matches = Command::new("Country Centroids")
        .version("0.1")
        .author("Jesper Fjellin")
        .about("Computes per-country centroid coordinates and ISO alpha-2 codes from a GeoJSON world map")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .num_args(1)
                .default_value(DEFAULT_INPUT)
                .help("GeoJSON FeatureCollection of country polygons"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .num_args(1)
                .default_value(DEFAULT_OUTPUT)
                .help("Where to write the country coordinates JSON (overwritten)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Also log countries whose name has no ISO code"),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let mut config = Config::default();
    if let Some(input) = matches.get_one::<String>("input") {
        config = config.with_input(input);
    }
    if let Some(output) = matches.get_one::<String>("output") {
        config = config.with_output(output);
    }

    let report = run(&config)
        .with_context(|| format!("processing {}", config.input.display()))?;
    println!(
        "Done! Wrote {} countries to {} ({} skipped)",
        report.written(),
        config.output.display(),
        report.skipped.len()
    );
    Ok(())
}
