// src/main.rs

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};
use serde::Serialize;

use shape_dataset::{DatasetBuilder, DatasetConfig, DatasetError, NoiseConfig, Rotation, ShapeDataset};

#[derive(Serialize)]
struct ExportItem<'a> {
    label: Option<&'a str>,
    points: &'a [f32],
}

#[derive(Serialize)]
struct Export<'a> {
    points_per_shape: Option<usize>,
    items: Vec<ExportItem<'a>>,
}

fn parse_flag<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<T>, DatasetError> {
    match matches.value_of(name) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| DatasetError::InvalidConfig(format!("--{} expects a number, got '{}'", name, raw))),
        None => Ok(None),
    }
}

fn build_config(matches: &ArgMatches) -> Result<DatasetConfig, DatasetError> {
    let mut config = match matches.value_of("config") {
        Some(path) => DatasetConfig::from_json_file(path)?,
        None => DatasetConfig::default(),
    };

    if let Some(samples) = parse_flag::<usize>(matches, "samples")? {
        config.samples_per_kind = samples;
    }
    if let Some(points) = parse_flag::<usize>(matches, "points")? {
        config.n_points = Some(points);
    }
    if let Some(seed) = parse_flag::<u64>(matches, "seed")? {
        config.seed = Some(seed);
    }
    if let Some(max_degrees) = parse_flag::<f32>(matches, "max-rotation")? {
        config.rotation = Some(Rotation::Random { max_degrees });
    }

    let level: Option<f32> = parse_flag(matches, "noise-level")?;
    let fraction: Option<f64> = parse_flag(matches, "noise-fraction")?;
    if level.is_some() || fraction.is_some() {
        let base = config.noise.unwrap_or_default();
        config.noise = Some(NoiseConfig {
            level: level.unwrap_or(base.level),
            fraction: fraction.unwrap_or(base.fraction),
        });
    }

    config.validate()?;
    Ok(config)
}

fn write_dataset(dataset: &ShapeDataset, config: &DatasetConfig, out: impl Write) -> Result<(), DatasetError> {
    let items: Vec<ExportItem> = (0..dataset.len())
        .filter_map(|i| {
            dataset.get(i).map(|points| ExportItem {
                label: dataset.label(i).map(|kind| kind.name()),
                points,
            })
        })
        .collect();

    let export = Export { points_per_shape: config.n_points, items };
    let mut out = BufWriter::new(out);
    serde_json::to_writer(&mut out, &export)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), DatasetError> {
    let config = build_config(matches)?;
    let builder = DatasetBuilder::from_config(&config)?;
    let mut rng = config.rng();
    let dataset = builder.build(&mut rng)?;

    match matches.value_of("output") {
        Some(path) => {
            log::info!("writing {} shapes to {}", dataset.len(), path);
            write_dataset(&dataset, &config, File::create(path)?)
        }
        None => write_dataset(&dataset, &config, io::stdout().lock()),
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates synthetic 2D shape datasets as flattened, normalised point sets")
        .arg(Arg::with_name("config")
            .long("config")
            .short("c")
            .takes_value(true)
            .help("JSON file with dataset settings (flags below override it)"))
        .arg(Arg::with_name("samples")
            .long("samples")
            .short("n")
            .takes_value(true)
            .help("Number of shapes generated per kind"))
        .arg(Arg::with_name("points")
            .long("points")
            .short("p")
            .takes_value(true)
            .help("Number of points each shape is resampled to"))
        .arg(Arg::with_name("seed")
            .long("seed")
            .short("s")
            .takes_value(true)
            .help("Seed for reproducible output"))
        .arg(Arg::with_name("max-rotation")
            .long("max-rotation")
            .takes_value(true)
            .help("Rotate each shape by a random angle in [0, max) degrees"))
        .arg(Arg::with_name("noise-level")
            .long("noise-level")
            .takes_value(true)
            .help("Maximum per-coordinate noise added to perturbed points"))
        .arg(Arg::with_name("noise-fraction")
            .long("noise-fraction")
            .takes_value(true)
            .help("Fraction of points to perturb, in [0, 1]"))
        .arg(Arg::with_name("output")
            .long("output")
            .short("o")
            .takes_value(true)
            .help("Write the JSON dataset here instead of standard output"))
}

fn main() {
    env_logger::init();

    let matches = app().get_matches();
    if let Err(err) = run(&matches) {
        log::error!("{}", err);
        process::exit(1);
    }
}
