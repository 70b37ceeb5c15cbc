use log::{debug, error};
use std::env;
use std::path::PathBuf;

use beerxml_fermentable::config::{load_config, load_config_from};
use beerxml_fermentable::{
    fermentables_to_xml, load_fermentables, sort_unique, total_equiv_sucrose_kg, MapLabels,
    TypeLabels,
};

const USAGE: &str = "Usage: fermentable [--config FILE] [--json] [--normalize] <file.xml>";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    json: bool,
    normalize: bool,
    input: Option<PathBuf>,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config needs a file argument")?;
                args.config = Some(PathBuf::from(path));
            }
            "--json" => args.json = true,
            "--normalize" => args.normalize = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ if arg.starts_with("--") => return Err(format!("Unknown option {}", arg).into()),
            _ => args.input = Some(PathBuf::from(arg)),
        }
    }
    Ok(args)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = parse_args()?;
    let input = args.input.ok_or(USAGE)?;

    let config = match &args.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    debug!("{:#?}", config);

    let fermentables = match load_fermentables(&input, &config) {
        Ok(fermentables) => sort_unique(fermentables),
        Err(e) => {
            error!("Unable to read fermentables from {}: {}", input.display(), e);
            return Err(e.into());
        }
    };

    if args.normalize {
        println!("{}", fermentables_to_xml(&fermentables)?);
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&fermentables)?);
    } else {
        let labels = MapLabels::from_config(&config.labels);
        for f in &fermentables {
            println!(
                "{:<32} {:<16} {:>8.3} kg {:>6.1} % {:>6.1} SRM {:>8.3} kg sucrose",
                f.name(),
                labels.label(f.kind()),
                f.amount_kg(),
                f.yield_pct(),
                f.color_srm(),
                f.equiv_sucrose_kg()
            );
        }
        println!(
            "{} fermentables, {:.3} kg sucrose equivalent",
            fermentables.len(),
            total_equiv_sucrose_kg(&fermentables)
        );
    }

    Ok(())
}
