use anyhow::{anyhow, Context, Result};
use redpnr_common::BlockIds;
use redpnr_routing::RipUpConfig;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub netlist_file: PathBuf,
    pub library_file: PathBuf,
    pub output_file: PathBuf,
    pub layout_output_file: PathBuf,
    pub seed: u64,
    pub conductor_id: u8,
    pub substrate_id: u8,
    pub ripup: RipUpConfig,
}

impl Config {
    pub fn block_ids(&self) -> BlockIds {
        BlockIds { conductor: self.conductor_id, substrate: self.substrate_id }
    }
}

pub fn parse_args() -> Result<Config> {
    use clap::{App, Arg};
    let matches = App::new("redpnr")
        .version(env!("CARGO_PKG_VERSION"))
        .author(clap::crate_authors!())
        .about("Places a netlist and routes its nets to a converged, violation-free layout")
        .arg(
            Arg::with_name("LIBRARY")
                .long("library")
                .value_name("LIBRARY")
                .help("Cell library JSON")
                .required(true),
        )
        .arg(
            Arg::with_name("SEED")
                .long("seed")
                .value_name("SEED")
                .help("PRNG seed for reproducible runs")
                .default_value("0"),
        )
        .arg(
            Arg::with_name("CONDUCTOR_ID")
                .long("conductor-id")
                .value_name("CONDUCTOR_ID")
                .default_value("55"),
        )
        .arg(
            Arg::with_name("SUBSTRATE_ID")
                .long("substrate-id")
                .value_name("SUBSTRATE_ID")
                .default_value("1"),
        )
        .arg(
            Arg::with_name("ALPHA")
                .long("alpha")
                .value_name("ALPHA")
                .help("rip-up score weight on violation count")
                .default_value("3.0"),
        )
        .arg(
            Arg::with_name("BETA")
                .long("beta")
                .value_name("BETA")
                .help("rip-up score weight on via/pin imbalance")
                .default_value("0.1"),
        )
        .arg(
            Arg::with_name("GAMMA")
                .long("gamma")
                .value_name("GAMMA")
                .help("rip-up score weight on length-over-lower-bound")
                .default_value("1.0"),
        )
        .arg(
            Arg::with_name("NORM_MARGIN")
                .long("norm-margin")
                .value_name("NORM_MARGIN")
                .default_value("0.1"),
        )
        .arg(
            Arg::with_name("MAX_ITERATIONS")
                .long("max-iterations")
                .value_name("MAX_ITERATIONS")
                .help("rip-up loop iteration cap before reporting non-convergence")
                .default_value("1000"),
        )
        .arg(
            Arg::with_name("NETLIST")
                .help("Input netlist, as JSON")
                .index(1)
                .required(true),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Output routing, as two JSON lines")
                .index(2)
                .required(true),
        )
        .arg(
            Arg::with_name("LAYOUT_OUTPUT")
                .help("Output routed-and-shrunk block layout, as JSON")
                .index(3)
                .required(true),
        )
        .get_matches();

    let parse = |name: &str| -> Result<f64> {
        matches
            .value_of(name)
            .ok_or_else(|| anyhow!("missing {}", name))?
            .parse()
            .with_context(|| anyhow!("parsing {} argument", name))
    };

    Ok(Config {
        netlist_file: PathBuf::from(matches.value_of_os("NETLIST").unwrap()),
        library_file: PathBuf::from(matches.value_of_os("LIBRARY").unwrap()),
        output_file: PathBuf::from(matches.value_of_os("OUTPUT").unwrap()),
        layout_output_file: PathBuf::from(matches.value_of_os("LAYOUT_OUTPUT").unwrap()),
        seed: matches
            .value_of("SEED")
            .unwrap()
            .parse()
            .with_context(|| anyhow!("parsing seed argument"))?,
        conductor_id: matches
            .value_of("CONDUCTOR_ID")
            .unwrap()
            .parse()
            .with_context(|| anyhow!("parsing conductor-id argument"))?,
        substrate_id: matches
            .value_of("SUBSTRATE_ID")
            .unwrap()
            .parse()
            .with_context(|| anyhow!("parsing substrate-id argument"))?,
        ripup: RipUpConfig {
            alpha: parse("ALPHA")?,
            beta: parse("BETA")?,
            gamma: parse("GAMMA")?,
            norm_margin: parse("NORM_MARGIN")?,
            max_iterations: matches
                .value_of("MAX_ITERATIONS")
                .unwrap()
                .parse()
                .with_context(|| anyhow!("parsing max-iterations argument"))?,
        },
    })
}
