mod config;
mod input;

use anyhow::{Context, Result};
use config::{parse_args, Config};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use redpnr_common::BlockCounts;
use redpnr_placement::{placer, CellCatalog};
use redpnr_routing::routing::{NetRouting, Routing, Segment};
use redpnr_routing::violation::net_to_wire_and_violation;
use redpnr_routing::{extract, initial_router, resolve_pins, rip_up_and_reroute, segment_nets, serialize};

fn build_initial_routing(
    segments: &std::collections::HashMap<String, Vec<(redpnr_common::Coord, redpnr_common::Coord)>>,
    pins: &std::collections::HashMap<String, Vec<redpnr_common::Coord>>,
    dims: redpnr_common::Dimensions,
    ids: redpnr_common::BlockIds,
) -> Routing {
    let mut routing = Routing::new();
    for (net_name, edges) in segments {
        let built_segments = edges
            .iter()
            .map(|&(a, b)| {
                let path = initial_router::dumb_route(a, b);
                let (wire, violation) = net_to_wire_and_violation(&path, dims, &[a, b], ids);
                Segment { pins: (a, b), path, wire, violation }
            })
            .collect();
        routing.insert(
            net_name.clone(),
            NetRouting { pins: pins.get(net_name).cloned().unwrap_or_default(), segments: built_segments },
        );
    }
    routing
}

fn run(config: &Config) -> Result<()> {
    let library = input::load_library(&config.library_file)?;
    let netlist = input::load_netlist(&config.netlist_file)?;
    let ids = config.block_ids();

    let catalog = CellCatalog::build(&library);

    let (placement, dims) = placer::initial_placement(&netlist, &catalog, None).context("initial placement")?;
    info!("placed {} instances into a {} layout", placement.len(), dims);

    let layout = placer::create_layout(dims, &placement, &catalog).context("stamping placed layout")?;

    let pins = resolve_pins(&placement, &catalog).context("resolving pins")?;
    let segments = segment_nets(&pins);
    let total_segments: usize = segments.values().map(|v| v.len()).sum();
    info!("segmented {} nets into {} two-pin edges", segments.len(), total_segments);

    let initial_routing = build_initial_routing(&segments, &pins, dims, ids);

    let mut rng = StdRng::seed_from_u64(config.seed);
    let outcome = rip_up_and_reroute(initial_routing, &layout, dims, ids, &config.ripup, &mut rng, &|| false);

    if outcome.converged {
        info!("routing converged after {} rip-up iterations", outcome.iterations);
    } else {
        log::warn!("routing did NOT converge after {} iterations; writing best effort", outcome.iterations);
    }

    let text = serialize(&outcome.routing, dims).context("serializing routing")?;
    std::fs::write(&config.output_file, text)
        .with_context(|| format!("writing output {:?}", config.output_file))?;

    let routed_layout = extract(&outcome.routing, &layout);
    let shrunk_layout = placer::shrink_layout(&routed_layout);
    let counts = BlockCounts::tally(&shrunk_layout, ids);
    info!(
        "shrunk layout is {}: {} conductor, {} substrate, {} cell blocks, {} empty",
        shrunk_layout.dims(),
        counts.conductor,
        counts.substrate,
        counts.cell_blocks,
        counts.empty,
    );

    let layout_text = serde_json::to_string(&shrunk_layout).context("serializing shrunk layout")?;
    std::fs::write(&config.layout_output_file, layout_text)
        .with_context(|| format!("writing layout output {:?}", config.layout_output_file))?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = parse_args()?;
    run(&config)
}
