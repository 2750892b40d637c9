//! The rip-up loop: score, select, re-route, repeat until clean.

use crate::error::RoutingError;
use crate::maze_router;
use crate::routing::Routing;
use crate::violation::{self, net_to_wire_and_violation};
use log::{info, warn};
use rand::Rng;
use redpnr_common::{BlockIds, Dimensions, Grid3};
use std::collections::HashMap;

/// Weights for `score_routing`, and the loop's termination knobs.
#[derive(Clone, Copy, Debug)]
pub struct RipUpConfig {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub norm_margin: f64,
    /// The source this loop is ported from has no iteration cap; this
    /// port adds one and reports non-convergence instead of looping
    /// forever.
    pub max_iterations: u32,
}

impl Default for RipUpConfig {
    fn default() -> Self {
        Self {
            alpha: 3.0,
            beta: 0.1,
            gamma: 1.0,
            norm_margin: 0.1,
            max_iterations: 1000,
        }
    }
}

/// The outcome of running the rip-up loop to completion, cancellation, or
/// the iteration cap.
pub struct RipUpOutcome {
    pub routing: Routing,
    pub converged: bool,
    pub iterations: u32,
}

/// Per-voxel occupancy: the placed layout's non-empty voxels, OR-ed with
/// every segment's wire grid except those in `exclude`.
pub fn generate_usage_matrix(
    layout: &Grid3<u8>,
    routing: &Routing,
    exclude: &[(String, usize)],
) -> Grid3<bool> {
    let dims = layout.dims();
    let mut usage: Grid3<bool> = Grid3::new(dims);
    for (coord, &block) in layout.iter() {
        if block != 0 {
            *usage.get_mut(coord).unwrap() = true;
        }
    }

    for (net_name, net_routing) in routing {
        for (i, segment) in net_routing.segments.iter().enumerate() {
            if exclude.iter().any(|(n, idx)| n == net_name && *idx == i) {
                continue;
            }
            for (coord, &block) in segment.wire.iter() {
                if block != 0 {
                    *usage.get_mut(coord).unwrap() = true;
                }
            }
        }
    }

    usage
}

/// Score every segment: `alpha*violations + beta*(vias - pins) +
/// gamma*(length / lower_bound)`, with `vias = 0`, `pins = 2`,
/// `lower_bound = max(1, manhattan(a, b))`.
///
/// Returns `(scores, violation_counts)`, both keyed the same way as
/// `routing`.
pub fn score_routing(
    routing: &Routing,
    usage: &Grid3<bool>,
    config: &RipUpConfig,
) -> (HashMap<String, Vec<f64>>, HashMap<String, Vec<u64>>) {
    let mut scores = HashMap::new();
    let mut violation_counts = HashMap::new();

    for (net_name, net_routing) in routing {
        let mut net_scores = Vec::with_capacity(net_routing.segments.len());
        let mut net_violations = Vec::with_capacity(net_routing.segments.len());

        for segment in &net_routing.segments {
            let violations = violation::violations(&segment.violation, usage);
            net_violations.push(violations);

            let vias = 0.0;
            let pins = 2.0;
            let lower_bound = 1.max(segment.pins.0.manhattan(segment.pins.1)) as f64;
            let length_ratio = segment.path.len() as f64 / lower_bound;

            let score = config.alpha * violations as f64 + config.beta * (vias - pins) + config.gamma * length_ratio;
            net_scores.push(score);
        }

        scores.insert(net_name.clone(), net_scores);
        violation_counts.insert(net_name.clone(), net_violations);
    }

    (scores, violation_counts)
}

/// Min-max scale every score into `[norm_margin, 1 - norm_margin]`. If
/// every score is identical there is nothing to scale by, so every
/// normalized score is set to the midpoint `0.5` rather than dividing by
/// zero.
pub fn normalize_net_scores(
    scores: &HashMap<String, Vec<f64>>,
    norm_margin: f64,
) -> HashMap<String, Vec<f64>> {
    let all_scores: Vec<f64> = scores.values().flatten().copied().collect();
    if all_scores.is_empty() {
        return HashMap::new();
    }

    let min_score = all_scores.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_score = all_scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let norm_range = 1.0 - 2.0 * norm_margin;
    let scale = if (max_score - min_score).abs() < f64::EPSILON {
        None
    } else {
        Some(norm_range / (max_score - min_score))
    };

    scores
        .iter()
        .map(|(net_name, net_scores)| {
            let normalized = net_scores
                .iter()
                .map(|&s| match scale {
                    Some(scale) => norm_margin + (s - min_score) * scale,
                    None => 0.5,
                })
                .collect();
            (net_name.clone(), normalized)
        })
        .collect()
}

/// Independently for each segment, draw `u ~ Uniform(0, 1)` and select it
/// for rip-up if `u < normalized_score`.
pub fn natural_selection(
    normalized_scores: &HashMap<String, Vec<f64>>,
    rng: &mut impl Rng,
) -> Vec<(String, usize)> {
    let mut selected = Vec::new();
    for (net_name, scores) in normalized_scores {
        for (i, &score) in scores.iter().enumerate() {
            let u: f64 = rng.gen();
            if u < score {
                selected.push((net_name.clone(), i));
            }
        }
    }
    selected
}

fn total_violations(violation_counts: &HashMap<String, Vec<u64>>) -> u64 {
    violation_counts.values().flatten().sum()
}

/// Run the rip-up loop: score the routing, stochastically select segments
/// to discard, re-route them with the maze router, and repeat until no
/// violations remain, the iteration cap is hit, or `cancel()` returns
/// `true`. Cancellation is cooperative and not an error: the best routing
/// computed so far is returned regardless of remaining violations.
pub fn rip_up_and_reroute(
    initial_routing: Routing,
    layout: &Grid3<u8>,
    dims: Dimensions,
    ids: BlockIds,
    config: &RipUpConfig,
    rng: &mut impl Rng,
    cancel: &dyn Fn() -> bool,
) -> RipUpOutcome {
    let mut routing = initial_routing;
    let mut usage = generate_usage_matrix(layout, &routing, &[]);
    let (mut scores, mut violation_counts) = score_routing(&routing, &usage, config);
    let mut num_violations = total_violations(&violation_counts);
    let mut iterations = 0;

    while num_violations > 0 {
        if cancel() {
            info!("rip-up loop cancelled after {} iterations, {} violations remain", iterations, num_violations);
            return RipUpOutcome { routing, converged: false, iterations };
        }
        if iterations >= config.max_iterations {
            warn!("rip-up loop did not converge after {} iterations, {} violations remain", iterations, num_violations);
            return RipUpOutcome { routing, converged: false, iterations };
        }

        info!("rip-up iteration {}: {} violations", iterations, num_violations);

        let normalized = normalize_net_scores(&scores, config.norm_margin);
        let mut rip_up = natural_selection(&normalized, rng);

        usage = generate_usage_matrix(layout, &routing, &rip_up);

        // Worst offenders first, so later re-routes in this iteration see
        // the freshly re-routed wire of the earlier ones.
        rip_up.sort_by(|(na, ia), (nb, ib)| {
            let sa = normalized[na][*ia];
            let sb = normalized[nb][*ib];
            sb.partial_cmp(&sa).unwrap()
        });

        info!("re-routing {} segments", rip_up.len());
        for (net_name, index) in &rip_up {
            let (a, b) = routing[net_name].segments[*index].pins;
            match maze_router::route(a, b, dims, &usage) {
                Some(new_path) => {
                    let (wire, violation) = net_to_wire_and_violation(&new_path, dims, &[a, b], ids);
                    for (coord, &block) in wire.iter() {
                        if block != 0 {
                            *usage.get_mut(coord).unwrap() = true;
                        }
                    }
                    let segment = &mut routing.get_mut(net_name).unwrap().segments[*index];
                    segment.path = new_path;
                    segment.wire = wire;
                    segment.violation = violation;
                }
                None => {
                    let err = RoutingError::UnreachableEndpoints { a, b };
                    warn!("segment {}[{}]: {}; keeping previous path", net_name, index, err);
                }
            }
        }

        let rescored = score_routing(&routing, &usage, config);
        scores = rescored.0;
        violation_counts = rescored.1;
        num_violations = total_violations(&violation_counts);
        iterations += 1;
    }

    RipUpOutcome { routing, converged: true, iterations }
}
