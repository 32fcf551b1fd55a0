//! Frame Solver Example - Simple Portal Frame
//!
//! Prints a report, or the full results as JSON when run with `--json`.
//! Set `RUST_LOG=debug` to see the solver stages.

use anyhow::Context;
use frame_solver::prelude::*;

fn build_portal_frame(pinned_beam: bool) -> anyhow::Result<FrameModel> {
    // Steel, W12x26 (approximate properties, SI)
    let e = 200e9;
    let a = 0.00494;
    let i = 8.49e-5;

    //     N3 -------- N4
    //     |          |
    //     |          |
    //     N1        N2
    //   Fixed     Fixed
    let height = 4.0;
    let span = 6.0;

    let mut model = FrameModel::new();
    let n1 = model.add_node(Node::new(0.0, 0.0));
    let n2 = model.add_node(Node::new(span, 0.0));
    let n3 = model.add_node(Node::new(0.0, height));
    let n4 = model.add_node(Node::new(span, height));

    let beam_releases = if pinned_beam {
        EndReleases::pin_both()
    } else {
        EndReleases::none()
    };

    model.add_element(FrameElement::new(n1, n3, e, a, i))?;
    model.add_element(FrameElement::new(n2, n4, e, a, i))?;
    model.add_element(FrameElement::new(n3, n4, e, a, i).with_releases(beam_releases))?;

    model.add_support(n1, Support::fixed())?;
    model.add_support(n2, Support::fixed())?;

    // 20 kN/m on the beam lumped to its ends, plus 10 kN lateral at roof level
    model.add_node_load(n3, NodeLoad::force(10000.0, -span * 20000.0 / 2.0))?;
    model.add_node_load(n4, NodeLoad::fy(-span * 20000.0 / 2.0))?;

    Ok(model)
}

fn print_report(title: &str, model: &FrameModel, results: &AnalysisResults) -> anyhow::Result<()> {
    println!("=== {title} ===\n");

    println!("Node Displacements:");
    for index in 0..model.nodes.len() {
        let disp = results.node_displacement(NodeId(index))?;
        println!(
            "  N{}: DX={:.4}mm, DY={:.4}mm, RZ={:.6}rad",
            index + 1,
            disp.dx * 1000.0,
            disp.dy * 1000.0,
            disp.rz
        );
    }

    println!("\nSupport Reactions:");
    for &node in model.supports.keys() {
        let rxn = results.node_reactions(node)?;
        println!(
            "  N{}: FX={:.2}kN, FY={:.2}kN, MZ={:.2}kN·m",
            node.index() + 1,
            rxn.fx / 1000.0,
            rxn.fy / 1000.0,
            rxn.mz / 1000.0
        );
    }

    println!("\nMember Forces:");
    for (index, name) in ["Col1", "Col2", "Beam"].iter().enumerate() {
        let start = results.member_forces_start(index)?;
        let end = results.member_forces_end(index)?;
        println!(
            "  {}: P={:.2}kN, V={:.2}kN, M1={:.2}kN·m, M2={:.2}kN·m",
            name,
            start.axial / 1000.0,
            start.shear / 1000.0,
            start.moment / 1000.0,
            end.moment / 1000.0
        );
    }

    let summary = &results.summary;
    println!("\nSummary:");
    println!(
        "  Max displacement: {:.4}mm at N{}",
        summary.max_displacement * 1000.0,
        summary.max_disp_node + 1
    );
    println!(
        "  Max reaction: {:.2}kN at N{}",
        summary.max_reaction / 1000.0,
        summary.max_reaction_node + 1
    );
    println!("  Free DOFs: {} of {}", summary.free_dofs, summary.total_dofs);
    println!(
        "  Equilibrium residual: {:.2e}\n",
        results.equilibrium.relative_residual()
    );

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let json = std::env::args().any(|arg| arg == "--json");

    let rigid = build_portal_frame(false)?;
    let rigid_results = rigid
        .analyze_linear()
        .context("rigid portal frame analysis failed")?;

    // Pinned beam ends, condensed so the beam end moments vanish
    let pinned = build_portal_frame(true)?;
    let pinned_results = pinned
        .analyze(&AnalysisOptions::linear().with_condensation())
        .context("pinned-beam portal frame analysis failed")?;

    if json {
        let output = serde_json::json!({
            "rigid": rigid_results,
            "pinned_beam": pinned_results,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("=== Frame Solver Example: Portal Frame ===\n");
    print_report("Rigid joints", &rigid, &rigid_results)?;
    print_report("Pinned beam (condensed releases)", &pinned, &pinned_results)?;

    println!("=== Analysis Complete ===");
    Ok(())
}
