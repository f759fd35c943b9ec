use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use wallpanel_core::{
    validate_wall, OptimizationReport, OptimizationRequest, Optimizer, Orientation, WallIssue,
};

#[derive(Parser)]
#[command(name = "wallpanel")]
#[command(about = "Wall panel planner - panels to buy and how to cut them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute panel placements for every wall of a project
    Optimize {
        /// Project file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Always cut from fresh panels, never from offcuts
        #[arg(long)]
        no_offcuts: bool,
    },

    /// Generate SVG drawing of the walls from a report
    Generate {
        /// Input report file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize {
            input,
            output,
            no_offcuts,
        } => {
            optimize_command(input, output, no_offcuts)?;
        }
        Commands::Generate { input, output } => {
            generate_command(input, output)?;
        }
    }

    Ok(())
}

fn load_request(path: &Path) -> Result<OptimizationRequest> {
    let content = std::fs::read_to_string(path)?;
    let request = match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };
    Ok(request)
}

fn optimize_command(input: PathBuf, output: Option<PathBuf>, no_offcuts: bool) -> Result<()> {
    println!("{}", "🔍 Loading project...".bright_blue());

    let mut request = load_request(&input)?;
    if no_offcuts {
        request.use_offcuts = false;
    }

    println!(
        "  {} walls, {} openings",
        request.walls.len().to_string().bright_white().bold(),
        request
            .walls
            .iter()
            .map(|w| w.openings.len())
            .sum::<usize>()
            .to_string()
            .bright_white()
            .bold()
    );
    println!(
        "  Panel: {} x {} cm",
        request.panel.width, request.panel.height
    );
    println!();

    let mut issue_count = 0;
    for wall in &request.walls {
        for issue in validate_wall(wall) {
            issue_count += 1;
            let message = match issue {
                WallIssue::WallTooWide => {
                    format!("wider than {} cm", wallpanel_core::geometry::MAX_WALL_WIDTH)
                }
                WallIssue::WallTooTall => {
                    format!("taller than {} cm", wallpanel_core::geometry::MAX_WALL_HEIGHT)
                }
                WallIssue::NegativeOpeningPosition { opening_id } => {
                    format!("opening '{}' has a negative position", opening_id)
                }
                WallIssue::OpeningOutOfBounds { opening_id } => {
                    format!("opening '{}' extends past the wall", opening_id)
                }
                WallIssue::OverlappingOpenings { first, second } => {
                    format!("openings '{}' and '{}' overlap", first, second)
                }
            };
            println!("  {} {}: {}", "✗".bright_red(), wall.id.bright_white(), message);
        }
    }
    if issue_count > 0 {
        bail!("{} problem(s) found in the project, fix them first", issue_count);
    }

    println!("{}", "🚀 Running optimization...".bright_blue());

    let optimizer = Optimizer::new(request)?;
    let report = optimizer.optimize()?;

    println!();
    println!("{}", "✅ Optimization complete!".bright_green().bold());
    println!();

    print_report(&report);

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved report to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        let json = serde_json::to_string_pretty(&report)?;
        println!("{}", json);
    }

    Ok(())
}

fn print_report(report: &OptimizationReport) {
    println!("{}", "📊 Results:".bright_yellow().bold());
    println!("  Walls:");
    for wall in &report.walls {
        let orientation = match wall.orientation {
            Orientation::Normal => "upright",
            Orientation::Rotated => "rotated",
        };
        println!(
            "    • {} ({} x {} cm, {}): {} panels, {} offcuts reused",
            wall.display_name().bright_white(),
            wall.width,
            wall.height,
            orientation,
            wall.new_panels,
            wall.offcuts_consumed
        );
    }
    println!();
    println!(
        "  Panels to buy: {}",
        report.new_panels.to_string().bright_white().bold()
    );
    println!(
        "  Useful area: {:.2} m²",
        report.useful_area / 10000.0
    );
    println!(
        "  Waste: {}",
        format!("{:.1}%", report.waste_percentage).bright_white()
    );

    let economy = &report.economy;
    if economy.consumed_count > 0 {
        println!(
            "  Offcuts reused: {} ({:.2} m²)",
            economy.consumed_count.to_string().bright_green(),
            economy.consumed_area / 10000.0
        );
    }
    if economy.available_count > 0 {
        println!(
            "  Offcuts left over: {} ({:.2} m²)",
            economy.available_count.to_string().bright_cyan(),
            economy.available_area / 10000.0
        );
    }

    println!();
}

fn generate_command(input: PathBuf, output: PathBuf) -> Result<()> {
    println!("{}", "🔍 Loading report...".bright_blue());

    let content = std::fs::read_to_string(&input)?;
    let report: OptimizationReport = serde_json::from_str(&content)?;

    println!("{}", "🎨 Generating SVG...".bright_blue());

    let svg = generate_svg(&report)?;
    std::fs::write(&output, svg)?;

    println!();
    println!(
        "{} Saved SVG to {}",
        "✅".bright_green(),
        output.display().to_string().bright_white()
    );

    Ok(())
}

/// Draws every wall with its placements and cut regions, stacked vertically.
/// Report coordinates are bottom-left origin, so y is flipped per wall.
fn generate_svg(report: &OptimizationReport) -> Result<String> {
    use std::fmt::Write;

    let mut svg = String::new();
    let margin = 20.0;
    let scale = 2.0;
    let wall_spacing = 40.0;

    let max_width = report.walls.iter().map(|w| w.width).fold(0.0, f64::max);
    let total_height: f64 = report
        .walls
        .iter()
        .map(|w| w.height / scale + wall_spacing)
        .sum();

    let svg_width = (max_width / scale) + (2.0 * margin);
    let svg_height = total_height + (2.0 * margin);

    writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        &mut svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        svg_width, svg_height, svg_width, svg_height
    )?;
    writeln!(
        &mut svg,
        r##"  <rect width="100%" height="100%" fill="#f5f5f5"/>"##
    )?;

    let mut y_offset = margin + wall_spacing / 2.0;

    for wall in &report.walls {
        let x = margin;
        let wall_width = wall.width / scale;
        let wall_height = wall.height / scale;
        let bottom = y_offset + wall_height;

        writeln!(
            &mut svg,
            r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#fff" stroke="#333" stroke-width="2"/>"##,
            x, y_offset, wall_width, wall_height
        )?;

        writeln!(
            &mut svg,
            r##"  <text x="{}" y="{}" font-family="Arial" font-size="14" fill="#333">{} ({} panels)</text>"##,
            x,
            y_offset - 5.0,
            wall.display_name(),
            wall.new_panels
        )?;

        for (index, placement) in report
            .placements
            .iter()
            .filter(|p| p.wall_id == wall.wall_id)
            .enumerate()
        {
            let px = x + (placement.x / scale);
            let pw = placement.width / scale;
            let ph = placement.height / scale;
            let py = bottom - (placement.y / scale) - ph;

            let (fill, stroke) = if placement.from_offcut() {
                ("#FF9800", "#E65100")
            } else {
                ("#4CAF50", "#2E7D32")
            };

            writeln!(
                &mut svg,
                r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="1" opacity="0.7"/>"##,
                px, py, pw, ph, fill, stroke
            )?;

            for cut in &placement.cuts {
                let cw = cut.width / scale;
                let ch = cut.height / scale;
                let cx = px + (cut.x / scale);
                let cy = py + ph - (cut.y / scale) - ch;
                writeln!(
                    &mut svg,
                    r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#fff" stroke="#C62828" stroke-width="1" stroke-dasharray="3,2"/>"##,
                    cx, cy, cw, ch
                )?;
            }

            let mut label = (index + 1).to_string();
            if placement.orientation == Orientation::Rotated {
                label.push_str(" (R)");
            }
            if placement.needs_trim {
                label.push('*');
            }

            writeln!(
                &mut svg,
                r##"  <text x="{}" y="{}" font-family="Arial" font-size="10" fill="#fff" text-anchor="middle">{}</text>"##,
                px + pw / 2.0,
                py + ph / 2.0 + 3.0,
                label
            )?;
        }

        y_offset = bottom + wall_spacing;
    }

    writeln!(
        &mut svg,
        r##"  <text x="{}" y="{}" font-family="Arial" font-size="12" fill="#666">Panels: {} | Offcuts reused: {} | Waste: {:.1}%</text>"##,
        margin,
        svg_height - 5.0,
        report.new_panels,
        report.offcuts_consumed,
        report.waste_percentage
    )?;

    writeln!(&mut svg, "</svg>")?;

    Ok(svg)
}
