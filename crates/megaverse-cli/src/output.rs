use colored::Colorize;
use megaverse_core::{Cell, Grid, PassReport, Shape};

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

pub fn print_report(title: &str, report: &PassReport) {
    let line = format!(
        "{title}: {} created, {} failed, {} out of bounds, {} ignored",
        report.succeeded, report.failed, report.rejected, report.ignored
    );
    if report.failed == 0 && report.rejected == 0 {
        print_success(&line);
    } else {
        print_error(&line);
    }
}

/// One glyph per cell, row by row.
pub fn print_grid(grid: &Grid) {
    let bounds = grid.bounds();
    println!("{}: {}x{}", "Goal".cyan(), bounds.rows, bounds.columns);
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|label| glyph(&Cell::parse(label))).collect();
        println!("{}", line.join(" "));
    }
}

fn glyph(cell: &Cell) -> String {
    match cell {
        Cell::Space => "·".dimmed().to_string(),
        Cell::Shape(Shape::Polyanet) => "P".bold().to_string(),
        Cell::Shape(Shape::Soloon { color }) => {
            let s = "S";
            match color.as_str() {
                "blue" => s.blue(),
                "red" => s.red(),
                "purple" => s.magenta(),
                _ => s.white(),
            }
            .to_string()
        }
        Cell::Shape(Shape::Cometh { direction }) => match direction.as_str() {
            "up" => "↑",
            "down" => "↓",
            "left" => "←",
            "right" => "→",
            _ => "C",
        }
        .yellow()
        .to_string(),
        Cell::Unrecognized(_) => "?".red().to_string(),
    }
}
