//! Output formatting for route rendering.
//!
//! Text, rich and compact output come straight from the library renderer;
//! the enhanced format adds colored route badges; JSON serialises the
//! summary as-is.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use wayfarer_lib::{NavigationStep, RoutePlan, RouteRenderMode, RouteSummary};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Numbered plain-text steps.
    #[default]
    Text,
    /// Markdown.
    Rich,
    /// One line per alternative.
    Compact,
    /// Colored badges, when the terminal allows it.
    Enhanced,
    Json,
}

impl OutputFormat {
    /// Library render mode backing this format, if it is a textual one.
    pub fn render_mode(self) -> Option<RouteRenderMode> {
        match self {
            OutputFormat::Text => Some(RouteRenderMode::PlainText),
            OutputFormat::Rich => Some(RouteRenderMode::RichText),
            OutputFormat::Compact => Some(RouteRenderMode::Compact),
            OutputFormat::Enhanced | OutputFormat::Json => None,
        }
    }

    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }

    /// Print every alternative of a summary to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization or writing fails.
    pub fn render_route(self, summary: &RouteSummary) -> io::Result<()> {
        match self {
            OutputFormat::Json => render_json(summary),
            OutputFormat::Enhanced => {
                print!("{}", render_enhanced(summary, &ColorPalette::detect()));
                Ok(())
            }
            OutputFormat::Text | OutputFormat::Rich | OutputFormat::Compact => {
                let mode = self.render_mode().unwrap_or(RouteRenderMode::PlainText);
                print!("{}", summary.render(mode));
                Ok(())
            }
        }
    }

    /// Report a plan without any path.
    ///
    /// JSON output still prints the plan so scripts get both endpoints and
    /// an empty `paths` array.
    pub fn render_no_route(self, plan: &RoutePlan) -> io::Result<()> {
        if self.is_json() {
            render_json(plan)
        } else {
            println!("{}", no_route_message(plan));
            Ok(())
        }
    }
}

/// `No route found between A and B.`
pub fn no_route_message(plan: &RoutePlan) -> String {
    format!(
        "No route found between {} and {}.",
        plan.start.name, plan.goal.name
    )
}

/// Write any serialisable value to stdout as pretty JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Render a summary with colored route badges.
pub fn render_enhanced(summary: &RouteSummary, palette: &ColorPalette) -> String {
    let p = palette;
    let mut buffer = String::new();
    for (i, path) in summary.paths.iter().enumerate() {
        if i > 0 {
            buffer.push('\n');
        }
        let _ = writeln!(
            buffer,
            "{}Route {}{}: {}{}{} → {}{}{}  {}{}{}",
            p.white_bold,
            path.index,
            p.reset,
            p.white_bold,
            summary.start,
            p.reset,
            p.white_bold,
            summary.goal,
            p.reset,
            p.cyan,
            path.headline(&summary.units),
            p.reset
        );
        for step in &path.steps {
            match step {
                NavigationStep::Start { name } => {
                    let _ = writeln!(
                        buffer,
                        "  {}●{} {}{}{}",
                        p.gray, p.reset, p.white_bold, name, p.reset
                    );
                }
                NavigationStep::Follow(follow) => {
                    let _ = writeln!(
                        buffer,
                        "  {}{:^6}{} {} {}{}{}",
                        p.badge(follow.badge.tone),
                        follow.badge.label,
                        p.reset,
                        follow.route,
                        p.gray,
                        follow.details(&summary.units),
                        p.reset
                    );
                }
                NavigationStep::Arrive { name } => {
                    let _ = writeln!(
                        buffer,
                        "  {}◆{} {}{}{}",
                        p.gray, p.reset, p.white_bold, name, p.reset
                    );
                }
            }
        }
    }
    buffer
}
