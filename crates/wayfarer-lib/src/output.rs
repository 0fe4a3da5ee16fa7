use std::fmt::Write;

use serde::Serialize;

use crate::config::UnitConfig;
use crate::error::{Error, Result};
use crate::map::{CellId, RouteClass, RouteMap};
use crate::routing::RoutePlan;
use crate::segments::{Path, RouteSegment};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
    Compact,
}

/// Colour family of a route badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Green,
    Red,
    Yellow,
    Gray,
}

impl BadgeTone {
    pub fn for_class(class: RouteClass) -> Self {
        match class {
            RouteClass::Highway => BadgeTone::Green,
            RouteClass::Secondary => BadgeTone::Red,
            RouteClass::Tertiary => BadgeTone::Yellow,
            _ => BadgeTone::Gray,
        }
    }
}

/// Short route marker shown in navigation steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteBadge {
    pub label: String,
    pub tone: BadgeTone,
}

impl RouteBadge {
    /// Badge for a route: the first four characters of its name, upper-cased.
    pub fn new(route_name: &str, class: RouteClass) -> Self {
        let prefix: String = route_name.trim().chars().take(4).collect();
        Self {
            label: prefix.trim_end().to_uppercase(),
            tone: BadgeTone::for_class(class),
        }
    }
}

/// One "follow this route" instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowStep {
    pub badge: RouteBadge,
    pub route: String,
    pub class: RouteClass,
    pub distance: f64,
    pub time_hours: f64,
    pub toll: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub passing_through: Vec<String>,
}

impl FollowStep {
    fn from_segment(segment: &RouteSegment) -> Self {
        Self {
            badge: RouteBadge::new(&segment.name, segment.class),
            route: segment.name.clone(),
            class: segment.class,
            distance: segment.distance,
            time_hours: segment.time_hours,
            toll: segment.toll,
            passing_through: segment.settlements.clone(),
        }
    }

    /// Text following the badge: distance, time, toll, and settlements.
    pub fn details(&self, units: &UnitConfig) -> String {
        let mut buffer = format!(
            "for {} {}",
            format_distance(self.distance),
            units.distance_unit
        );
        if round_minutes(self.time_hours) > 0 {
            let _ = write!(buffer, " ({})", format_duration(self.time_hours));
        }
        if self.toll > 0.0 {
            let _ = write!(buffer, " [{}]", format_money(self.toll, &units.currency));
        }
        if !self.passing_through.is_empty() {
            let _ = write!(
                buffer,
                " (passing through {})",
                self.passing_through.join(", ")
            );
        }
        buffer
    }
}

/// Turn-by-turn instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationStep {
    Start { name: String },
    Follow(FollowStep),
    Arrive { name: String },
}

impl NavigationStep {
    /// Plain one-line description of the step.
    pub fn describe(&self, units: &UnitConfig) -> String {
        match self {
            NavigationStep::Start { name } => format!("Start at {name}"),
            NavigationStep::Follow(step) => {
                format!("Follow {} {}", step.badge.label, step.details(units))
            }
            NavigationStep::Arrive { name } => format!("Arrive at {name}"),
        }
    }
}

/// One alternative, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSummary {
    /// 1-based position among the alternatives.
    pub index: usize,
    pub cells: Vec<CellId>,
    pub hops: usize,
    pub distance: f64,
    pub time_hours: f64,
    pub toll: f64,
    pub steps: Vec<NavigationStep>,
}

impl PathSummary {
    fn from_path(index: usize, start: &str, goal: &str, path: &Path) -> Self {
        let mut steps = Vec::with_capacity(path.segments.len() + 2);
        steps.push(NavigationStep::Start {
            name: start.to_string(),
        });
        steps.extend(
            path.segments
                .iter()
                .map(|segment| NavigationStep::Follow(FollowStep::from_segment(segment))),
        );
        steps.push(NavigationStep::Arrive {
            name: goal.to_string(),
        });

        Self {
            index,
            cells: path.cells.clone(),
            hops: path.hop_count(),
            distance: path.distance,
            time_hours: path.time_hours,
            toll: path.toll,
            steps,
        }
    }

    pub fn follow_steps(&self) -> impl Iterator<Item = &FollowStep> {
        self.steps.iter().filter_map(|step| match step {
            NavigationStep::Follow(follow) => Some(follow),
            _ => None,
        })
    }

    /// `88 km • 44m • €0.48`, toll omitted when zero.
    pub fn headline(&self, units: &UnitConfig) -> String {
        let mut buffer = format!(
            "{} {} • {}",
            format_distance(self.distance),
            units.distance_unit,
            format_duration(self.time_hours)
        );
        if self.toll > 0.0 {
            let _ = write!(buffer, " • {}", format_money(self.toll, &units.currency));
        }
        buffer
    }
}

/// Structured representation of a plan that higher-level consumers can serialise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub start: String,
    pub goal: String,
    pub units: UnitConfig,
    pub paths: Vec<PathSummary>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with navigation steps.
    ///
    /// Plans without paths are rejected; callers report "no route" themselves.
    pub fn from_plan(map: &RouteMap, plan: &RoutePlan) -> Result<Self> {
        if plan.paths.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let paths = plan
            .paths
            .iter()
            .enumerate()
            .map(|(i, path)| PathSummary::from_path(i + 1, &plan.start.name, &plan.goal.name, path))
            .collect();

        Ok(Self {
            start: plan.start.name.clone(),
            goal: plan.goal.name.clone(),
            units: map.units.clone(),
            paths,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
            RouteRenderMode::Compact => self.render_compact(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                buffer.push('\n');
            }
            let _ = writeln!(
                buffer,
                "Route {}: {} -> {} ({})",
                path.index,
                self.start,
                self.goal,
                path.headline(&self.units)
            );
            for (n, step) in path.steps.iter().enumerate() {
                let _ = writeln!(buffer, "{:>3}. {}", n + 1, step.describe(&self.units));
            }
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        for path in &self.paths {
            let _ = writeln!(
                buffer,
                "**Route {}**: _{} → {}_ ({})",
                path.index,
                self.start,
                self.goal,
                path.headline(&self.units)
            );
            for (n, step) in path.steps.iter().enumerate() {
                let text = match step {
                    NavigationStep::Start { name } => format!("**Start at {name}**"),
                    NavigationStep::Follow(follow) => format!(
                        "Follow `{}` {}",
                        follow.badge.label,
                        follow.details(&self.units)
                    ),
                    NavigationStep::Arrive { name } => format!("**Arrive at {name}**"),
                };
                let _ = writeln!(buffer, "{}. {}", n + 1, text);
            }
            buffer.push('\n');
        }
        buffer
    }

    fn render_compact(&self) -> String {
        let mut buffer = String::new();
        for path in &self.paths {
            let badges = path
                .follow_steps()
                .map(|step| step.badge.label.as_str())
                .collect::<Vec<_>>()
                .join(" > ");
            let _ = writeln!(
                buffer,
                "Route {}: {} | {}",
                path.index,
                path.headline(&self.units),
                badges
            );
        }
        buffer
    }
}

fn round_minutes(hours: f64) -> u64 {
    (hours.max(0.0) * 60.0).round() as u64
}

/// Format a duration as `Xh Ym`, or `Ym` below one hour.
pub fn format_duration(hours: f64) -> String {
    let minutes = round_minutes(hours);
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

/// Distances are shown rounded to whole units.
pub fn format_distance(distance: f64) -> String {
    format!("{}", distance.round() as i64)
}

pub fn format_money(amount: f64, currency: &str) -> String {
    format!("{currency}{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_round_to_minutes() {
        assert_eq!(format_duration(0.7333), "44m");
        assert_eq!(format_duration(2.0), "2h 0m");
        assert_eq!(format_duration(1.5), "1h 30m");
        assert_eq!(format_duration(0.999), "1h 0m");
        assert_eq!(format_duration(0.0), "0m");
    }

    #[test]
    fn badges_take_four_upper_case_characters() {
        let badge = RouteBadge::new("Kingsway", RouteClass::Highway);
        assert_eq!(badge.label, "KING");
        assert_eq!(badge.tone, BadgeTone::Green);
        assert_eq!(RouteBadge::new("A1", RouteClass::Trail).label, "A1");
        assert_eq!(BadgeTone::for_class(RouteClass::Secondary), BadgeTone::Red);
        assert_eq!(BadgeTone::for_class(RouteClass::Tertiary), BadgeTone::Yellow);
        assert_eq!(BadgeTone::for_class(RouteClass::SeaRoute), BadgeTone::Gray);
    }

    #[test]
    fn follow_step_text_omits_empty_parts() {
        let units = UnitConfig::default();
        let step = FollowStep {
            badge: RouteBadge::new("Old Pilgrim Trail", RouteClass::Trail),
            route: "Old Pilgrim Trail".to_string(),
            class: RouteClass::Trail,
            distance: 0.2,
            time_hours: 0.001,
            toll: 0.0,
            passing_through: Vec::new(),
        };
        assert_eq!(
            NavigationStep::Follow(step).describe(&units),
            "Follow OLD for 0 km"
        );
    }

    #[test]
    fn follow_step_text_includes_toll_and_settlements() {
        let units = UnitConfig::default();
        let step = FollowStep {
            badge: RouteBadge::new("Kingsway", RouteClass::Highway),
            route: "Kingsway".to_string(),
            class: RouteClass::Highway,
            distance: 88.0,
            time_hours: 88.0 / 120.0,
            toll: 0.484,
            passing_through: vec!["Marrow".to_string()],
        };
        assert_eq!(
            NavigationStep::Follow(step).describe(&units),
            "Follow KING for 88 km (44m) [€0.48] (passing through Marrow)"
        );
    }
}
