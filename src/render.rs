use std::fmt::Write as _;

use crate::models::{DailyCommitCount, Repository};
use crate::state::AnalysisState;

const TITLE: &str = "GitHub User Profile Analyzer";
const WIDTH: f32 = 720.0;
const PADDING: f32 = 24.0;
const LINE_HEIGHT: f32 = 22.0;
const SECTION_GAP: f32 = 20.0;

const CHART_HEIGHT: f32 = 300.0;
const AXIS_LEFT: f32 = 44.0;
const AXIS_BOTTOM: f32 = 80.0;
const Y_TICKS: u64 = 5;
const BAR_FILL: &str = "#4F46E5";

const TEXT_BAR_WIDTH: u64 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub heading: &'static str,
    pub link: &'static str,
    pub axis: &'static str,
    pub muted: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                heading: "#ffa657",
                link: "#a5d6ff",
                axis: "#8b949e",
                muted: "#616e7f",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                heading: "#d73a49",
                link: "#0366d6",
                axis: "#57606a",
                muted: "#6a737d",
            },
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark_mode.svg",
            Theme::Light => "light_mode.svg",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn button_label(state: &AnalysisState) -> &'static str {
    if state.loading() { "Loading..." } else { "Analyze" }
}

/// Integer tick step so that at most `Y_TICKS` steps cover `max`.
fn tick_step(max: u64) -> u64 {
    max.div_ceil(Y_TICKS).max(1)
}

/// Plain-text view of the analyzer for a terminal.
pub fn render_text(state: &AnalysisState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(
        out,
        "Username: {}  [{}]",
        state.username(),
        button_label(state)
    );

    if !state.repos().is_empty() {
        let _ = writeln!(out, "\nRepositories");
        for repo in state.repos() {
            let _ = writeln!(out, "  • {}  {}", repo.name, repo.url);
        }
    }

    if !state.commits().is_empty() {
        let _ = writeln!(out, "\nDaily Commits");
        let max = state.commits().iter().map(|c| c.count).max().unwrap_or(0);
        for day in state.commits() {
            let len = if max == 0 {
                0
            } else {
                (day.count * TEXT_BAR_WIDTH / max).max(u64::from(day.count > 0))
            };
            let _ = writeln!(
                out,
                "  {} | {} {}",
                day.date,
                "█".repeat(len as usize),
                day.count
            );
        }
    }

    out
}

// SVG sections; each returns its markup and the height it used.

fn svg_repo_list(repos: &[Repository], top: f32) -> (String, f32) {
    let mut out = String::new();
    let mut y = top + LINE_HEIGHT;
    let _ = writeln!(
        out,
        r#"<text x="{PADDING}" y="{y}" class="heading" font-size="18px">Repositories</text>"#
    );

    for repo in repos {
        y += LINE_HEIGHT;
        let _ = writeln!(
            out,
            r#"<a href="{href}" target="_blank" rel="noopener noreferrer"><text x="{x}" y="{y}" class="link">• {name}</text></a>"#,
            href = escape_xml(&repo.url),
            x = PADDING + 8.0,
            name = escape_xml(&repo.name),
        );
    }

    (out, y - top)
}

fn svg_bar_chart(commits: &[DailyCommitCount], top: f32) -> (String, f32) {
    let mut out = String::new();
    let heading_y = top + LINE_HEIGHT;
    let _ = writeln!(
        out,
        r#"<text x="{PADDING}" y="{heading_y}" class="heading" font-size="18px">Daily Commits</text>"#
    );

    let plot_top = heading_y + SECTION_GAP;
    let plot_left = PADDING + AXIS_LEFT;
    let plot_width = WIDTH - plot_left - PADDING;
    let plot_height = CHART_HEIGHT - AXIS_BOTTOM;
    let baseline = plot_top + plot_height;

    let max = commits.iter().map(|c| c.count).max().unwrap_or(0);
    let step = tick_step(max);
    let axis_max = (max.div_ceil(step) * step).max(step);
    let scale = plot_height / axis_max as f32;

    // y axis with integer ticks
    let _ = writeln!(
        out,
        r#"<line x1="{plot_left}" y1="{plot_top}" x2="{plot_left}" y2="{baseline}" class="axis"/>"#
    );
    let mut tick = 0;
    while tick <= axis_max {
        let ty = baseline - tick as f32 * scale;
        let _ = writeln!(
            out,
            r#"<line x1="{x1}" y1="{ty}" x2="{plot_left}" y2="{ty}" class="axis"/><text x="{tx}" y="{ly}" class="muted" font-size="12px" text-anchor="end">{tick}</text>"#,
            x1 = plot_left - 5.0,
            tx = plot_left - 8.0,
            ly = ty + 4.0,
        );
        tick += step;
    }

    // x axis
    let _ = writeln!(
        out,
        r#"<line x1="{plot_left}" y1="{baseline}" x2="{x2}" y2="{baseline}" class="axis"/>"#,
        x2 = plot_left + plot_width
    );

    let slot = plot_width / commits.len() as f32;
    let bar_width = slot * 0.8;
    for (i, day) in commits.iter().enumerate() {
        let x = plot_left + slot * i as f32 + (slot - bar_width) / 2.0;
        let h = day.count as f32 * scale;
        let date = escape_xml(&day.date);
        let _ = writeln!(
            out,
            r#"<rect x="{x}" y="{y}" width="{bar_width}" height="{h}" fill="{BAR_FILL}"><title>{date}: {count}</title></rect>"#,
            y = baseline - h,
            count = day.count,
        );

        let lx = x + bar_width / 2.0;
        let ly = baseline + 14.0;
        let _ = writeln!(
            out,
            r#"<text x="{lx}" y="{ly}" class="muted" font-size="12px" text-anchor="end" transform="rotate(-45 {lx} {ly})">{date}</text>"#
        );
    }

    (out, plot_top - top + CHART_HEIGHT)
}

/// Standalone SVG card: title, input line, repository links and commit chart.
pub fn render_svg(state: &AnalysisState, theme: Theme) -> String {
    let colors = theme.colors();

    let mut body = String::new();
    let mut y = PADDING + LINE_HEIGHT;
    let _ = writeln!(
        body,
        r#"<text x="{PADDING}" y="{y}" class="heading" font-size="22px" font-weight="bold">{TITLE}</text>"#
    );

    y += LINE_HEIGHT + 8.0;
    let _ = writeln!(
        body,
        r#"<text x="{PADDING}" y="{y}">Username: <tspan class="link">{user}</tspan><tspan class="muted">  [{button}]</tspan></text>"#,
        user = escape_xml(state.username()),
        button = button_label(state),
    );

    if !state.repos().is_empty() {
        let (markup, used) = svg_repo_list(state.repos(), y + SECTION_GAP);
        body.push_str(&markup);
        y += SECTION_GAP + used;
    }

    if !state.commits().is_empty() {
        let (markup, used) = svg_bar_chart(state.commits(), y + SECTION_GAP);
        body.push_str(&markup);
        y += SECTION_GAP + used;
    }

    let h = y + PADDING;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.heading {{ fill: {heading}; }}
.link    {{ fill: {link}; }}
.muted   {{ fill: {muted}; }}
.axis    {{ stroke: {axis}; stroke-width: 1; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<g fill="{text}">
{body}</g>

</svg>
"#,
        w = WIDTH,
        h = h,
        bg = colors.bg,
        text = colors.text,
        heading = colors.heading,
        link = colors.link,
        muted = colors.muted,
        axis = colors.axis,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn octocat_state() -> AnalysisState {
        let mut s = AnalysisState::default();
        s.set_username("octocat");
        s.set_repos(vec![
            Repository {
                id: 1,
                name: "Hello-World".into(),
                url: "https://github.com/octocat/Hello-World".into(),
            },
            Repository {
                id: 2,
                name: "Spoon-Knife".into(),
                url: "https://github.com/octocat/Spoon-Knife".into(),
            },
        ]);
        s.set_commits(vec![
            DailyCommitCount::new("2024-01-01", 5),
            DailyCommitCount::new("2024-01-02", 1),
        ]);
        s
    }

    #[test]
    fn text_lists_repos_in_order_and_bars() {
        let text = render_text(&octocat_state());
        let expected = "\
GitHub User Profile Analyzer
Username: octocat  [Analyze]

Repositories
  • Hello-World  https://github.com/octocat/Hello-World
  • Spoon-Knife  https://github.com/octocat/Spoon-Knife

Daily Commits
  2024-01-01 | ████████████████████████████████████████ 5
  2024-01-02 | ████████ 1
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut s = AnalysisState::default();
        s.set_username("ghost");
        s.set_loading(true);

        let text = render_text(&s);
        assert_eq!(
            text,
            "GitHub User Profile Analyzer\nUsername: ghost  [Loading...]\n"
        );

        let svg = render_svg(&s, Theme::Dark);
        assert!(!svg.contains("Repositories"));
        assert!(!svg.contains("Daily Commits"));
        assert!(svg.contains("Loading..."));
    }

    #[test]
    fn svg_links_open_in_new_context() {
        let svg = render_svg(&octocat_state(), Theme::Light);
        let links: Vec<_> = svg.match_indices("<a href=").collect();
        assert_eq!(links.len(), 2);
        assert!(svg.contains(
            r#"<a href="https://github.com/octocat/Hello-World" target="_blank" rel="noopener noreferrer">"#
        ));
        let first = svg.find("Hello-World</text>").unwrap();
        let second = svg.find("Spoon-Knife</text>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn svg_chart_has_one_bar_per_day_and_rotated_labels() {
        let svg = render_svg(&octocat_state(), Theme::Dark);
        assert_eq!(svg.matches(&format!(r#"fill="{BAR_FILL}""#)).count(), 2);
        assert_eq!(svg.matches("rotate(-45").count(), 2);
        assert!(svg.contains("<title>2024-01-01: 5</title>"));
        // No fractional tick labels.
        assert!(!svg.contains(">0.5<"));
    }

    #[test]
    fn all_zero_series_renders_flat_chart() {
        let mut s = AnalysisState::default();
        s.set_username("idle");
        s.set_commits(vec![
            DailyCommitCount::new("2024-01-03", 0),
            DailyCommitCount::new("2024-01-04", 0),
        ]);

        let text = render_text(&s);
        assert!(text.contains("  2024-01-03 |  0\n"));
        assert!(text.contains("  2024-01-04 |  0\n"));

        let svg = render_svg(&s, Theme::Dark);
        assert_eq!(svg.matches(&format!(r#"fill="{BAR_FILL}""#)).count(), 2);
        assert!(svg.contains(r#"height="0""#));
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
        // Axis still spans one whole step: ticks 0 and 1.
        assert!(svg.contains(">0</text>"));
        assert!(svg.contains(">1</text>"));
    }

    #[test]
    fn tick_step_is_integral() {
        assert_eq!(tick_step(0), 1);
        assert_eq!(tick_step(1), 1);
        assert_eq!(tick_step(5), 1);
        assert_eq!(tick_step(6), 2);
        assert_eq!(tick_step(23), 5);
    }

    #[test]
    fn user_text_is_escaped() {
        let mut s = AnalysisState::default();
        s.set_username("<script>");
        s.set_repos(vec![Repository {
            id: 1,
            name: "a&b".into(),
            url: "https://x/\"q\"".into(),
        }]);

        let svg = render_svg(&s, Theme::Dark);
        assert!(svg.contains("&lt;script&gt;"));
        assert!(svg.contains("a&amp;b"));
        assert!(svg.contains("https://x/&quot;q&quot;"));
    }
}
