//! List command implementation.
//!
//! Prints an inventory of the theme: colour classes with the custom
//! properties behind them, keyframes, and animations.

use clap::Args;

use super::ProjectArgs;
use crate::error::Result;
use crate::output::Printer;
use crate::types::ThemeConfig;

/// List colours, keyframes and animations
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let project = args.project.resolve()?;
    for (label, entries) in inventory(&project.config) {
        if entries.is_empty() {
            continue;
        }
        printer.info(label, &entries.join(", "));
    }
    Ok(())
}

/// Inventory groups in display order.
pub fn inventory(config: &ThemeConfig) -> Vec<(&'static str, Vec<String>)> {
    let colors: Vec<String> = config
        .color_utilities()
        .into_iter()
        .map(|(suffix, color)| match color.var_name() {
            Some(var) => format!("{} ({})", suffix, var),
            None => format!("{} ({})", suffix, color),
        })
        .collect();

    let keyframes: Vec<String> = config
        .keyframes()
        .iter()
        .map(|(name, keyframe)| format!("{} ({} steps)", name, keyframe.len()))
        .collect();

    let animations: Vec<String> = config
        .animations()
        .iter()
        .map(|(name, value)| {
            let duration = config
                .animation(name)
                .and_then(|parsed| parsed.ok())
                .and_then(|list| list.first().and_then(|a| a.duration()));
            match duration {
                Some(d) => format!("{} ({}ms)", name, d.as_millis()),
                None => format!("{} ({})", name, value),
            }
        })
        .collect();

    vec![
        ("Content", config.content.clone()),
        ("Dark mode", vec![config.dark_mode.to_string()]),
        ("Colours", colors),
        ("Keyframes", keyframes),
        ("Animations", animations),
        ("Plugins", config.plugins.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inventory_builtin() {
        let config = ThemeConfig::builtin();
        let groups = inventory(&config);

        let labels: Vec<&str> = groups.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec!["Content", "Dark mode", "Colours", "Keyframes", "Animations", "Plugins"]
        );

        let (_, colors) = &groups[2];
        assert_eq!(colors[0], "container (--container)");
        assert!(colors.contains(&"primary-on (--primary-on)".to_string()));

        let (_, animations) = &groups[4];
        assert_eq!(animations[0], "slide-in-up (200ms)");
        assert_eq!(animations[1], "slide-out-left (150ms)");

        let (_, keyframes) = &groups[3];
        assert_eq!(keyframes[4], "fade-in (2 steps)");
    }

    #[test]
    fn test_inventory_unrepresentable_duration() {
        let mut config = ThemeConfig::builtin();
        config.theme.extend.animation.insert(
            "forever".to_string(),
            "fade-in 99999999999999999999999999s".to_string(),
        );

        let groups = inventory(&config);
        let (_, animations) = &groups[4];
        assert!(animations.contains(&"forever (fade-in 99999999999999999999999999s)".to_string()));
    }

    #[test]
    fn test_run_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let args = ListArgs {
            project: ProjectArgs {
                path: dir.path().to_path_buf(),
                config: None,
                builtin: true,
            },
        };
        assert!(run(args, &Printer::quiet()).is_ok());
    }
}
