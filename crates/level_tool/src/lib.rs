use std::env;
use std::fs;
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use level_engine::{
    load_level, parse_inclusive_span, parse_steps, save_level, IdKind, IntervalSet, Level,
    RemapReport, SaveOptions, SourceTargetRange,
};
use tracing::info;

pub const IGNORE_ENV_VAR: &str = "LEVEL_TOOL_IGNORE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOptions {
    pub dry_run: bool,
    pub output: Option<PathBuf>,
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Migrate {
        level_path: PathBuf,
        kind: IdKind,
        steps: Vec<SourceTargetRange>,
        steps_file: Option<PathBuf>,
    },
    Compact {
        level_path: PathBuf,
        kind: IdKind,
        ignored: Vec<RangeInclusive<u32>>,
    },
    Used {
        level_path: PathBuf,
        kind: IdKind,
    },
}

/// Parses `[options] <subcommand> <level> --kind <kind> [args...]`.
pub fn parse_command_line(args: &[String]) -> Result<(CommandKind, ToolOptions), String> {
    let mut options = ToolOptions::default();
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "--dry-run" => {
                options.dry_run = true;
                index += 1;
            }
            "--pretty" => {
                options.pretty = true;
                index += 1;
            }
            "--output" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --output".to_string())?;
                options.output = Some(PathBuf::from(value));
                index += 2;
            }
            _ => break,
        }
    }

    let command = args
        .get(index)
        .ok_or_else(|| "missing subcommand".to_string())?
        .as_str();
    let level_path = args
        .get(index + 1)
        .filter(|arg| !arg.starts_with("--"))
        .map(PathBuf::from)
        .ok_or_else(|| format!("{command} requires a level file path"))?;
    let rest = &args[(index + 2)..];

    let mut kind = None;
    let mut steps = Vec::new();
    let mut steps_file = None;
    let mut ignored = Vec::new();
    let mut cursor = 0usize;
    while cursor < rest.len() {
        let arg = rest[cursor].as_str();
        let value = || {
            rest.get(cursor + 1)
                .ok_or_else(|| format!("missing value for {arg}"))
        };
        match (command, arg) {
            (_, "--kind") => {
                let raw = value()?;
                kind = Some(raw.parse::<IdKind>().map_err(|error| error.to_string())?);
                cursor += 2;
            }
            ("migrate", "--steps-file") => {
                steps_file = Some(PathBuf::from(value()?));
                cursor += 2;
            }
            ("compact", "--ignore") => {
                ignored.extend(parse_ignore_list(value()?)?);
                cursor += 2;
            }
            ("migrate", step) if !step.starts_with("--") => {
                steps.push(
                    step.parse::<SourceTargetRange>()
                        .map_err(|error| format!("invalid step '{step}': {error}"))?,
                );
                cursor += 1;
            }
            _ => return Err(format!("unknown {command} argument '{arg}'")),
        }
    }
    let kind = kind.ok_or_else(|| format!("{command} requires --kind <group|color|item|block>"))?;

    let parsed = match command {
        "migrate" => {
            if steps.is_empty() && steps_file.is_none() {
                return Err("migrate requires at least one step or --steps-file".to_string());
            }
            CommandKind::Migrate {
                level_path,
                kind,
                steps,
                steps_file,
            }
        }
        "compact" => CommandKind::Compact {
            level_path,
            kind,
            ignored,
        },
        "used" => CommandKind::Used { level_path, kind },
        other => return Err(format!("unknown subcommand '{other}'")),
    };
    Ok((parsed, options))
}

/// Comma-separated inclusive spans, e.g. `1000-1012,30`.
pub fn parse_ignore_list(raw: &str) -> Result<Vec<RangeInclusive<u32>>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            parse_inclusive_span(entry).map_err(|error| format!("invalid ignored range: {error}"))
        })
        .collect()
}

pub fn ignore_list_from_env() -> Result<Vec<RangeInclusive<u32>>, String> {
    ignore_list_from_var(env::var(IGNORE_ENV_VAR))
}

fn ignore_list_from_var(
    value: Result<String, env::VarError>,
) -> Result<Vec<RangeInclusive<u32>>, String> {
    match value {
        Ok(raw) => parse_ignore_list(&raw),
        Err(env::VarError::NotPresent) => Ok(Vec::new()),
        Err(error) => Err(format!("failed to read {IGNORE_ENV_VAR}: {error}")),
    }
}

pub fn run<W: Write>(command: CommandKind, options: &ToolOptions, stdout: &mut W) -> Result<(), String> {
    match command {
        CommandKind::Migrate {
            level_path,
            kind,
            mut steps,
            steps_file,
        } => {
            if let Some(path) = steps_file {
                let content = fs::read_to_string(&path)
                    .map_err(|error| format!("read steps file '{}': {error}", path.display()))?;
                steps.extend(
                    parse_steps(&content)
                        .map_err(|error| format!("parse steps file '{}': {error}", path.display()))?,
                );
            }
            let mut level = open_level(&level_path)?;
            let report = level
                .perform_migration(kind, &steps)
                .map_err(|error| format!("{kind} migration failed: {error}"))?;
            finish_edit(&level, &level_path, &report, options, stdout)
        }
        CommandKind::Compact {
            level_path,
            kind,
            ignored,
        } => {
            let ignored = if ignored.is_empty() {
                ignore_list_from_env()?
            } else {
                ignored
            };
            let ignored = IntervalSet::from_inclusive(ignored);
            let mut level = open_level(&level_path)?;
            let report = level
                .compactly_reallocate_ids_excluding(kind, &ignored)
                .map_err(|error| format!("{kind} compaction failed: {error}"))?;
            finish_edit(&level, &level_path, &report, options, stdout)
        }
        CommandKind::Used { level_path, kind } => {
            let level = open_level(&level_path)?;
            let used = level.used_ids(kind);
            let listed = used
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            writeln!(
                stdout,
                "kind={kind} count={} first_unused={} ids={listed}",
                used.len(),
                level.first_unused_id(kind)
            )
            .map_err(|error| format!("write output: {error}"))
        }
    }
}

fn open_level(path: &Path) -> Result<Level, String> {
    load_level(path).map_err(|error| error.to_string())
}

fn finish_edit<W: Write>(
    level: &Level,
    level_path: &Path,
    report: &RemapReport,
    options: &ToolOptions,
    stdout: &mut W,
) -> Result<(), String> {
    writeln!(stdout, "{}", report.render_human_readable())
        .map_err(|error| format!("write output: {error}"))?;
    if options.dry_run {
        info!(kind = %report.kind, "dry_run_skipping_save");
        return Ok(());
    }
    let destination = options.output.as_deref().unwrap_or(level_path);
    save_level(
        destination,
        level,
        SaveOptions {
            pretty: options.pretty,
        },
    )
    .map_err(|error| error.to_string())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use level_engine::{ColorChannel, IdField, LevelObject, ObjectData};
    use tempfile::TempDir;

    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn write_sample(path: &Path) {
        let mut level = Level::new("tool");
        level.add_objects([
            LevelObject::new(1, ObjectData::general(10, 20)).with_groups([30, 40]),
            LevelObject::new(901, ObjectData::move_trigger(50)),
        ]);
        level
            .colors_mut()
            .insert(10, ColorChannel::copying(20))
            .expect("insert");
        save_level(path, &level, SaveOptions::default()).expect("save");
    }

    #[test]
    fn parses_migrate_with_options_and_steps() {
        let (command, options) = parse_command_line(&args(&[
            "--dry-run", "--output", "out.json", "migrate", "in.json", "--kind", "color", "1-5>26",
            "7>9",
        ]))
        .expect("parse");
        assert!(options.dry_run);
        assert_eq!(options.output, Some(PathBuf::from("out.json")));
        match command {
            CommandKind::Migrate { kind, steps, .. } => {
                assert_eq!(kind, IdKind::Color);
                assert_eq!(steps.len(), 2);
                assert_eq!(steps[1], SourceTargetRange::single(7, 9));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_incomplete_command_lines() {
        for raw in [
            vec![],
            vec!["migrate", "in.json", "--kind", "group"],
            vec!["compact", "in.json"],
            vec!["used", "--kind", "group"],
            vec!["compact", "in.json", "--kind", "group", "1-5>6"],
            vec!["explode", "in.json", "--kind", "group"],
        ] {
            assert!(parse_command_line(&args(&raw)).is_err(), "args={raw:?}");
        }
    }

    #[test]
    fn ignore_list_accepts_single_values_and_spans() {
        assert_eq!(
            parse_ignore_list("1000-1012, 30,,"),
            Ok(vec![1000..=1012, 30..=30])
        );
        assert!(parse_ignore_list("12-3").is_err());
    }

    #[test]
    fn compact_rewrites_the_level_file() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("level.json");
        write_sample(&path);

        let (command, options) = parse_command_line(&args(&[
            "compact",
            path.to_str().expect("utf8 path"),
            "--kind",
            "group",
            "--ignore",
            "4000-4010",
        ]))
        .expect("parse");
        let mut out = Vec::new();
        run(command, &options, &mut out).expect("run");

        let level = load_level(&path).expect("reload");
        assert_eq!(level.objects()[0].group_ids, vec![1, 2]);
        assert_eq!(level.objects()[1].id_field(IdField::TargetGroup), Some(3));
        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.starts_with("kind=group rewritten_values=3"), "{printed}");
    }

    #[test]
    fn compact_falls_back_to_ignored_ranges_from_the_environment() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("level.json");
        write_sample(&path);

        env::set_var(IGNORE_ENV_VAR, "50-60");
        let result = run(
            CommandKind::Compact {
                level_path: path.clone(),
                kind: IdKind::Group,
                ignored: Vec::new(),
            },
            &ToolOptions::default(),
            &mut Vec::new(),
        );
        env::remove_var(IGNORE_ENV_VAR);
        result.expect("run");

        let level = load_level(&path).expect("reload");
        assert_eq!(level.objects()[0].group_ids, vec![1, 2]);
        assert_eq!(level.objects()[1].id_field(IdField::TargetGroup), Some(50));
    }

    #[test]
    fn ignore_variable_states_map_to_ranges_or_errors() {
        assert_eq!(ignore_list_from_var(Err(env::VarError::NotPresent)), Ok(Vec::new()));
        assert_eq!(
            ignore_list_from_var(Ok("7, 1000-1002".to_string())),
            Ok(vec![7..=7, 1000..=1002])
        );
        let error = ignore_list_from_var(Err(env::VarError::NotUnicode(OsString::from("x"))))
            .expect_err("not unicode");
        assert!(error.contains(IGNORE_ENV_VAR), "{error}");
        assert!(ignore_list_from_var(Ok("9-3".to_string())).is_err());
    }

    #[test]
    fn dry_run_migration_leaves_the_file_alone() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("level.json");
        write_sample(&path);
        let before = fs::read_to_string(&path).expect("read");

        let command = CommandKind::Migrate {
            level_path: path.clone(),
            kind: IdKind::Color,
            steps: vec![SourceTargetRange::new(10, 20, 110).expect("step")],
            steps_file: None,
        };
        let options = ToolOptions {
            dry_run: true,
            ..ToolOptions::default()
        };
        let mut out = Vec::new();
        run(command, &options, &mut out).expect("run");

        assert_eq!(fs::read_to_string(&path).expect("read"), before);
        let printed = String::from_utf8(out).expect("utf8");
        assert!(printed.contains("relocated_channels=1"), "{printed}");
    }

    #[test]
    fn steps_file_migration_writes_to_output_path() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("level.json");
        let output = temp.path().join("migrated.json");
        let steps = temp.path().join("steps.txt");
        write_sample(&path);
        fs::write(&steps, "# move colors up\n10>110\n20>120\n").expect("steps");

        let command = CommandKind::Migrate {
            level_path: path.clone(),
            kind: IdKind::Color,
            steps: Vec::new(),
            steps_file: Some(steps),
        };
        let options = ToolOptions {
            output: Some(output.clone()),
            ..ToolOptions::default()
        };
        run(command, &options, &mut Vec::new()).expect("run");

        let migrated = load_level(&output).expect("load output");
        let channel = migrated.colors().get(110).expect("relocated");
        assert_eq!(channel.copied_color_id, 120);
        assert_eq!(
            migrated.objects()[0].id_field(IdField::DetailColor),
            Some(120)
        );
        let original = load_level(&path).expect("load original");
        assert!(original.colors().get(10).is_some());
    }

    #[test]
    fn used_reports_ids_and_first_gap() {
        let temp = TempDir::new().expect("temp");
        let path = temp.path().join("level.json");
        write_sample(&path);
        let mut out = Vec::new();
        run(
            CommandKind::Used {
                level_path: path,
                kind: IdKind::Color,
            },
            &ToolOptions::default(),
            &mut out,
        )
        .expect("run");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "kind=color count=2 first_unused=1 ids=10,20\n"
        );
    }
}
