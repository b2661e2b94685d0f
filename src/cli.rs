// src/cli.rs
use std::{env, io::Write, path::PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::{
    auth::check_password,
    config::{consts::HISTORY_LIMIT, options::AppConfig},
    core::dates::extract_date_from_filename,
    pipeline,
    progress::Progress,
    store::{HistoryEntry, Store, UNKNOWN_DATE},
};

type BoxErr = Box<dyn std::error::Error>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Show { search: Option<String> },
    Import { file: PathBuf, password: String },
    Process { file: PathBuf, out: Option<PathBuf> },
    History { password: String },
    Date { filename: String },
    Help,
}

impl Command {
    /// For logs; never includes the password.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Show { .. } => "show",
            Command::Import { .. } => "import",
            Command::Process { .. } => "process",
            Command::History { .. } => "history",
            Command::Date { .. } => "date",
            Command::Help => "help",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliArgs {
    pub data_dir: Option<PathBuf>,
    pub command: Command,
}

/// Prints import steps to stderr.
struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) { eprintln!("{msg}"); }
    fn step_done(&mut self, step: &str) { eprintln!("  ✓ {step}"); }
}

pub fn run() -> Result<(), BoxErr> {
    let args = parse_args(env::args().skip(1))?;
    execute(args, &mut std::io::stdout())
}

pub fn parse_args<I>(args: I) -> Result<CliArgs, BoxErr>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut data_dir = None;
    let mut positional: Vec<String> = Vec::new();
    let mut search = None;
    let mut password = None;
    let mut out = None;

    while let Some(a) = args.next() {
        match a.as_str() {
            "--data-dir" => data_dir = Some(PathBuf::from(args.next().ok_or("Missing value for --data-dir")?)),
            "--search" | "-s" => search = Some(args.next().ok_or("Missing value for --search")?),
            "--password" | "-p" => password = Some(args.next().ok_or("Missing value for --password")?),
            "-o" | "--out" => out = Some(PathBuf::from(args.next().ok_or("Missing output path")?)),
            "-h" | "--help" => return Ok(CliArgs { data_dir, command: Command::Help }),
            s if s.starts_with('-') => return Err(format!("Unknown arg: {}", a).into()),
            _ => positional.push(a),
        }
    }

    let mut pos = positional.into_iter();
    let Some(cmd) = pos.next() else {
        return Ok(CliArgs { data_dir, command: Command::Help });
    };
    let mut operand = |what: &str| -> Result<String, BoxErr> {
        pos.next().ok_or_else(|| format!("Missing {what} for `{cmd}`").into())
    };

    let command = match cmd.as_str() {
        "show" => Command::Show { search },
        "import" => Command::Import {
            file: PathBuf::from(operand("<file>")?),
            password: password.ok_or("`import` needs --password")?,
        },
        "process" => Command::Process { file: PathBuf::from(operand("<file>")?), out },
        "history" => Command::History { password: password.ok_or("`history` needs --password")? },
        "date" => Command::Date { filename: operand("<filename>")? },
        other => return Err(format!("Unknown command: {}", other).into()),
    };
    if let Some(extra) = pos.next() {
        return Err(format!("Unexpected argument: {}", extra).into());
    }

    Ok(CliArgs { data_dir, command })
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn config_for(args: &CliArgs) -> AppConfig {
    let cfg = AppConfig::detect();
    match &args.data_dir {
        Some(d) => cfg.with_data_dir(d),
        None => cfg,
    }
}

pub fn execute<W: Write>(args: CliArgs, out: &mut W) -> Result<(), BoxErr> {
    let cfg = config_for(&args);
    crate::log::set_log_file(cfg.paths.log_file());
    logf!("CLI: {}", args.command.name());

    match args.command {
        Command::Help => {
            writeln!(out, "{}", include_str!("cli_help.txt"))?;
        }
        Command::Date { filename } => match extract_date_from_filename(&filename) {
            Some(d) => writeln!(out, "{d}")?,
            None => return Err(format!("No valid date in {:?}", filename).into()),
        },
        Command::Process { file, out: target } => {
            let ds = pipeline::process_file(&file, now())?;
            let text = pipeline::render_snapshot(&ds);
            match target {
                Some(path) => {
                    crate::file::write_bom_csv(&path, &text)?;
                    eprintln!("Wrote {} rows to {}", ds.len(), path.display());
                }
                None => out.write_all(text.as_bytes())?,
            }
        }
        Command::Import { file, password } => {
            require_password(&password, &cfg)?;
            let store = Store::open(&cfg)?;
            let bytes = std::fs::read(&file)?;
            let name = file.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            let report = store.import_upload(&name, &bytes, now(), &mut CliProgress)?;
            writeln!(
                out,
                "Imported {} as {}: {} of {} rows published",
                file.display(), report.upload.date, report.rows_out, report.rows_in
            )?;
        }
        Command::History { password } => {
            require_password(&password, &cfg)?;
            let h = Store::new(&cfg).history(HISTORY_LIMIT)?;
            print_history(out, "Uploaded", &h.uploaded)?;
            print_history(out, "Processed", &h.processed)?;
        }
        Command::Show { search } => {
            let store = Store::new(&cfg);
            store.ensure_latest(now())?;
            let Some(snap) = store.load_latest()? else {
                writeln!(out, "No data yet.")?;
                return Ok(());
            };
            logd!("CLI: showing {}", snap.path().display());
            let dash = snap.dashboard();
            let view = dash.search(search.as_deref().unwrap_or(""));

            writeln!(out, "数据日期: {}", snap.data_date.as_deref().unwrap_or(UNKNOWN_DATE))?;
            if view.is_empty() {
                if let Some(kw) = search.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
                    writeln!(out, "未找到包含 \"{}\" 的指数。", kw)?;
                }
                return Ok(());
            }
            writeln!(out, "{}", crate::dashboard::DISPLAY_COLUMNS.join("\t"))?;
            for cells in view.numbered_cells() {
                writeln!(out, "{}", cells.join("\t"))?;
            }
        }
    }
    Ok(())
}

fn require_password(input: &str, cfg: &AppConfig) -> Result<(), BoxErr> {
    if check_password(input, &cfg.upload_password) {
        Ok(())
    } else {
        loge!("CLI: wrong password");
        Err("密码错误".into())
    }
}

fn print_history<W: Write>(out: &mut W, title: &str, entries: &[HistoryEntry]) -> Result<(), BoxErr> {
    writeln!(out, "{title}:")?;
    if entries.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for e in entries {
        writeln!(out, "  {}\t{}\t{}", e.name, e.modified, e.size)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(v: &[&str]) -> Result<CliArgs, BoxErr> {
        parse_args(v.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse(&[]).unwrap().command, Command::Help);
        assert_eq!(
            parse(&["show", "--search", "白酒"]).unwrap().command,
            Command::Show { search: Some(s!("白酒")) }
        );
        let a = parse(&["--data-dir", "/x", "import", "a.csv", "--password", "pw"]).unwrap();
        assert_eq!(a.data_dir, Some(PathBuf::from("/x")));
        assert_eq!(a.command, Command::Import { file: PathBuf::from("a.csv"), password: s!("pw") });
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["import", "a.csv"]).is_err());
        assert!(parse(&["process"]).is_err());
        assert!(parse(&["frobnicate"]).is_err());
        assert!(parse(&["show", "--bogus"]).is_err());
        assert!(parse(&["date", "a", "b"]).is_err());
    }

    #[test]
    fn wrong_password_is_checked_against_config() {
        let mut dir = std::env::temp_dir();
        dir.push("fund_temp_cli_wrong_password");
        let _ = std::fs::remove_dir_all(&dir);
        let file = dir.join("2025-12-24.csv");
        crate::file::write_file(&file, "指数名称,PE分位点,PB分位点\n沪深300,20%,40%\n".as_bytes()).unwrap();

        let dd = dir.join("data").to_string_lossy().into_owned();
        let fp = file.to_string_lossy().into_owned();
        let args = parse(&["--data-dir", dd.as_str(), "import", fp.as_str(), "--password", "not-the-password"]).unwrap();
        let mut buf = Vec::new();
        assert!(execute(args, &mut buf).is_err());
        assert!(!dir.join("data").join("latest_data.csv").exists());
    }

    #[test]
    fn date_command_prints_canonical_date() {
        let mut buf = Vec::new();
        let args = parse(&["date", "估值20251224.csv"]).unwrap();
        execute(args, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "2025-12-24\n");
    }
}
