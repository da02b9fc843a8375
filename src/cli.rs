//! CLI argument definition for cssink.
//!
//! Flags follow Go's `flag` conventions: `-n`, `-c <path>`, and the
//! single-dash long forms `-version` / `-help`, which are rewritten to
//! their double-dash spelling before clap sees them. Flag parsing stops
//! at the first positional argument, so `cssink parse -n` reads a file
//! named `-n`.

use std::ffi::OsString;

use clap::Parser;

/// Parse CSS stylesheets and inline CSS into HTML.
#[derive(Parser, Debug)]
#[command(name = "cssink", about = "Parse CSS or inline it into HTML", disable_version_flag = true)]
pub struct Cli {
    /// Display version.
    #[arg(long)]
    pub version: bool,

    /// Don't inline obsolete attributes like bgcolor & valign.
    #[arg(short = 'n')]
    pub no_attributes: bool,

    /// Include external stylesheet when inlining.
    #[arg(short = 'c', value_name = "PATH")]
    pub css_path: Option<String>,

    /// Action to perform: parse or inline.
    pub action: Option<String>,

    /// Input file (reads stdin when omitted).
    pub path: Option<String>,

    /// Extra positional arguments are accepted and ignored.
    #[arg(hide = true)]
    pub extra: Vec<String>,
}

/// Long flags that may also be written with a single dash.
const SINGLE_DASH_LONG_FLAGS: &[&str] = &["version", "help"];

/// Short flags whose value is the following argument.
const VALUE_FLAGS: &[&str] = &["c"];

/// Rewrites `-version` / `-help` (optionally with `=value`) to the
/// double-dash form and inserts `--` before the first positional
/// argument. Arguments after an explicit `--` are left untouched.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut takes_value = false;

    for arg in args.by_ref() {
        if takes_value {
            takes_value = false;
            normalized.push(arg);
            continue;
        }
        let text = arg.to_string_lossy().into_owned();
        if text == "--" {
            normalized.push(arg);
            break;
        }
        let Some(flag) = text.strip_prefix('-').filter(|rest| !rest.is_empty()) else {
            normalized.push(OsString::from("--"));
            normalized.push(arg);
            break;
        };
        let name = flag.split('=').next().unwrap_or(flag);
        if !flag.starts_with('-') && SINGLE_DASH_LONG_FLAGS.contains(&name) {
            normalized.push(OsString::from(format!("-{text}")));
        } else {
            takes_value = VALUE_FLAGS.contains(&name) && !flag.contains('=');
            normalized.push(arg);
        }
    }

    normalized.extend(args);
    normalized
}

/// Name to show in usage text: how the tool was invoked, falling back
/// to `fallback` when the OS gives no `argv[0]`.
pub fn program_name<I>(args: I, fallback: &str) -> String
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}

/// Usage lines printed after a usage error.
pub fn usage(program: &str) -> String {
    format!(
        "Help: {program} -h\n\
         Usage: {program} (parse|inline) /path/to/file\n\
         Usage: {program} (parse|inline) < /path/to/file\n"
    )
}
