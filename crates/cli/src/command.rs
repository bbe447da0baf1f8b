//! crates/cli/src/command.rs
//!
//! Command-line grammar and its translation into typed invocations.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use logging::VerbosityConfig;
use protocol::Protocol;

use crate::commands::ReplayOptions;

/// Program name used in help output.
pub const PROGRAM_NAME: &str = "statewire";

/// A fully parsed command line.
#[derive(Debug)]
pub(crate) struct Invocation {
    pub(crate) verbose: u8,
    pub(crate) debug_flags: Vec<String>,
    pub(crate) action: Action,
}

/// The subcommand to run.
#[derive(Debug)]
pub(crate) enum Action {
    Segment(SegmentArgs),
    Interpret(InterpretArgs),
    Convert(ConvertArgs),
    Replay(ReplayArgs),
}

#[derive(Debug)]
pub(crate) struct SegmentArgs {
    pub(crate) protocol: Protocol,
    pub(crate) seed: PathBuf,
    pub(crate) report: Option<PathBuf>,
    pub(crate) replay_out: Option<PathBuf>,
    pub(crate) max_count: usize,
}

#[derive(Debug)]
pub(crate) struct InterpretArgs {
    pub(crate) protocol: Protocol,
    pub(crate) response: PathBuf,
    pub(crate) json: bool,
}

#[derive(Debug)]
pub(crate) struct ConvertArgs {
    pub(crate) replay: PathBuf,
    pub(crate) output: PathBuf,
    pub(crate) max_count: usize,
    pub(crate) force: bool,
}

#[derive(Debug)]
pub(crate) struct ReplayArgs {
    pub(crate) protocol: Protocol,
    pub(crate) endpoint: String,
    pub(crate) replay: PathBuf,
    pub(crate) response_out: Option<PathBuf>,
    pub(crate) options: ReplayOptions,
}

impl Invocation {
    /// Verbosity derived from `-v` counts and `--debug` flags.
    pub(crate) fn verbosity(&self) -> Result<VerbosityConfig, logging::FlagError> {
        let mut config = VerbosityConfig::from_verbose_level(self.verbose);
        for flags in &self.debug_flags {
            config.apply_debug_flags(flags)?;
        }
        Ok(config)
    }
}

fn protocol_arg() -> Arg {
    Arg::new("protocol")
        .long("protocol")
        .short('P')
        .value_name("PROTO")
        .help("Application protocol: RTSP, FTP or DTLS12.")
        .required(true)
        .value_parser(|value: &str| value.parse::<Protocol>())
}

fn max_count_arg() -> Arg {
    Arg::new("max-count")
        .long("max-count")
        .value_name("N")
        .help("Write at most N messages.")
        .value_parser(value_parser!(usize))
}

#[cfg(feature = "serde")]
fn json_arg() -> Option<Arg> {
    Some(
        Arg::new("json")
            .long("json")
            .help("Print the state sequence as JSON.")
            .action(ArgAction::SetTrue),
    )
}

#[cfg(not(feature = "serde"))]
fn json_arg() -> Option<Arg> {
    None
}

fn millis_arg(name: &'static str, help: &'static str, default: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("MS")
        .help(help)
        .default_value(default)
        .value_parser(value_parser!(u64))
}

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Segment protocol seeds, interpret server responses and replay message sequences.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging verbosity (repeatable).")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Set per-subsystem levels, e.g. segment2,transport or all3.")
                .action(ArgAction::Append)
                .global(true),
        )
        .subcommand(
            Command::new("segment")
                .about("Split a seed into request regions and print them.")
                .arg(protocol_arg())
                .arg(
                    Arg::new("seed")
                        .value_name("SEED")
                        .help("Seed or captured client stream.")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .value_name("FILE")
                        .help("Also write the region report to FILE (must not exist).")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("replay-out")
                        .long("replay-out")
                        .value_name("FILE")
                        .help("Write the messages as a replay file (must not exist).")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(max_count_arg()),
        )
        .subcommand(
            Command::new("interpret")
                .about("Reduce a captured server response to its state sequence.")
                .arg(protocol_arg())
                .arg(
                    Arg::new("response")
                        .value_name("RESPONSE")
                        .help("Captured server response bytes.")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .args(json_arg()),
        )
        .subcommand(
            Command::new("convert")
                .about("Export a replay file as raw concatenated messages.")
                .arg(
                    Arg::new("replay")
                        .value_name("REPLAY")
                        .help("Replay file to read.")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("output")
                        .value_name("OUTPUT")
                        .help("Raw file to write.")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(max_count_arg())
                .arg(
                    Arg::new("force")
                        .long("force")
                        .short('f')
                        .help("Overwrite OUTPUT if it exists.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("replay")
                .about("Send a replay file to a live server and interpret its responses.")
                .arg(protocol_arg())
                .arg(
                    Arg::new("netinfo")
                        .long("netinfo")
                        .short('N')
                        .value_name("ENDPOINT")
                        .help("Server under test, as <tcp|udp>:/<host>/<port>.")
                        .required(true),
                )
                .arg(
                    Arg::new("replay")
                        .value_name("REPLAY")
                        .help("Replay file to send.")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(millis_arg(
                    "poll-wait",
                    "Wait up to MS milliseconds for each response.",
                    "1",
                ))
                .arg(millis_arg(
                    "timeout",
                    "Socket send/receive timeout in milliseconds.",
                    "1",
                ))
                .arg(millis_arg(
                    "connect-timeout",
                    "TCP connect timeout in milliseconds.",
                    "1000",
                ))
                .arg(max_count_arg().help("Send at most N messages."))
                .arg(
                    Arg::new("response-out")
                        .long("response-out")
                        .value_name("FILE")
                        .help("Save the raw response bytes to FILE (overwritten).")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
}

/// Parses command-line arguments into an [`Invocation`].
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;
    let missing = || {
        clap_command().error(
            clap::error::ErrorKind::MissingSubcommand,
            "a subcommand is required",
        )
    };
    let Some((name, mut sub)) = matches.remove_subcommand() else {
        return Err(missing());
    };

    // Global options are propagated into the subcommand's matches.
    let verbose = sub.get_count("verbose");
    let debug_flags = sub
        .remove_many::<String>("debug")
        .map(Iterator::collect)
        .unwrap_or_default();
    let action = parse_action(&name, sub).ok_or_else(missing)?;

    Ok(Invocation {
        verbose,
        debug_flags,
        action,
    })
}

fn parse_action(name: &str, mut sub: ArgMatches) -> Option<Action> {
    let max_count = sub
        .try_remove_one::<usize>("max-count")
        .ok()
        .flatten()
        .unwrap_or(usize::MAX);

    let action = match name {
        "segment" => Action::Segment(SegmentArgs {
            protocol: sub.remove_one("protocol")?,
            seed: sub.remove_one("seed")?,
            report: sub.remove_one("report"),
            replay_out: sub.remove_one("replay-out"),
            max_count,
        }),
        "interpret" => Action::Interpret(InterpretArgs {
            protocol: sub.remove_one("protocol")?,
            response: sub.remove_one("response")?,
            json: cfg!(feature = "serde") && sub.get_flag("json"),
        }),
        "convert" => Action::Convert(ConvertArgs {
            replay: sub.remove_one("replay")?,
            output: sub.remove_one("output")?,
            max_count,
            force: sub.get_flag("force"),
        }),
        "replay" => {
            let millis = |sub: &mut ArgMatches, id: &str| {
                sub.remove_one::<u64>(id).map(Duration::from_millis)
            };
            let options = ReplayOptions::default()
                .with_poll_wait(millis(&mut sub, "poll-wait")?)
                .with_socket_timeout(millis(&mut sub, "timeout")?)
                .with_connect_timeout(millis(&mut sub, "connect-timeout")?)
                .with_max_count(max_count);
            Action::Replay(ReplayArgs {
                protocol: sub.remove_one("protocol")?,
                endpoint: sub.remove_one("netinfo")?,
                replay: sub.remove_one("replay")?,
                response_out: sub.remove_one("response-out"),
                options,
            })
        }
        _ => return None,
    };
    Some(action)
}
