//! crates/cli/src/commands/interpret.rs
//!
//! `statewire interpret`: reduce a captured response to its state sequence.

use std::io::Write;

use protocol::{Protocol, StateSequence};

use super::read_input;
use crate::command::InterpretArgs;
use crate::error::CliResult;

pub(crate) fn run<W: Write>(args: &InterpretArgs, stdout: &mut W) -> CliResult<()> {
    let response = read_input(&args.response)?;
    let states = args.protocol.interpret(&response);

    if args.json {
        write_json(args.protocol, &states, stdout)
    } else {
        write_states(&states, stdout)
    }
}

/// Prints the state count, the codes and the label, one per line.
pub(crate) fn write_states<W: Write>(states: &StateSequence, stdout: &mut W) -> CliResult<()> {
    let codes: Vec<String> = states.codes().iter().map(u32::to_string).collect();
    writeln!(stdout, "states: {}", states.state_count())?;
    writeln!(stdout, "sequence: {}", codes.join(" "))?;
    writeln!(stdout, "label: {}", states.label())?;
    Ok(())
}

#[cfg(feature = "serde")]
fn write_json<W: Write>(protocol: Protocol, states: &StateSequence, stdout: &mut W) -> CliResult<()> {
    let document = serde_json::json!({
        "protocol": protocol,
        "states": states.codes(),
        "label": states.label(),
    });
    serde_json::to_writer_pretty(&mut *stdout, &document).map_err(std::io::Error::from)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn write_json<W: Write>(_: Protocol, states: &StateSequence, stdout: &mut W) -> CliResult<()> {
    write_states(states, stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(protocol: Protocol, response: &[u8]) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.bin");
        std::fs::write(&path, response).unwrap();

        let mut stdout = Vec::new();
        run(
            &InterpretArgs {
                protocol,
                response: path,
                json: false,
            },
            &mut stdout,
        )
        .unwrap();
        String::from_utf8(stdout).unwrap()
    }

    #[test]
    fn ftp_reply_lines_become_states() {
        assert_eq!(
            interpret(Protocol::Ftp, b"220 ready\r\n230 OK\r\n"),
            "states: 3\nsequence: 0 220 230\nlabel: 0-220-230\n"
        );
    }

    #[test]
    fn empty_response_keeps_sentinel() {
        assert_eq!(
            interpret(Protocol::Rtsp, b""),
            "states: 1\nsequence: 0\nlabel: 0\n"
        );
    }
}
