//! crates/cli/src/commands/convert.rs
//!
//! `statewire convert`: export a replay file as raw concatenated messages.

use std::io::Write;

use sequence::{Framing, MessageSequence, WriteMode};

use crate::command::ConvertArgs;
use crate::error::CliResult;

pub(crate) fn run<W: Write>(args: &ConvertArgs, stdout: &mut W) -> CliResult<()> {
    let sequence = MessageSequence::from_replay_file(&args.replay)?;
    let mode = if args.force {
        WriteMode::Overwrite
    } else {
        WriteMode::CreateNew
    };

    let written = sequence.persist(&args.output, Framing::Raw, args.max_count, mode)?;
    writeln!(
        stdout,
        "wrote {} messages ({written} bytes) to {}",
        sequence.len().min(args.max_count),
        args.output.display()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use sequence::SequenceError;

    fn replay_file(dir: &std::path::Path) -> std::path::PathBuf {
        let mut sequence = MessageSequence::new();
        sequence.push(&b"USER ftp\r\n"[..]);
        sequence.push(&b"QUIT\r\n"[..]);
        let path = dir.join("session.replay");
        sequence
            .persist(&path, Framing::Replay, usize::MAX, WriteMode::CreateNew)
            .unwrap();
        path
    }

    #[test]
    fn writes_unframed_payloads() {
        let dir = tempfile::tempdir().unwrap();
        let replay = replay_file(dir.path());
        let output = dir.path().join("session.raw");

        let mut stdout = Vec::new();
        run(
            &ConvertArgs {
                replay,
                output: output.clone(),
                max_count: 1,
                force: false,
            },
            &mut stdout,
        )
        .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"USER ftp\r\n");
        assert!(String::from_utf8(stdout).unwrap().starts_with("wrote 1 messages (10 bytes)"));
    }

    #[test]
    fn existing_output_requires_force() {
        let dir = tempfile::tempdir().unwrap();
        let replay = replay_file(dir.path());
        let output = dir.path().join("session.raw");
        std::fs::write(&output, b"old").unwrap();

        let mut args = ConvertArgs {
            replay,
            output: output.clone(),
            max_count: usize::MAX,
            force: false,
        };
        let err = run(&args, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Sequence(SequenceError::Persist { .. })));

        args.force = true;
        run(&args, &mut Vec::new()).unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"USER ftp\r\nQUIT\r\n");
    }
}
