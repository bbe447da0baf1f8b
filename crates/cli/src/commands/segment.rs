//! crates/cli/src/commands/segment.rs
//!
//! `statewire segment`: split a seed into request regions.

use std::io::Write;

use protocol::{format_region_report, write_region_report};
use sequence::{Framing, MessageSequence, WriteMode};

use super::read_input;
use crate::command::SegmentArgs;
use crate::error::{CliError, CliResult};

pub(crate) fn run<W: Write>(args: SegmentArgs, stdout: &mut W) -> CliResult<()> {
    let seed = read_input(&args.seed)?;
    let regions = args.protocol.segment(&seed);

    format_region_report(&regions, &mut *stdout)?;

    if let Some(path) = args.report {
        write_region_report(&regions, &path).map_err(|source| CliError::Write { path, source })?;
    }

    if let Some(path) = args.replay_out {
        let sequence = MessageSequence::from_reader(seed.as_slice(), &regions)?;
        sequence.persist(&path, Framing::Replay, args.max_count, WriteMode::CreateNew)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Protocol;

    #[test]
    fn prints_report_and_writes_replay_file() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.raw");
        std::fs::write(&seed, b"PWD\r\nLS\r\n").unwrap();
        let replay = dir.path().join("seed.replay");

        let mut stdout = Vec::new();
        run(
            SegmentArgs {
                protocol: Protocol::Ftp,
                seed,
                report: None,
                replay_out: Some(replay.clone()),
                max_count: usize::MAX,
            },
            &mut stdout,
        )
        .unwrap();

        assert_eq!(stdout, b"Region 0 - Start: 0, End: 4\nRegion 1 - Start: 5, End: 8\n");
        let sequence = MessageSequence::from_replay_file(&replay).unwrap();
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.get(1).unwrap().data(), b"LS\r\n");
    }

    #[test]
    fn missing_seed_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(
            SegmentArgs {
                protocol: Protocol::Rtsp,
                seed: dir.path().join("absent"),
                report: None,
                replay_out: None,
                max_count: usize::MAX,
            },
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }
}
